use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Assignment of examples to cross-validation folds
///
/// Maps every example index to a fold in `[0, k)`. The assignment is generated once per
/// cross-validation run and stays fixed for its duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldAssignment {
    folds: Vec<usize>,
    k: usize,
}

impl FoldAssignment {
    /// Generates a stratified fold assignment
    ///
    /// The example indices are shuffled with a random number generator seeded by `seed`, then
    /// stably sorted by class and dealt round-robin into the folds. Each fold thus receives a
    /// share of every class proportional to its frequency, and fold sizes differ by at most one.
    ///
    /// ### Parameters
    ///
    /// * `targets`: the class of every example
    /// * `k`: the number of folds
    /// * `seed`: seed of the shuffle
    ///
    /// ### Returns
    ///
    /// The assignment or `Error::InvalidFoldCount` if `k < 2` or `k > targets.len()`
    pub fn stratified(targets: &[usize], k: usize, seed: u64) -> Result<Self> {
        let nsamples = targets.len();
        if k < 2 || k > nsamples {
            return Err(Error::InvalidFoldCount { k, nsamples });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut order = (0..nsamples).collect::<Vec<_>>();
        order.shuffle(&mut rng);
        order.sort_by_key(|idx| targets[*idx]);

        let mut folds = vec![0; nsamples];
        for (position, idx) in order.into_iter().enumerate() {
            folds[idx] = position % k;
        }

        Ok(FoldAssignment { folds, k })
    }

    /// The number of folds
    pub fn k(&self) -> usize {
        self.k
    }

    /// The number of assigned examples
    pub fn len(&self) -> usize {
        self.folds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folds.is_empty()
    }

    /// The fold of example `idx`
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn fold_of(&self, idx: usize) -> usize {
        self.folds[idx]
    }

    /// Indices of the examples held out in `fold`, in ascending order
    pub fn test_indices(&self, fold: usize) -> Vec<usize> {
        self.folds
            .iter()
            .enumerate()
            .filter(|(_, f)| **f == fold)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Indices of the examples used for training when `fold` is held out, in ascending order
    pub fn train_indices(&self, fold: usize) -> Vec<usize> {
        self.folds
            .iter()
            .enumerate()
            .filter(|(_, f)| **f != fold)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Number of examples in every fold
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k];
        for fold in &self.folds {
            sizes[*fold] += 1;
        }

        sizes
    }
}
