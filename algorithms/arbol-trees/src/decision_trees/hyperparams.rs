use arbol::{
    error::{Error, Result},
    ParamGuard,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::DecisionTree;

/// The metric used to choose the attribute by which a node is split
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitQuality {
    /// The information gain of a split divided by its split information, the entropy of the
    /// branch sizes. Penalises attributes which fragment the examples into many small branches.
    GainRatio,
    /// The entropy of a node minus the weighted entropy of its branches. Favours attributes with
    /// many distinct values.
    InformationGain,
}

/// The set of hyperparameters that can be specified for fitting a
/// [decision tree](struct.DecisionTree.html).
///
/// ### Example
///
/// ```rust
/// use arbol_trees::{DecisionTree, SplitQuality};
/// use arbol::prelude::*;
///
/// // Initialize the default set of parameters
/// let params = DecisionTree::params();
/// // Set the parameters to the desired values
/// let params = params.confidence(0.1).min_partition_size(4).max_depth(Some(5));
///
/// // Load the data
/// let dataset = arbol_datasets::weather();
/// // Fit the decision tree and estimate its accuracy with 3-fold cross-validation
/// let tree = params.fit(&dataset).unwrap();
/// let evaluation = dataset.cross_validate::<_, Error>(&params, 3, 1).unwrap();
/// assert_eq!(evaluation.total(), 14);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionTreeValidParams {
    split_quality: SplitQuality,
    min_partition_size: usize,
    confidence: f64,
    prune: bool,
    max_depth: Option<usize>,
}

impl DecisionTreeValidParams {
    pub fn split_quality(&self) -> SplitQuality {
        self.split_quality
    }

    pub fn min_partition_size(&self) -> usize {
        self.min_partition_size
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn prune(&self) -> bool {
        self.prune
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionTreeParams(DecisionTreeValidParams);

impl DecisionTreeParams {
    pub fn new() -> Self {
        Self(DecisionTreeValidParams {
            split_quality: SplitQuality::GainRatio,
            min_partition_size: 2,
            confidence: 0.25,
            prune: true,
            max_depth: None,
        })
    }

    /// Sets the metric used to decide the attribute on which to split a node
    pub fn split_quality(mut self, split_quality: SplitQuality) -> Self {
        self.0.split_quality = split_quality;
        self
    }

    /// Sets the minimum number of examples a node needs to be considered for splitting
    pub fn min_partition_size(mut self, min_partition_size: usize) -> Self {
        self.0.min_partition_size = min_partition_size;
        self
    }

    /// Sets the confidence factor of the pessimistic error estimate used during pruning
    ///
    /// Smaller values give more pessimistic estimates and therefore more pruning.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.0.confidence = confidence;
        self
    }

    /// Enables or disables post-pruning
    pub fn prune(mut self, prune: bool) -> Self {
        self.0.prune = prune;
        self
    }

    /// Sets the optional limit to the depth of the decision tree
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.0.max_depth = max_depth;
        self
    }
}

impl Default for DecisionTreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `split_quality = SplitQuality::GainRatio`
    /// * `min_partition_size = 2`
    /// * `confidence = 0.25`
    /// * `prune = true`
    /// * `max_depth = None`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> DecisionTreeParams {
        DecisionTreeParams::new()
    }
}

impl ParamGuard for DecisionTreeParams {
    type Checked = DecisionTreeValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.min_partition_size == 0 {
            Err(Error::Parameters(
                "Minimum partition size should be at least one".to_string(),
            ))
        } else if !(self.0.confidence > 0.0 && self.0.confidence <= 0.5) {
            Err(Error::Parameters(format!(
                "Pruning confidence should be in (0, 0.5], but was {}",
                self.0.confidence
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
