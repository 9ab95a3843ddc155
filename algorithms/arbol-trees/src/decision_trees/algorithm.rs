//! C4.5-style decision trees
//!
use std::collections::BTreeSet;
#[cfg(feature = "serde")]
use std::io::{Read, Write};

use ndarray::ArrayView1;
use statrs::distribution::{ContinuousCDF, Normal};

use super::criterion::{
    entropy, information_gain, split_information, threshold_penalty, AVERAGE_GAIN_SLACK,
    MIN_GAIN,
};
use super::pruning::leaf_errors;
use super::NodeIter;
use super::{DecisionTreeValidParams, SplitQuality};
use arbol::{
    dataset::{Attribute, Dataset},
    error::{Error, Result},
    traits::*,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// RowMask tracks examples
///
/// The tree builder partitions the examples of a node between its branches. A branch can then
/// only use the examples routed to it. In order to track that, the examples are masked with a
/// boolean vector, hiding all examples which do not reach a subtree.
#[derive(Clone)]
struct RowMask {
    mask: Vec<bool>,
    nsamples: usize,
}

impl RowMask {
    /// Generates a RowMask without hidden examples
    ///
    /// ### Parameters
    ///
    /// * `nsamples`: the total number of examples
    ///
    fn all(nsamples: usize) -> Self {
        RowMask {
            mask: vec![true; nsamples],
            nsamples,
        }
    }

    /// Generates a RowMask where all examples are hidden
    ///
    /// ### Parameters
    ///
    /// * `nsamples`: the total number of examples
    fn none(nsamples: usize) -> Self {
        RowMask {
            mask: vec![false; nsamples],
            nsamples: 0,
        }
    }

    /// Sets the example at the specified index as visible
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    ///
    fn mark(&mut self, idx: usize) {
        self.mask[idx] = true;
        self.nsamples += 1;
    }

    /// Indices of the visible examples in ascending order
    fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(idx, visible)| if *visible { Some(idx) } else { None })
    }
}

/// Known values of a numeric attribute sorted in ascending order, paired with their example index
struct SortedIndex {
    sorted_values: Vec<(usize, f64)>,
}

impl SortedIndex {
    /// Sorts the values of a numeric attribute, missing values are left out
    fn of_attribute(dataset: &Dataset, attribute: usize) -> Self {
        let mut sorted_values = (0..dataset.nsamples())
            .filter_map(|row| dataset.value(row, attribute).map(|value| (row, value)))
            .collect::<Vec<_>>();
        // stable sort, equal values stay in example order
        sorted_values.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        SortedIndex { sorted_values }
    }
}

/// The test applied by a split node to route an example to one of its children
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum SplitTest {
    /// Category equality, child `i` receives the examples with category `categories[i]`
    Nominal(Vec<usize>),
    /// Threshold comparison, the first child receives values `<= threshold`, the second the rest
    Threshold(f64),
}

impl SplitTest {
    /// Number of children of a split using this test
    pub fn num_branches(&self) -> usize {
        match self {
            SplitTest::Nominal(categories) => categories.len(),
            SplitTest::Threshold(_) => 2,
        }
    }

    /// Index of the branch taken by a known value, `None` for a category without branch
    pub fn branch(&self, value: f64) -> Option<usize> {
        match self {
            SplitTest::Nominal(categories) => categories
                .iter()
                .position(|category| *category as f64 == value),
            SplitTest::Threshold(threshold) => Some(if value <= *threshold { 0 } else { 1 }),
        }
    }
}

/// A node in the decision tree
///
/// Both variants record the class distribution of the training examples reaching the node and
/// its majority class. The majority class of a split node is the fallback prediction for examples
/// which cannot be routed to any of its children.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf {
        prediction: usize,
        distribution: Vec<usize>,
    },
    Split {
        attribute: usize,
        test: SplitTest,
        children: Vec<TreeNode>,
        prediction: usize,
        distribution: Vec<usize>,
    },
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Majority class of the training examples reaching this node
    pub fn prediction(&self) -> usize {
        match self {
            TreeNode::Leaf { prediction, .. } | TreeNode::Split { prediction, .. } => *prediction,
        }
    }

    /// Number of training examples per class reaching this node
    pub fn distribution(&self) -> &[usize] {
        match self {
            TreeNode::Leaf { distribution, .. } | TreeNode::Split { distribution, .. } => {
                distribution
            }
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Leaf { .. } => &[],
            TreeNode::Split { children, .. } => children,
        }
    }

    /// Attribute and test of a split node, `None` for leaves
    pub fn split(&self) -> Option<(usize, &SplitTest)> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split {
                attribute, test, ..
            } => Some((*attribute, test)),
        }
    }

    /// Number of training examples reaching this node
    pub fn covered(&self) -> usize {
        self.distribution().iter().sum()
    }

    /// Number of training examples reaching this node not of the majority class
    pub fn errors(&self) -> usize {
        let distribution = self.distribution();
        self.covered() - distribution.get(self.prediction()).copied().unwrap_or(0)
    }

    /// Pessimistic error estimate of the subtree rooted at this node
    fn estimated_errors(&self, confidence: f64, z: f64) -> f64 {
        match self {
            TreeNode::Leaf { .. } => leaf_errors(
                self.covered() as f64,
                self.errors() as f64,
                confidence,
                z,
            ),
            TreeNode::Split { children, .. } => children
                .iter()
                .map(|child| child.estimated_errors(confidence, z))
                .sum(),
        }
    }

    /// Replaces subtrees bottom-up by leaves whenever the estimated error does not increase
    fn prune(self, confidence: f64, z: f64) -> Self {
        match self {
            TreeNode::Leaf { .. } => self,
            TreeNode::Split {
                attribute,
                test,
                children,
                prediction,
                distribution,
            } => {
                let children = children
                    .into_iter()
                    .map(|child| child.prune(confidence, z))
                    .collect::<Vec<_>>();

                let node = TreeNode::Split {
                    attribute,
                    test,
                    children,
                    prediction,
                    distribution,
                };

                let as_subtree = node.estimated_errors(confidence, z);
                let as_leaf = leaf_errors(
                    node.covered() as f64,
                    node.errors() as f64,
                    confidence,
                    z,
                );

                if as_leaf <= as_subtree {
                    tracing::debug!(
                        attribute,
                        covered = node.covered(),
                        as_leaf,
                        as_subtree,
                        "pruned subtree"
                    );
                    TreeNode::Leaf {
                        prediction,
                        distribution: node.distribution().to_vec(),
                    }
                } else {
                    node
                }
            }
        }
    }

    fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A candidate split of a node
struct Candidate {
    attribute: usize,
    test: SplitTest,
    score: f64,
}

/// Recursive induction of the unpruned tree over a dataset without missing classes
struct TreeBuilder<'a> {
    dataset: &'a Dataset,
    targets: Vec<usize>,
    nclasses: usize,
    sorted_indices: Vec<Option<SortedIndex>>,
    hyperparameters: &'a DecisionTreeValidParams,
}

impl<'a> TreeBuilder<'a> {
    fn new(
        dataset: &'a Dataset,
        targets: Vec<usize>,
        nclasses: usize,
        hyperparameters: &'a DecisionTreeValidParams,
    ) -> Self {
        let sorted_indices = dataset
            .attributes()
            .iter()
            .enumerate()
            .map(|(idx, attribute)| {
                if attribute.is_nominal() {
                    None
                } else {
                    Some(SortedIndex::of_attribute(dataset, idx))
                }
            })
            .collect();

        TreeBuilder {
            dataset,
            targets,
            nclasses,
            sorted_indices,
            hyperparameters,
        }
    }

    fn class_distribution(&self, mask: &RowMask) -> Vec<usize> {
        let mut distribution = vec![0; self.nclasses];
        for row in mask.rows() {
            distribution[self.targets[row]] += 1;
        }

        distribution
    }

    /// Recursively fits the node
    ///
    /// `available` flags the attributes not yet tested on the path from the root.
    fn fit_node(&self, mask: &RowMask, available: &mut [bool], depth: usize) -> TreeNode {
        let distribution = self.class_distribution(mask);
        let prediction = majority(&distribution);

        let pure = distribution.iter().filter(|count| **count > 0).count() <= 1;
        let max_depth_reached = self
            .hyperparameters
            .max_depth()
            .map(|max_depth| depth >= max_depth)
            .unwrap_or(false);

        if pure || mask.nsamples < self.hyperparameters.min_partition_size() || max_depth_reached
        {
            return TreeNode::Leaf {
                prediction,
                distribution,
            };
        }

        let best = match self.best_split(mask, available) {
            Some(best) => best,
            None => {
                return TreeNode::Leaf {
                    prediction,
                    distribution,
                }
            }
        };

        tracing::trace!(
            attribute = best.attribute,
            score = best.score,
            depth,
            nsamples = mask.nsamples,
            "split node"
        );

        let branches = self.partition(mask, best.attribute, &best.test);

        available[best.attribute] = false;
        let mut children = Vec::with_capacity(branches.len());
        for branch in &branches {
            if branch.nsamples == 0 {
                children.push(TreeNode::Leaf {
                    prediction,
                    distribution: vec![0; self.nclasses],
                });
            } else {
                children.push(self.fit_node(branch, available, depth + 1));
            }
        }
        available[best.attribute] = true;

        TreeNode::Split {
            attribute: best.attribute,
            test: best.test,
            children,
            prediction,
            distribution,
        }
    }

    /// Finds the candidate with the highest score, the first declared attribute wins ties
    ///
    /// When scoring by gain ratio, a candidate has to reach the average information gain of all
    /// candidates of the node. A small split information alone cannot make a weak split win.
    fn best_split(&self, mask: &RowMask, available: &[bool]) -> Option<Candidate> {
        let evaluated = (0..self.dataset.nattributes())
            .filter(|attribute| available[*attribute])
            .filter_map(|attribute| {
                let evaluated = match &self.sorted_indices[attribute] {
                    Some(sorted_index) => self.evaluate_threshold(mask, sorted_index),
                    None => self.evaluate_categories(mask, attribute),
                };
                evaluated.map(|(test, gain, split_info)| (attribute, test, gain, split_info))
            })
            .collect::<Vec<_>>();
        if evaluated.is_empty() {
            return None;
        }

        let average_gain = evaluated.iter().map(|(_, _, gain, _)| gain).sum::<f64>()
            / evaluated.len() as f64;

        let mut best: Option<Candidate> = None;
        for (attribute, test, gain, split_info) in evaluated {
            if gain <= MIN_GAIN || split_info <= MIN_GAIN {
                continue;
            }

            let score = match self.hyperparameters.split_quality() {
                SplitQuality::GainRatio if gain < average_gain - AVERAGE_GAIN_SLACK => continue,
                SplitQuality::GainRatio => gain / split_info,
                SplitQuality::InformationGain => gain,
            };

            if best.as_ref().map(|best| score > best.score).unwrap_or(true) {
                best = Some(Candidate {
                    attribute,
                    test,
                    score,
                });
            }
        }

        best
    }

    /// Information gain and split information of a nominal attribute with one branch per
    /// category observed in the partition
    fn evaluate_categories(
        &self,
        mask: &RowMask,
        attribute: usize,
    ) -> Option<(SplitTest, f64, f64)> {
        let ncategories = self.dataset.attributes()[attribute].num_categories();
        let mut class_freq = vec![vec![0.0; self.nclasses]; ncategories];
        let mut missing = 0.0;

        for row in mask.rows() {
            match self.dataset.value(row, attribute) {
                Some(value) => class_freq[value as usize][self.targets[row]] += 1.0,
                None => missing += 1.0,
            }
        }

        let categories = (0..ncategories)
            .filter(|category| class_freq[*category].iter().sum::<f64>() > 0.0)
            .collect::<Vec<_>>();
        if categories.len() < 2 {
            return None;
        }

        let branches = categories
            .iter()
            .map(|category| class_freq[*category].clone())
            .collect::<Vec<_>>();
        let mut known = vec![0.0; self.nclasses];
        for branch in &branches {
            for (total, count) in known.iter_mut().zip(branch) {
                *total += count;
            }
        }

        let mut sizes = branches
            .iter()
            .map(|branch| branch.iter().sum::<f64>())
            .collect::<Vec<_>>();
        let nknown = sizes.iter().sum::<f64>();
        if missing > 0.0 {
            sizes.push(missing);
        }

        let gain = nknown / mask.nsamples as f64 * information_gain(&known, &branches);

        Some((
            SplitTest::Nominal(categories),
            gain,
            split_information(&sizes),
        ))
    }

    /// Information gain and split information of the best midpoint threshold of a numeric
    /// attribute
    ///
    /// All examples are first placed in the right branch and then moved, in ascending order of
    /// their value, one by one to the left branch. Between two distinct consecutive values the
    /// midpoint is a candidate threshold. The gain of the best threshold is reduced by the cost
    /// of choosing it among all candidates, a threshold without remaining gain is no candidate.
    fn evaluate_threshold(
        &self,
        mask: &RowMask,
        sorted_index: &SortedIndex,
    ) -> Option<(SplitTest, f64, f64)> {
        let known = sorted_index
            .sorted_values
            .iter()
            .filter(|(row, _)| mask.mask[*row])
            .copied()
            .collect::<Vec<_>>();
        if known.len() < 2 {
            return None;
        }

        let mut right_class_freq = vec![0.0; self.nclasses];
        for (row, _) in &known {
            right_class_freq[self.targets[*row]] += 1.0;
        }
        let parent_entropy = entropy(&right_class_freq);
        let mut left_class_freq = vec![0.0; self.nclasses];

        let nknown = known.len() as f64;
        // (threshold, gain, examples on the left)
        let mut best: Option<(f64, f64, f64)> = None;
        let mut nthresholds = 0;

        for (i, window) in known.windows(2).enumerate() {
            let (row, value) = window[0];
            let next_value = window[1].1;

            let class = self.targets[row];
            left_class_freq[class] += 1.0;
            right_class_freq[class] -= 1.0;

            if value == next_value {
                continue;
            }
            nthresholds += 1;

            let nleft = (i + 1) as f64;
            let gain = parent_entropy
                - nleft / nknown * entropy(&left_class_freq)
                - (nknown - nleft) / nknown * entropy(&right_class_freq);

            if best.map(|(_, best_gain, _)| gain > best_gain).unwrap_or(true) {
                best = Some((midpoint(value, next_value), gain, nleft));
            }
        }

        let (threshold, gain, nleft) = best?;
        let nsamples = mask.nsamples as f64;
        let gain = nknown / nsamples * gain - threshold_penalty(nthresholds, nsamples);
        if gain <= 0.0 {
            return None;
        }

        let missing = nsamples - nknown;

        let mut sizes = vec![nleft, nknown - nleft];
        if missing > 0.0 {
            sizes.push(missing);
        }

        Some((
            SplitTest::Threshold(threshold),
            gain,
            split_information(&sizes),
        ))
    }

    /// Routes the examples of a node to the branches of a split
    ///
    /// Examples with a missing value follow the most populous branch.
    fn partition(&self, mask: &RowMask, attribute: usize, test: &SplitTest) -> Vec<RowMask> {
        let nsamples = self.dataset.nsamples();
        let mut branches = vec![RowMask::none(nsamples); test.num_branches()];
        let mut missing = Vec::new();

        for row in mask.rows() {
            match self
                .dataset
                .value(row, attribute)
                .and_then(|value| test.branch(value))
            {
                Some(branch) => branches[branch].mark(row),
                None => missing.push(row),
            }
        }

        if !missing.is_empty() {
            let mut largest = 0;
            for (idx, branch) in branches.iter().enumerate() {
                if branch.nsamples > branches[largest].nsamples {
                    largest = idx;
                }
            }
            for row in missing {
                branches[largest].mark(row);
            }
        }

        branches
    }
}

/// A fitted decision tree model for classification.
///
/// ### Structure
/// A decision tree is a rooted tree where:
/// * Each split node tests a single attribute. A nominal attribute gets one child per category
///   observed during training, a numeric attribute is compared against a threshold such that
///   examples with `value <= threshold` fall in the first child and the others in the second.
///
/// * leaf nodes make predictions, and their prediction is the majority class of the training
///   examples reaching the leaf
///
/// ### Algorithm
///
/// Starting with a single root node holding all examples, the tree is grown depth-first by
/// applying the following rule to every node considered:
///
/// * If all examples share a class, there are fewer than `min_partition_size` examples or no
///   attribute yields a positive information gain, the node becomes a leaf;
/// * Otherwise every attribute not yet tested on the path from the root is scored, numeric
///   attributes at the midpoint threshold with the highest information gain. The gain of a
///   threshold is reduced by `log2(candidate thresholds) / examples`;
/// * The attribute with the highest [quality score](enum.SplitQuality.html) is selected and one
///   child is grown per branch. Under gain ratio only attributes with at least the average
///   information gain of the node compete. Ties go to the attribute declared first.
///
/// The grown tree is then pruned bottom-up: a subtree is replaced by a leaf whenever the
/// pessimistic error estimate of the leaf does not exceed the estimate of the subtree.
///
/// ### Predictions
///
/// To predict the class of an example, the tree is traversed from the root to a leaf, choosing
/// the child matching the value of the tested attribute. If the value is missing, or is a
/// category never observed at that node, the traversal stops and the majority class of the node
/// is predicted.
///
/// ### Example
///
/// Here is an example on how to train a decision tree from its parameters:
///
/// ```rust
///
/// use arbol_trees::DecisionTree;
/// use arbol::prelude::*;
///
/// // Load the dataset
/// let dataset = arbol_datasets::weather_nominal();
/// // Fit the tree
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
/// // Get accuracy on training set
/// let evaluation = Evaluation::from_predictions(
///     dataset.class_labels().unwrap().to_vec(),
///     &dataset.targets().unwrap().into_iter().flatten().collect::<Vec<_>>(),
///     tree.predict(&dataset).as_slice().unwrap(),
/// );
///
/// assert_eq!(evaluation.percent_correct().unwrap(), 100.0);
///
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root_node: TreeNode,
    attributes: Vec<Attribute>,
    class_index: usize,
}

impl Predict for DecisionTree {
    /// Classify an example, unroutable examples get the majority class of the node
    fn classify(&self, example: ArrayView1<f64>) -> usize {
        self.traverse(&example).0.prediction()
    }
}

impl Fit<Error> for DecisionTreeValidParams {
    type Object = DecisionTree;

    /// Fit a decision tree using `hyperparamters` on the examples of `dataset` with a known class
    fn fit(&self, dataset: &Dataset) -> Result<Self::Object> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let class_index = dataset.class_index().ok_or(Error::NoClassAttribute)?;

        let dataset = dataset.without_missing_class()?;
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let targets = dataset.targets()?.into_iter().flatten().collect::<Vec<_>>();
        let nclasses = dataset.nclasses()?;

        let builder = TreeBuilder::new(&dataset, targets, nclasses, self);
        let mut available = vec![true; dataset.nattributes()];
        available[class_index] = false;

        let mut root_node = builder.fit_node(&RowMask::all(dataset.nsamples()), &mut available, 0);

        if self.prune() {
            let z = Normal::new(0.0, 1.0)
                .map_err(|err| Error::Parameters(err.to_string()))?
                .inverse_cdf(1.0 - self.confidence());
            root_node = root_node.prune(self.confidence(), z);
        }

        let tree = DecisionTree {
            root_node,
            attributes: dataset.attributes().to_vec(),
            class_index,
        };

        tracing::debug!(
            nsamples = dataset.nsamples(),
            leaves = tree.num_leaves(),
            size = tree.size(),
            "fitted decision tree"
        );

        Ok(tree)
    }
}

impl DecisionTree {
    /// Node at which the traversal of `example` ends
    ///
    /// Ends at a leaf, or at a split whose attribute is missing in the example or whose
    /// nominal test has no branch for the example's category. In the latter case the category is
    /// returned as well.
    fn traverse(&self, example: &ArrayView1<f64>) -> (&TreeNode, Option<usize>) {
        let mut node = &self.root_node;

        while let TreeNode::Split {
            attribute,
            test,
            children,
            ..
        } = node
        {
            let value = example[*attribute];
            if value.is_nan() {
                tracing::trace!(attribute, "missing value, using node majority");
                return (node, None);
            }

            match test.branch(value) {
                Some(branch) => node = &children[branch],
                None => {
                    tracing::trace!(attribute, value, "unseen category, using node majority");
                    return (node, Some(value as usize));
                }
            }
        }

        (node, None)
    }

    /// Classify an example without falling back on unseen categories
    ///
    /// ### Returns
    ///
    /// The predicted class index or `Error::UnseenCategory` if a nominal value of the example
    /// has no branch at a split on its path. Missing values still fall back to the majority
    /// class of the node.
    pub fn try_classify(&self, example: ArrayView1<f64>) -> Result<usize> {
        match self.traverse(&example) {
            (node, None) => Ok(node.prediction()),
            (node, Some(value)) => {
                let attribute = node
                    .split()
                    .and_then(|(idx, _)| self.attributes.get(idx))
                    .map(|attribute| attribute.name().to_string())
                    .unwrap_or_default();
                Err(Error::UnseenCategory { attribute, value })
            }
        }
    }

    /// Class distribution of the training examples at the node where `example` ends up
    pub fn distribution_for(&self, example: ArrayView1<f64>) -> &[usize] {
        self.traverse(&example).0.distribution()
    }

    /// Create a node iterator in depth-first pre-order
    pub fn iter_nodes(&self) -> NodeIter<'_> {
        // stack of nodes yet to explore
        let stack = vec![&self.root_node];

        NodeIter::new(stack)
    }

    /// Return the indices of the attributes tested by this tree in ascending order
    pub fn features(&self) -> Vec<usize> {
        self.iter_nodes()
            .filter_map(|node| node.split().map(|(attribute, _)| attribute))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode {
        &self.root_node
    }

    /// The schema the tree was trained on
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Labels of the class attribute
    pub fn class_labels(&self) -> &[String] {
        self.attributes
            .get(self.class_index)
            .and_then(|attribute| attribute.categories())
            .unwrap_or(&[])
    }

    /// Return max depth of the tree, a single leaf has depth zero
    pub fn max_depth(&self) -> usize {
        self.root_node.height()
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Return the number of nodes in this tree
    pub fn size(&self) -> usize {
        self.iter_nodes().count()
    }

    /// Writes the tree as JSON
    #[cfg(feature = "serde")]
    pub fn to_writer<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }

    /// Reads a tree written by [`DecisionTree::to_writer`]
    #[cfg(feature = "serde")]
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}

/// Threshold between two consecutive distinct values, always `< upper`
fn midpoint(lower: f64, upper: f64) -> f64 {
    let threshold = lower / 2.0 + upper / 2.0;
    if threshold < upper {
        threshold
    } else {
        lower
    }
}

/// Index of the most frequent class, the lowest index wins ties
fn majority(distribution: &[usize]) -> usize {
    let mut best = 0;
    for (idx, count) in distribution.iter().enumerate() {
        if *count > distribution[best] {
            best = idx;
        }
    }

    best
}
