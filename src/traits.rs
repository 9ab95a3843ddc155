//! Provide traits for different classes of algorithms
//!

use ndarray::{Array1, ArrayView1};

use crate::dataset::Dataset;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// the decision tree builder takes labeled examples and induces a tree which classifies new
/// examples. The hyperparameters of the algorithm are kept in the implementing type and the
/// learned model is returned as `Self::Object`.
pub trait Fit<E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &Dataset) -> Result<Self::Object, E>;
}

/// Classify examples with a fitted model
///
/// Examples are rows of a dataset's record matrix, laid out according to the schema the model
/// was trained on. The class column of an example is ignored.
pub trait Predict {
    /// Return the class index predicted for a single example
    fn classify(&self, example: ArrayView1<f64>) -> usize;

    /// Classify every example of a dataset
    fn predict(&self, dataset: &Dataset) -> Array1<usize> {
        dataset
            .records()
            .rows()
            .into_iter()
            .map(|example| self.classify(example))
            .collect()
    }
}
