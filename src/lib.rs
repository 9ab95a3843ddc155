//! `arbol` provides the building blocks to learn interpretable classifiers from labeled tabular
//! data and to estimate how well they generalise.
//!
//! ## The big picture
//!
//! A [`Dataset`] holds examples described by nominal and numeric [attributes](dataset::Attribute),
//! one nominal attribute is designated as the class. Learning algorithms implement
//! [`Fit`](traits::Fit) on their hyperparameters and produce models implementing
//! [`Predict`](traits::Predict). Hyperparameters are validated through [`ParamGuard`] before
//! fitting.
//!
//! Models are evaluated with stratified k-fold cross-validation
//! ([`Dataset::cross_validate`]), which accumulates all held-out predictions into an
//! [`Evaluation`](metrics::Evaluation) offering percent correct, the kappa statistic, absolute and
//! squared errors and their relative variants.
//!
//! The decision tree learner lives in `arbol-trees`, reading ARFF files in `arbol-datasets`.
//!

pub mod benchmarks;
pub mod dataset;
pub mod error;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Attribute, AttributeKind, Dataset, FoldAssignment};
pub use error::{Error, Result};
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::Evaluation;
}
