//! Error types in Arbol
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("malformed dataset: {0}")]
    DatasetFormat(String),
    #[error("dataset contains no examples")]
    EmptyDataset,
    #[error("no class attribute designated")]
    NoClassAttribute,
    #[error("invalid number of folds {k} for {nsamples} examples, expected 2 <= k <= {nsamples}")]
    InvalidFoldCount { k: usize, nsamples: usize },
    #[error("category {value} of attribute `{attribute}` was not seen during training")]
    UnseenCategory { attribute: String, value: usize },
    #[error("no predictions were recorded")]
    EmptyResult,
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}
