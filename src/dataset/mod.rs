//! Datasets
//!
//! This module implements the dataset struct, the attribute schema describing its columns and
//! the fold assignment used for cross-validation.
use ndarray::Array2;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod folds;
mod impl_dataset;
mod iter;

pub use folds::FoldAssignment;
pub use iter::Iter;

/// The kind of values an attribute takes
///
/// Nominal attributes carry their ordered list of permitted category labels, a value of such an
/// attribute is stored as index into this list. Numeric attributes store real numbers.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    Nominal(Vec<String>),
    Numeric,
}

/// A named column of a dataset
///
/// The index of an attribute is its position in the dataset schema. Attributes are immutable
/// once a dataset has been constructed.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    /// Create a nominal attribute with the given category labels
    pub fn nominal<S, I, V>(name: S, categories: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Nominal(categories.into_iter().map(Into::into).collect()),
        }
    }

    /// Create a numeric attribute
    pub fn numeric<S: Into<String>>(name: S) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal(_))
    }

    /// Returns the category labels of a nominal attribute, `None` for numeric attributes
    pub fn categories(&self) -> Option<&[String]> {
        match &self.kind {
            AttributeKind::Nominal(categories) => Some(categories),
            AttributeKind::Numeric => None,
        }
    }

    /// Number of categories, zero for numeric attributes
    pub fn num_categories(&self) -> usize {
        self.categories().map(|c| c.len()).unwrap_or(0)
    }

    /// Position of `label` in the category list
    pub fn category_index(&self, label: &str) -> Option<usize> {
        self.categories()
            .and_then(|categories| categories.iter().position(|c| c == label))
    }

    /// Label of the category with index `idx`
    pub fn category(&self, idx: usize) -> Option<&str> {
        self.categories()
            .and_then(|categories| categories.get(idx))
            .map(|c| c.as_str())
    }

    /// Formats a stored value of this attribute for humans, `?` for missing values
    pub fn format_value(&self, value: f64) -> String {
        if value.is_nan() {
            return "?".to_string();
        }

        match &self.kind {
            AttributeKind::Nominal(categories) => categories
                .get(value as usize)
                .cloned()
                .unwrap_or_else(|| format!("#{}", value)),
            AttributeKind::Numeric => format!("{}", value),
        }
    }
}

/// Dataset
///
/// An ordered sequence of examples sharing one attribute schema. All values are stored in a
/// two-dimensional matrix with dimensionality (nsamples, nattributes), nominal values as index
/// into the category list of their attribute and missing values as `NaN`.
///
/// One nominal attribute may be designated as class attribute. It is fixed once designated, the
/// builder method consumes the dataset.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with one row per example
/// * `attributes`: the schema, one attribute per column of `records`
/// * `class_index`: the designated class attribute, if any
/// * `relation`: a descriptive name of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Array2<f64>,
    attributes: Vec<Attribute>,
    class_index: Option<usize>,
    relation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use ndarray::array;

    fn schema() -> Vec<Attribute> {
        vec![
            Attribute::nominal("outlook", vec!["sunny", "overcast", "rainy"]),
            Attribute::numeric("temperature"),
            Attribute::nominal("play", vec!["yes", "no"]),
        ]
    }

    #[test]
    fn attribute_accessors() {
        let outlook = Attribute::nominal("outlook", vec!["sunny", "overcast", "rainy"]);
        assert!(outlook.is_nominal());
        assert_eq!(outlook.num_categories(), 3);
        assert_eq!(outlook.category_index("rainy"), Some(2));
        assert_eq!(outlook.category(1), Some("overcast"));
        assert_eq!(outlook.category(3), None);
        assert_eq!(outlook.format_value(0.), "sunny");
        assert_eq!(outlook.format_value(f64::NAN), "?");

        let temperature = Attribute::numeric("temperature");
        assert!(!temperature.is_nominal());
        assert_eq!(temperature.categories(), None);
        assert_eq!(temperature.format_value(71.5), "71.5");
    }

    #[test]
    fn dataset_validates_shape_and_categories() {
        let err = Dataset::new(schema(), array![[0., 1.]]).unwrap_err();
        assert!(matches!(err, Error::DatasetFormat(_)));

        let err = Dataset::new(schema(), array![[3., 70., 0.]]).unwrap_err();
        assert!(matches!(err, Error::DatasetFormat(_)));

        let err = Dataset::new(schema(), array![[0.5, 70., 0.]]).unwrap_err();
        assert!(matches!(err, Error::DatasetFormat(_)));

        // missing values are allowed everywhere
        let dataset = Dataset::new(schema(), array![[f64::NAN, f64::NAN, 1.]]).unwrap();
        assert_eq!(dataset.nsamples(), 1);
    }

    #[test]
    fn class_attribute_must_be_nominal() {
        let dataset = Dataset::new(schema(), array![[0., 70., 0.]]).unwrap();
        assert_eq!(dataset.class_attribute().unwrap_err(), Error::NoClassAttribute);

        let err = dataset.clone().with_class_index(1).unwrap_err();
        assert!(matches!(err, Error::DatasetFormat(_)));

        let err = dataset.clone().with_class_index(5).unwrap_err();
        assert!(matches!(err, Error::DatasetFormat(_)));

        let dataset = dataset.with_class_index(2).unwrap();
        assert_eq!(dataset.class_attribute().unwrap().name(), "play");
        assert_eq!(dataset.class_labels().unwrap(), &["yes", "no"]);
    }
}
