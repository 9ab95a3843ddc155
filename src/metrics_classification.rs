//! Common metrics for performance evaluation of classifier
//!
//! Scoring is essential for classification tasks. This module accumulates the predictions of a
//! classifier into a confusion matrix and derives the usual summary statistics from it: percent
//! correct, Cohen's kappa, mean absolute and root mean squared error over the class indicator
//! vectors together with their relative variants, and per-class precision, recall and f1-score.
use std::fmt;

use ndarray::prelude::*;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Accumulated result of evaluating a classifier
///
/// The confusion matrix has one row per actual class and one column per predicted class. The
/// diagonal entries are correct predictions. All statistics are pure derivations of the matrix
/// and fail with `Error::EmptyResult` if no prediction was recorded.
///
/// The absolute and squared errors treat every prediction as a one-hot class probability vector
/// which is compared to the one-hot vector of the actual class, averaged over the number of
/// classes. The relative errors compare these to a baseline predicting the class prior, which is
/// estimated from the actual class frequencies.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    classes: Vec<String>,
    matrix: Array2<usize>,
}

impl Evaluation {
    /// Create an empty evaluation for the given class labels
    pub fn new(classes: Vec<String>) -> Self {
        let n = classes.len();

        Evaluation {
            classes,
            matrix: Array2::zeros((n, n)),
        }
    }

    /// Create an evaluation from pairs of actual and predicted class indices
    ///
    /// ### Panics
    ///
    /// If the slices differ in length or contain an index out of bounds
    pub fn from_predictions(classes: Vec<String>, actual: &[usize], predicted: &[usize]) -> Self {
        assert_eq!(
            actual.len(),
            predicted.len(),
            "The number of predictions must match the number of actual classes."
        );

        let mut evaluation = Evaluation::new(classes);
        for (a, p) in actual.iter().zip(predicted.iter()) {
            evaluation.record(*a, *p);
        }

        evaluation
    }

    /// Record a single prediction
    ///
    /// ### Panics
    ///
    /// If one of the class indices is out of bounds
    pub fn record(&mut self, actual: usize, predicted: usize) {
        self.matrix[(actual, predicted)] += 1;
    }

    /// Add the counts of another evaluation over the same classes
    ///
    /// ### Panics
    ///
    /// If both evaluations have a different number of classes
    pub fn merge(&mut self, other: &Evaluation) {
        assert_eq!(
            self.classes.len(),
            other.classes.len(),
            "Only evaluations over the same classes can be merged."
        );

        self.matrix += &other.matrix;
    }

    /// The class labels
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The confusion matrix, rows are actual classes and columns predicted classes
    pub fn matrix(&self) -> ArrayView2<'_, usize> {
        self.matrix.view()
    }

    /// Total number of recorded predictions
    pub fn total(&self) -> usize {
        self.matrix.sum()
    }

    /// Number of correct predictions
    pub fn correct(&self) -> usize {
        self.matrix.diag().sum()
    }

    /// Number of incorrect predictions
    pub fn incorrect(&self) -> usize {
        self.total() - self.correct()
    }

    fn checked_total(&self) -> Result<f64> {
        match self.total() {
            0 => Err(Error::EmptyResult),
            n => Ok(n as f64),
        }
    }

    /// Percentage of correct predictions
    pub fn percent_correct(&self) -> Result<f64> {
        let total = self.checked_total()?;
        Ok(self.correct() as f64 / total * 100.0)
    }

    /// Percentage of incorrect predictions
    pub fn percent_incorrect(&self) -> Result<f64> {
        let total = self.checked_total()?;
        Ok(self.incorrect() as f64 / total * 100.0)
    }

    /// Cohen's kappa statistic
    ///
    /// Compares the observed agreement `p_o` with the agreement `p_e` expected by chance given
    /// the row and column marginals: `(p_o - p_e) / (1 - p_e)`. Returns one if the chance
    /// agreement is already perfect.
    pub fn kappa(&self) -> Result<f64> {
        let total = self.checked_total()?;

        let actual = self.matrix.sum_axis(Axis(1));
        let predicted = self.matrix.sum_axis(Axis(0));

        let observed = self.correct() as f64 / total;
        let expected = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| *a as f64 * *p as f64)
            .sum::<f64>()
            / (total * total);

        if expected < 1.0 {
            Ok((observed - expected) / (1.0 - expected))
        } else {
            Ok(1.0)
        }
    }

    /// Mean absolute error of the predicted class indicator vectors
    pub fn mean_absolute_error(&self) -> Result<f64> {
        let total = self.checked_total()?;
        Ok(self.indicator_error() / total)
    }

    /// Root mean squared error of the predicted class indicator vectors
    pub fn root_mean_squared_error(&self) -> Result<f64> {
        let total = self.checked_total()?;
        Ok((self.indicator_error() / total).sqrt())
    }

    /// Mean absolute error relative to the class prior baseline, in percent
    pub fn relative_absolute_error(&self) -> Result<f64> {
        self.checked_total()?;

        let (prior_absolute, _) = self.prior_errors();
        Ok(relative_error(self.indicator_error(), prior_absolute))
    }

    /// Root mean squared error relative to the class prior baseline, in percent
    pub fn root_relative_squared_error(&self) -> Result<f64> {
        self.checked_total()?;

        let (_, prior_squared) = self.prior_errors();
        Ok(relative_error(
            self.indicator_error().sqrt(),
            prior_squared.max(0.0).sqrt(),
        ))
    }

    /// Summed error over all predictions
    ///
    /// A wrong prediction differs from the actual indicator vector in two entries by one, both
    /// the absolute and the squared error of it are `2 / nclasses`.
    fn indicator_error(&self) -> f64 {
        2.0 * self.incorrect() as f64 / self.nclasses()
    }

    /// Summed absolute and squared error of always predicting the class prior
    fn prior_errors(&self) -> (f64, f64) {
        let total = self.total() as f64;
        let nclasses = self.nclasses();
        let counts = self.matrix.sum_axis(Axis(1));
        let priors = counts.mapv(|n| n as f64 / total);
        let sum_of_squares = priors.iter().map(|p| p * p).sum::<f64>();

        let mut absolute = 0.0;
        let mut squared = 0.0;
        for (n, p) in counts.iter().zip(priors.iter()) {
            let n = *n as f64;
            absolute += n * 2.0 * (1.0 - p) / nclasses;
            squared += n * (1.0 - 2.0 * p + sum_of_squares) / nclasses;
        }

        (absolute, squared)
    }

    fn nclasses(&self) -> f64 {
        self.classes.len().max(1) as f64
    }

    /// Precision for every class, zero for classes which were never predicted
    pub fn precision(&self) -> Array1<f64> {
        let predicted = self.matrix.sum_axis(Axis(0));

        self.matrix
            .diag()
            .iter()
            .zip(predicted.iter())
            .map(|(tp, n)| ratio(*tp, *n))
            .collect()
    }

    /// Recall for every class, zero for classes which never occurred
    pub fn recall(&self) -> Array1<f64> {
        let actual = self.matrix.sum_axis(Axis(1));

        self.matrix
            .diag()
            .iter()
            .zip(actual.iter())
            .map(|(tp, n)| ratio(*tp, *n))
            .collect()
    }

    /// F1-score for every class
    pub fn f1_score(&self) -> Array1<f64> {
        self.precision()
            .iter()
            .zip(self.recall().iter())
            .map(|(p, r)| if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 })
            .collect()
    }

    /// Summary block with the aggregated statistics
    pub fn summary(&self) -> Result<String> {
        let mut out = String::new();

        out.push_str(&format!(
            "{:<40}{:>8}{:>18.4} %\n",
            "Correctly Classified Instances",
            self.correct(),
            self.percent_correct()?
        ));
        out.push_str(&format!(
            "{:<40}{:>8}{:>18.4} %\n",
            "Incorrectly Classified Instances",
            self.incorrect(),
            self.percent_incorrect()?
        ));
        out.push_str(&format!(
            "{:<40}{:>8.4}\n",
            "Kappa statistic",
            self.kappa()?
        ));
        out.push_str(&format!(
            "{:<40}{:>8.4}\n",
            "Mean absolute error",
            self.mean_absolute_error()?
        ));
        out.push_str(&format!(
            "{:<40}{:>8.4}\n",
            "Root mean squared error",
            self.root_mean_squared_error()?
        ));
        out.push_str(&format!(
            "{:<40}{:>8.4} %\n",
            "Relative absolute error",
            self.relative_absolute_error()?
        ));
        out.push_str(&format!(
            "{:<40}{:>8.4} %\n",
            "Root relative squared error",
            self.root_relative_squared_error()?
        ));
        out.push_str(&format!(
            "{:<40}{:>8}\n",
            "Total Number of Instances",
            self.total()
        ));

        Ok(out)
    }

    /// Table with precision, recall and f1-score of every class
    pub fn class_details(&self) -> String {
        let mut out = format!(
            "{:>12}{:>10}{:>12}  Class\n",
            "Precision", "Recall", "F-Measure"
        );

        let rows = self
            .precision()
            .into_iter()
            .zip(self.recall().into_iter())
            .zip(self.f1_score().into_iter())
            .zip(self.classes.iter());

        for (((precision, recall), f1), class) in rows {
            out.push_str(&format!(
                "{:>12.3}{:>10.3}{:>12.3}  {}\n",
                precision, recall, f1, class
            ));
        }

        out
    }

    /// Confusion matrix with a legend mapping column letters to classes
    pub fn matrix_string(&self) -> String {
        let names = (0..self.classes.len()).map(column_name).collect::<Vec<_>>();
        let width = self
            .matrix
            .iter()
            .map(|x| x.to_string().len())
            .chain(names.iter().map(|x| x.len()))
            .max()
            .unwrap_or(1)
            + 1;

        let mut out = String::new();
        for name in &names {
            out.push_str(&format!("{:>width$}", name, width = width));
        }
        out.push_str("   <-- classified as\n");

        for (i, row) in self.matrix.rows().into_iter().enumerate() {
            for count in row.iter() {
                out.push_str(&format!("{:>width$}", count, width = width));
            }
            out.push_str(&format!(" | {} = {}\n", names[i], self.classes[i]));
        }

        out
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.summary() {
            Ok(summary) => write!(f, "{}", summary),
            Err(err) => write!(f, "{}", err),
        }
    }
}

fn ratio(a: usize, b: usize) -> f64 {
    if b == 0 {
        0.0
    } else {
        a as f64 / b as f64
    }
}

/// Error relative to a baseline error in percent
///
/// A zero baseline is only matched by a zero error, anything else is infinitely worse.
fn relative_error(error: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        error / baseline * 100.0
    } else if error > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Letter based column name, `a` to `z` followed by `aa`, `ab`, ...
fn column_name(mut idx: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push((b'a' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    name.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|x| format!("c{}", x)).collect()
    }

    #[test]
    fn test_confusion_matrix() {
        let evaluation =
            Evaluation::from_predictions(labels(2), &[1, 1, 0, 1, 0, 1], &[0, 1, 0, 1, 0, 1]);

        assert_eq!(evaluation.matrix(), array![[2, 0], [1, 3]]);
        assert_eq!(evaluation.total(), 6);
        assert_eq!(evaluation.correct(), 5);
        assert_eq!(evaluation.incorrect(), 1);
    }

    #[test]
    fn test_cm_metrices() {
        let evaluation =
            Evaluation::from_predictions(labels(2), &[1, 1, 0, 1, 0, 1], &[0, 1, 0, 1, 0, 1]);

        assert_abs_diff_eq!(
            evaluation.percent_correct().unwrap(),
            500.0 / 6.0,
            epsilon = 1e-10
        );
        assert_abs_diff_eq!(evaluation.precision(), array![2.0 / 3.0, 1.0]);
        assert_abs_diff_eq!(evaluation.recall(), array![1.0, 3.0 / 4.0]);
        assert_abs_diff_eq!(evaluation.f1_score(), array![4.0 / 5.0, 6.0 / 7.0]);

        // p_o = 5/6, p_e = (2 * 3 + 4 * 3) / 36 = 1/2
        assert_abs_diff_eq!(evaluation.kappa().unwrap(), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let evaluation = Evaluation::from_predictions(
            labels(3),
            &[0, 1, 2, 2, 1, 0, 0],
            &[0, 2, 2, 1, 1, 1, 0],
        );

        let sum = evaluation.percent_correct().unwrap() + evaluation.percent_incorrect().unwrap();
        assert_abs_diff_eq!(sum, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn kappa_of_perfect_and_chance_predictions() {
        let perfect = Evaluation::from_predictions(labels(3), &[0, 1, 2, 2], &[0, 1, 2, 2]);
        assert_abs_diff_eq!(perfect.kappa().unwrap(), 1.0, epsilon = 1e-12);

        // every row and column marginal is 2 out of 4, half of the predictions agree which is
        // exactly what is expected by chance
        let chance = Evaluation::from_predictions(labels(2), &[0, 0, 1, 1], &[0, 1, 0, 1]);
        assert_abs_diff_eq!(chance.kappa().unwrap(), 0.0, epsilon = 1e-12);

        // a single class predicted for a single class has perfect chance agreement
        let trivial = Evaluation::from_predictions(labels(2), &[1, 1], &[1, 1]);
        assert_abs_diff_eq!(trivial.kappa().unwrap(), 1.0);
    }

    #[test]
    fn indicator_errors() {
        // one out of four wrong with two classes: every wrong prediction contributes 2/2
        let evaluation = Evaluation::from_predictions(labels(2), &[0, 0, 1, 1], &[0, 1, 1, 1]);

        assert_abs_diff_eq!(evaluation.mean_absolute_error().unwrap(), 0.25);
        assert_abs_diff_eq!(evaluation.root_mean_squared_error().unwrap(), 0.5);

        // the prior is (0.5, 0.5), its absolute and squared error per example are 0.5 and 0.25
        assert_abs_diff_eq!(evaluation.relative_absolute_error().unwrap(), 50.0);
        assert_abs_diff_eq!(
            evaluation.root_relative_squared_error().unwrap(),
            100.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn perfect_predictions_have_no_error() {
        let evaluation = Evaluation::from_predictions(labels(3), &[0, 1, 2], &[0, 1, 2]);

        assert_abs_diff_eq!(evaluation.mean_absolute_error().unwrap(), 0.0);
        assert_abs_diff_eq!(evaluation.root_mean_squared_error().unwrap(), 0.0);
        assert_abs_diff_eq!(evaluation.relative_absolute_error().unwrap(), 0.0);
        assert_abs_diff_eq!(evaluation.root_relative_squared_error().unwrap(), 0.0);

        // a single actual class leaves the prior baseline without error
        let single = Evaluation::from_predictions(labels(2), &[0, 0], &[0, 0]);
        assert_abs_diff_eq!(single.relative_absolute_error().unwrap(), 0.0);
        let single = Evaluation::from_predictions(labels(2), &[0, 0], &[0, 1]);
        assert!(single.relative_absolute_error().unwrap().is_infinite());
    }

    #[test]
    fn empty_evaluation_fails() {
        let evaluation = Evaluation::new(labels(2));

        assert_eq!(evaluation.percent_correct(), Err(Error::EmptyResult));
        assert_eq!(evaluation.percent_incorrect(), Err(Error::EmptyResult));
        assert_eq!(evaluation.kappa(), Err(Error::EmptyResult));
        assert_eq!(evaluation.mean_absolute_error(), Err(Error::EmptyResult));
        assert_eq!(evaluation.root_mean_squared_error(), Err(Error::EmptyResult));
        assert_eq!(evaluation.relative_absolute_error(), Err(Error::EmptyResult));
        assert_eq!(evaluation.root_relative_squared_error(), Err(Error::EmptyResult));
        assert_eq!(evaluation.summary(), Err(Error::EmptyResult));
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = Evaluation::from_predictions(labels(2), &[0, 1], &[0, 0]);
        let b = Evaluation::from_predictions(labels(2), &[1, 1], &[1, 0]);
        a.merge(&b);

        assert_eq!(a.matrix(), array![[1, 0], [2, 1]]);
    }

    #[test]
    #[should_panic]
    fn merge_panics_on_different_classes() {
        let mut a = Evaluation::new(labels(2));
        a.merge(&Evaluation::new(labels(3)));
    }

    #[test]
    fn renders_reports() {
        let evaluation = Evaluation::from_predictions(
            vec!["yes".to_string(), "no".to_string()],
            &[0, 0, 0, 1, 1],
            &[0, 0, 1, 1, 1],
        );

        let summary = evaluation.summary().unwrap();
        assert!(summary.contains("Correctly Classified Instances"));
        assert!(summary.contains("80.0000 %"));
        assert!(summary.contains("Total Number of Instances"));

        let matrix = evaluation.matrix_string();
        assert_eq!(
            matrix,
            " a b   <-- classified as\n 2 1 | a = yes\n 0 2 | b = no\n"
        );

        let details = evaluation.class_details();
        assert!(details.contains("yes"));
        assert!(details.contains("0.800"));
    }

    #[test]
    fn column_names() {
        assert_eq!(column_name(0), "a");
        assert_eq!(column_name(25), "z");
        assert_eq!(column_name(26), "aa");
        assert_eq!(column_name(27), "ab");
    }
}
