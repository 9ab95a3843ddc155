use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

use super::{Attribute, AttributeKind, Dataset, FoldAssignment, Iter};
use crate::error::{Error, Result};
use crate::metrics::Evaluation;
use crate::traits::{Fit, Predict};

impl Dataset {
    /// Create a new dataset from an attribute schema and a record matrix
    ///
    /// Fails with `Error::DatasetFormat` if the number of columns differs from the number of
    /// attributes, a value is infinite or a nominal column contains a value which is not a valid
    /// category index. Missing values are represented as `NaN` and are accepted in every column.
    pub fn new(attributes: Vec<Attribute>, records: Array2<f64>) -> Result<Self> {
        if records.ncols() != attributes.len() {
            return Err(Error::DatasetFormat(format!(
                "examples have {} values but the schema declares {} attributes",
                records.ncols(),
                attributes.len()
            )));
        }

        if let Some(((row, col), value)) = records.indexed_iter().find(|(_, x)| x.is_infinite()) {
            return Err(Error::DatasetFormat(format!(
                "value {} of attribute `{}` in example {} is not finite",
                value,
                attributes[col].name(),
                row
            )));
        }

        for (idx, attribute) in attributes.iter().enumerate() {
            if let AttributeKind::Nominal(categories) = attribute.kind() {
                let column = records.column(idx);
                let invalid = column.iter().position(|x| {
                    !x.is_nan() && (x.fract() != 0.0 || *x < 0.0 || *x as usize >= categories.len())
                });

                if let Some(row) = invalid {
                    return Err(Error::DatasetFormat(format!(
                        "value {} of attribute `{}` in example {} is not a valid category",
                        column[row],
                        attribute.name(),
                        row
                    )));
                }
            }
        }

        Ok(Dataset {
            records,
            attributes,
            class_index: None,
            relation: String::new(),
        })
    }

    /// Designates the class attribute
    ///
    /// The class attribute has to exist and be nominal, otherwise `Error::DatasetFormat` is
    /// returned.
    pub fn with_class_index(mut self, class_index: usize) -> Result<Self> {
        let attribute = self.attributes.get(class_index).ok_or_else(|| {
            Error::DatasetFormat(format!(
                "class index {} out of range for {} attributes",
                class_index,
                self.attributes.len()
            ))
        })?;

        if !attribute.is_nominal() {
            return Err(Error::DatasetFormat(format!(
                "class attribute `{}` has to be nominal",
                attribute.name()
            )));
        }

        self.class_index = Some(class_index);
        Ok(self)
    }

    /// Updates the name of the relation
    pub fn with_relation<S: Into<String>>(mut self, relation: S) -> Self {
        self.relation = relation.into();
        self
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn records(&self) -> ArrayView2<'_, f64> {
        self.records.view()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, idx: usize) -> Option<&Attribute> {
        self.attributes.get(idx)
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    pub fn nattributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nsamples() == 0
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    /// Returns the designated class attribute or `Error::NoClassAttribute`
    pub fn class_attribute(&self) -> Result<&Attribute> {
        self.class_index
            .map(|idx| &self.attributes[idx])
            .ok_or(Error::NoClassAttribute)
    }

    /// Returns the labels of the class attribute
    pub fn class_labels(&self) -> Result<&[String]> {
        self.class_attribute()?
            .categories()
            .ok_or(Error::NoClassAttribute)
    }

    pub fn nclasses(&self) -> Result<usize> {
        self.class_labels().map(|labels| labels.len())
    }

    /// Returns a single example
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn example(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.records.row(idx)
    }

    /// Value of attribute `attr` in example `row`, `None` if the value is missing
    pub fn value(&self, row: usize, attr: usize) -> Option<f64> {
        let value = self.records[(row, attr)];
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }

    /// Class index of example `row`, `None` if the class is missing or not designated
    pub fn class_of(&self, row: usize) -> Option<usize> {
        self.class_index
            .and_then(|idx| self.value(row, idx))
            .map(|x| x as usize)
    }

    /// Class of every example, `None` for missing class values
    pub fn targets(&self) -> Result<Vec<Option<usize>>> {
        self.class_attribute()?;

        Ok((0..self.nsamples()).map(|row| self.class_of(row)).collect())
    }

    /// Number of examples per class, examples with a missing class are not counted
    pub fn class_counts(&self) -> Result<Vec<usize>> {
        let mut counts = vec![0; self.nclasses()?];
        for class in self.targets()?.into_iter().flatten() {
            counts[class] += 1;
        }

        Ok(counts)
    }

    /// Creates a new dataset containing the selected examples in the given order
    ///
    /// The schema, relation and class attribute are kept.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            records: self.records.select(Axis(0), indices),
            attributes: self.attributes.clone(),
            class_index: self.class_index,
            relation: self.relation.clone(),
        }
    }

    /// Removes all examples with a missing class value
    pub fn without_missing_class(&self) -> Result<Dataset> {
        let indices = self
            .targets()?
            .into_iter()
            .enumerate()
            .filter_map(|(idx, class)| class.map(|_| idx))
            .collect::<Vec<_>>();

        if indices.len() == self.nsamples() {
            return Ok(self.clone());
        }

        Ok(self.subset(&indices))
    }

    /// Iterate over examples together with their class
    pub fn sample_iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Perform stratified k-fold cross-validation
    ///
    /// Examples with a missing class are dropped, the remaining ones are assigned to `k` folds
    /// with [`FoldAssignment::stratified`]. For every fold a model is fitted on all other folds
    /// and each example of the held-out fold is classified. The (actual, predicted) pairs of all
    /// folds are accumulated into a single [`Evaluation`].
    ///
    /// ### Parameters
    ///
    /// * `params`: the hyperparameters fitted on every training split
    /// * `k`: the number of folds, has to satisfy `2 <= k <= nsamples`
    /// * `seed`: the seed of the shuffle preceding the fold assignment
    ///
    /// ### Returns
    ///
    /// The evaluation or an `Error::InvalidFoldCount`, `Error::NoClassAttribute`, or any error
    /// returned by fitting a fold.
    pub fn cross_validate<P, E>(
        &self,
        params: &P,
        k: usize,
        seed: u64,
    ) -> std::result::Result<Evaluation, E>
    where
        P: Fit<E>,
        P::Object: Predict,
        E: std::error::Error + From<Error>,
    {
        let (dataset, folds) = self.assign_folds(k, seed)?;
        let mut evaluation = Evaluation::new(dataset.class_labels()?.to_vec());

        for fold in 0..folds.k() {
            evaluation.merge(&dataset.evaluate_fold(params, &folds, fold)?);
        }

        tracing::info!(
            folds = k,
            seed,
            nsamples = evaluation.total(),
            "cross-validation finished"
        );

        Ok(evaluation)
    }

    /// Perform stratified k-fold cross-validation with folds evaluated in parallel
    ///
    /// Produces the same result as [`Dataset::cross_validate`]: fold results are merged in fold
    /// order once all folds have completed.
    pub fn par_cross_validate<P, E>(
        &self,
        params: &P,
        k: usize,
        seed: u64,
    ) -> std::result::Result<Evaluation, E>
    where
        P: Fit<E> + Sync,
        P::Object: Predict,
        E: std::error::Error + From<Error> + Send,
    {
        let (dataset, folds) = self.assign_folds(k, seed)?;
        let mut evaluation = Evaluation::new(dataset.class_labels()?.to_vec());

        let per_fold = (0..folds.k())
            .into_par_iter()
            .map(|fold| dataset.evaluate_fold(params, &folds, fold))
            .collect::<std::result::Result<Vec<_>, E>>()?;

        for fold_evaluation in &per_fold {
            evaluation.merge(fold_evaluation);
        }

        tracing::info!(
            folds = k,
            seed,
            nsamples = evaluation.total(),
            "parallel cross-validation finished"
        );

        Ok(evaluation)
    }

    fn assign_folds(&self, k: usize, seed: u64) -> Result<(Dataset, FoldAssignment)> {
        let dataset = self.without_missing_class()?;
        let targets = dataset.targets()?.into_iter().flatten().collect::<Vec<_>>();
        let folds = FoldAssignment::stratified(&targets, k, seed)?;

        Ok((dataset, folds))
    }

    fn evaluate_fold<P, E>(
        &self,
        params: &P,
        folds: &FoldAssignment,
        fold: usize,
    ) -> std::result::Result<Evaluation, E>
    where
        P: Fit<E>,
        P::Object: Predict,
        E: std::error::Error + From<Error>,
    {
        let train = self.subset(&folds.train_indices(fold));
        let test = self.subset(&folds.test_indices(fold));

        let model = params.fit(&train)?;

        let mut evaluation = Evaluation::new(self.class_labels()?.to_vec());
        for (example, actual) in test.sample_iter() {
            if let Some(actual) = actual {
                evaluation.record(actual, model.classify(example));
            }
        }

        tracing::debug!(
            fold,
            train = train.nsamples(),
            test = test.nsamples(),
            correct = evaluation.correct(),
            "evaluated fold"
        );

        Ok(evaluation)
    }
}
