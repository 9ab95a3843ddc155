//! Trains a decision tree on an ARFF dataset, estimates its accuracy with stratified
//! cross-validation and stores the fitted model.
use std::error::Error as StdError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use arbol::prelude::*;
use arbol_trees::DecisionTree;
use structopt::StructOpt;

/// Train, cross-validate and store a C4.5-style decision tree
#[derive(Debug, StructOpt)]
#[structopt(name = "arbol")]
pub struct Options {
    #[structopt(
        short = "i",
        long = "input",
        default_value = "data/ingresos.arff",
        parse(from_os_str)
    )]
    /// ARFF dataset to learn from, files ending in `.gz` are decompressed
    pub input: PathBuf,
    #[structopt(
        short = "m",
        long = "model",
        default_value = "modelo_arbol_decision.model",
        parse(from_os_str)
    )]
    /// Where the tree fitted on all examples is stored as JSON
    pub model: PathBuf,
    #[structopt(short = "k", long = "folds", default_value = "10")]
    /// Number of cross-validation folds
    pub folds: usize,
    #[structopt(short = "s", long = "seed", default_value = "1")]
    /// Seed of the fold assignment
    pub seed: u64,
    #[structopt(short = "c", long = "confidence", default_value = "0.25")]
    /// Confidence factor used for pruning, smaller values prune more
    pub confidence: f64,
    #[structopt(long = "min-partition-size", default_value = "2")]
    /// Minimum number of examples a node needs to be split
    pub min_partition_size: usize,
    #[structopt(long = "unpruned")]
    /// Keep the grown tree without pruning
    pub unpruned: bool,
    #[structopt(long = "class-index")]
    /// Index of the class attribute, the last attribute if not given
    pub class_index: Option<usize>,
}

/// Runs the whole pipeline and writes the report to `out`
///
/// The model file is only written once fitting and cross-validation have succeeded.
pub fn run<W: Write>(options: &Options, out: &mut W) -> std::result::Result<(), Box<dyn StdError>> {
    let dataset = arbol_datasets::from_path(&options.input)?;
    let class_index = match options.class_index {
        Some(class_index) => class_index,
        None => dataset
            .nattributes()
            .checked_sub(1)
            .ok_or(Error::NoClassAttribute)?,
    };
    let dataset = dataset.with_class_index(class_index)?;
    tracing::info!(
        class = dataset.class_attribute()?.name(),
        nsamples = dataset.nsamples(),
        "dataset loaded"
    );

    let params = DecisionTree::params()
        .confidence(options.confidence)
        .min_partition_size(options.min_partition_size)
        .prune(!options.unpruned);

    tracing::info!("fitting decision tree on all examples");
    let tree = params.fit(&dataset)?;
    tracing::info!(
        leaves = tree.num_leaves(),
        size = tree.size(),
        "decision tree fitted"
    );

    tracing::info!(folds = options.folds, seed = options.seed, "cross-validating");
    let evaluation = dataset.par_cross_validate::<_, Error>(&params, options.folds, options.seed)?;

    let mut writer = BufWriter::new(File::create(&options.model)?);
    tree.to_writer(&mut writer)?;
    writer.flush()?;
    tracing::info!(path = %options.model.display(), "model saved");

    write_report(out, &dataset, &tree, &evaluation, options.folds)?;

    Ok(())
}

/// Writes the evaluation, the tree and the predictions of the tree for every example
pub fn write_report<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    tree: &DecisionTree,
    evaluation: &Evaluation,
    folds: usize,
) -> std::result::Result<(), Box<dyn StdError>> {
    writeln!(out, "=== Stratified {}-fold cross-validation ===", folds)?;
    writeln!(out)?;
    write!(out, "{}", evaluation.summary()?)?;
    writeln!(out)?;
    writeln!(out, "=== Detailed Accuracy By Class ===")?;
    writeln!(out)?;
    write!(out, "{}", evaluation.class_details())?;
    writeln!(out)?;
    writeln!(out, "=== Confusion Matrix ===")?;
    writeln!(out)?;
    write!(out, "{}", evaluation.matrix_string())?;
    writeln!(out)?;
    writeln!(out, "=== Decision Tree ===")?;
    writeln!(out)?;
    write!(out, "{}", tree)?;
    writeln!(out)?;
    writeln!(out, "=== Predictions on the training data ===")?;
    writeln!(out)?;

    let labels = dataset.class_labels()?;
    for (idx, (example, actual)) in dataset.sample_iter().enumerate() {
        let actual = actual
            .and_then(|class| labels.get(class))
            .map(String::as_str)
            .unwrap_or("?");
        let predicted = labels
            .get(tree.classify(example))
            .map(String::as_str)
            .unwrap_or("?");
        writeln!(
            out,
            "Example {} - actual: {}, predicted: {}",
            idx + 1,
            actual,
            predicted
        )?;
    }

    Ok(())
}
