use std::fs;
use std::path::Path;

use arbol::prelude::*;
use arbol_cli::{run, Options};
use arbol_trees::DecisionTree;
use structopt::StructOpt;

const SIGNAL: &str = "\
@relation signal
@attribute signal {off, on}
@attribute noise numeric
@attribute class {negative, positive}
@data
off,1.0,negative
off,2.0,negative
off,3.0,negative
off,4.0,negative
off,5.0,negative
on,1.5,positive
on,2.5,positive
on,3.5,positive
on,4.5,positive
on,?,positive
";

fn options(input: &Path, model: &Path, extra: &[&str]) -> Options {
    let mut args = vec![
        "arbol".to_string(),
        "--input".to_string(),
        input.display().to_string(),
        "--model".to_string(),
        model.display().to_string(),
    ];
    args.extend(extra.iter().map(|arg| arg.to_string()));

    Options::from_iter(args)
}

#[test]
fn defaults_match_fixed_paths() {
    let options = Options::from_iter(vec!["arbol"]);

    assert_eq!(options.input, Path::new("data/ingresos.arff"));
    assert_eq!(options.model, Path::new("modelo_arbol_decision.model"));
    assert_eq!(options.folds, 10);
    assert_eq!(options.seed, 1);
    assert_eq!(options.confidence, 0.25);
    assert_eq!(options.min_partition_size, 2);
    assert!(!options.unpruned);
    assert_eq!(options.class_index, None);
}

#[test]
fn writes_model_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("signal.arff");
    let model = dir.path().join("signal.model");
    fs::write(&input, SIGNAL).unwrap();

    let mut report = Vec::new();
    run(&options(&input, &model, &["--folds", "2"]), &mut report).unwrap();
    let report = String::from_utf8(report).unwrap();

    assert!(report.contains("=== Stratified 2-fold cross-validation ==="));
    assert!(report.contains("Correctly Classified Instances"));
    assert!(report.contains("Kappa statistic"));
    assert!(report.contains("<-- classified as"));
    assert!(report.contains("signal = off: negative (5.0)"));
    assert!(report.contains("Example 1 - actual: negative, predicted: negative"));
    assert!(report.contains("Example 10 - actual: positive, predicted: positive"));

    let tree = DecisionTree::from_reader(fs::File::open(&model).unwrap()).unwrap();
    assert_eq!(tree.features(), vec![0]);
    assert_eq!(tree.class_labels(), &["negative", "positive"]);
}

#[test]
fn class_index_can_be_overridden() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("signal.arff");
    let model = dir.path().join("signal.model");
    fs::write(&input, SIGNAL).unwrap();

    // predict the signal from the class instead
    let mut report = Vec::new();
    run(
        &options(&input, &model, &["--folds", "2", "--class-index", "0"]),
        &mut report,
    )
    .unwrap();

    let tree = DecisionTree::from_reader(fs::File::open(&model).unwrap()).unwrap();
    assert_eq!(tree.class_index(), 0);
    assert_eq!(tree.class_labels(), &["off", "on"]);
}

#[test]
fn failures_leave_no_model_behind() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("signal.arff");
    let model = dir.path().join("signal.model");
    fs::write(&input, SIGNAL).unwrap();

    // more folds than examples
    let res = run(&options(&input, &model, &["--folds", "11"]), &mut Vec::new());
    let err = res.unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::InvalidFoldCount { k: 11, nsamples: 10 })
    );
    assert!(!model.exists());

    // numeric class attribute
    let res = run(
        &options(&input, &model, &["--class-index", "1"]),
        &mut Vec::new(),
    );
    assert!(matches!(
        res.unwrap_err().downcast_ref::<Error>(),
        Some(Error::DatasetFormat(_))
    ));
    assert!(!model.exists());

    // malformed input
    fs::write(&input, "@relation broken\n@attribute c {a, b}\n@data\nc\n").unwrap();
    let res = run(&options(&input, &model, &[]), &mut Vec::new());
    assert!(res.is_err());
    assert!(!model.exists());

    // missing input
    let res = run(
        &options(&dir.path().join("missing.arff"), &model, &[]),
        &mut Vec::new(),
    );
    assert!(res.is_err());
    assert!(!model.exists());
}

#[test]
fn empty_dataset_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.arff");
    let model = dir.path().join("empty.model");
    fs::write(&input, "@relation empty\n@attribute c {a, b}\n@data\n").unwrap();

    let res = run(&options(&input, &model, &[]), &mut Vec::new());
    assert_eq!(
        res.unwrap_err().downcast_ref::<Error>(),
        Some(&Error::EmptyDataset)
    );
    assert!(!model.exists());
}
