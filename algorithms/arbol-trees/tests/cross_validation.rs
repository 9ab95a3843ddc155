use approx::assert_abs_diff_eq;
use arbol::prelude::*;
use arbol_datasets::{weather, weather_nominal};
use arbol_trees::{DecisionTree, SplitTest};
use ndarray::Array2;

/// Ten examples, five per class, and a binary attribute equal to the class
fn perfectly_correlated() -> Dataset {
    let records = Array2::from_shape_fn((10, 2), |(row, _)| if row < 5 { 0. } else { 1. });
    let attributes = vec![
        Attribute::nominal("signal", vec!["off", "on"]),
        Attribute::nominal("class", vec!["negative", "positive"]),
    ];

    Dataset::new(attributes, records)
        .and_then(|dataset| dataset.with_class_index(1))
        .unwrap()
}

#[test]
fn one_split_tree_with_perfect_cross_validation() {
    let dataset = perfectly_correlated();
    let params = DecisionTree::params();

    let tree = params.fit(&dataset).unwrap();
    assert_eq!(tree.size(), 3);
    assert_eq!(
        tree.root_node().split(),
        Some((0, &SplitTest::Nominal(vec![0, 1])))
    );

    let evaluation = dataset.cross_validate::<_, Error>(&params, 2, 1).unwrap();
    assert_eq!(evaluation.total(), 10);
    assert_abs_diff_eq!(evaluation.percent_correct().unwrap(), 100.0);
    assert_abs_diff_eq!(evaluation.kappa().unwrap(), 1.0);
    assert_abs_diff_eq!(evaluation.mean_absolute_error().unwrap(), 0.0);
}

#[test]
fn single_fold_is_rejected() {
    let dataset = perfectly_correlated();

    let res = dataset.cross_validate::<_, Error>(&DecisionTree::params(), 1, 1);
    assert_eq!(res, Err(Error::InvalidFoldCount { k: 1, nsamples: 10 }));

    let res = dataset.cross_validate::<_, Error>(&DecisionTree::params(), 11, 1);
    assert_eq!(res, Err(Error::InvalidFoldCount { k: 11, nsamples: 10 }));
}

#[test]
fn invalid_params_abort_cross_validation() {
    let dataset = perfectly_correlated();
    let params = DecisionTree::params().confidence(0.0);

    let res = dataset.cross_validate::<_, Error>(&params, 2, 1);
    assert!(matches!(res, Err(Error::Parameters(_))));
}

#[test]
fn weather_cross_validation_covers_every_example() {
    for dataset in &[weather(), weather_nominal()] {
        let params = DecisionTree::params();

        for k in 2..=14 {
            let evaluation = dataset.cross_validate::<_, Error>(&params, k, 1).unwrap();
            assert_eq!(evaluation.total(), 14);
            assert_abs_diff_eq!(
                evaluation.percent_correct().unwrap() + evaluation.percent_incorrect().unwrap(),
                100.0,
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn parallel_cross_validation_is_identical() {
    let dataset = weather();
    let params = DecisionTree::params();

    for seed in 0..5 {
        let sequential = dataset.cross_validate::<_, Error>(&params, 7, seed).unwrap();
        let parallel = dataset
            .par_cross_validate::<_, Error>(&params, 7, seed)
            .unwrap();

        assert_eq!(sequential, parallel);
    }
}

#[test]
fn cross_validation_is_reproducible() {
    let dataset = weather_nominal();
    let params = DecisionTree::params();

    let first = dataset.cross_validate::<_, Error>(&params, 5, 42).unwrap();
    let second = dataset.cross_validate::<_, Error>(&params, 5, 42).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.summary().unwrap(), second.summary().unwrap());
}

#[test]
fn reloaded_tree_classifies_identically() {
    let dataset = weather();
    let tree = DecisionTree::params().fit(&dataset).unwrap();

    let mut model = Vec::new();
    tree.to_writer(&mut model).unwrap();
    let reloaded = DecisionTree::from_reader(model.as_slice()).unwrap();

    assert_eq!(reloaded, tree);
    for (example, _) in dataset.sample_iter() {
        assert_eq!(reloaded.classify(example), tree.classify(example));
        assert_eq!(
            reloaded.distribution_for(example),
            tree.distribution_for(example)
        );
    }
}
