use arbol::prelude::*;
use arbol_datasets::weather;
use arbol_trees::DecisionTree;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // 1. Load the weather sample, `play` is the class
    let dataset = weather();

    // 2. Fit a pruned tree on all examples
    let params = DecisionTree::params().confidence(0.25);
    let tree = params.fit(&dataset)?;
    println!("{}", tree);

    // 3. Estimate its accuracy with stratified 7-fold cross-validation
    let evaluation = dataset.cross_validate::<_, Error>(&params, 7, 1)?;
    println!("{}", evaluation.summary()?);
    println!("{}", evaluation.matrix_string());

    Ok(())
}
