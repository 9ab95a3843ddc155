//!
//! # Decision tree learning
//! `arbol-trees` provides a pure Rust implementation of C4.5-style decision tree induction.
//!
//! # The big picture
//!
//! `arbol-trees` is a crate in the `arbol` workspace, which evaluates interpretable
//! classifiers on labeled tabular data with nominal and numeric attributes.
//!
//! A decision tree predicts the class of an example by learning simple decision rules inferred
//! from its attributes. Splits are chosen by gain ratio, numeric attributes are split at the
//! midpoint threshold with the highest information gain, and the grown tree is post-pruned with
//! pessimistic error estimates.
//!
//! # Current state
//!
//! `arbol-trees` currently provides an [implementation](DecisionTree) of single-tree fitting for
//! classification, with JSON persistence and a textual rendering of the fitted tree.
//!

mod decision_trees;

pub use decision_trees::*;

// Re-export the common Result alias for convenience
pub use arbol::error::Result;
