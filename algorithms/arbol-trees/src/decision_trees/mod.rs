mod algorithm;
mod criterion;
mod hyperparams;
mod iter;
mod pruning;
mod render;

pub use algorithm::*;
pub use hyperparams::*;
pub use iter::*;
pub use render::*;
