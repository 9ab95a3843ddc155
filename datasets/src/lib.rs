//! `arbol-datasets` reads labeled tabular datasets and provides sample datasets ready to be used
//! in tests and examples.
//!
//! ## The Big Picture
//!
//! `arbol-datasets` is a crate in the `arbol` workspace. Datasets are read from the
//! attribute-relation file format (ARFF), plain or gzip compressed, into an
//! [`arbol::Dataset`] with a nominal or numeric schema.
//!
//! ## Current State
//!
//! Currently the following sample datasets are provided:
//!
//! * `["weather"]` : the weather dataset, with numeric temperature and humidity
//! * `["weather"]` : its fully nominal variant, `weather_nominal`
//!
//! ## Using a dataset
//!
//! To use one of the provided datasets in your project add the crate to your Cargo.toml with the
//! corresponding feature enabled:
//! ```ignore
//! arbol-datasets = { version = "0.1.0", features = ["weather"] }
//! ```
//! and then use it in your example or tests as
//! ```ignore
//! let dataset = arbol_datasets::weather();
//!  /// ...
//! ```

mod arff;

pub use arff::{from_path, parse_arff, read_arff, read_arff_gz, ReadError};

#[cfg(feature = "weather")]
use arbol::Dataset;

/// Parses a bundled ARFF file and designates its last attribute as the class
#[cfg(feature = "weather")]
fn bundled(text: &str) -> Dataset {
    parse_arff(text)
        .map_err(arbol::Error::from)
        .and_then(|dataset| {
            let class_index = dataset.nattributes() - 1;
            dataset.with_class_index(class_index)
        })
        .unwrap()
}

#[cfg(feature = "weather")]
/// Read in the weather dataset, whether to play outside depending on the weather.
///
/// Fourteen examples with the nominal `outlook` and `windy`, the numeric `temperature` and
/// `humidity`, and the class `play` with labels `yes` and `no`.
pub fn weather() -> Dataset {
    bundled(include_str!("../data/weather.arff"))
}

#[cfg(feature = "weather")]
/// Read in the weather dataset with `temperature` and `humidity` discretised into categories
pub fn weather_nominal() -> Dataset {
    bundled(include_str!("../data/weather.nominal.arff"))
}
