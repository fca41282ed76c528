mod dataset;
mod source;

use thiserror::Error;

pub use dataset::{Dataset, DatasetStats};
pub use source::{load_orders, load_restaurants, read_orders, read_restaurants};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {context} row: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },
}
