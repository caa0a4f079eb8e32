use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Failures of the nomograph itself. Only reachable through a malformed
// calibration table, never through an out-of-range physical input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NomographError {
    #[error("Interpolation table is empty")]
    EmptyTable,
    #[error("Calibration table '{table}' needs at least two points (got {len})")]
    TooFewPoints { table: String, len: usize },
    #[error("Calibration table '{table}' is not strictly ascending at point {index}")]
    UnorderedDomain { table: String, index: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse TOML configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Nominal range for {parameter} has min greater than max")]
    InvalidRange { parameter: String },
}
