pub mod calibration;
pub mod config;
mod error;
mod interpolate;
pub mod nomograph;
pub mod validation;

pub use calibration::CalibrationTable;
pub use config::{Config, Scenario};
pub use error::{ConfigError, NomographError};
pub use interpolate::{interpolate, linear_between};
pub use nomograph::{Construction, NomographInputs, construct, solve};
pub use validation::{Assessment, NominalRanges, assess};
