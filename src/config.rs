use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::nomograph::NomographInputs;
use crate::validation::NominalRanges;

// A named set of readings to run through the nomograph
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(flatten)]
    pub inputs: NomographInputs,
}

/// Settings read from a TOML file such as `evaporation.toml`.
///
/// ```toml
/// [ranges.wind]
/// min = 0.0
/// max = 15.0
///
/// [[scenarios]]
/// name = "worked example"
/// vpd = 0.6
/// nozzle = 12
/// pressure = 40
/// wind = 5
/// ```
///
/// Ranges left out of the file keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ranges: NominalRanges,
    pub scenarios: Vec<Scenario>,
}

impl Config {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, PathBuf::from("<string>"))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&toml_str, path.to_path_buf())?;
        log::info!(
            "loaded {} scenario(s) from {}",
            config.scenarios.len(),
            path.display()
        );
        Ok(config)
    }

    fn parse(toml_str: &str, path: PathBuf) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| ConfigError::Parse { path, source })?;
        config.ranges.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Range;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.scenarios.is_empty());
    }

    #[test]
    fn partial_ranges_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [ranges.wind]
            min = 0.0
            max = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(config.ranges.wind, Range::new(0.0, 20.0));
        assert_eq!(config.ranges.vpd, NominalRanges::default().vpd);
    }

    #[test]
    fn integer_readings_are_accepted() {
        let config = Config::from_toml_str(
            r#"
            [[scenarios]]
            name = "worked example"
            vpd = 0.6
            nozzle = 12
            pressure = 40
            wind = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.scenarios.len(), 1);
        assert_eq!(config.scenarios[0].name, "worked example");
        assert_eq!(config.scenarios[0].inputs, NomographInputs::default());
    }

    #[test]
    fn from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("evaporation.toml");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(
            br#"
            [[scenarios]]
            name = "low"
            vpd = 0.2
            nozzle = 8
            pressure = 20
            wind = 0

            [[scenarios]]
            name = "high"
            vpd = 0.9
            nozzle = 32
            pressure = 70
            wind = 12
            "#,
        )
        .unwrap();

        let config = Config::from_file(&file_path).unwrap();
        let names: Vec<&str> = config.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["low", "high"]);
        assert_eq!(config.scenarios[1].inputs.nozzle, 32.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn missing_reading_is_a_parse_error() {
        let err = Config::from_toml_str(
            r#"
            [[scenarios]]
            name = "no wind"
            vpd = 0.6
            nozzle = 12
            pressure = 40
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Config::from_toml_str(
            r#"
            [ranges.pressure]
            min = 80.0
            max = 20.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));
    }
}
