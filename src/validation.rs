// Advisory range checks around the nomograph.
//
// The nomograph itself accepts any reading and pins it to the chart. These
// checks are for callers that want to flag readings the chart was never
// calibrated for, and results outside the printed loss scale.

use std::fmt;

use serde::Deserialize;

use crate::error::{ConfigError, NomographError};
use crate::nomograph::NomographInputs;

// Inclusive interval
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Vpd,
    Nozzle,
    Pressure,
    Wind,
    Loss,
}

impl Parameter {
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Vpd => "Vapor-Pressure Deficit",
            Parameter::Nozzle => "Nozzle Diameter",
            Parameter::Pressure => "Nozzle Pressure",
            Parameter::Wind => "Wind Velocity",
            Parameter::Loss => "Evaporation Loss",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Vpd | Parameter::Pressure => "psi",
            Parameter::Nozzle => "64ths of an inch",
            Parameter::Wind => "mph",
            Parameter::Loss => "%",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Ranges the chart is calibrated for
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NominalRanges {
    pub vpd: Range,
    pub nozzle: Range,
    pub pressure: Range,
    pub wind: Range,
    pub loss: Range,
}

impl Default for NominalRanges {
    fn default() -> Self {
        NominalRanges {
            vpd: Range::new(0.0, 1.0),
            nozzle: Range::new(8.0, 64.0),
            pressure: Range::new(20.0, 80.0),
            wind: Range::new(0.0, 15.0),
            loss: Range::new(0.0, 40.0),
        }
    }
}

impl NominalRanges {
    pub fn get(&self, parameter: Parameter) -> Range {
        match parameter {
            Parameter::Vpd => self.vpd,
            Parameter::Nozzle => self.nozzle,
            Parameter::Pressure => self.pressure,
            Parameter::Wind => self.wind,
            Parameter::Loss => self.loss,
        }
    }

    // Rejects ranges with min > max (or NaN bounds)
    pub fn validate(&self) -> Result<(), ConfigError> {
        for parameter in ALL_PARAMETERS {
            let range = self.get(parameter);
            if !(range.min <= range.max) {
                return Err(ConfigError::InvalidRange {
                    parameter: parameter.label().to_string(),
                });
            }
        }
        Ok(())
    }
}

const ALL_PARAMETERS: [Parameter; 5] = [
    Parameter::Vpd,
    Parameter::Nozzle,
    Parameter::Pressure,
    Parameter::Wind,
    Parameter::Loss,
];

impl fmt::Display for NominalRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Valid Parameter Ranges:")?;
        for (i, parameter) in ALL_PARAMETERS.iter().enumerate() {
            let range = self.get(*parameter);
            let prefix = if *parameter == Parameter::Loss { "Expected " } else { "" };
            write!(
                f,
                "  {}{}: {} to {} {}",
                prefix,
                parameter.label(),
                range.min,
                range.max,
                parameter.unit()
            )?;
            if i + 1 < ALL_PARAMETERS.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeViolation {
    pub parameter: Parameter,
    pub value: f64,
    pub range: Range,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} must be between {} and {} {} (got {})",
            self.parameter,
            self.range.min,
            self.range.max,
            self.parameter.unit(),
            self.value
        )
    }
}

pub fn check_inputs(ranges: &NominalRanges, inputs: &NomographInputs) -> Vec<RangeViolation> {
    [
        (Parameter::Vpd, inputs.vpd),
        (Parameter::Nozzle, inputs.nozzle),
        (Parameter::Pressure, inputs.pressure),
        (Parameter::Wind, inputs.wind),
    ]
    .into_iter()
    .filter_map(|(parameter, value)| {
        let range = ranges.get(parameter);
        (!range.contains(value)).then_some(RangeViolation {
            parameter,
            value,
            range,
        })
    })
    .collect()
}

/// Outcome of a range-checked calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    /// One or more readings fall outside the calibrated ranges; nothing was
    /// calculated.
    InputOutOfRange { violations: Vec<RangeViolation> },
    /// Calculated, but the loss falls outside the printed loss scale.
    OutputOutOfRange { loss_percent: f64 },
    InRange { loss_percent: f64 },
}

impl Assessment {
    pub fn loss_percent(&self) -> Option<f64> {
        match self {
            Assessment::InputOutOfRange { .. } => None,
            Assessment::OutputOutOfRange { loss_percent } | Assessment::InRange { loss_percent } => {
                Some(*loss_percent)
            }
        }
    }

    pub fn is_in_range(&self) -> bool {
        matches!(self, Assessment::InRange { .. })
    }
}

/**
Checks the readings, solves the nomograph and classifies the result.

Range problems are reported through the returned `Assessment`, never as an
error. The only error is a malformed calibration table.
*/
pub fn assess(ranges: &NominalRanges, inputs: &NomographInputs) -> Result<Assessment, NomographError> {
    let violations = check_inputs(ranges, inputs);
    if !violations.is_empty() {
        for v in &violations {
            log::warn!("{}", v);
        }
        return Ok(Assessment::InputOutOfRange { violations });
    }

    let loss_percent = inputs.solve()?;
    if ranges.loss.contains(loss_percent) {
        Ok(Assessment::InRange { loss_percent })
    } else {
        log::warn!(
            "evaporation loss {:.2}% outside expected {} to {}%",
            loss_percent,
            ranges.loss.min,
            ranges.loss.max
        );
        Ok(Assessment::OutputOutOfRange { loss_percent })
    }
}

// Loss for in-range readings, `default` for anything else
pub fn loss_or(ranges: &NominalRanges, inputs: &NomographInputs, default: f64) -> f64 {
    match assess(ranges, inputs) {
        Ok(assessment) => assessment.loss_percent().unwrap_or(default),
        Err(e) => {
            log::error!("nomograph failed: {}", e);
            default
        }
    }
}
