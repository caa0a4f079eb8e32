//! Straight-edge construction of the sprinkler evaporation nomograph.
//!
//! The chart has seven vertical scales at fixed horizontal positions. Two
//! construction lines join the VPD and nozzle readings (crossing turning line A)
//! and the pressure and wind readings (crossing turning line B). A third line
//! joins those two crossings and is read where it meets the loss scale.

use nalgebra::Point2;
use serde::Deserialize;

use crate::calibration::{self, CalibrationTable};
use crate::error::NomographError;
use crate::interpolate::linear_between;

// Horizontal positions of the scales on the chart, left to right
pub const X_VPD: f64 = 0.0;
pub const X_PIVOT_A: f64 = 0.237;
pub const X_NOZZLE: f64 = 0.439;
pub const X_LOSS: f64 = 0.490;
pub const X_PRESSURE: f64 = 0.738;
pub const X_PIVOT_B: f64 = 0.870;
pub const X_WIND: f64 = 1.000;

// Raw inputs in chart units
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NomographInputs {
    pub vpd: f64,      // Vapor-pressure deficit [psi]
    pub nozzle: f64,   // Nozzle diameter [64ths of an inch]
    pub pressure: f64, // Nozzle pressure [psi]
    pub wind: f64,     // Wind velocity [mph]
}

impl NomographInputs {
    pub fn new(vpd: f64, nozzle: f64, pressure: f64, wind: f64) -> Self {
        NomographInputs {
            vpd,
            nozzle,
            pressure,
            wind,
        }
    }

    pub fn solve(&self) -> Result<f64, NomographError> {
        construct(self).map(|c| c.loss_percent)
    }

    pub fn construct(&self) -> Result<Construction, NomographError> {
        construct(self)
    }
}

impl Default for NomographInputs {
    // The worked example printed alongside the chart
    fn default() -> Self {
        NomographInputs::new(0.6, 12.0, 40.0, 5.0)
    }
}

// A straight edge laid across the chart between two marked points
#[derive(Debug, Clone, Copy)]
struct ConstructionLine {
    from: Point2<f64>,
    to: Point2<f64>,
}

impl ConstructionLine {
    fn new(from: Point2<f64>, to: Point2<f64>) -> Self {
        ConstructionLine { from, to }
    }

    // Point where the line crosses the vertical scale at `x`
    fn crossing(&self, x: f64) -> Point2<f64> {
        let y = linear_between(x, (self.from.x, self.from.y), (self.to.x, self.to.y));
        Point2::new(x, y)
    }
}

/// Every point marked while solving one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Construction {
    pub vpd: Point2<f64>,
    pub nozzle: Point2<f64>,
    pub pressure: Point2<f64>,
    pub wind: Point2<f64>,
    pub pivot_a: Point2<f64>,
    pub pivot_b: Point2<f64>,
    pub loss: Point2<f64>,
    pub loss_percent: f64,
}

fn mark(table: &CalibrationTable, x: f64, reading: f64) -> Result<Point2<f64>, NomographError> {
    Ok(Point2::new(x, table.interpolate(reading)?))
}

/// Runs the full construction and returns all intermediate points.
///
/// Readings outside a scale's calibrated span are pinned to the nearest end
/// of that scale.
pub fn construct(inputs: &NomographInputs) -> Result<Construction, NomographError> {
    let vpd = mark(&calibration::VPD, X_VPD, inputs.vpd)?;
    let nozzle = mark(&calibration::NOZZLE, X_NOZZLE, inputs.nozzle)?;
    let pressure = mark(&calibration::PRESSURE, X_PRESSURE, inputs.pressure)?;
    let wind = mark(&calibration::WIND, X_WIND, inputs.wind)?;

    let pivot_a = ConstructionLine::new(vpd, nozzle).crossing(X_PIVOT_A);
    let pivot_b = ConstructionLine::new(pressure, wind).crossing(X_PIVOT_B);
    let loss = ConstructionLine::new(pivot_a, pivot_b).crossing(X_LOSS);

    let loss_percent = calibration::LOSS_REVERSED.interpolate(loss.y)?;

    log::trace!(
        "vpd {:.4} nozzle {:.4} pressure {:.4} wind {:.4} -> A {:.4} B {:.4} L {:.4} -> {:.3}%",
        vpd.y,
        nozzle.y,
        pressure.y,
        wind.y,
        pivot_a.y,
        pivot_b.y,
        loss.y,
        loss_percent
    );

    Ok(Construction {
        vpd,
        nozzle,
        pressure,
        wind,
        pivot_a,
        pivot_b,
        loss,
        loss_percent,
    })
}

/**
Estimates sprinkler evaporation loss from the nomograph.

No range checking is done here; see `validation` for the advisory checks.

# Arguments
* `vpd` - Vapor-pressure deficit [psi], calibrated 0.0 to 1.0.
* `nozzle` - Nozzle diameter [64ths of an inch], calibrated 8 to 64.
* `pressure` - Nozzle pressure [psi], calibrated 20 to 80.
* `wind` - Wind velocity [mph], calibrated 0 to 15.

# Returns
Evaporation loss as a percentage of applied water.
*/
pub fn solve(vpd: f64, nozzle: f64, pressure: f64, wind: f64) -> Result<f64, NomographError> {
    NomographInputs::new(vpd, nozzle, pressure, wind).solve()
}
