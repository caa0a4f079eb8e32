//! Digitized scales of the Frost & Schwalen sprinkler evaporation nomograph
//! (as extended by Trimmer).
//!
//! Each scale is stored as `(reading, height)` pairs, where `reading` is the
//! value printed on the chart tick and `height` is the tick's vertical position
//! on the chart, normalised to roughly 0..1.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::error::NomographError;
use crate::interpolate::interpolate;

// An immutable piecewise-linear scale
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    name: Cow<'static, str>,
    points: Cow<'static, [(f64, f64)]>,
}

impl CalibrationTable {
    /// Wraps a built-in table without checking it. The built-in tables are
    /// covered by the invariant tests below.
    pub(crate) const fn from_static(name: &'static str, points: &'static [(f64, f64)]) -> Self {
        CalibrationTable {
            name: Cow::Borrowed(name),
            points: Cow::Borrowed(points),
        }
    }

    /// Builds a table from caller-supplied points, rejecting tables with
    /// fewer than two points or with a domain that is not strictly ascending.
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>) -> Result<Self, NomographError> {
        let table = CalibrationTable {
            name: Cow::Owned(name.into()),
            points: Cow::Owned(points),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), NomographError> {
        match self.points.len() {
            0 => return Err(NomographError::EmptyTable),
            1 => {
                return Err(NomographError::TooFewPoints {
                    table: self.name.to_string(),
                    len: 1,
                });
            }
            _ => {}
        }

        // NaN never compares less, so it is rejected here too
        for (i, pair) in self.points.windows(2).enumerate() {
            if pair[0].0.partial_cmp(&pair[1].0) != Some(Ordering::Less) {
                return Err(NomographError::UnorderedDomain {
                    table: self.name.to_string(),
                    index: i + 1,
                });
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // (min, max) of the calibrated readings
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.0, self.points.last()?.0))
    }

    pub fn interpolate(&self, x: f64) -> Result<f64, NomographError> {
        interpolate(&self.points, x)
    }

    /// Swaps the columns so the table maps height back to reading.
    ///
    /// The swapped pairs are re-sorted by their new domain: a scale whose
    /// heights run downwards would otherwise end up descending and break the
    /// bracketing search.
    pub fn reversed(&self) -> CalibrationTable {
        let mut points: Vec<(f64, f64)> = self.points.iter().map(|&(x, y)| (y, x)).collect();
        points.sort_by(|a, b| match a.0.total_cmp(&b.0) {
            Ordering::Equal => a.1.total_cmp(&b.1),
            ord => ord,
        });
        CalibrationTable {
            name: Cow::Owned(format!("{} (reversed)", self.name)),
            points: Cow::Owned(points),
        }
    }
}

// Vapor-pressure deficit [psi]
const VPD_POINTS: [(f64, f64); 11] = [
    (0.0, 0.0),
    (0.1, 0.221),
    (0.2, 0.381),
    (0.3, 0.508),
    (0.4, 0.613),
    (0.5, 0.695),
    (0.6, 0.762),
    (0.7, 0.829),
    (0.8, 0.887),
    (0.9, 0.949),
    (1.0, 1.0),
];

// Nozzle diameter [64ths of an inch]; height falls as the nozzle grows
const NOZZLE_POINTS: [(f64, f64); 11] = [
    (8.0, 1.002),
    (10.0, 0.895),
    (12.0, 0.815),
    (14.0, 0.742),
    (16.0, 0.675),
    (20.0, 0.563),
    (24.0, 0.483),
    (32.0, 0.352),
    (40.0, 0.233),
    (48.0, 0.152),
    (64.0, -0.001),
];

// Nozzle pressure [psi]
const PRESSURE_POINTS: [(f64, f64); 11] = [
    (20.0, 0.0),
    (25.0, 0.159),
    (30.0, 0.296),
    (35.0, 0.407),
    (40.0, 0.499),
    (45.0, 0.589),
    (50.0, 0.665),
    (55.0, 0.735),
    (60.0, 0.800),
    (70.0, 0.900),
    (80.0, 0.996),
];

// Wind velocity [mph]
const WIND_POINTS: [(f64, f64); 15] = [
    (0.0, 0.0),
    (1.0, 0.140),
    (2.0, 0.246),
    (3.0, 0.356),
    (4.0, 0.435),
    (5.0, 0.508),
    (6.0, 0.578),
    (7.0, 0.651),
    (8.0, 0.706),
    (9.0, 0.760),
    (10.0, 0.811),
    (11.0, 0.854),
    (12.0, 0.895),
    (13.0, 0.930),
    (15.0, 0.994),
];

// Evaporation loss [%], the output scale
const LOSS_POINTS: [(f64, f64); 14] = [
    (0.0, 0.102),
    (0.5, 0.252),
    (1.0, 0.360),
    (2.0, 0.460),
    (3.0, 0.521),
    (4.0, 0.563),
    (5.0, 0.599),
    (6.0, 0.633),
    (8.0, 0.671),
    (10.0, 0.702),
    (15.0, 0.758),
    (20.0, 0.812),
    (30.0, 0.883),
    (40.0, 0.917),
];

pub static VPD: CalibrationTable = CalibrationTable::from_static("vapor-pressure deficit", &VPD_POINTS);
pub static NOZZLE: CalibrationTable = CalibrationTable::from_static("nozzle diameter", &NOZZLE_POINTS);
pub static PRESSURE: CalibrationTable = CalibrationTable::from_static("nozzle pressure", &PRESSURE_POINTS);
pub static WIND: CalibrationTable = CalibrationTable::from_static("wind velocity", &WIND_POINTS);
pub static LOSS: CalibrationTable = CalibrationTable::from_static("evaporation loss", &LOSS_POINTS);

/// Loss scale mapping chart height back to percent loss. Derived once per
/// process on first access.
pub static LOSS_REVERSED: LazyLock<CalibrationTable> = LazyLock::new(|| {
    let table = LOSS.reversed();
    log::debug!("derived '{}' with {} points", table.name(), table.len());
    table
});

pub fn all() -> [&'static CalibrationTable; 5] {
    [&VPD, &NOZZLE, &PRESSURE, &WIND, &LOSS]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_hold_their_invariants() {
        for table in all() {
            assert!(table.validate().is_ok(), "{} failed validation", table.name());
            assert!(table.len() >= 2);
        }
        assert!(LOSS_REVERSED.validate().is_ok());
    }

    #[test]
    fn builtin_domains() {
        assert_eq!(VPD.domain(), Some((0.0, 1.0)));
        assert_eq!(NOZZLE.domain(), Some((8.0, 64.0)));
        assert_eq!(PRESSURE.domain(), Some((20.0, 80.0)));
        assert_eq!(WIND.domain(), Some((0.0, 15.0)));
        assert_eq!(LOSS.domain(), Some((0.0, 40.0)));
    }

    #[test]
    fn builtin_tables_are_individually_monotonic() {
        for table in all() {
            let rising = table.points().windows(2).all(|p| p[1].1 > p[0].1);
            let falling = table.points().windows(2).all(|p| p[1].1 < p[0].1);
            assert!(rising || falling, "{} is not monotonic", table.name());
        }
    }

    #[test]
    fn new_rejects_malformed_tables() {
        assert_eq!(CalibrationTable::new("t", vec![]), Err(NomographError::EmptyTable));
        assert_eq!(
            CalibrationTable::new("t", vec![(1.0, 2.0)]),
            Err(NomographError::TooFewPoints {
                table: "t".to_string(),
                len: 1
            })
        );
        assert_eq!(
            CalibrationTable::new("t", vec![(0.0, 0.0), (2.0, 1.0), (2.0, 3.0)]),
            Err(NomographError::UnorderedDomain {
                table: "t".to_string(),
                index: 2
            })
        );
        assert_eq!(
            CalibrationTable::new("t", vec![(0.0, 0.0), (f64::NAN, 1.0)]),
            Err(NomographError::UnorderedDomain {
                table: "t".to_string(),
                index: 1
            })
        );
    }

    #[test]
    fn reversed_swaps_and_sorts() {
        let reversed = LOSS_REVERSED.points();
        assert_eq!(reversed.len(), LOSS.len());
        assert_eq!(reversed.first(), Some(&(0.102, 0.0)));
        assert_eq!(reversed.last(), Some(&(0.917, 40.0)));
        for &(x, y) in LOSS.points() {
            assert!(reversed.contains(&(y, x)));
        }
    }

    #[test]
    fn reversing_a_falling_scale_sorts_the_new_domain() {
        let reversed = NOZZLE.reversed();
        assert!(reversed.validate().is_ok());
        assert_eq!(reversed.points().first(), Some(&(-0.001, 64.0)));
        assert_eq!(reversed.points().last(), Some(&(1.002, 8.0)));
        assert_eq!(reversed.interpolate(0.815).unwrap(), 12.0);
    }

    #[test]
    fn table_interpolation_hits_stored_points() {
        for table in all() {
            for &(x, y) in table.points() {
                assert_eq!(table.interpolate(x).unwrap(), y);
            }
        }
    }
}
