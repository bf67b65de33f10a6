//! Unit definitions
//!
//! All lengths in Fingerbox are millimetres stored as `f64`. Material
//! thickness is restricted to the small set of sheet gauges the cutter is
//! set up for.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Tolerance used when matching a requested thickness against a gauge.
const GAUGE_TOLERANCE: f64 = 1e-9;

/// Supported material gauge (sheet thickness)
///
/// Serialized as the plain millimetre number (`3`, `4` or `6`) so it
/// round-trips through the `thickness` field of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Gauge {
    /// 3 mm sheet
    Mm3,
    /// 4 mm sheet
    Mm4,
    /// 6 mm sheet
    Mm6,
}

impl Gauge {
    /// Every supported gauge, thinnest first.
    pub const ALL: [Gauge; 3] = [Gauge::Mm3, Gauge::Mm4, Gauge::Mm6];

    /// Thickness in millimetres.
    pub fn millimeters(self) -> f64 {
        match self {
            Self::Mm3 => 3.0,
            Self::Mm4 => 4.0,
            Self::Mm6 => 6.0,
        }
    }

    /// Look up the gauge matching `value` millimetres.
    pub fn from_millimeters(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| (g.millimeters() - value).abs() < GAUGE_TOLERANCE)
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.millimeters())
    }
}

/// Error returned when a thickness is not one of the supported gauges.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unsupported material thickness {0}mm (supported: 3, 4, 6)")]
pub struct GaugeError(pub f64);

impl TryFrom<f64> for Gauge {
    type Error = GaugeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_millimeters(value).ok_or(GaugeError(value))
    }
}

impl From<Gauge> for f64 {
    fn from(gauge: Gauge) -> Self {
        gauge.millimeters()
    }
}

/// A named box dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Left-to-right extent
    Width,
    /// Bottom-to-top extent
    Height,
    /// Front-to-back extent
    Depth,
    /// Material thickness
    Thickness,
}

impl Axis {
    /// Field name as it appears in a request body.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Depth => "depth",
            Self::Thickness => "thickness",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Format a millimetre value for a cut file.
///
/// At most three decimals, trailing zeros trimmed, and negative zero printed
/// as `0`, so identical geometry always yields identical text.
pub fn format_mm(value: f64) -> String {
    let mut text = format!("{:.3}", value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
