//! Dimension validation
//!
//! Turns the four raw numbers of a request into a [`ValidatedBox`]. The
//! validated type has private fields, so every later stage can rely on the
//! dimensions being positive, the thickness being a supported gauge and every
//! dimension being long enough to carry [`MIN_TAB_COUNT`] finger segments
//! from both ends.

use crate::error::{ValidationError, ValidationResult};
use fingerbox_core::{Axis, Gauge};
use serde::{Deserialize, Serialize};

/// Fewest alternating finger segments a jointed edge may carry.
pub const MIN_TAB_COUNT: u32 = 3;

/// Box dimensions as received from a caller, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub thickness: f64,
}

impl BoxSpec {
    pub fn new(width: f64, height: f64, depth: f64, thickness: f64) -> Self {
        Self {
            width,
            height,
            depth,
            thickness,
        }
    }
}

/// Box dimensions that passed [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedBox {
    width: f64,
    height: f64,
    depth: f64,
    gauge: Gauge,
}

impl ValidatedBox {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn gauge(&self) -> Gauge {
        self.gauge
    }

    /// Material thickness in millimetres.
    pub fn thickness(&self) -> f64 {
        self.gauge.millimeters()
    }
}

/// Smallest length (exclusive) a box dimension may have for `gauge`.
pub fn min_dimension(gauge: Gauge) -> f64 {
    2.0 * gauge.millimeters() * f64::from(MIN_TAB_COUNT)
}

/// Validate raw dimensions, failing on the first offending field.
pub fn validate(spec: &BoxSpec) -> ValidationResult<ValidatedBox> {
    let dimensions = [
        (Axis::Width, spec.width),
        (Axis::Height, spec.height),
        (Axis::Depth, spec.depth),
        (Axis::Thickness, spec.thickness),
    ];

    for (axis, value) in dimensions {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::NonPositive { axis, value });
        }
    }

    let gauge = Gauge::from_millimeters(spec.thickness).ok_or(
        ValidationError::UnsupportedThickness {
            value: spec.thickness,
        },
    )?;

    let min = min_dimension(gauge);
    for (axis, value) in &dimensions[..3] {
        if *value <= min {
            return Err(ValidationError::DimensionTooSmall {
                axis: *axis,
                value: *value,
                min,
            });
        }
    }

    Ok(ValidatedBox {
        width: spec.width,
        height: spec.height,
        depth: spec.depth,
        gauge,
    })
}
