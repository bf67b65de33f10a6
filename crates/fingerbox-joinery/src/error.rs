//! Error types for the joinery crate.
//!
//! Validation errors are raised before any geometry is computed; sheet
//! errors after the layout is packed but before anything is serialized.

use fingerbox_core::Axis;
use thiserror::Error;

/// Errors raised while validating box dimensions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A dimension is zero, negative or not a finite number.
    #[error("{axis} must be a positive number, got {value}")]
    NonPositive { axis: Axis, value: f64 },

    /// The thickness is not one of the supported material gauges.
    #[error("unsupported material thickness {value}mm (supported: 3, 4, 6)")]
    UnsupportedThickness { value: f64 },

    /// A dimension is too small to carry the minimum number of fingers.
    #[error("{axis} of {value}mm is too small: must exceed {min}mm")]
    DimensionTooSmall { axis: Axis, value: f64, min: f64 },
}

impl ValidationError {
    /// The request field the error refers to.
    pub fn axis(&self) -> Axis {
        match self {
            Self::NonPositive { axis, .. } | Self::DimensionTooSmall { axis, .. } => *axis,
            Self::UnsupportedThickness { .. } => Axis::Thickness,
        }
    }

    /// The offending value.
    pub fn value(&self) -> f64 {
        match self {
            Self::NonPositive { value, .. }
            | Self::UnsupportedThickness { value }
            | Self::DimensionTooSmall { value, .. } => *value,
        }
    }

    /// The exclusive lower bound the value had to exceed, where one exists.
    pub fn limit(&self) -> Option<f64> {
        match self {
            Self::NonPositive { .. } => Some(0.0),
            Self::UnsupportedThickness { .. } => None,
            Self::DimensionTooSmall { min, .. } => Some(*min),
        }
    }
}

/// Errors that can occur while generating a box.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The requested dimensions were rejected.
    #[error("Invalid dimensions: {0}")]
    Validation(#[from] ValidationError),

    /// The packed panels do not fit on the configured sheet.
    #[error(
        "Sheet too large: layout needs {required_width}x{required_height}mm \
         ({required_area}mm²) but the sheet is {sheet_width}x{sheet_height}mm ({max_area}mm²)"
    )]
    SheetTooLarge {
        required_area: f64,
        max_area: f64,
        required_width: f64,
        required_height: f64,
        sheet_width: f64,
        sheet_height: f64,
    },

    /// An edge would need more finger segments than the planner supports.
    #[error("Edge of {length}mm is too long: at most {max}mm")]
    EdgeTooLong { length: f64, max: f64 },

    /// Generator settings are out of range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// A cut file could not be read back.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Canonical request encoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for generation.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Result type alias for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::DimensionTooSmall {
            axis: Axis::Width,
            value: 10.0,
            min: 36.0,
        };
        assert_eq!(
            err.to_string(),
            "width of 10mm is too small: must exceed 36mm"
        );

        let err = ValidationError::UnsupportedThickness { value: 5.0 };
        assert_eq!(
            err.to_string(),
            "unsupported material thickness 5mm (supported: 3, 4, 6)"
        );

        let err = ValidationError::NonPositive {
            axis: Axis::Depth,
            value: -1.0,
        };
        assert_eq!(err.to_string(), "depth must be a positive number, got -1");
    }

    #[test]
    fn test_validation_error_details() {
        let err = ValidationError::DimensionTooSmall {
            axis: Axis::Height,
            value: 20.0,
            min: 24.0,
        };
        assert_eq!(err.axis(), Axis::Height);
        assert_eq!(err.value(), 20.0);
        assert_eq!(err.limit(), Some(24.0));

        let err = ValidationError::UnsupportedThickness { value: 2.0 };
        assert_eq!(err.axis(), Axis::Thickness);
        assert_eq!(err.limit(), None);
    }

    #[test]
    fn test_error_conversion() {
        let err: GeneratorError = ValidationError::UnsupportedThickness { value: 1.0 }.into();
        assert!(matches!(err, GeneratorError::Validation(_)));
        assert!(err.to_string().starts_with("Invalid dimensions:"));
    }

    #[test]
    fn test_edge_too_long_display() {
        let err = GeneratorError::EdgeTooLong {
            length: 5.0e6,
            max: 3.0e6,
        };
        assert_eq!(
            err.to_string(),
            "Edge of 5000000mm is too long: at most 3000000mm"
        );
    }

    #[test]
    fn test_sheet_too_large_display() {
        let err = GeneratorError::SheetTooLarge {
            required_area: 200.0,
            max_area: 100.0,
            required_width: 20.0,
            required_height: 10.0,
            sheet_width: 10.0,
            sheet_height: 10.0,
        };
        assert!(err.to_string().contains("20x10mm"));
        assert!(err.to_string().contains("10x10mm"));
    }
}
