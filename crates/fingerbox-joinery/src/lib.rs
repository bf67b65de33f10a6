//! # Fingerbox Joinery
//!
//! Generates flat cut files for a six-panel, finger-jointed box.
//!
//! ## Pipeline
//!
//! - **Validator**: rejects dimensions that are non-positive, use an
//!   unsupported material gauge or are too small for three fingers
//! - **Decomposer**: splits the box into six panels and records which edge
//!   of each panel meets which neighbour
//! - **Joint Planner**: divides every edge into alternating tab/slot
//!   segments, degrading short edges to butt joints
//! - **Outline**: traces each panel's closed cut path, with optional kerf
//!   compensation
//! - **Layout**: packs the panels in rows on a sheet
//! - **Export**: SVG documents for the laser cutter and plain G-code
//!
//! ```
//! use fingerbox_joinery::{generate, BoxSpec, GeneratorSettings};
//!
//! let generated = generate(
//!     &BoxSpec::new(150.0, 100.0, 80.0, 3.0),
//!     false,
//!     &GeneratorSettings::default(),
//! )
//! .unwrap();
//! assert_eq!(generated.layout().panels.len(), 6);
//! assert!(generated.to_svg().contains("panel-front"));
//! ```

pub mod error;
pub mod gcode;
pub mod generator;
pub mod joints;
pub mod layout;
pub mod outline;
pub mod panels;
pub mod svg;
pub mod validator;

pub use fingerbox_core::{Axis, Gauge};

pub use error::{GeneratorError, GeneratorResult, ValidationError, ValidationResult};
pub use gcode::{render_gcode, LaserSettings};
pub use generator::{content_id, generate, Generated, GeneratorSettings, OutputFormat};
pub use joints::{
    plan_edge, plan_joints, ButtJoint, EdgePlan, JointEdge, JointKind, PlannedPanel, MAX_TAB_COUNT,
};
pub use layout::{check_sheet, pack, Layout, LayoutSettings, PanelOutline, PlacedPanel};
pub use outline::{signed_area, trace_outline};
pub use panels::{decompose, Panel, PanelEdge, PanelId, Polarity, Side};
pub use svg::{read_outlines, render_svg};
pub use validator::{min_dimension, validate, BoxSpec, ValidatedBox, MIN_TAB_COUNT};
