//! # Fingerbox Core
//!
//! Units and geometry primitives shared by the Fingerbox crates:
//! material gauges, box axes, 2D points and bounding boxes, and the
//! millimetre formatting used by every cut-file emitter.

pub mod geometry;
pub mod units;

pub use geometry::{push_unique_point, BoundingBox, Point, POINT_EPSILON};
pub use units::{format_mm, Axis, Gauge, GaugeError};
