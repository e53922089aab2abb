//! Geometry primitives over integer pixel segments.
//!
//! - [`LineSegment`]: immutable detector output with length, direction,
//!   midpoint and the `(upper, lower)` endpoint orientation.
//! - [`intersect`]: intersection of two infinite lines given two points on
//!   each; parallel input yields `None`.
//! - [`angle`]: sign-agnostic direction similarity and degree bands used by
//!   the detector filters.

pub mod angle;
mod intersect;
mod segment;

pub use intersect::{intersect, PARALLEL_EPS};
pub use segment::{GeometryError, LineSegment};
pub(crate) use segment::to_point;
