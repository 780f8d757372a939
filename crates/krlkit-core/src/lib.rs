//! # KRLKit Core
//!
//! Core geometry types and error taxonomy for KRLKit.
//! Provides the fundamental abstractions shared by every pipeline stage:
//! points, contours, contour sets, bounding boxes, and the error types
//! surfaced at the crate boundary.

pub mod error;
pub mod geometry;

pub use error::{PlotError, Result};
pub use geometry::{BoundingBox, Contour, ContourSet, Dimensions, Orientation, Point};
