//! # KRLKit Paths
//!
//! Middle section of the KRLKit pipeline: cleaning up traced contours and
//! fitting them onto the drawing surface.
//!
//! - **Smoothing**: moving-average filtering and parametric cubic-spline
//!   resampling, selectable per request.
//! - **Gap closing**: bridging almost-closed contours so the pen does not
//!   leave a visible notch.
//! - **Layout**: uniform or per-axis scaling plus translation into a
//!   bordered paper rectangle.

pub mod layout;
pub mod smooth;
mod spline;

pub use layout::{fit, FitMode, LayoutParams, PaperSize, Placement, Scale};
pub use smooth::{close_gaps, smooth_contour, smooth_set, SmoothingParams};
