//! # KRLKit Vision
//!
//! Raster front half of the KRLKit pipeline: turning an input image into a
//! filtered set of sub-pixel contours.
//!
//! - **Edge extraction**: alpha flattening, margin border, median denoising
//!   and adaptive mean thresholding with an explicit polarity flag.
//! - **Contour tracing**: marching-squares iso-contour extraction behind a
//!   pluggable [`ContourTracer`] trait.
//! - **Contour filtering**: point-count, border-proximity and winding
//!   orientation rules.
//!
//! All stages are pure given their inputs; intermediate edge masks are
//! transient per-request values and are never persisted.

pub mod edge;
pub mod filter;
pub mod trace;

pub use edge::{extract_edges, load_image, load_image_from_bytes, ExtractorParams, ThresholdPolarity};
pub use filter::{filter_contours, FilterParams, KeepOrientation};
pub use trace::{ContourTracer, MarchingSquares, SaddleConnectivity};
