//! # KRLKit
//!
//! Converts raster images into smooth pen-plotter trajectories for 6-axis
//! KUKA robots, emitted as KRL motion programs.
//!
//! ## Architecture
//!
//! KRLKit is organized as a workspace with multiple crates:
//!
//! 1. **krlkit-core** - Geometry primitives and the shared error type
//! 2. **krlkit-vision** - Edge extraction, contour tracing, contour filtering
//! 3. **krlkit-paths** - Smoothing, spline resampling, gap closing, layout
//! 4. **krlkit-motion** - Motion synthesis, KRL writing and reading
//! 5. **krlkit** - Pipeline facade and the command-line driver
//!
//! ## Pipeline
//!
//! Image bytes go in one end, KRL program text comes out the other:
//! extract a binary edge mask, trace iso-contours, drop noise and
//! duplicate windings, smooth and resample, scale onto paper, then
//! synthesize pen-lift motion and serialize it. [`convert`] runs the
//! whole chain; each stage is also usable on its own.

pub mod pipeline;

pub use pipeline::{convert, convert_image, ConvertOptions};

pub use krlkit_core::{
    BoundingBox, Contour, ContourSet, Dimensions, Orientation, PlotError, Point, Result,
};

pub use krlkit_vision::{
    extract_edges, filter_contours, load_image, load_image_from_bytes, ContourTracer,
    ExtractorParams, FilterParams, KeepOrientation, MarchingSquares, SaddleConnectivity,
    ThresholdPolarity,
};

pub use krlkit_paths::{
    close_gaps, fit, smooth_contour, smooth_set, FitMode, LayoutParams, PaperSize, Placement,
    Scale, SmoothingParams,
};

pub use krlkit_motion::{
    read_program, synthesize, write_program, ContourMotion, KrlParseError, MotionPrimitive,
    MotionProgram, Pose, SynthesisParams,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
