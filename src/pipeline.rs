//! End-to-end conversion facade.
//!
//! Composes the stage crates into one image-to-KRL call. The facade is
//! stateless: every option travels in [`ConvertOptions`] and each call is
//! independent, so converting two images concurrently only needs two calls.

use image::DynamicImage;
use tracing::info;

use krlkit_core::{ContourSet, Dimensions, Result};
use krlkit_motion::{synthesize, write_program, SynthesisParams};
use krlkit_paths::{close_gaps, fit, smooth_set, LayoutParams, SmoothingParams};
use krlkit_vision::{
    extract_edges, filter_contours, load_image_from_bytes, ContourTracer, ExtractorParams,
    FilterParams, MarchingSquares, SaddleConnectivity,
};

/// Every knob of the conversion pipeline, in stage order.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub extractor: ExtractorParams,
    /// Saddle resolution for the marching-squares tracer.
    pub connectivity: SaddleConnectivity,
    /// Iso level against the mask normalized to 0/1, strictly in (0, 1).
    pub iso_level: f64,
    pub filter: FilterParams,
    pub smoothing: SmoothingParams,
    /// Endpoint gaps wider than this (in output millimeters) are bridged
    /// after layout. Non-positive disables gap closing.
    pub gap_tolerance: f64,
    pub layout: LayoutParams,
    pub synthesis: SynthesisParams,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extractor: ExtractorParams::default(),
            connectivity: SaddleConnectivity::default(),
            iso_level: 0.9,
            filter: FilterParams::default(),
            smoothing: SmoothingParams::default(),
            gap_tolerance: 0.5,
            layout: LayoutParams::default(),
            synthesis: SynthesisParams::default(),
        }
    }
}

impl ConvertOptions {
    /// Spacing used for interpolated gap-bridge points. Reuses the spline
    /// resampling pitch when one is configured.
    fn bridge_spacing(&self) -> f64 {
        match self.smoothing {
            SmoothingParams::Spline { point_spacing, .. } => point_spacing,
            SmoothingParams::MovingAverage { .. } => 1.0,
        }
    }
}

/// Convert encoded image bytes into KRL program text.
pub fn convert(bytes: &[u8], options: &ConvertOptions) -> Result<String> {
    let image = load_image_from_bytes(bytes)?;
    convert_image(&image, options)
}

/// Convert a decoded image into KRL program text.
///
/// Runs extraction, tracing, filtering, smoothing, layout, gap closing
/// and motion synthesis in order. Fails fast on invalid parameters and on
/// inputs that leave nothing to draw.
pub fn convert_image(image: &DynamicImage, options: &ConvertOptions) -> Result<String> {
    let mask = extract_edges(image, &options.extractor)?;
    let mask_dims = Dimensions::new(mask.width(), mask.height());

    let tracer = MarchingSquares {
        connectivity: options.connectivity,
    };
    let traced = tracer.trace(&mask, options.iso_level)?;
    let kept = filter_contours(&traced, mask_dims, &options.filter);

    let smoothed = smooth_set(&kept, &options.smoothing)?;
    let placement = fit(&smoothed, &options.layout)?;

    let laid_out: ContourSet = if options.gap_tolerance > 0.0 {
        let spacing = options.bridge_spacing();
        smoothed
            .iter()
            .map(|c| close_gaps(c, options.gap_tolerance, spacing))
            .collect()
    } else {
        smoothed
    };

    let program = synthesize(&laid_out, &placement, &options.synthesis)?;
    info!(
        contours = program.contours.len(),
        skipped = program.skipped.len(),
        "image converted to motion program"
    );
    Ok(write_program(&program))
}
