//! Edge extraction: raster image to binary edge mask.
//!
//! The extractor flattens transparency onto a white background (so
//! transparent regions do not register as false edges), adds a uniform
//! white margin (so contours never clip at the physical image boundary),
//! converts to grayscale, suppresses speckle with a median filter and
//! binarizes with an adaptive mean threshold. Which side of the threshold
//! counts as ink is an explicit [`ThresholdPolarity`] value, never an
//! implicit constant.

use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::filter::median_filter;
use serde::{Deserialize, Serialize};
use tracing::debug;

use krlkit_core::{PlotError, Result};

/// Which intensity side of the adaptive threshold is treated as ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdPolarity {
    /// Ink is darker than its neighborhood (pencil drawing on paper).
    DarkOnLight,
    /// Ink is brighter than its neighborhood (chalk on blackboard).
    LightOnDark,
}

/// Edge extraction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorParams {
    /// Median filter aperture in pixels. Must be odd and >= 1; 1 disables
    /// the filter.
    pub blur_size: u32,
    /// Adaptive threshold neighborhood size in pixels. Must be odd and >= 3.
    pub block_size: u32,
    /// Offset subtracted from the neighborhood mean before comparison.
    pub bias: f64,
    /// Which side of the threshold is ink.
    pub polarity: ThresholdPolarity,
    /// Uniform white border added around the image, in pixels.
    pub margin: u32,
    /// Rotate the image 180 degrees before processing, for artwork scanned
    /// upside down relative to the robot base frame.
    pub rotate180: bool,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            blur_size: 7,
            block_size: 3,
            bias: 1.0,
            polarity: ThresholdPolarity::DarkOnLight,
            margin: 20,
            rotate180: false,
        }
    }
}

impl ExtractorParams {
    /// Validate parameter ranges. Called before any pixel is touched.
    pub fn validate(&self) -> Result<()> {
        if self.blur_size == 0 || self.blur_size % 2 == 0 {
            return Err(PlotError::invalid_parameter(
                "blur_size",
                format!("must be odd and >= 1, got {}", self.blur_size),
            ));
        }
        if self.block_size < 3 || self.block_size % 2 == 0 {
            return Err(PlotError::invalid_parameter(
                "block_size",
                format!("must be odd and >= 3, got {}", self.block_size),
            ));
        }
        Ok(())
    }
}

/// Load an image from a file path.
pub fn load_image<P: AsRef<std::path::Path>>(path: P) -> Result<DynamicImage> {
    image::open(path.as_ref()).map_err(|e| PlotError::ImageLoad(e.to_string()))
}

/// Decode an image from an in-memory byte buffer.
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| PlotError::ImageLoad(e.to_string()))
}

/// Extract a binary edge mask from an image.
///
/// Returns a `GrayImage` where 255 = ink (per the configured polarity) and
/// 0 = background. The mask is `2 * margin` pixels larger than the input
/// in each dimension.
pub fn extract_edges(image: &DynamicImage, params: &ExtractorParams) -> Result<GrayImage> {
    params.validate()?;

    let mut flat = flatten_onto_white(image, params.margin);
    if params.rotate180 {
        flat = image::imageops::rotate180(&flat);
    }

    let gray: GrayImage = image::imageops::grayscale(&flat);

    let blurred = if params.blur_size > 1 {
        let radius = params.blur_size / 2;
        median_filter(&gray, radius, radius)
    } else {
        gray
    };

    let mask = adaptive_mean_threshold(&blurred, params.block_size, params.bias, params.polarity);
    debug!(
        width = mask.width(),
        height = mask.height(),
        "extracted edge mask"
    );
    Ok(mask)
}

/// Composite the image onto an opaque white canvas with a uniform white
/// margin on all sides.
fn flatten_onto_white(image: &DynamicImage, margin: u32) -> RgbaImage {
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut canvas = RgbaImage::from_pixel(w + 2 * margin, h + 2 * margin, Rgba([255, 255, 255, 255]));

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel.0[3] as u32;
        let blend = |fg: u8| -> u8 { ((fg as u32 * alpha + 255 * (255 - alpha)) / 255) as u8 };
        canvas.put_pixel(
            x + margin,
            y + margin,
            Rgba([blend(pixel.0[0]), blend(pixel.0[1]), blend(pixel.0[2]), 255]),
        );
    }
    canvas
}

/// Adaptive mean thresholding over a `block_size` square neighborhood.
///
/// A pixel is foreground when it lies on the ink side of
/// `neighborhood_mean - bias`. Neighborhoods are clamped at the image
/// border. A summed-area table keeps the window mean O(1) per pixel;
/// `imageproc::contrast::adaptive_threshold` is not used because it
/// supports neither the bias offset nor an explicit polarity.
fn adaptive_mean_threshold(
    image: &GrayImage,
    block_size: u32,
    bias: f64,
    polarity: ThresholdPolarity,
) -> GrayImage {
    let (w, h) = image.dimensions();
    let radius = (block_size / 2) as i64;

    // Summed-area table with a zero row/column at index 0.
    let stride = (w + 1) as usize;
    let mut integral = vec![0u64; stride * (h + 1) as usize];
    for y in 0..h as usize {
        let mut row_sum = 0u64;
        for x in 0..w as usize {
            row_sum += image.get_pixel(x as u32, y as u32).0[0] as u64;
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }

    let mut mask = GrayImage::new(w, h);
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let x0 = (x - radius).max(0) as usize;
            let y0 = (y - radius).max(0) as usize;
            let x1 = (x + radius).min(w as i64 - 1) as usize + 1;
            let y1 = (y + radius).min(h as i64 - 1) as usize + 1;
            let count = ((x1 - x0) * (y1 - y0)) as f64;
            let sum = integral[y1 * stride + x1] + integral[y0 * stride + x0]
                - integral[y0 * stride + x1]
                - integral[y1 * stride + x0];
            let threshold = sum as f64 / count - bias;

            let value = image.get_pixel(x as u32, y as u32).0[0] as f64;
            let is_ink = match polarity {
                ThresholdPolarity::DarkOnLight => value <= threshold,
                ThresholdPolarity::LightOnDark => value > threshold,
            };
            mask.put_pixel(x as u32, y as u32, Luma([if is_ink { 255 } else { 0 }]));
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_image(w: u32, h: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(w, h, Luma([value])))
    }

    #[test]
    fn test_even_block_size_rejected() {
        let params = ExtractorParams {
            block_size: 4,
            ..Default::default()
        };
        let err = extract_edges(&uniform_image(8, 8, 128), &params).unwrap_err();
        assert!(matches!(err, PlotError::InvalidParameter { .. }));
    }

    #[test]
    fn test_even_blur_size_rejected() {
        let params = ExtractorParams {
            blur_size: 6,
            ..Default::default()
        };
        assert!(extract_edges(&uniform_image(8, 8, 128), &params).is_err());
    }

    #[test]
    fn test_mask_gains_margin() {
        let params = ExtractorParams {
            margin: 5,
            blur_size: 1,
            ..Default::default()
        };
        let mask = extract_edges(&uniform_image(10, 8, 200), &params).unwrap();
        assert_eq!(mask.dimensions(), (20, 18));
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        // A flat white image never crosses its own neighborhood mean.
        let params = ExtractorParams {
            blur_size: 1,
            margin: 0,
            ..Default::default()
        };
        let mask = extract_edges(&uniform_image(12, 12, 255), &params).unwrap();
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_dark_stroke_detected_with_dark_on_light() {
        let mut img = GrayImage::from_pixel(16, 16, Luma([255]));
        for x in 4..12 {
            img.put_pixel(x, 8, Luma([0]));
        }
        let params = ExtractorParams {
            blur_size: 1,
            block_size: 3,
            bias: 1.0,
            margin: 0,
            ..Default::default()
        };
        let mask = extract_edges(&DynamicImage::ImageLuma8(img), &params).unwrap();
        assert!(mask.get_pixel(8, 8).0[0] == 255);
        assert!(mask.get_pixel(1, 1).0[0] == 0);
    }

    #[test]
    fn test_polarity_flips_foreground() {
        let mut img = GrayImage::from_pixel(16, 16, Luma([0]));
        for x in 4..12 {
            img.put_pixel(x, 8, Luma([255]));
        }
        let params = ExtractorParams {
            blur_size: 1,
            block_size: 3,
            bias: 1.0,
            margin: 0,
            polarity: ThresholdPolarity::LightOnDark,
            ..Default::default()
        };
        let mask = extract_edges(&DynamicImage::ImageLuma8(img), &params).unwrap();
        assert!(mask.get_pixel(8, 8).0[0] == 255);
    }

    #[test]
    fn test_transparent_pixels_flatten_to_white() {
        let img = RgbaImage::from_pixel(6, 6, Rgba([0, 0, 0, 0]));
        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(img), 0);
        assert!(flat.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_load_image_rejects_garbage() {
        let err = load_image_from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PlotError::ImageLoad(_)));
    }
}
