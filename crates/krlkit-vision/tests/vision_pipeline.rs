//! End-to-end tests for the raster half of the pipeline:
//! image -> edge mask -> traced contours -> filtered contours.

use image::{DynamicImage, GrayImage, Luma};

use krlkit_core::Dimensions;
use krlkit_vision::{
    extract_edges, filter_contours, ContourTracer, ExtractorParams, FilterParams, KeepOrientation,
    MarchingSquares,
};

/// A dark filled disk on a white background.
fn disk_image(size: u32, radius: f64) -> DynamicImage {
    let mut img = GrayImage::from_pixel(size, size, Luma([255]));
    let center = size as f64 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            if (dx * dx + dy * dy).sqrt() <= radius {
                img.put_pixel(x, y, Luma([10]));
            }
        }
    }
    DynamicImage::ImageLuma8(img)
}

#[test]
fn test_disk_produces_drawable_contours() {
    let image = disk_image(64, 20.0);
    let params = ExtractorParams {
        blur_size: 3,
        block_size: 3,
        bias: 2.0,
        margin: 4,
        ..Default::default()
    };
    let mask = extract_edges(&image, &params).unwrap();
    let dims = Dimensions::new(mask.width(), mask.height());

    let traced = MarchingSquares::default().trace(&mask, 0.9).unwrap();
    assert!(!traced.is_empty(), "expected contours around the disk edge");

    let filtered = filter_contours(
        &traced,
        dims,
        &FilterParams {
            min_points: 20,
            border_margin: 2.0,
            keep_orientation: KeepOrientation::Cw,
        },
    );
    assert!(!filtered.is_empty(), "outer disk boundary should survive");

    for contour in filtered.iter() {
        assert!(contour.len() >= 20);
        assert!(contour.is_closed(1e-6), "disk boundaries are closed curves");
        for p in contour.points() {
            assert!(p.x >= 2.0 && p.x <= (dims.width - 1) as f64 - 2.0);
            assert!(p.y >= 2.0 && p.y <= (dims.height - 1) as f64 - 2.0);
        }
    }
}

#[test]
fn test_blank_image_yields_empty_set() {
    let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(32, 32, Luma([255])));
    let params = ExtractorParams {
        blur_size: 1,
        margin: 0,
        ..Default::default()
    };
    let mask = extract_edges(&image, &params).unwrap();
    let traced = MarchingSquares::default().trace(&mask, 0.9).unwrap();
    assert!(traced.is_empty());
}
