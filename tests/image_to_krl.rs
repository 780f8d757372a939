//! Whole-pipeline tests: encoded image file in, parseable KRL out.

use image::{ImageFormat, Rgba, RgbaImage};

use krlkit::{
    convert, read_program, ConvertOptions, FitMode, LayoutParams, PaperSize, Point,
};

fn ring_png() -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(140, 140, Rgba([255, 255, 255, 255]));
    for y in 0..140i32 {
        for x in 0..140i32 {
            let d2 = (x - 70).pow(2) + (y - 70).pow(2);
            if d2 <= 45 * 45 && d2 >= 30 * 30 {
                img.put_pixel(x as u32, y as u32, Rgba([0, 0, 0, 255]));
            }
        }
    }
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_ring_image_round_trips_onto_a4() {
    let options = ConvertOptions {
        layout: LayoutParams::for_paper(PaperSize::A4, 5.0, FitMode::PreserveAspect),
        ..ConvertOptions::default()
    };
    let text = convert(&ring_png(), &options).unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), &text).unwrap();
    let reread = std::fs::read_to_string(file.path()).unwrap();
    let parsed = read_program(&reread).unwrap();

    // The ring has a dark band: an outer and an inner stroke boundary
    // survive the clockwise-winding filter after tracing.
    assert!(!parsed.is_empty());
    for contour in parsed.iter() {
        for p in contour.points() {
            assert!(p.x >= 4.99 && p.x <= 205.01, "x out of paper: {}", p.x);
            assert!(p.y >= 4.99 && p.y <= 292.01, "y out of paper: {}", p.y);
        }
    }
}

#[test]
fn test_subsampling_shortens_the_program() {
    let dense = convert(&ring_png(), &ConvertOptions::default()).unwrap();
    let sparse_options = ConvertOptions {
        synthesis: krlkit::SynthesisParams {
            step: 4,
            ..krlkit::SynthesisParams::default()
        },
        ..ConvertOptions::default()
    };
    let sparse = convert(&ring_png(), &sparse_options).unwrap();
    assert!(sparse.lines().count() < dense.lines().count());

    // Subsampling must not lose the terminal point of any contour.
    let dense_set = read_program(&dense).unwrap();
    let sparse_set = read_program(&sparse).unwrap();
    assert_eq!(dense_set.len(), sparse_set.len());
    for (a, b) in dense_set.iter().zip(sparse_set.iter()) {
        let close = |p: Point, q: Point| (p.x - q.x).abs() < 0.011 && (p.y - q.y).abs() < 0.011;
        assert!(close(a.first(), b.first()));
        assert!(close(a.last(), b.last()));
    }
}
