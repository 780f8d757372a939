//! Contour tracing: iso-level boundary extraction from an edge mask.
//!
//! The mask is treated as a scalar field sampled at pixel centers
//! (0.0 = background, 1.0 = ink) and boundary curves are traced at a given
//! iso level with marching squares, at sub-pixel resolution. The algorithm
//! is behind the [`ContourTracer`] trait so a vetted numerical library
//! binding could replace the built-in implementation without touching the
//! rest of the pipeline.
//!
//! # Coordinate and winding conventions
//!
//! The marching-squares walk works natively in (row, col); the returned
//! contours are swapped to (x = col, y = row). Segments are directed so the
//! high-valued (ink) region lies on the left of the travel direction, which
//! makes outer ink boundaries trace clockwise (shoelace sum >= 0 in image
//! coordinates) and hole boundaries counter-clockwise. The contour filter
//! relies on exactly this convention.

use std::collections::HashMap;

use image::GrayImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use krlkit_core::{Contour, ContourSet, PlotError, Point, Result};

/// How saddle cells (two diagonal corners above the iso level) are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaddleConnectivity {
    /// Diagonal high corners are kept disconnected.
    #[default]
    Low,
    /// Diagonal high corners are joined into one region.
    High,
}

/// Trait for contour tracing strategies.
///
/// Input: a binary edge mask (255 = ink) and an iso level in (0, 1) against
/// the mask normalized to 0/1. Output: ordered boundary point sequences in
/// (x = col, y = row) coordinates, discovery order.
pub trait ContourTracer {
    fn trace(&self, mask: &GrayImage, iso_level: f64) -> Result<ContourSet>;
}

/// Marching-squares contour tracer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarchingSquares {
    pub connectivity: SaddleConnectivity,
}

impl ContourTracer for MarchingSquares {
    fn trace(&self, mask: &GrayImage, iso_level: f64) -> Result<ContourSet> {
        if !(iso_level > 0.0 && iso_level < 1.0) {
            return Err(PlotError::invalid_parameter(
                "iso_level",
                format!("must lie strictly between 0 and 1, got {iso_level}"),
            ));
        }

        let (w, h) = mask.dimensions();
        if w < 2 || h < 2 {
            return Ok(ContourSet::default());
        }

        let value = |r: u32, c: u32| -> f64 { mask.get_pixel(c, r).0[0] as f64 / 255.0 };
        let segments = collect_segments(w, h, iso_level, self.connectivity, value);
        let contours = chain_segments(&segments);
        debug!(
            segments = segments.len(),
            contours = contours.len(),
            "traced iso-contours"
        );

        // Native points are (row, col); swap into (x, y).
        Ok(contours
            .into_iter()
            .map(|pts| Contour::new(pts.into_iter().map(|(r, c)| Point::new(c, r)).collect()))
            .collect())
    }
}

/// A directed segment in (row, col) coordinates.
type Segment = ((f64, f64), (f64, f64));

/// Walk every 2x2 cell and emit directed boundary segments.
fn collect_segments<F>(
    w: u32,
    h: u32,
    level: f64,
    connectivity: SaddleConnectivity,
    value: F,
) -> Vec<Segment>
where
    F: Fn(u32, u32) -> f64,
{
    // Interpolated crossing position between two corner values.
    let frac = |p: f64, q: f64| -> f64 { (level - p) / (q - p) };

    let mut segments = Vec::new();
    for r in 0..h - 1 {
        for c in 0..w - 1 {
            let (rf, cf) = (r as f64, c as f64);
            let ul = value(r, c);
            let ur = value(r, c + 1);
            let lr = value(r + 1, c + 1);
            let ll = value(r + 1, c);

            let case = (ul > level) as u8
                | ((ur > level) as u8) << 1
                | ((lr > level) as u8) << 2
                | ((ll > level) as u8) << 3;
            if case == 0 || case == 15 {
                continue;
            }

            // Crossing points on the four cell edges.
            let top = (rf, cf + frac(ul, ur));
            let right = (rf + frac(ur, lr), cf + 1.0);
            let bottom = (rf + 1.0, cf + frac(ll, lr));
            let left = (rf + frac(ul, ll), cf);

            match case {
                1 => segments.push((left, top)),
                2 => segments.push((top, right)),
                3 => segments.push((left, right)),
                4 => segments.push((right, bottom)),
                5 => match connectivity {
                    SaddleConnectivity::Low => {
                        segments.push((left, top));
                        segments.push((right, bottom));
                    }
                    SaddleConnectivity::High => {
                        segments.push((right, top));
                        segments.push((left, bottom));
                    }
                },
                6 => segments.push((top, bottom)),
                7 => segments.push((left, bottom)),
                8 => segments.push((bottom, left)),
                9 => segments.push((bottom, top)),
                10 => match connectivity {
                    SaddleConnectivity::Low => {
                        segments.push((top, right));
                        segments.push((bottom, left));
                    }
                    SaddleConnectivity::High => {
                        segments.push((top, left));
                        segments.push((bottom, right));
                    }
                },
                11 => segments.push((bottom, right)),
                12 => segments.push((right, left)),
                13 => segments.push((right, top)),
                14 => segments.push((top, left)),
                _ => unreachable!(),
            }
        }
    }
    segments
}

/// Exact hash key for a crossing point. Adjacent cells compute shared-edge
/// crossings from the same corner values in the same roles, so the floats
/// match bit for bit.
fn key(p: (f64, f64)) -> (u64, u64) {
    (p.0.to_bits(), p.1.to_bits())
}

/// Chain directed segments into ordered polylines.
///
/// Closed loops come out with first point repeated at the end; boundaries
/// that run off the grid edge stay open. Walk order is deterministic
/// (segments are generated row-major and consumed lowest index first).
fn chain_segments(segments: &[Segment]) -> Vec<Vec<(f64, f64)>> {
    let mut by_start: HashMap<(u64, u64), Vec<usize>> = HashMap::new();
    let mut by_end: HashMap<(u64, u64), Vec<usize>> = HashMap::new();
    for (i, seg) in segments.iter().enumerate() {
        by_start.entry(key(seg.0)).or_default().push(i);
        by_end.entry(key(seg.1)).or_default().push(i);
    }

    let take_unused = |map: &HashMap<(u64, u64), Vec<usize>>, k: (u64, u64), used: &[bool]| {
        map.get(&k)
            .and_then(|v| v.iter().copied().find(|&j| !used[j]))
    };

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();

    for i in 0..segments.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let mut points = vec![segments[i].0, segments[i].1];

        // Extend forward until the loop closes or the boundary ends.
        while let Some(j) = take_unused(&by_start, key(*points.last().unwrap()), &used) {
            used[j] = true;
            points.push(segments[j].1);
        }
        // Extend backward for open boundaries.
        let mut head = Vec::new();
        while let Some(j) = take_unused(&by_end, key(*head.last().unwrap_or(&points[0])), &used) {
            used[j] = true;
            head.push(segments[j].0);
        }
        if !head.is_empty() {
            head.reverse();
            head.extend(points);
            points = head;
        }
        contours.push(points);
    }
    contours
}
