//! Contour smoothing strategies.
//!
//! Two interchangeable strategies, selected per invocation through
//! [`SmoothingParams`]:
//!
//! - **Moving average**: fixed odd window, edge-value padding, same-length
//!   output. A contour shorter than the window is returned unchanged
//!   (too short to smooth meaningfully).
//! - **Parametric spline resampling**: the contour is parameterized by
//!   normalized cumulative arc length, each axis is fitted with a cubic
//!   spline and resampled at uniformly spaced parameter values. A
//!   smoothing factor of 0 interpolates through every original point;
//!   larger factors pre-filter the control points before fitting.

use serde::{Deserialize, Serialize};
use tracing::debug;

use krlkit_core::{Contour, ContourSet, PlotError, Point, Result};

use crate::spline::CubicSpline;

/// Smoothing strategy and its parameters. Configuration, not state:
/// supplied per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SmoothingParams {
    /// Moving-average filtering with a fixed window.
    MovingAverage {
        /// Window size in points. Must be odd and >= 1.
        window_size: usize,
    },
    /// Parametric-spline resampling.
    Spline {
        /// 0 forces interpolation through every original point; larger
        /// values trade fidelity for smoothness.
        smoothing_factor: f64,
        /// Target spacing between resampled points, in pixels. Must be > 0.
        point_spacing: f64,
    },
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self::Spline {
            smoothing_factor: 0.5,
            point_spacing: 5.0,
        }
    }
}

impl SmoothingParams {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::MovingAverage { window_size } => {
                if window_size == 0 || window_size % 2 == 0 {
                    return Err(PlotError::invalid_parameter(
                        "window_size",
                        format!("must be odd and >= 1, got {window_size}"),
                    ));
                }
            }
            Self::Spline {
                smoothing_factor,
                point_spacing,
            } => {
                if smoothing_factor < 0.0 {
                    return Err(PlotError::invalid_parameter(
                        "smoothing_factor",
                        format!("must be >= 0, got {smoothing_factor}"),
                    ));
                }
                if point_spacing <= 0.0 {
                    return Err(PlotError::invalid_parameter(
                        "point_spacing",
                        format!("must be > 0, got {point_spacing}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Smooth a single contour with the selected strategy.
pub fn smooth_contour(contour: &Contour, params: &SmoothingParams) -> Result<Contour> {
    params.validate()?;
    Ok(match *params {
        SmoothingParams::MovingAverage { window_size } => moving_average(contour, window_size),
        SmoothingParams::Spline {
            smoothing_factor,
            point_spacing,
        } => spline_resample(contour, smoothing_factor, point_spacing),
    })
}

/// Smooth every contour in a set, preserving order.
pub fn smooth_set(contours: &ContourSet, params: &SmoothingParams) -> Result<ContourSet> {
    params.validate()?;
    contours
        .iter()
        .map(|contour| smooth_contour(contour, params))
        .collect()
}

/// Moving-average filter with edge-value padding.
fn moving_average(contour: &Contour, window_size: usize) -> Contour {
    let points = contour.points();
    if points.len() < window_size || window_size == 1 {
        return contour.clone();
    }

    let pad = window_size / 2;
    let n = points.len();
    let smoothed = (0..n)
        .map(|i| {
            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for k in 0..window_size {
                // Index into the virtually padded sequence, clamped to the
                // edge values.
                let j = (i + k).saturating_sub(pad).min(n - 1);
                sum_x += points[j].x;
                sum_y += points[j].y;
            }
            let w = window_size as f64;
            Point::new(sum_x / w, sum_y / w)
        })
        .collect();
    Contour::new(smoothed)
}

/// Parametric-spline resampling over normalized arc length.
fn spline_resample(contour: &Contour, smoothing_factor: f64, point_spacing: f64) -> Contour {
    let total_length = contour.arc_length();
    if total_length == 0.0 {
        // All points coincide; nothing to parameterize.
        return contour.clone();
    }

    // Pre-filter the control points when a smoothing factor is requested.
    let control = if smoothing_factor > 0.0 {
        let window = 2 * smoothing_factor.ceil() as usize + 1;
        moving_average(contour, window)
    } else {
        contour.clone()
    };

    // Cumulative arc length, normalized to [0, 1]. Zero-length segments
    // would duplicate knots; collapse them.
    let points = control.points();
    let mut knots = vec![0.0];
    let mut unique = vec![points[0]];
    let mut acc = 0.0;
    for pair in points.windows(2) {
        let d = pair[0].distance_to(&pair[1]);
        if d > 0.0 {
            acc += d;
            knots.push(acc);
            unique.push(pair[1]);
        }
    }
    if unique.len() < 2 {
        return contour.clone();
    }
    let control_length = acc;
    for t in &mut knots {
        *t /= control_length;
    }

    let xs = CubicSpline::fit(knots.clone(), unique.iter().map(|p| p.x).collect());
    let ys = CubicSpline::fit(knots, unique.iter().map(|p| p.y).collect());

    // Denser output for longer or coarser contours, sparser when the
    // target spacing exceeds the natural density.
    let mean_segment = total_length / (contour.len() - 1).max(1) as f64;
    let num_points = ((contour.len() as f64 * mean_segment / point_spacing).round() as usize).max(2);

    debug!(
        input_points = contour.len(),
        output_points = num_points,
        "spline-resampled contour"
    );

    let resampled = (0..num_points)
        .map(|i| {
            let u = i as f64 / (num_points - 1) as f64;
            Point::new(xs.eval(u), ys.eval(u))
        })
        .collect();
    Contour::new(resampled)
}

/// Bridge an almost-closed contour so the pen path has no visible notch.
///
/// If the endpoints are farther apart than `gap_tolerance`, interpolated
/// points are appended from the last point toward the first at roughly
/// `spacing` intervals, ending exactly on the first point. Contours
/// already closed (or single points) are returned unchanged.
pub fn close_gaps(contour: &Contour, gap_tolerance: f64, spacing: f64) -> Contour {
    if contour.len() < 2 {
        return contour.clone();
    }
    let first = contour.first();
    let last = contour.last();
    let gap = first.distance_to(&last);
    if gap <= gap_tolerance {
        return contour.clone();
    }

    let steps = (gap / spacing).ceil() as usize;
    let mut points = contour.points().to_vec();
    for i in 1..steps {
        let u = i as f64 / steps as f64;
        points.push(Point::new(
            last.x + (first.x - last.x) * u,
            last.y + (first.y - last.y) * u,
        ));
    }
    points.push(first);
    debug!(gap, added = steps, "closed contour gap");
    Contour::new(points)
}
