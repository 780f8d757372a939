//! Layout engine: fit a contour set onto the drawing surface.
//!
//! Computes a scale and translation mapping the union bounding box of all
//! contours into the paper rectangle minus its borders. The fit policy is
//! an exhaustive enum checked at the boundary; unrecognized modes are
//! unrepresentable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use krlkit_core::{ContourSet, PlotError, Point, Result};

/// How contours are scaled into the drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitMode {
    /// One uniform scale factor for both axes; no distortion, possibly
    /// leaving margin on one axis.
    #[default]
    PreserveAspect,
    /// Independent per-axis factors filling the drawable area exactly;
    /// permits aspect distortion.
    StretchToFit,
}

/// Common paper sizes, in portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
}

impl PaperSize {
    /// (width, height) in millimeters.
    pub const fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
        }
    }
}

/// Layout parameters, in millimeters of the target frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub target_width: f64,
    pub target_height: f64,
    /// Border kept free on the left and right edges.
    pub border_x: f64,
    /// Border kept free on the top and bottom edges.
    pub border_y: f64,
    pub fit_mode: FitMode,
}

impl Default for LayoutParams {
    fn default() -> Self {
        let (w, h) = PaperSize::A4.dimensions_mm();
        Self {
            target_width: w,
            target_height: h,
            border_x: 5.0,
            border_y: 5.0,
            fit_mode: FitMode::PreserveAspect,
        }
    }
}

impl LayoutParams {
    /// Layout for a standard paper size with uniform borders.
    pub fn for_paper(size: PaperSize, border: f64, fit_mode: FitMode) -> Self {
        let (w, h) = size.dimensions_mm();
        Self {
            target_width: w,
            target_height: h,
            border_x: border,
            border_y: border,
            fit_mode,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("target_width", self.target_width),
            ("target_height", self.target_height),
            ("border_x", self.border_x),
            ("border_y", self.border_y),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(PlotError::invalid_parameter(
                    name,
                    format!("must be finite and >= 0, got {value}"),
                ));
            }
        }
        if self.target_width <= 2.0 * self.border_x || self.target_height <= 2.0 * self.border_y {
            return Err(PlotError::invalid_parameter(
                "border",
                "borders leave no drawable area",
            ));
        }
        Ok(())
    }
}

/// Scale factor: uniform for aspect-preserving fits, per-axis otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Uniform(f64),
    PerAxis { x: f64, y: f64 },
}

impl Scale {
    pub fn x(&self) -> f64 {
        match *self {
            Scale::Uniform(s) => s,
            Scale::PerAxis { x, .. } => x,
        }
    }

    pub fn y(&self) -> f64 {
        match *self {
            Scale::Uniform(s) => s,
            Scale::PerAxis { y, .. } => y,
        }
    }
}

/// A computed placement: scale plus translation into the target frame.
///
/// The transform maps the set's bounding-box minimum corner onto
/// `(border_x, border_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub scale: Scale,
    pub offset: Point,
}

impl Placement {
    /// Map a point from pixel space into the target frame.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale.x() + self.offset.x,
            p.y * self.scale.y() + self.offset.y,
        )
    }
}

/// Compute the placement fitting `contours` into the drawable area.
///
/// Fails with `EmptyInput` for an empty set (the bounding box is
/// undefined). A zero-extent bounding-box axis contributes no constraint
/// under `PreserveAspect` and maps to scale 1.0 under `StretchToFit`.
pub fn fit(contours: &ContourSet, params: &LayoutParams) -> Result<Placement> {
    params.validate()?;
    let bbox = contours
        .bounding_box()
        .ok_or_else(|| PlotError::EmptyInput("cannot lay out an empty contour set".to_string()))?;

    let drawable_w = params.target_width - 2.0 * params.border_x;
    let drawable_h = params.target_height - 2.0 * params.border_y;

    let scale = match params.fit_mode {
        FitMode::PreserveAspect => {
            let sx = if bbox.width() > 0.0 {
                drawable_w / bbox.width()
            } else {
                f64::INFINITY
            };
            let sy = if bbox.height() > 0.0 {
                drawable_h / bbox.height()
            } else {
                f64::INFINITY
            };
            let s = sx.min(sy);
            // Both extents zero: a single point; any finite scale works.
            Scale::Uniform(if s.is_finite() { s } else { 1.0 })
        }
        FitMode::StretchToFit => Scale::PerAxis {
            x: if bbox.width() > 0.0 {
                drawable_w / bbox.width()
            } else {
                1.0
            },
            y: if bbox.height() > 0.0 {
                drawable_h / bbox.height()
            } else {
                1.0
            },
        },
    };

    let offset = Point::new(
        params.border_x - bbox.min_x * scale.x(),
        params.border_y - bbox.min_y * scale.y(),
    );
    debug!(?scale, ?offset, "computed layout placement");
    Ok(Placement { scale, offset })
}
