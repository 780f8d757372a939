//! Contour filtering: discard contours unusable for drawing.
//!
//! Three rules are applied in order, each contour judged independently of
//! every other (no contour affects another's fate):
//!
//! 1. Too few points.
//! 2. Any point within `border_margin` of the mask edge (truncated
//!    boundary artifacts).
//! 3. Wrong winding orientation. With the tracer's convention, keeping
//!    [`KeepOrientation::Cw`] keeps outer ink boundaries and discards
//!    nested holes; [`KeepOrientation::Ccw`] the reverse.
//!
//! Survivor order is preserved from the input; every drop is logged with
//! the offending contour's index.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use krlkit_core::{Contour, ContourSet, Dimensions, Orientation};

/// Which winding orientation survives filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeepOrientation {
    /// Keep clockwise contours (shoelace sum >= 0): outer ink boundaries.
    #[default]
    Cw,
    /// Keep counter-clockwise contours: hole boundaries.
    Ccw,
    /// Keep both.
    Any,
}

/// Contour filtering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Minimum number of points a contour must have to survive.
    pub min_points: usize,
    /// Margin from the mask edge, in pixels; 0 disables the border rule.
    pub border_margin: f64,
    /// Winding orientation to keep.
    pub keep_orientation: KeepOrientation,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_points: 20,
            border_margin: 0.0,
            keep_orientation: KeepOrientation::Cw,
        }
    }
}

/// Filter a contour set, preserving relative order of survivors.
pub fn filter_contours(
    contours: &ContourSet,
    mask_dims: Dimensions,
    params: &FilterParams,
) -> ContourSet {
    let survivors: ContourSet = contours
        .iter()
        .enumerate()
        .filter(|(index, contour)| keep(*index, contour, mask_dims, params))
        .map(|(_, contour)| contour.clone())
        .collect();
    info!(
        input = contours.len(),
        kept = survivors.len(),
        "filtered contour set"
    );
    survivors
}

fn keep(index: usize, contour: &Contour, dims: Dimensions, params: &FilterParams) -> bool {
    if contour.len() < params.min_points {
        debug!(
            index,
            points = contour.len(),
            min = params.min_points,
            "dropping contour: too few points"
        );
        return false;
    }

    if params.border_margin > 0.0 {
        let margin = params.border_margin;
        let max_x = (dims.width.saturating_sub(1)) as f64 - margin;
        let max_y = (dims.height.saturating_sub(1)) as f64 - margin;
        if contour
            .points()
            .iter()
            .any(|p| p.x < margin || p.y < margin || p.x > max_x || p.y > max_y)
        {
            debug!(index, margin, "dropping contour: touches border margin");
            return false;
        }
    }

    let orientation = contour.orientation();
    let matches = match params.keep_orientation {
        KeepOrientation::Cw => orientation == Orientation::Cw,
        KeepOrientation::Ccw => orientation == Orientation::Ccw,
        KeepOrientation::Any => true,
    };
    if !matches {
        debug!(index, ?orientation, "dropping contour: wrong orientation");
    }
    matches
}
