//! Motion synthesis: laid-out contours to a motion program.
//!
//! Each contour becomes an approach (pen up), a descend (pen down, exact
//! stop), a blended draw sequence and a retract, in input order. The whole
//! program is bracketed by HOME moves. A contour that cannot be drawn is
//! skipped with a diagnostic; one bad contour never aborts the batch.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use krlkit_core::{ContourSet, PlotError, Point, Result};
use krlkit_paths::Placement;

use crate::program::{ContourMotion, MotionPrimitive, MotionProgram, Pose};

/// Motion synthesis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParams {
    /// Pen-up height in mm.
    pub travel_z: f64,
    /// Pen-down height in mm.
    pub draw_z: f64,
    /// Home position (x, y) in mm; home z is `travel_z`.
    pub home_x: f64,
    pub home_y: f64,
    /// Keep every `step`-th drawn point; 1 keeps all. Bounds program
    /// length for dense contours. The terminal point is always kept.
    pub step: usize,
    /// Settle pause after each descend, in seconds.
    pub settle_sec: f64,
    /// KUKA tool number for `BAS(#tool, ..)`.
    pub tool_id: u32,
    /// KUKA base number for `BAS(#base, ..)`.
    pub base_id: u32,
    /// KRL program name.
    pub program_name: String,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            travel_z: 10.0,
            draw_z: 0.0,
            home_x: 0.0,
            home_y: 0.0,
            step: 1,
            settle_sec: 0.1,
            tool_id: 3,
            base_id: 3,
            program_name: "DRAW_PICTURE".to_string(),
        }
    }
}

impl SynthesisParams {
    pub fn validate(&self) -> Result<()> {
        if self.step < 1 {
            return Err(PlotError::invalid_parameter("step", "must be >= 1"));
        }
        if self.travel_z <= self.draw_z {
            return Err(PlotError::invalid_parameter(
                "travel_z",
                format!(
                    "must lie above draw_z ({} <= {})",
                    self.travel_z, self.draw_z
                ),
            ));
        }
        let mut chars = self.program_name.chars();
        let valid_name = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(PlotError::invalid_parameter(
                "program_name",
                format!("'{}' is not a valid KRL identifier", self.program_name),
            ));
        }
        Ok(())
    }
}

/// Synthesize a motion program from a contour set and its placement.
///
/// Fails with `EmptyInput` when the set holds no contours at all. A
/// contour with fewer than 2 points is reported, recorded in
/// [`MotionProgram::skipped`] and the batch continues.
pub fn synthesize(
    contours: &ContourSet,
    placement: &Placement,
    params: &SynthesisParams,
) -> Result<MotionProgram> {
    params.validate()?;
    if contours.is_empty() {
        return Err(PlotError::EmptyInput(
            "cannot synthesize motion for an empty contour set".to_string(),
        ));
    }

    let mut program = MotionProgram {
        name: params.program_name.clone(),
        home: Pose::new(params.home_x, params.home_y, params.travel_z),
        tool_id: params.tool_id,
        base_id: params.base_id,
        settle_sec: params.settle_sec,
        contours: Vec::with_capacity(contours.len()),
        skipped: Vec::new(),
    };

    for (index, contour) in contours.iter().enumerate() {
        if contour.len() < 2 {
            let err = PlotError::DegenerateContour {
                index,
                reason: format!("{} point(s), need at least 2", contour.len()),
            };
            warn!("skipping contour: {err}");
            program.skipped.push(index);
            continue;
        }

        let mapped: Vec<Point> = contour.points().iter().map(|p| placement.apply(*p)).collect();
        program.contours.push(synthesize_contour(index, &mapped, params));
    }

    info!(
        contours = program.contours.len(),
        skipped = program.skipped.len(),
        primitives = program.primitive_count(),
        "synthesized motion program"
    );
    Ok(program)
}

fn synthesize_contour(index: usize, points: &[Point], params: &SynthesisParams) -> ContourMotion {
    let first = points[0];
    let last = points[points.len() - 1];

    let mut primitives = vec![
        MotionPrimitive::Approach {
            x: first.x,
            y: first.y,
            z: params.travel_z,
        },
        MotionPrimitive::Descend {
            x: first.x,
            y: first.y,
            z: params.draw_z,
        },
    ];

    // Subsample the drawn points; the terminal point is never dropped.
    let tail = &points[1..];
    for (offset, p) in tail.iter().enumerate().step_by(params.step) {
        if offset == tail.len() - 1 {
            break;
        }
        primitives.push(MotionPrimitive::Draw {
            x: p.x,
            y: p.y,
            z: params.draw_z,
            continuous: true,
        });
    }
    primitives.push(MotionPrimitive::Draw {
        x: last.x,
        y: last.y,
        z: params.draw_z,
        continuous: true,
    });

    primitives.push(MotionPrimitive::Retract {
        x: last.x,
        y: last.y,
        z: params.travel_z,
    });

    ContourMotion { index, primitives }
}
