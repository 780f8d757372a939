//! Motion primitive and program data structures.
//!
//! Coordinates are in millimeters in the robot base frame. A program is
//! immutable once synthesized; the writer serializes it without further
//! geometry decisions.

use serde::{Deserialize, Serialize};

/// A Cartesian pose in the robot base frame. Orientation angles are fixed
/// to zero for 2D plotting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A single validated motion step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionPrimitive {
    /// Rapid move above the contour start, pen lifted.
    Approach { x: f64, y: f64, z: f64 },
    /// Lower the pen at the contour start. Always an exact-stop move so
    /// the pen lands accurately (never blended).
    Descend { x: f64, y: f64, z: f64 },
    /// Draw toward a point, pen down. `continuous` requests
    /// continuous-path blending (rounded trajectory corners).
    Draw {
        x: f64,
        y: f64,
        z: f64,
        continuous: bool,
    },
    /// Lift the pen at the contour end.
    Retract { x: f64, y: f64, z: f64 },
}

/// The motion sequence for one surviving contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourMotion {
    /// Stable index of the contour in the input set; drives the
    /// `; ----- Contour <n> -----` numbering (1-based in the text).
    pub index: usize,
    pub primitives: Vec<MotionPrimitive>,
}

/// A complete motion program, bracketed by HOME moves at start and end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionProgram {
    /// KRL program name (the `DEF <name>()` identifier).
    pub name: String,
    pub home: Pose,
    pub tool_id: u32,
    pub base_id: u32,
    /// Pause after each pen descend, in seconds, letting the arm settle
    /// before drawing starts.
    pub settle_sec: f64,
    pub contours: Vec<ContourMotion>,
    /// Indices of input contours skipped as degenerate.
    pub skipped: Vec<usize>,
}

impl MotionProgram {
    /// Total number of primitives across all contours.
    pub fn primitive_count(&self) -> usize {
        self.contours.iter().map(|c| c.primitives.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_count() {
        let program = MotionProgram {
            name: "DRAW_PICTURE".to_string(),
            home: Pose::new(0.0, 0.0, 10.0),
            tool_id: 3,
            base_id: 3,
            settle_sec: 0.1,
            contours: vec![ContourMotion {
                index: 0,
                primitives: vec![
                    MotionPrimitive::Approach {
                        x: 1.0,
                        y: 2.0,
                        z: 10.0,
                    },
                    MotionPrimitive::Descend {
                        x: 1.0,
                        y: 2.0,
                        z: 0.0,
                    },
                    MotionPrimitive::Retract {
                        x: 1.0,
                        y: 2.0,
                        z: 10.0,
                    },
                ],
            }],
            skipped: vec![],
        };
        assert_eq!(program.primitive_count(), 3);
    }
}
