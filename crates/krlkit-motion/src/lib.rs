//! # KRLKit Motion
//!
//! Back half of the KRLKit pipeline: converting laid-out contours into a
//! validated KUKA KRL motion program, and parsing such programs back for
//! round-trip visualization.
//!
//! - **Synthesis**: per contour, an approach / descend / draw / retract
//!   sequence with pen-lift semantics, bracketed by HOME moves.
//! - **KRL writing**: the exact controller-compatible token grammar with
//!   fixed 2-decimal formatting and `C_DIS` blending markers.
//! - **KRL reading**: regex-based extraction of the 2D pen path grouped at
//!   contour header comments.

pub mod krl;
pub mod program;
pub mod reader;
pub mod synthesize;

pub use krl::write_program;
pub use program::{ContourMotion, MotionPrimitive, MotionProgram, Pose};
pub use reader::{read_program, KrlParseError};
pub use synthesize::{synthesize, SynthesisParams};
