//! KRL source text generation.
//!
//! Emits the controller-compatible token grammar: `&ACCESS`/`&REL`
//! preamble, `DEF <name>()`, home pose declaration, `BAS` initialization,
//! then one `PTP`/`LIN` block per contour. Every numeric field uses fixed
//! 2-decimal formatting; `C_DIS` marks continuous-path blended moves and
//! its absence an exact-stop move. Header lines are mandatory and
//! order-sensitive for controller compatibility.

use crate::program::{MotionPrimitive, MotionProgram};

/// Format a Cartesian target in the KRL frame syntax. Orientation angles
/// are pinned to zero for 2D plotting.
fn frame(x: f64, y: f64, z: f64) -> String {
    format!("{{X {x:.2}, Y {y:.2}, Z {z:.2}, A 0, B 0, C 0}}")
}

/// Serialize a motion program to KRL source text.
pub fn write_program(program: &MotionProgram) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("&ACCESS RVP".to_string());
    lines.push("&REL 1".to_string());
    lines.push(format!("DEF {}()", program.name));
    lines.push("POS p_home".to_string());
    lines.push(format!(
        "p_home = {}",
        frame(program.home.x, program.home.y, program.home.z)
    ));
    lines.push(String::new());
    lines.push("BAS(#initmov, 0)".to_string());
    lines.push(format!("BAS(#tool, {})", program.tool_id));
    lines.push(format!("BAS(#base, {})", program.base_id));
    lines.push(String::new());
    lines.push("PTP $axis_act".to_string());
    lines.push("PTP p_home".to_string());
    lines.push(String::new());

    for contour in &program.contours {
        lines.push(format!("; ----- Contour {} -----", contour.index + 1));
        for primitive in &contour.primitives {
            match *primitive {
                MotionPrimitive::Approach { x, y, z } => {
                    lines.push(format!("PTP {}", frame(x, y, z)));
                }
                MotionPrimitive::Descend { x, y, z } => {
                    lines.push(format!("LIN {}", frame(x, y, z)));
                    lines.push(format!("WAIT SEC {}", program.settle_sec));
                }
                MotionPrimitive::Draw {
                    x,
                    y,
                    z,
                    continuous,
                } => {
                    if continuous {
                        lines.push(format!("LIN {} C_DIS", frame(x, y, z)));
                    } else {
                        lines.push(format!("LIN {}", frame(x, y, z)));
                    }
                }
                MotionPrimitive::Retract { x, y, z } => {
                    lines.push(format!("LIN {}", frame(x, y, z)));
                }
            }
        }
        lines.push(String::new());
    }

    lines.push("PTP p_home".to_string());
    lines.push("END".to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
