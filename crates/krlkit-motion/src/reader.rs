//! KRL program reader for round-trip visualization.
//!
//! Parses the exact grammar the writer emits back into a [`ContourSet`]:
//! `PTP`/`LIN` lines with an inline `{X .., Y .., Z ..}` frame contribute
//! a 2D point; `; ----- Contour` comment lines start a new group. All
//! other lines (headers, `WAIT SEC`, `PTP p_home`, blanks) are skipped.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use krlkit_core::{Contour, ContourSet, PlotError, Point};

/// Errors raised while parsing KRL program text.
#[derive(Error, Debug)]
pub enum KrlParseError {
    /// A move line carried a frame block that could not be parsed.
    #[error("Malformed frame on line {line}: {text}")]
    MalformedFrame {
        /// 1-based line number in the program text.
        line: usize,
        /// The offending line.
        text: String,
    },
}

impl From<KrlParseError> for PlotError {
    fn from(err: KrlParseError) -> Self {
        PlotError::KrlParse(err.to_string())
    }
}

fn frame_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:PTP|LIN)\s*\{X\s*(-?[0-9]+(?:\.[0-9]+)?),\s*Y\s*(-?[0-9]+(?:\.[0-9]+)?),\s*Z\s*(-?[0-9]+(?:\.[0-9]+)?)")
            .expect("frame regex is valid")
    })
}

/// Parse KRL program text into the 2D pen path it draws.
///
/// Each contour group contains every move target in file order, including
/// the approach and retract positions (which duplicate the first and last
/// drawn coordinates in x/y). Move lines before the first contour header
/// (the initial homing moves) are ignored.
pub fn read_program(text: &str) -> Result<ContourSet, KrlParseError> {
    let re = frame_regex();

    let mut groups: Vec<Vec<Point>> = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.starts_with("; ----- Contour") {
            groups.push(Vec::new());
            continue;
        }
        if !line.contains('{') || !(line.starts_with("PTP") || line.starts_with("LIN")) {
            continue;
        }
        let Some(current) = groups.last_mut() else {
            continue;
        };
        let captures = re
            .captures(line)
            .ok_or_else(|| KrlParseError::MalformedFrame {
                line: number + 1,
                text: line.to_string(),
            })?;
        // The regex only matches valid float syntax.
        let x: f64 = captures[1].parse().expect("regex-validated float");
        let y: f64 = captures[2].parse().expect("regex-validated float");
        current.push(Point::new(x, y));
    }

    let set: ContourSet = groups
        .into_iter()
        .filter(|g| !g.is_empty())
        .map(Contour::new)
        .collect();
    debug!(contours = set.len(), "parsed KRL program");
    Ok(set)
}
