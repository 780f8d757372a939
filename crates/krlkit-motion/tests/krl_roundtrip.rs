//! Round-trip tests: synthesize -> write KRL -> read back.

use krlkit_core::{Contour, ContourSet, Point};
use krlkit_motion::{read_program, synthesize, write_program, SynthesisParams};
use krlkit_paths::{Placement, Scale};

fn identity() -> Placement {
    Placement {
        scale: Scale::Uniform(1.0),
        offset: Point::new(0.0, 0.0),
    }
}

#[test]
fn test_written_program_reads_back_to_same_pen_path() {
    let square = Contour::new(vec![
        Point::new(20.0, 20.0),
        Point::new(80.0, 20.0),
        Point::new(80.0, 80.0),
        Point::new(20.0, 80.0),
        Point::new(20.0, 20.0),
    ]);
    let zigzag = Contour::new(vec![
        Point::new(100.0, 10.0),
        Point::new(110.0, 30.0),
        Point::new(120.0, 10.0),
    ]);
    let set = ContourSet::new(vec![square.clone(), zigzag.clone()]);

    let program = synthesize(&set, &identity(), &SynthesisParams::default()).unwrap();
    let text = write_program(&program);
    let parsed = read_program(&text).unwrap();

    assert_eq!(parsed.len(), 2);
    for (original, round_tripped) in set.iter().zip(parsed.iter()) {
        // The parsed contour carries the approach duplicate at the front
        // and the retract duplicate at the back.
        let inner = &round_tripped.points()[1..round_tripped.len() - 1];
        assert_eq!(inner.len(), original.len());
        for (a, b) in original.points().iter().zip(inner) {
            // 2-decimal formatting bounds the round-trip error.
            assert!((a.x - b.x).abs() <= 0.005 + 1e-12);
            assert!((a.y - b.y).abs() <= 0.005 + 1e-12);
        }
    }
}

#[test]
fn test_skipped_contours_leave_stable_numbering() {
    let set = ContourSet::new(vec![
        Contour::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]),
        Contour::new(vec![Point::new(5.0, 5.0)]),
        Contour::new(vec![Point::new(0.0, 20.0), Point::new(10.0, 20.0)]),
    ]);
    let program = synthesize(&set, &identity(), &SynthesisParams::default()).unwrap();
    let text = write_program(&program);

    assert!(text.contains("; ----- Contour 1 -----"));
    assert!(!text.contains("; ----- Contour 2 -----"));
    assert!(text.contains("; ----- Contour 3 -----"));

    let parsed = read_program(&text).unwrap();
    assert_eq!(parsed.len(), 2);
}

#[test]
fn test_draw_moves_are_blended_and_transitions_are_not() {
    let set = ContourSet::new(vec![Contour::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ])]);
    let program = synthesize(&set, &identity(), &SynthesisParams::default()).unwrap();
    let text = write_program(&program);

    let lin_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("LIN")).collect();
    // Descend, two draws, retract.
    assert_eq!(lin_lines.len(), 4);
    assert!(!lin_lines[0].ends_with("C_DIS"), "descend must exact-stop");
    assert!(lin_lines[1].ends_with("C_DIS"));
    assert!(lin_lines[2].ends_with("C_DIS"));
    assert!(
        !lin_lines[3].ends_with("C_DIS"),
        "retract must exact-stop at the terminal point"
    );
}
