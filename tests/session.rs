mod common;

use common::synthetic_image::{split_vertical, uniform, with_block};
use wandcut::EditorSession;
use wandcut::canvas::Bounds;
use wandcut::components::tools::drag_threshold;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const NEAR_RED: [u8; 4] = [235, 0, 0, 255]; // delta 20 from RED
const BLUE: [u8; 4] = [0, 0, 255, 255];

// ---------------------------------------------------------------------------
// Threshold control
// ---------------------------------------------------------------------------

#[test]
fn threshold_stays_clamped_for_any_displacement() {
    let anchor = (100, 100);
    for &(x, y) in &[
        (100, 100),
        (101, 100),
        (100, 99),
        (2000, 100),
        (-2000, 100),
        (100, 5000),
        (100, -5000),
        (1500, -1500),
    ] {
        let t = drag_threshold(15, anchor, (x, y));
        assert!(
            (1..=255).contains(&t),
            "threshold {t} out of range for drag to ({x},{y})"
        );
    }
    assert_eq!(drag_threshold(15, anchor, (2000, 100)), 255);
    assert_eq!(drag_threshold(15, anchor, (-2000, 100)), 1);
}

#[test]
fn threshold_growth_is_faster_than_shrink() {
    // Same 30 px of travel: +10 growing (30/3), -6 shrinking (30/5).
    assert_eq!(drag_threshold(15, (0, 0), (30, 0)), 25);
    assert_eq!(drag_threshold(15, (0, 0), (-30, 0)), 9);
}

#[test]
fn threshold_ties_break_toward_the_y_axis() {
    // |dx| == |dy|: the y displacement decides the sign.
    // len = sqrt(50) ≈ 7.071, sign = -1/5, floor(-1.414) = -2.
    assert_eq!(drag_threshold(15, (0, 0), (5, -5)), 13);
    // Positive y at the same distance grows: floor(7.071 / 3) = 2.
    assert_eq!(drag_threshold(15, (0, 0), (5, 5)), 17);
}

// ---------------------------------------------------------------------------
// Pointer gesture
// ---------------------------------------------------------------------------

#[test]
fn click_on_a_uniform_image_selects_everything() {
    let mut session = EditorSession::new(uniform(10, 10, RED));
    session.pointer_down(4, 4);
    session.pointer_up();
    let mask = session.mask().expect("uniform image click must select");
    assert_eq!(mask.included_count(), 100);
    assert_eq!(
        mask.bounds,
        Bounds {
            min_x: 0,
            min_y: 0,
            max_x: 9,
            max_y: 9
        }
    );
}

#[test]
fn drag_recomputes_from_the_anchor_with_the_new_tolerance() {
    let fb = split_vertical(20, 10, 10, RED, NEAR_RED);
    let mut session = EditorSession::new(fb);

    session.pointer_down(2, 2);
    assert_eq!(session.tolerance(), 15);
    assert_eq!(
        session.mask().expect("left band selected").included_count(),
        100
    );

    // 17 px to the right: tolerance 15 + floor(17/3) = 20, enough to bridge
    // the delta-20 step, so the refill from the anchor takes the whole image.
    session.pointer_move(19, 2);
    assert_eq!(session.tolerance(), 20);
    let mask = session.mask().expect("selection grew");
    assert_eq!(mask.included_count(), 200);
    assert_eq!(
        mask.bounds,
        Bounds {
            min_x: 0,
            min_y: 0,
            max_x: 19,
            max_y: 9
        }
    );

    // Pointer-up ends the gesture and resets the live tolerance.
    session.pointer_up();
    assert_eq!(session.tolerance(), 15);
    assert!(session.mask().is_some(), "selection survives pointer-up");
}

#[test]
fn separate_clicks_accumulate_one_selection() {
    let fb = with_block(
        with_block(uniform(12, 12, WHITE), 1, 1, 3, 3, BLUE),
        8,
        8,
        10,
        10,
        BLUE,
    );
    let mut session = EditorSession::new(fb);
    session.set_blur_radius(0); // keep the tiny blocks crisp

    session.pointer_down(2, 2);
    session.pointer_up();
    assert_eq!(session.mask().unwrap().included_count(), 9);

    session.pointer_down(9, 9);
    session.pointer_up();
    let mask = session.mask().expect("second click extends");
    assert_eq!(mask.included_count(), 18, "both blocks selected");
    assert_eq!(
        mask.bounds,
        Bounds {
            min_x: 1,
            min_y: 1,
            max_x: 10,
            max_y: 10
        }
    );
}

#[test]
fn out_of_range_events_are_swallowed() {
    let mut session = EditorSession::new(uniform(8, 8, RED));
    session.pointer_down(-3, 99);
    session.pointer_up();
    assert!(session.mask().is_none(), "nothing to select off-canvas");

    // An existing selection survives a stray off-canvas click.
    session.select(4, 4, 15);
    assert!(session.mask().is_some());
    session.pointer_down(-1, -1);
    session.pointer_up();
    assert_eq!(session.mask().unwrap().included_count(), 64);
}

// ---------------------------------------------------------------------------
// Commits and the undo stack
// ---------------------------------------------------------------------------

#[test]
fn cut_clears_the_mask_and_pushes_a_snapshot() {
    let mut session = EditorSession::new(uniform(8, 8, RED));
    session.select(0, 0, 15);
    session.cut();
    assert!(session.mask().is_none(), "mask is consumed by the commit");
    assert_eq!(session.snapshot_count(), 2);
    assert_eq!(session.framebuffer().pixel(3, 3), [0, 0, 0, 0]);
}

#[test]
fn commits_with_no_selection_are_no_ops() {
    let original = uniform(8, 8, RED);
    let mut session = EditorSession::new(original.clone());
    session.cut();
    assert!(session.paint("00ff00", 1.0).is_ok());
    assert_eq!(session.snapshot_count(), 1, "no-ops must not snapshot");
    assert!(session.framebuffer().data == original.data);
}

#[test]
fn malformed_color_errors_without_touching_anything() {
    let original = uniform(8, 8, RED);
    let mut session = EditorSession::new(original.clone());
    session.select(4, 4, 15);

    let err = session.paint("not-a-color", 1.0);
    assert!(err.is_err(), "bad hex must surface");
    assert!(session.framebuffer().data == original.data);
    assert!(
        session.mask().is_some(),
        "the selection stays usable after the rejected commit"
    );
    assert_eq!(session.snapshot_count(), 1);
}

#[test]
fn two_paints_leave_three_snapshots_and_undo_steps_back_one() {
    let mut session = EditorSession::new(uniform(4, 4, WHITE));

    session.select(1, 1, 15);
    session.paint("ff0000", 1.0).unwrap();
    assert_eq!(session.framebuffer().pixel(2, 2), [255, 0, 0, 255]);

    session.select(1, 1, 15);
    session.paint("0000ff", 1.0).unwrap();
    assert_eq!(session.framebuffer().pixel(2, 2), [0, 0, 255, 255]);
    assert_eq!(session.snapshot_count(), 3, "initial + two commits");

    assert!(session.undo());
    assert_eq!(session.snapshot_count(), 2);
    assert_eq!(
        session.framebuffer().pixel(2, 2),
        [255, 0, 0, 255],
        "undo restores the state after the first paint"
    );
}

#[test]
fn undo_never_drops_below_the_load_snapshot() {
    let original = uniform(6, 6, BLUE);
    let mut session = EditorSession::new(original.clone());

    session.select(0, 0, 15);
    session.cut();
    assert_eq!(session.snapshot_count(), 2);

    assert!(session.undo());
    assert!(!session.undo(), "already at the floor");
    assert!(!session.undo());
    assert_eq!(session.snapshot_count(), 1);
    assert!(
        session.framebuffer().data == original.data,
        "floor snapshot equals the load-time framebuffer"
    );
}

#[test]
fn overlay_exists_exactly_while_a_selection_does() {
    let mut session = EditorSession::new(uniform(10, 10, RED));
    assert!(session.overlay(0).is_none());
    session.select(5, 5, 15);
    let overlay = session.overlay(0).expect("selection has an outline");
    assert_eq!((overlay.width, overlay.height), (10, 10));
    session.cut();
    assert!(session.overlay(0).is_none(), "commit discards the preview");
}
