mod common;

use common::synthetic_image::{block_mask, full_mask};
use wandcut::ops::overlay::{HATCH_LENGTH, render_border};

#[test]
fn overlay_is_sized_to_the_full_image() {
    let mask = block_mask(24, 16, 5, 5, 9, 9);
    let overlay = render_border(&mask, 0);
    assert_eq!((overlay.width, overlay.height), (24, 16));
}

#[test]
fn hatch_alternates_black_and_white_along_the_diagonal() {
    let mask = full_mask(10, 10);
    let overlay = render_border(&mask, 0);
    // Top row is all border. (x + y) mod 8 < 4 → black, else white.
    assert_eq!(overlay.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(overlay.pixel(3, 0), [0, 0, 0, 255]);
    assert_eq!(overlay.pixel(4, 0), [255, 255, 255, 255]);
    assert_eq!(overlay.pixel(7, 0), [255, 255, 255, 255]);
    assert_eq!(overlay.pixel(8, 0), [0, 0, 0, 255]);
}

#[test]
fn hatch_offset_scrolls_the_stripes() {
    let mask = full_mask(10, 10);
    let overlay = render_border(&mask, HATCH_LENGTH);
    // Shifted by one stripe length, the phases swap.
    assert_eq!(overlay.pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(overlay.pixel(4, 0), [0, 0, 0, 255]);
}

#[test]
fn non_border_pixels_are_fully_transparent() {
    let mask = full_mask(10, 10);
    let overlay = render_border(&mask, 0);
    for y in 1..9u32 {
        for x in 1..9u32 {
            assert_eq!(overlay.pixel(x, y), [0, 0, 0, 0], "({x},{y}) is interior");
        }
    }
}

#[test]
fn empty_mask_renders_a_fully_transparent_overlay() {
    let overlay = render_border(&wandcut::Mask::new(12, 12), 0);
    assert!(overlay.data.iter().all(|&b| b == 0));
}
