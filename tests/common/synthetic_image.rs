//! Synthetic framebuffers and masks for exercising the selection pipeline
//! without decoding any real image files.

#![allow(dead_code)] // each integration test binary uses a subset

use wandcut::{Bounds, Framebuffer, Mask};

/// Framebuffer filled with a single color.
pub fn uniform(width: u32, height: u32, rgba: [u8; 4]) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height);
    for px in fb.data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
    fb
}

/// Two vertical bands: `left` for `x < split_x`, `right` elsewhere.
pub fn split_vertical(
    width: u32,
    height: u32,
    split_x: u32,
    left: [u8; 4],
    right: [u8; 4],
) -> Framebuffer {
    let mut fb = uniform(width, height, right);
    for y in 0..height {
        for x in 0..split_x.min(width) {
            fb.set_pixel(x, y, left);
        }
    }
    fb
}

/// Paint an axis-aligned rectangle (inclusive corners) over a framebuffer.
pub fn with_block(
    mut fb: Framebuffer,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    rgba: [u8; 4],
) -> Framebuffer {
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            fb.set_pixel(x, y, rgba);
        }
    }
    fb
}

/// Mask with every cell included.
pub fn full_mask(width: u32, height: u32) -> Mask {
    let mut mask = Mask::new(width, height);
    mask.data.fill(1);
    mask.bounds = Bounds {
        min_x: 0,
        min_y: 0,
        max_x: width - 1,
        max_y: height - 1,
    };
    mask
}

/// Mask including exactly one rectangle (inclusive corners).
pub fn block_mask(
    width: u32,
    height: u32,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
) -> Mask {
    let mut mask = Mask::new(width, height);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            mask.set(x, y, 1);
        }
    }
    mask.bounds = Bounds {
        min_x,
        min_y,
        max_x,
        max_y,
    };
    mask
}
