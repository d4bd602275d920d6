// ============================================================================
// COMPOSITOR — commit a selection into the working framebuffer
// ============================================================================

use rayon::prelude::*;

use crate::canvas::{Framebuffer, Mask};

/// Parse a 6-hex-digit color string (no `#` prefix) plus an opacity in
/// `[0, 1]` into flat RGBA. The string is a big-endian 24-bit integer:
/// `"ff8000"` → `[255, 128, 0, round(alpha·255)]`.
///
/// This is the one commit-path input that can be malformed by the user, so
/// it returns an error instead of guessing — a bad color must never reach
/// the framebuffer.
pub fn parse_hex_color(hex: &str, alpha: f32) -> Result<[u8; 4], String> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!(
            "invalid color '{}': expected exactly 6 hex digits, e.g. \"1a2b3c\"",
            hex
        ));
    }
    // Length and digits are pre-checked, so from_str_radix cannot fail here.
    let v = u32::from_str_radix(hex, 16).map_err(|e| e.to_string())?;
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Ok([(v >> 16) as u8, (v >> 8) as u8, v as u8, a])
}

/// Cut: punch the selection out to full transparency.
///
/// Masked-in pixels become `(0, 0, 0, 0)`; every pixel outside the mask
/// bounding box, or with a 0 mask cell, is left byte-identical.
pub fn cut(fb: &mut Framebuffer, mask: &Mask) {
    overwrite_masked(fb, mask, [0, 0, 0, 0]);
}

/// Paint: overwrite the selection with one flat RGBA color.
///
/// This is a replacement, not an over-blend — the chosen alpha is written
/// out as-is, which is what makes translucent tinting (and re-selecting the
/// tinted region later) behave predictably.
pub fn paint(fb: &mut Framebuffer, mask: &Mask, rgba: [u8; 4]) {
    overwrite_masked(fb, mask, rgba);
}

/// Shared pixel loop for cut/paint. Rows of the bounding box are processed
/// in parallel; the box is inclusive and never steps outside the pixel grid.
fn overwrite_masked(fb: &mut Framebuffer, mask: &Mask, rgba: [u8; 4]) {
    debug_assert!(mask.width == fb.width && mask.height == fb.height);
    let b = mask.bounds;
    if b.is_empty() {
        return;
    }
    let w = fb.width as usize;
    let mask_data = &mask.data;

    fb.data
        .par_chunks_exact_mut(w * 4)
        .enumerate()
        .skip(b.min_y as usize)
        .take((b.max_y - b.min_y + 1) as usize)
        .for_each(|(y, row)| {
            let mask_row = y * w;
            for x in b.min_x as usize..=b.max_x as usize {
                if mask_data[mask_row + x] != 0 {
                    row[x * 4..x * 4 + 4].copy_from_slice(&rgba);
                }
            }
        });
}
