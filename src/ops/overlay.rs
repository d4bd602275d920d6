// ============================================================================
// SELECTION OVERLAY — hatched outline for live preview
// ============================================================================

use crate::canvas::{Framebuffer, Mask};
use crate::ops::border::border_indices;

/// Diagonal stripe period of the hatch pattern, in pixels.
pub const HATCH_LENGTH: u32 = 4;

/// Render the mask outline as a hatched overlay sized to the full image.
///
/// Border pixels alternate along the diagonal: where
/// `(x + y + hatch_offset) % (2 * HATCH_LENGTH) < HATCH_LENGTH` the pixel is
/// opaque black, otherwise opaque white. Everything else stays fully
/// transparent, so the overlay is drawn *over* the working framebuffer and
/// thrown away on the next mask change — it is never composited in.
///
/// Advancing `hatch_offset` over time scrolls the stripes ("marching ants");
/// a static preview passes 0.
pub fn render_border(mask: &Mask, hatch_offset: u32) -> Framebuffer {
    let mut overlay = Framebuffer::new(mask.width, mask.height);
    let w = mask.width as usize;
    let period = HATCH_LENGTH * 2;

    for idx in border_indices(mask) {
        let x = (idx % w) as u32;
        let y = (idx / w) as u32;
        let k = idx * 4;
        if (x + y + hatch_offset) % period < HATCH_LENGTH {
            // Black stripe: RGB already zeroed, only alpha needs setting.
            overlay.data[k + 3] = 255;
        } else {
            overlay.data[k] = 255;
            overlay.data[k + 1] = 255;
            overlay.data[k + 2] = 255;
            overlay.data[k + 3] = 255;
        }
    }

    overlay
}
