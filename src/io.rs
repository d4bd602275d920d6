// ============================================================================
// IMAGE I/O — decode to framebuffer, encode by extension, file dialogs
// ============================================================================

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use rfd::FileDialog;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::canvas::Framebuffer;

/// File extensions offered in the open dialog and accepted by the CLI.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp"];

/// Decode an image file into an RGBA8 framebuffer.
///
/// Every format the `image` crate was built with is accepted on input; the
/// decoded pixels are normalized to RGBA8 regardless of source color type.
/// A failure here is a real decode error — "the user cancelled the dialog"
/// never reaches this function.
pub fn load_image_sync(path: &Path) -> Result<Framebuffer, String> {
    let decoded = image::open(path)
        .map_err(|e| format!("failed to decode {}: {}", path.display(), e))?
        .into_rgba8();
    let (width, height) = decoded.dimensions();
    Framebuffer::from_raw(width, height, decoded.into_raw())
        .ok_or_else(|| format!("image too large: {}×{}", width, height))
}

/// Encode the framebuffer to `path`, choosing the codec from the extension.
///
/// PNG / WEBP / BMP keep the alpha channel. JPEG has none, so the image is
/// flattened over white first. `quality` applies to JPEG only (1–100).
pub fn encode_and_write(fb: &Framebuffer, path: &Path, quality: u8) -> Result<(), String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => {
            let writer = buffered_writer(path)?;
            PngEncoder::new(writer)
                .write_image(&fb.data, fb.width, fb.height, ColorType::Rgba8)
                .map_err(|e| format!("PNG encode error: {}", e))
        }
        "jpg" | "jpeg" => {
            let rgb = flatten_over_white(fb);
            let writer = buffered_writer(path)?;
            JpegEncoder::new_with_quality(writer, quality.clamp(1, 100))
                .write_image(&rgb, fb.width, fb.height, ColorType::Rgb8)
                .map_err(|e| format!("JPEG encode error: {}", e))
        }
        "webp" | "bmp" => {
            let img = RgbaImage::from_raw(fb.width, fb.height, fb.data.clone())
                .ok_or_else(|| "framebuffer length mismatch".to_string())?;
            img.save(path)
                .map_err(|e| format!("{} encode error: {}", ext.to_uppercase(), e))
        }
        other => Err(format!(
            "unsupported output format '{}': use one of {}",
            other,
            IMAGE_EXTENSIONS.join(", ")
        )),
    }
}

/// JPEG path: composite straight alpha over a white background.
fn flatten_over_white(fb: &Framebuffer) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(fb.data.len() / 4 * 3);
    for px in fb.data.chunks_exact(4) {
        let a = px[3] as u32;
        for c in 0..3 {
            rgb.push((((px[c] as u32) * a + 255 * (255 - a)) / 255) as u8);
        }
    }
    rgb
}

fn buffered_writer(path: &Path) -> Result<BufWriter<File>, String> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| format!("cannot create {}: {}", path.display(), e))
}

// ============================================================================
// FILE DIALOGS (GUI mode only)
// ============================================================================

/// Native open dialog. `None` means the user cancelled — distinct from a
/// decode failure, which only `load_image_sync` can produce.
pub fn open_image_dialog() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

/// Native save dialog, defaulting to a PNG name so alpha survives.
pub fn save_image_dialog() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .set_file_name("masked.png")
        .save_file()
}
