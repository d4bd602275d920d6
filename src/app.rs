// ============================================================================
// wandcut GUI — egui shell around an EditorSession
// ============================================================================
//
// The shell owns the session plus GPU texture caches and nothing else. All
// image logic lives behind the session's command interface; this file only
// translates egui events into those commands and session state into
// textures.

use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use egui::{Color32, ColorImage, TextureFilter, TextureOptions};

use crate::io;
use crate::ops::overlay::HATCH_LENGTH;
use crate::session::EditorSession;
use crate::{log_err, log_info, log_warn};

pub struct WandcutApp {
    session: Option<EditorSession>,
    image_path: Option<PathBuf>,

    /// Working-image texture, rebuilt when the session revision moves.
    image_texture: Option<egui::TextureHandle>,
    /// Hatched selection outline, rebuilt on revision or animation ticks.
    overlay_texture: Option<egui::TextureHandle>,
    built_revision: u64,
    built_hatch_offset: u32,

    paint_color: String,
    paint_alpha: f32,
    error: Option<String>,
}

impl WandcutApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            session: None,
            image_path: None,
            image_texture: None,
            overlay_texture: None,
            built_revision: 0,
            built_hatch_offset: 0,
            paint_color: "000000".to_string(),
            paint_alpha: 0.35,
            error: None,
        }
    }

    fn texture_options() -> TextureOptions {
        // Nearest magnification keeps pixels crisp when the OS scales the
        // window; the overlay hatching depends on it.
        TextureOptions {
            magnification: TextureFilter::Nearest,
            minification: TextureFilter::Linear,
            ..Default::default()
        }
    }

    // ---- commands -----------------------------------------------------------

    fn open_image(&mut self) {
        // Dialog cancel is not an error — only a failed decode is.
        let Some(path) = io::open_image_dialog() else {
            return;
        };
        match io::load_image_sync(&path) {
            Ok(fb) => {
                log_info!("loaded {} ({}×{})", path.display(), fb.width, fb.height);
                self.session = Some(EditorSession::new(fb));
                self.image_path = Some(path);
                self.image_texture = None;
                self.overlay_texture = None;
                self.error = None;
            }
            Err(e) => {
                log_err!("open failed: {}", e);
                self.error = Some(e);
            }
        }
    }

    fn save_image(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let Some(path) = io::save_image_dialog() else {
            return;
        };
        match io::encode_and_write(session.framebuffer(), &path, 90) {
            Ok(()) => {
                log_info!("saved {}", path.display());
                self.error = None;
            }
            Err(e) => {
                log_err!("save failed: {}", e);
                self.error = Some(e);
            }
        }
    }

    fn apply_paint(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        match session.paint(&self.paint_color, self.paint_alpha) {
            Ok(()) => self.error = None,
            Err(e) => {
                log_warn!("paint rejected: {}", e);
                self.error = Some(e);
            }
        }
    }

    // ---- textures -----------------------------------------------------------

    fn refresh_textures(&mut self, ctx: &egui::Context) {
        let Some(session) = &self.session else {
            return;
        };
        let opts = Self::texture_options();
        let revision = session.revision();

        if self.image_texture.is_none() || self.built_revision != revision {
            let fb = session.framebuffer();
            let img = ColorImage::from_rgba_unmultiplied(
                [fb.width as usize, fb.height as usize],
                &fb.data,
            );
            match &mut self.image_texture {
                Some(tex) => tex.set(img, opts),
                None => self.image_texture = Some(ctx.load_texture("working_image", img, opts)),
            }
        }

        // Marching ants: scroll the hatch pattern a step every ~150 ms.
        let hatch_offset = ((ctx.input(|i| i.time) * 6.5) as u32) % (HATCH_LENGTH * 2);
        if session.mask().is_none() {
            self.overlay_texture = None;
        } else if self.overlay_texture.is_none()
            || self.built_revision != revision
            || self.built_hatch_offset != hatch_offset
        {
            if let Some(ov) = session.overlay(hatch_offset) {
                let img = ColorImage::from_rgba_unmultiplied(
                    [ov.width as usize, ov.height as usize],
                    &ov.data,
                );
                match &mut self.overlay_texture {
                    Some(tex) => tex.set(img, opts),
                    None => {
                        self.overlay_texture = Some(ctx.load_texture("selection_overlay", img, opts))
                    }
                }
            }
            // Keep the ants moving even while the pointer is idle.
            ctx.request_repaint_after(Duration::from_millis(120));
        } else {
            ctx.request_repaint_after(Duration::from_millis(120));
        }

        self.built_revision = revision;
        self.built_hatch_offset = hatch_offset;
    }

    // ---- canvas -------------------------------------------------------------

    fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(tex) = &self.image_texture else {
            return;
        };

        let size = egui::vec2(session.width() as f32, session.height() as f32);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
        let uv = egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0));
        let painter = ui.painter_at(rect);
        painter.image(tex.id(), rect, uv, Color32::WHITE);
        if let Some(ov) = &self.overlay_texture {
            painter.image(ov.id(), rect, uv, Color32::WHITE);
        }

        // The canvas is drawn 1:1, so framebuffer coordinates are a plain
        // offset from the widget rect. The session guards out-of-range seeds.
        let (pressed, down, released) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
            )
        });
        if let Some(pos) = response.interact_pointer_pos() {
            let x = (pos.x - rect.min.x).floor() as i32;
            let y = (pos.y - rect.min.y).floor() as i32;
            if pressed && response.hovered() {
                session.pointer_down(x, y);
            } else if down {
                session.pointer_move(x, y);
            }
        }
        if released {
            session.pointer_up();
        }
    }
}

impl eframe::App for WandcutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Undo accelerator, routed as a discrete command into the session.
        let undo_pressed =
            ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Z));
        if undo_pressed && let Some(session) = &mut self.session {
            session.undo();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open…").clicked() {
                    self.open_image();
                }
                let loaded = self.session.is_some();
                if ui.add_enabled(loaded, egui::Button::new("Save As…")).clicked() {
                    self.save_image();
                }
                ui.separator();

                let has_mask = self.session.as_ref().is_some_and(|s| s.mask().is_some());
                if ui.add_enabled(has_mask, egui::Button::new("Cut")).clicked()
                    && let Some(session) = &mut self.session
                {
                    session.cut();
                }
                if ui.add_enabled(has_mask, egui::Button::new("Paint")).clicked() {
                    self.apply_paint();
                }
                ui.label("Color:");
                ui.add(egui::TextEdit::singleline(&mut self.paint_color).desired_width(64.0));
                ui.add(
                    egui::Slider::new(&mut self.paint_alpha, 0.0..=1.0)
                        .text("alpha")
                        .fixed_decimals(2),
                );
                ui.separator();

                if ui.add_enabled(loaded, egui::Button::new("Undo")).clicked()
                    && let Some(session) = &mut self.session
                {
                    session.undo();
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.session {
                    Some(session) => {
                        if let Some(name) = self.image_path.as_deref().and_then(|p| p.file_name()) {
                            ui.label(name.to_string_lossy().into_owned());
                            ui.separator();
                        }
                        ui.label(format!("{}×{}", session.width(), session.height()));
                        ui.separator();
                        ui.label(format!("tolerance {}", session.tolerance()));
                        ui.separator();
                        match session.mask() {
                            Some(mask) => {
                                ui.label(format!("selection: {} px", mask.included_count()))
                            }
                            None => ui.label("no selection"),
                        };
                        ui.separator();
                        ui.label(format!(
                            "history: {} snapshots ({:.1} MB)",
                            session.snapshot_count(),
                            session.history_memory() as f64 / (1024.0 * 1024.0)
                        ));
                    }
                    None => {
                        ui.label("No image loaded");
                    }
                }
                if let Some(err) = &self.error {
                    ui.separator();
                    ui.label(egui::RichText::new(err.as_str()).color(Color32::RED));
                }
            });
        });

        self.refresh_textures(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Open an image, then click or drag on it to select a color region.");
                });
                return;
            }
            egui::ScrollArea::both().show(ui, |ui| {
                self.show_canvas(ui);
            });
        });
    }
}
