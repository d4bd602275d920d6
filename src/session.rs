// ============================================================================
// EDITOR SESSION — owned canvas state + command interface
// ============================================================================

use crate::canvas::{Framebuffer, Mask};
use crate::components::history::SnapshotHistory;
use crate::components::tools::{WandState, drag_threshold};
use crate::log_info;
use crate::ops::{border, composite, overlay, wand};

/// One editing session over one loaded image.
///
/// Owns the working framebuffer, the current selection mask (if any), the
/// wand gesture state and the undo stack. Input and presentation
/// collaborators call into this by exclusive reference; nothing here touches
/// a window, a file or an event loop, so the whole session drives headlessly
/// (CLI mode, tests) exactly as it does under the GUI.
pub struct EditorSession {
    framebuffer: Framebuffer,
    mask: Option<Mask>,
    wand: WandState,
    history: SnapshotHistory,
    /// Bumped on every visible change; collaborators compare it to know when
    /// to rebuild textures.
    revision: u64,
}

impl EditorSession {
    /// Start a session on a freshly decoded framebuffer. The initial state
    /// is pushed as the first (never-discarded) undo snapshot.
    pub fn new(framebuffer: Framebuffer) -> Self {
        let initial = framebuffer.clone();
        Self {
            framebuffer,
            mask: None,
            wand: WandState::default(),
            history: SnapshotHistory::new(initial),
            revision: 0,
        }
    }

    // ---- read access --------------------------------------------------------

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height
    }

    /// Current selection, `None` when nothing is selected. An empty mask is
    /// never stored — it collapses to `None` at the point it would arise.
    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    /// Live tolerance (changes while dragging, resets on pointer-up).
    pub fn tolerance(&self) -> i32 {
        self.wand.tolerance
    }

    pub fn snapshot_count(&self) -> usize {
        self.history.len()
    }

    /// Bytes held by undo snapshots (status display).
    pub fn history_memory(&self) -> usize {
        self.history.memory_size()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ---- configuration ------------------------------------------------------

    /// Tolerance every new gesture starts from (T0).
    pub fn set_base_tolerance(&mut self, tolerance: i32) {
        self.wand.base_tolerance = tolerance.clamp(1, 255);
        if !self.wand.is_active() {
            self.wand.tolerance = self.wand.base_tolerance;
        }
    }

    /// Border smoothing radius applied after each fill (0 disables).
    pub fn set_blur_radius(&mut self, radius: u32) {
        self.wand.blur_radius = radius;
    }

    // ---- pointer gesture ----------------------------------------------------

    /// Primary-button press in framebuffer pixel space. Out-of-range
    /// coordinates (a malformed pointer event) select nothing and are
    /// swallowed silently, per the error contract.
    pub fn pointer_down(&mut self, x: i32, y: i32) {
        let prior = self.mask.take();
        self.wand.begin(x, y, prior);
        self.draw_mask(x, y);
    }

    /// Pointer motion while the button is held. Displacement from the anchor
    /// maps to a tolerance; the fill is recomputed from the *anchor* only
    /// when that tolerance actually changes, not on every pixel of movement.
    pub fn pointer_move(&mut self, x: i32, y: i32) {
        let Some((ax, ay)) = self.wand.anchor else {
            return;
        };
        if (x, y) == (ax, ay) {
            return;
        }
        let tolerance = drag_threshold(self.wand.base_tolerance, (ax, ay), (x, y));
        if tolerance != self.wand.tolerance {
            self.wand.tolerance = tolerance;
            self.draw_mask(ax, ay);
        }
    }

    /// Button release: the gesture context (anchor, live tolerance, merge
    /// base) clears, the accumulated selection stays until commit.
    pub fn pointer_up(&mut self) {
        self.wand.end();
    }

    /// One-shot selection used by headless callers: equivalent to a click at
    /// (x, y) with an explicit tolerance and no drag.
    pub fn select(&mut self, x: i32, y: i32, tolerance: i32) {
        self.wand.tolerance = tolerance.clamp(1, 255);
        self.wand.prior = self.mask.take();
        self.draw_mask(x, y);
        self.wand.prior = None;
        self.wand.tolerance = self.wand.base_tolerance;
    }

    /// Flood-fill from (x, y) at the live tolerance, smooth the border, and
    /// merge with the selection carried across the gesture.
    fn draw_mask(&mut self, x: i32, y: i32) {
        let filled = wand::flood_fill(
            &self.framebuffer,
            x,
            y,
            self.wand.tolerance,
            self.wand.prior.as_ref(),
        );
        let smoothed =
            filled.map(|m| border::blur_border(m, self.wand.blur_radius, self.wand.prior.as_ref()));

        self.mask = match (smoothed, self.wand.prior.as_ref()) {
            (Some(m), Some(prior)) => Some(wand::merge(&m, prior)),
            (Some(m), None) => (!m.is_empty()).then_some(m),
            (None, Some(prior)) => Some(prior.clone()),
            (None, None) => None,
        };
        // Blur can erode a tiny fill to nothing; don't keep an empty mask.
        if self.mask.as_ref().is_some_and(|m| m.is_empty()) {
            self.mask = None;
        }
        self.revision += 1;
    }

    // ---- preview ------------------------------------------------------------

    /// Hatched outline of the current selection, sized to the full image.
    /// `None` when there is nothing to preview. Rebuilt per call — the
    /// overlay is throwaway by design.
    pub fn overlay(&self, hatch_offset: u32) -> Option<Framebuffer> {
        self.mask
            .as_ref()
            .map(|mask| overlay::render_border(mask, hatch_offset))
    }

    // ---- commits ------------------------------------------------------------

    /// Cut the selection to transparency. No selection → no-op.
    pub fn cut(&mut self) {
        let Some(mask) = self.mask.take() else {
            return;
        };
        composite::cut(&mut self.framebuffer, &mask);
        self.commit("cut", &mask);
    }

    /// Paint the selection with a flat translucent color. The color string
    /// is validated up front: a malformed color is the one commit error that
    /// surfaces to the caller, and it must never half-apply. No selection →
    /// `Ok` no-op.
    pub fn paint(&mut self, color_hex: &str, alpha: f32) -> Result<(), String> {
        let rgba = composite::parse_hex_color(color_hex, alpha)?;
        let Some(mask) = self.mask.take() else {
            return Ok(());
        };
        composite::paint(&mut self.framebuffer, &mask, rgba);
        self.commit("paint", &mask);
        Ok(())
    }

    fn commit(&mut self, what: &str, mask: &Mask) {
        self.history.push(self.framebuffer.clone());
        self.revision += 1;
        log_info!(
            "{}: {} px in box ({},{})..({},{}), {} snapshots",
            what,
            mask.included_count(),
            mask.bounds.min_x,
            mask.bounds.min_y,
            mask.bounds.max_x,
            mask.bounds.max_y,
            self.history.len()
        );
    }

    // ---- undo ---------------------------------------------------------------

    /// Step back one snapshot. At the floor (initial load state) this is a
    /// no-op. Returns whether anything was restored.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.framebuffer = previous.clone();
                self.revision += 1;
                log_info!("undo: restored, {} snapshots remain", self.history.len());
                true
            }
            None => false,
        }
    }
}
