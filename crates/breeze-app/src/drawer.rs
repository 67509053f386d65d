//! Slide-out menu drawer.
//!
//! The drawer's horizontal offset runs from `-width` (hidden) to `0` (fully
//! open). Drags move it directly; releasing snaps to whichever end is
//! closer.

/// Default drawer width in layout units.
pub const DEFAULT_WIDTH: f32 = 240.0;

/// Drags that open a closed drawer must start this close to the left edge.
pub const EDGE_ZONE: f32 = 50.0;

/// Fraction of the width that must be showing before the drawer counts as visible.
const VISIBILITY_THRESHOLD: f32 = 0.1;

/// Dim applied over the content while the drawer is visible.
pub const OVERLAY_ALPHA: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Drawer {
    width: f32,
    offset: f32,
    dragging: bool,
}

impl Default for Drawer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Drawer {
    /// A closed drawer. Non-positive widths fall back to [`DEFAULT_WIDTH`].
    pub fn new(width: f32) -> Self {
        let width = if width > 0.0 { width } else { DEFAULT_WIDTH };
        Self {
            width,
            offset: -width,
            dragging: false,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_visible(&self) -> bool {
        self.offset > -self.width + self.width * VISIBILITY_THRESHOLD
    }

    pub fn overlay_alpha(&self) -> f32 {
        if self.is_visible() {
            OVERLAY_ALPHA
        } else {
            0.0
        }
    }

    pub fn open(&mut self) {
        self.set_offset(0.0);
        self.dragging = false;
    }

    pub fn close(&mut self) {
        self.set_offset(-self.width);
        self.dragging = false;
    }

    pub fn toggle(&mut self) {
        if self.is_visible() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Start a horizontal drag at `x`. A closed drawer only responds to drags
    /// starting in the edge zone. Returns whether the drag was accepted.
    /// An earlier drag that never ended is discarded.
    pub fn begin_drag(&mut self, x: f32) -> bool {
        self.dragging = self.is_visible() || x < EDGE_ZONE;
        self.dragging
    }

    /// Move by `delta`, clamped to the drawer's range.
    pub fn drag_by(&mut self, delta: f32) {
        if self.dragging {
            self.set_offset(self.offset + delta);
        }
    }

    /// Release the drag, snapping open past the halfway point.
    pub fn end_drag(&mut self) {
        if !self.dragging {
            return;
        }
        if self.offset > -self.width / 2.0 {
            self.open();
        } else {
            self.close();
        }
    }

    /// Cancelled gestures snap the same way as released ones.
    pub fn cancel_drag(&mut self) {
        self.end_drag();
    }

    /// Tapping the dimmed overlay closes a visible drawer.
    pub fn tap_overlay(&mut self) {
        if self.is_visible() {
            self.close();
        }
    }

    fn set_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(-self.width, 0.0);
    }
}
