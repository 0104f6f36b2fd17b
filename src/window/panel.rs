use super::geometry::{apply_resize_drag, center, clamp_position, is_substantially_offscreen, min_size};
use super::gesture::{GestureKind, GestureMode, GlobalPointer};
use super::{FloatRect, Position, Size, Viewport};
use crate::constants::{
    BOUNDS_MARGIN, DEFAULT_PANEL_HEIGHT, DEFAULT_PANEL_WIDTH, GESTURE_MARGIN, TAB_DRAG_THRESHOLD,
};
use crate::layout::floating::{ChromeTarget, ResizeEdge};

/// Tunables for a [`FloatingPanel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelMetrics {
    pub default_size: Size,
    /// Margin used when re-validating after a viewport change or on open.
    pub bounds_margin: i32,
    /// Margin used while moving, resizing and centring.
    pub gesture_margin: i32,
    pub tab_drag_threshold: i32,
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self {
            default_size: Size::new(DEFAULT_PANEL_WIDTH, DEFAULT_PANEL_HEIGHT),
            bounds_margin: BOUNDS_MARGIN,
            gesture_margin: GESTURE_MARGIN,
            tab_drag_threshold: TAB_DRAG_THRESHOLD,
        }
    }
}

/// Window manager for the floating question panel.
///
/// Owns the panel rectangle and visibility flag and arbitrates the tab drag,
/// header move and edge resize gestures. All mutation happens synchronously
/// inside the press/move/up/viewport handlers; none of them re-enter another.
///
/// Viewport changes that arrive mid-gesture are held back and reconciled once
/// the gesture ends, so a drag never races a snap-to-bounds.
#[derive(Debug)]
pub struct FloatingPanel {
    rect: FloatRect,
    visible: bool,
    visibility_dirty: bool,
    viewport: Viewport,
    pending_viewport: Option<Viewport>,
    gesture: GestureMode,
    pointer: GlobalPointer,
    metrics: PanelMetrics,
}

impl FloatingPanel {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_metrics(viewport, PanelMetrics::default())
    }

    /// Hidden panel of the default size, centred in `viewport`.
    pub fn with_metrics(viewport: Viewport, metrics: PanelMetrics) -> Self {
        let size = metrics.default_size;
        let position = center(size, viewport, metrics.gesture_margin);
        Self::with_rect(viewport, metrics, FloatRect::from_parts(position, size))
    }

    /// Hidden panel restored to a previously saved rectangle. The rectangle is
    /// re-validated the next time the panel opens.
    pub fn with_rect(viewport: Viewport, metrics: PanelMetrics, rect: FloatRect) -> Self {
        Self {
            rect,
            visible: false,
            visibility_dirty: false,
            viewport,
            pending_viewport: None,
            gesture: GestureMode::Idle,
            pointer: GlobalPointer::new(),
            metrics,
        }
    }

    pub fn rect(&self) -> FloatRect {
        self.rect
    }

    pub fn position(&self) -> Position {
        self.rect.position()
    }

    pub fn size(&self) -> Size {
        self.rect.size()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Viewport the geometry currently answers to. During a gesture this is
    /// the viewport observed when the gesture began.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn metrics(&self) -> PanelMetrics {
        self.metrics
    }

    pub fn gesture(&self) -> GestureKind {
        self.gesture.kind()
    }

    pub fn gesture_active(&self) -> bool {
        self.gesture.is_active()
    }

    /// Document-level pointer listeners. Hosts route move/up events to
    /// [`Self::pointer_move`] and [`Self::pointer_up`] only while subscribed.
    pub fn global_pointer(&self) -> &GlobalPointer {
        &self.pointer
    }

    /// Returns the new visibility once per change, for hosts that react to it.
    pub fn take_visibility_change(&mut self) -> Option<bool> {
        if self.visibility_dirty {
            self.visibility_dirty = false;
            Some(self.visible)
        } else {
            None
        }
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
        self.visibility_dirty = true;
        tracing::debug!(visible = self.visible, "panel visibility toggled");
        if self.visible {
            self.on_open();
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.toggle_visibility();
        }
    }

    /// Default size, centred in the current viewport.
    pub fn reset(&mut self) {
        let size = self.metrics.default_size;
        let position = center(size, self.viewport, self.metrics.gesture_margin);
        self.rect = FloatRect::from_parts(position, size);
        tracing::debug!(x = position.x, y = position.y, "panel geometry reset");
    }

    fn on_open(&mut self) {
        let position = self.rect.position();
        if is_substantially_offscreen(position, self.viewport) {
            self.reset();
        } else {
            self.reclamp();
        }
    }

    fn reclamp(&mut self) {
        let position = self.rect.position();
        let clamped = clamp_position(
            position,
            self.rect.size(),
            self.viewport,
            self.metrics.bounds_margin,
        );
        if clamped != position {
            tracing::debug!(
                from_x = position.x,
                from_y = position.y,
                x = clamped.x,
                y = clamped.y,
                "panel nudged into bounds"
            );
            self.rect.x = clamped.x;
            self.rect.y = clamped.y;
        }
    }

    /// Host viewport changed. Position is nudged back into bounds while
    /// visible; size is left alone.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.gesture.is_active() {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                "viewport change deferred until gesture ends"
            );
            self.pending_viewport = Some(viewport);
            return;
        }
        self.apply_viewport(viewport);
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.visible {
            self.reclamp();
        }
    }

    /// Dispatch a press on a piece of chrome. Returns true when it was
    /// handled.
    pub fn press(&mut self, target: ChromeTarget, pointer: Position) -> bool {
        match target {
            ChromeTarget::Tab => self.press_tab(pointer),
            ChromeTarget::Header => self.press_header(pointer),
            ChromeTarget::Resize(edge) => self.press_resize(edge, pointer),
            ChromeTarget::Close => self.press_close(),
            ChromeTarget::Reset => self.press_reset(),
            ChromeTarget::Body => false,
        }
    }

    pub fn press_tab(&mut self, pointer: Position) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        self.begin(GestureMode::TabDragging {
            origin: pointer,
            grab: self.pointer.subscribe(),
        });
        true
    }

    pub fn press_header(&mut self, pointer: Position) -> bool {
        if !self.visible || self.gesture.is_active() {
            return false;
        }
        let offset = Position::new(pointer.x - self.rect.x, pointer.y - self.rect.y);
        self.begin(GestureMode::Moving {
            offset,
            grab: self.pointer.subscribe(),
        });
        true
    }

    pub fn press_resize(&mut self, edge: ResizeEdge, pointer: Position) -> bool {
        if !self.visible || self.gesture.is_active() {
            return false;
        }
        self.begin(GestureMode::Resizing {
            edge,
            start: self.rect,
            origin: pointer,
            min: min_size(self.viewport),
            grab: self.pointer.subscribe(),
        });
        true
    }

    pub fn press_close(&mut self) -> bool {
        if !self.visible || self.gesture.is_active() {
            return false;
        }
        self.toggle_visibility();
        true
    }

    pub fn press_reset(&mut self) -> bool {
        if !self.visible || self.gesture.is_active() {
            return false;
        }
        self.reset();
        true
    }

    fn begin(&mut self, gesture: GestureMode) {
        tracing::debug!(mode = ?gesture.kind(), "gesture started");
        self.gesture = gesture;
    }

    fn end_gesture(&mut self) {
        let ended = std::mem::take(&mut self.gesture);
        tracing::debug!(
            mode = ?ended.kind(),
            x = self.rect.x,
            y = self.rect.y,
            width = self.rect.width,
            height = self.rect.height,
            "gesture ended"
        );
        drop(ended);
        if let Some(viewport) = self.pending_viewport.take() {
            self.apply_viewport(viewport);
        }
    }

    pub fn pointer_move(&mut self, pointer: Position) {
        match &self.gesture {
            GestureMode::Idle => {}
            GestureMode::TabDragging { origin, .. } => {
                let dy = pointer.y - origin.y;
                let threshold = self.metrics.tab_drag_threshold;
                let fire = (dy > threshold && !self.visible) || (dy < -threshold && self.visible);
                if fire {
                    self.end_gesture();
                    self.toggle_visibility();
                }
            }
            GestureMode::Moving { offset, .. } => {
                let proposed = Position::new(pointer.x - offset.x, pointer.y - offset.y);
                let next = clamp_position(
                    proposed,
                    self.rect.size(),
                    self.viewport,
                    self.metrics.gesture_margin,
                );
                self.rect.x = next.x;
                self.rect.y = next.y;
                tracing::trace!(x = next.x, y = next.y, "panel moved");
            }
            GestureMode::Resizing {
                edge,
                start,
                origin,
                min,
                ..
            } => {
                self.rect = apply_resize_drag(
                    *start,
                    *edge,
                    pointer.x - origin.x,
                    pointer.y - origin.y,
                    self.viewport,
                    *min,
                    self.metrics.gesture_margin,
                );
                tracing::trace!(
                    x = self.rect.x,
                    y = self.rect.y,
                    width = self.rect.width,
                    height = self.rect.height,
                    "panel resized"
                );
            }
        }
    }

    /// Pointer released. A release over the tab that ends a tab drag which
    /// never crossed the threshold is a click and toggles the panel.
    pub fn pointer_up(&mut self, over_tab: bool) -> bool {
        match self.gesture {
            GestureMode::Idle => false,
            GestureMode::TabDragging { .. } => {
                self.end_gesture();
                if over_tab {
                    self.toggle_visibility();
                }
                true
            }
            GestureMode::Moving { .. } | GestureMode::Resizing { .. } => {
                self.end_gesture();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: Viewport = Viewport::new(1280, 800);

    fn open_panel() -> FloatingPanel {
        let mut panel = FloatingPanel::new(WIDE);
        panel.set_visible(true);
        panel
    }

    #[test]
    fn starts_hidden_and_centred() {
        let panel = FloatingPanel::new(WIDE);
        assert!(!panel.visible());
        assert_eq!(panel.rect(), FloatRect::new(290, 100, 700, 600));
        assert_eq!(panel.gesture(), GestureKind::Idle);
    }

    #[test]
    fn hidden_panel_rejects_move_and_resize() {
        let mut panel = FloatingPanel::new(WIDE);
        assert!(!panel.press_header(Position::new(300, 110)));
        assert!(!panel.press_resize(ResizeEdge::Left, Position::new(290, 300)));
        assert!(!panel.press_close());
        assert!(!panel.press_reset());
        assert!(panel.press_tab(Position::new(640, 8)));
        assert_eq!(panel.gesture(), GestureKind::TabDragging);
    }

    #[test]
    fn press_while_active_is_ignored() {
        let mut panel = open_panel();
        assert!(panel.press_header(Position::new(300, 110)));
        assert!(!panel.press_resize(ResizeEdge::Right, Position::new(990, 300)));
        assert!(!panel.press_tab(Position::new(640, 8)));
        assert_eq!(panel.gesture(), GestureKind::Moving);
        assert_eq!(panel.global_pointer().listener_count(), 1);
    }

    #[test]
    fn horizontal_tab_motion_is_ignored() {
        let mut panel = FloatingPanel::new(WIDE);
        panel.press_tab(Position::new(640, 8));
        panel.pointer_move(Position::new(900, 40));
        assert!(!panel.visible());
        assert_eq!(panel.gesture(), GestureKind::TabDragging);
    }

    #[test]
    fn upward_tab_drag_ignored_while_hidden() {
        let mut panel = FloatingPanel::new(WIDE);
        panel.press_tab(Position::new(640, 200));
        panel.pointer_move(Position::new(640, 100));
        assert!(!panel.visible());
        assert!(panel.gesture_active());
    }

    #[test]
    fn visibility_change_is_taken_once() {
        let mut panel = FloatingPanel::new(WIDE);
        assert_eq!(panel.take_visibility_change(), None);
        panel.toggle_visibility();
        assert_eq!(panel.take_visibility_change(), Some(true));
        assert_eq!(panel.take_visibility_change(), None);
        panel.set_visible(true);
        assert_eq!(panel.take_visibility_change(), None);
    }

    #[test]
    fn close_button_hides_panel() {
        let mut panel = open_panel();
        assert!(panel.press_close());
        assert!(!panel.visible());
        assert_eq!(panel.gesture(), GestureKind::Idle);
    }

    #[test]
    fn body_press_is_not_a_gesture() {
        let mut panel = open_panel();
        assert!(!panel.press(ChromeTarget::Body, Position::new(500, 400)));
        assert!(!panel.global_pointer().is_subscribed());
    }

    #[test]
    fn open_recentres_far_offscreen_panel() {
        let metrics = PanelMetrics::default();
        let mut panel = FloatingPanel::with_rect(WIDE, metrics, FloatRect::new(-400, 50, 500, 400));
        panel.set_visible(true);
        assert_eq!(panel.rect(), FloatRect::new(290, 100, 700, 600));
    }

    #[test]
    fn open_reclamps_nearby_panel() {
        let metrics = PanelMetrics::default();
        let mut panel = FloatingPanel::with_rect(WIDE, metrics, FloatRect::new(-20, 300, 500, 400));
        panel.set_visible(true);
        assert_eq!(panel.rect(), FloatRect::new(10, 300, 500, 400));
    }

    #[test]
    fn hidden_panel_keeps_position_on_viewport_change() {
        let mut panel = FloatingPanel::new(WIDE);
        panel.set_viewport(Viewport::new(500, 400));
        assert_eq!(panel.position(), Position::new(290, 100));
        assert_eq!(panel.viewport(), Viewport::new(500, 400));
    }

    #[test]
    fn viewport_change_during_move_waits_for_release() {
        let mut panel = open_panel();
        panel.press_header(Position::new(300, 110));
        panel.set_viewport(Viewport::new(800, 700));
        // still answering to the old viewport
        panel.pointer_move(Position::new(600, 110));
        assert_eq!(panel.position(), Position::new(560, 100));
        assert_eq!(panel.viewport(), WIDE);
        assert!(panel.pointer_up(false));
        assert_eq!(panel.viewport(), Viewport::new(800, 700));
        // 800 - 700 - 10 = 90
        assert_eq!(panel.position(), Position::new(90, 90));
    }

    #[test]
    fn resize_minimum_uses_viewport_at_gesture_start() {
        let mut panel = open_panel();
        panel.set_viewport(Viewport::new(900, 700));
        panel.press_resize(ResizeEdge::BottomRight, Position::new(0, 0));
        panel.pointer_move(Position::new(-2000, -2000));
        assert_eq!(panel.size(), Size::new(350, 250));
    }
}
