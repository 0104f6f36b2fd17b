//! Pure bounds math for the floating panel.
//!
//! Nothing in here holds state; every function takes the viewport it should
//! respect so callers decide which observation of the host window applies.

use super::{FloatRect, Position, Size, Viewport};
use crate::constants::{
    MIN_HEIGHT_FALLBACK, MIN_HEIGHT_TIERS, MIN_WIDTH_FALLBACK, MIN_WIDTH_TIERS,
    OFFSCREEN_FAR_INSET, OFFSCREEN_NEAR_LIMIT,
};
use crate::layout::floating::ResizeEdge;

fn tier(extent: i32, tiers: &[(i32, i32)], fallback: i32) -> i32 {
    tiers
        .iter()
        .find(|(below, _)| extent < *below)
        .map(|(_, min)| *min)
        .unwrap_or(fallback)
}

/// Responsive minimum panel size for the given viewport.
pub fn min_size(viewport: Viewport) -> Size {
    Size {
        width: tier(viewport.width, &MIN_WIDTH_TIERS, MIN_WIDTH_FALLBACK),
        height: tier(viewport.height, &MIN_HEIGHT_TIERS, MIN_HEIGHT_FALLBACK),
    }
}

// `i32::clamp` panics when the bounds cross, which they do for a panel larger
// than the viewport. The near edge wins in that case.
fn clamp_axis(origin: i32, size: i32, extent: i32, margin: i32) -> i32 {
    origin.min(extent - size - margin).max(margin)
}

/// Pull `position` back so a panel of `size` sits inside the viewport with
/// `margin` to spare on every side.
pub fn clamp_position(position: Position, size: Size, viewport: Viewport, margin: i32) -> Position {
    Position {
        x: clamp_axis(position.x, size.width, viewport.width, margin),
        y: clamp_axis(position.y, size.height, viewport.height, margin),
    }
}

pub fn center(size: Size, viewport: Viewport, margin: i32) -> Position {
    Position {
        x: ((viewport.width - size.width) / 2).max(margin),
        y: ((viewport.height - size.height) / 2).max(margin),
    }
}

/// True when so little of the panel would be visible that recentering beats
/// nudging it back into bounds.
pub fn is_substantially_offscreen(position: Position, viewport: Viewport) -> bool {
    position.x < OFFSCREEN_NEAR_LIMIT
        || position.y < OFFSCREEN_NEAR_LIMIT
        || position.x > viewport.width - OFFSCREEN_FAR_INSET
        || position.y > viewport.height - OFFSCREEN_FAR_INSET
}

/// Resize `start` by the pointer delta `(dx, dy)` from handle `edge`.
///
/// Each axis is handled independently so corner handles compose the two edge
/// rules. Far edges are capped at `viewport - margin`; near edges are pinned
/// at `margin` and the size absorbs the difference. Sizes never go below zero,
/// even in a viewport narrower than the panel's origin plus margin.
pub fn apply_resize_drag(
    start: FloatRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    viewport: Viewport,
    min: Size,
    margin: i32,
) -> FloatRect {
    let mut rect = start;

    if edge.touches_right() {
        let width = (start.width + dx).max(min.width);
        rect.width = width.min(viewport.width - start.x - margin).max(0);
    }
    if edge.touches_left() {
        let width = (start.width - dx).max(min.width);
        let x = start.x - (width - start.width);
        if x < margin {
            rect.x = margin;
            rect.width = (start.x + start.width - margin).max(0);
        } else {
            rect.x = x;
            rect.width = width;
        }
    }

    if edge.touches_bottom() {
        let height = (start.height + dy).max(min.height);
        rect.height = height.min(viewport.height - start.y - margin).max(0);
    }
    if edge.touches_top() {
        let height = (start.height - dy).max(min.height);
        let y = start.y - (height - start.height);
        if y < margin {
            rect.y = margin;
            rect.height = (start.y + start.height - margin).max(0);
        } else {
            rect.y = y;
            rect.height = height;
        }
    }

    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: Viewport = Viewport::new(1280, 800);

    #[test]
    fn min_size_follows_viewport_tiers() {
        assert_eq!(min_size(Viewport::new(767, 599)), Size::new(320, 220));
        assert_eq!(min_size(Viewport::new(768, 600)), Size::new(350, 250));
        assert_eq!(min_size(Viewport::new(1023, 799)), Size::new(350, 250));
        assert_eq!(min_size(Viewport::new(1024, 800)), Size::new(400, 300));
    }

    #[test]
    fn clamp_keeps_far_edge_inside_margin() {
        let pos = clamp_position(Position::new(900, 500), Size::new(700, 600), WIDE, 10);
        assert_eq!(pos, Position::new(570, 190));
    }

    #[test]
    fn clamp_pulls_negative_origin_to_margin() {
        let pos = clamp_position(Position::new(-300, -5), Size::new(700, 600), WIDE, 10);
        assert_eq!(pos, Position::new(10, 10));
    }

    #[test]
    fn clamp_pins_oversized_panel_to_near_edge() {
        let small = Viewport::new(500, 400);
        let pos = clamp_position(Position::new(120, 80), Size::new(700, 600), small, 10);
        assert_eq!(pos, Position::new(10, 10));
    }

    #[test]
    fn center_respects_margin_floor() {
        assert_eq!(center(Size::new(700, 600), WIDE, 20), Position::new(290, 100));
        let small = Viewport::new(600, 500);
        assert_eq!(center(Size::new(700, 600), small, 20), Position::new(20, 20));
    }

    #[test]
    fn offscreen_detection() {
        assert!(!is_substantially_offscreen(Position::new(290, 100), WIDE));
        assert!(is_substantially_offscreen(Position::new(-51, 100), WIDE));
        assert!(is_substantially_offscreen(Position::new(100, -60), WIDE));
        assert!(is_substantially_offscreen(Position::new(1181, 100), WIDE));
        assert!(is_substantially_offscreen(Position::new(100, 701), WIDE));
        assert!(!is_substantially_offscreen(Position::new(-50, 700), WIDE));
    }

    #[test]
    fn top_left_grows_both_axes() {
        let start = FloatRect::new(100, 100, 700, 600);
        let res = apply_resize_drag(
            start,
            ResizeEdge::TopLeft,
            -40,
            -40,
            WIDE,
            min_size(WIDE),
            20,
        );
        assert_eq!(res, FloatRect::new(60, 60, 740, 640));
    }

    #[test]
    fn right_edge_caps_at_viewport_margin() {
        let start = FloatRect::new(340, 130, 700, 600);
        let res = apply_resize_drag(start, ResizeEdge::Right, 1000, 0, WIDE, min_size(WIDE), 20);
        assert_eq!(res, FloatRect::new(340, 130, 920, 600));
    }

    #[test]
    fn left_edge_pins_at_margin_and_absorbs_width() {
        let start = FloatRect::new(100, 100, 700, 600);
        let res = apply_resize_drag(start, ResizeEdge::Left, -500, 0, WIDE, min_size(WIDE), 20);
        assert_eq!(res, FloatRect::new(20, 100, 780, 600));
    }

    #[test]
    fn shrinking_stops_at_minimum_and_moves_near_edge() {
        let start = FloatRect::new(100, 100, 700, 600);
        let res = apply_resize_drag(start, ResizeEdge::TopLeft, 600, 600, WIDE, min_size(WIDE), 20);
        assert_eq!(res, FloatRect::new(400, 400, 400, 300));

        let res = apply_resize_drag(
            start,
            ResizeEdge::BottomRight,
            -600,
            -600,
            WIDE,
            min_size(WIDE),
            20,
        );
        assert_eq!(res, FloatRect::new(100, 100, 400, 300));
    }

    #[test]
    fn edge_handles_leave_other_axis_untouched() {
        let start = FloatRect::new(100, 100, 700, 600);
        let res = apply_resize_drag(start, ResizeEdge::Bottom, 300, 50, WIDE, min_size(WIDE), 20);
        assert_eq!(res, FloatRect::new(100, 100, 700, 650));
        let res = apply_resize_drag(start, ResizeEdge::Top, 300, 50, WIDE, min_size(WIDE), 20);
        assert_eq!(res, FloatRect::new(100, 150, 700, 550));
    }

    #[test]
    fn far_edge_cap_never_goes_negative_in_tiny_viewport() {
        let tiny = Viewport::new(24, 32);
        let start = FloatRect::new(10, 10, 700, 600);
        let res = apply_resize_drag(start, ResizeEdge::BottomRight, 8, 16, tiny, min_size(tiny), 20);
        assert_eq!(res, FloatRect::new(10, 10, 0, 2));

        let res = apply_resize_drag(start, ResizeEdge::Right, -400, 0, tiny, min_size(tiny), 20);
        assert_eq!(res.width, 0);
        assert_eq!(res.height, 600);
    }
}
