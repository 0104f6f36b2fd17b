use super::{RegionMap, rect_contains};
use ratatui::prelude::Rect;

use crate::constants::{HEADER_BUTTON_CELLS, TAB_WIDTH_CELLS};
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomLeft,
        ResizeEdge::BottomRight,
        ResizeEdge::Top,
        ResizeEdge::Bottom,
        ResizeEdge::Left,
        ResizeEdge::Right,
    ];

    pub const fn touches_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    pub const fn touches_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    pub const fn touches_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    pub const fn touches_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResizeHandle {
    pub rect: Rect,
    pub edge: ResizeEdge,
}

/// Interactive pieces of the panel chrome, in hit priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChromeTarget {
    Tab,
    Close,
    Reset,
    Resize(ResizeEdge),
    Header,
    Body,
}

const HIT_ORDER: [ChromeTarget; 13] = [
    ChromeTarget::Tab,
    ChromeTarget::Close,
    ChromeTarget::Reset,
    ChromeTarget::Resize(ResizeEdge::TopLeft),
    ChromeTarget::Resize(ResizeEdge::TopRight),
    ChromeTarget::Resize(ResizeEdge::BottomLeft),
    ChromeTarget::Resize(ResizeEdge::BottomRight),
    ChromeTarget::Resize(ResizeEdge::Top),
    ChromeTarget::Resize(ResizeEdge::Bottom),
    ChromeTarget::Resize(ResizeEdge::Left),
    ChromeTarget::Resize(ResizeEdge::Right),
    ChromeTarget::Header,
    ChromeTarget::Body,
];

/// The tab strip hangs from the top centre of the viewport while the panel is
/// hidden. Once shown it sits on the row above the panel, centred on it, so an
/// upward drag has rows to travel before the terminal's top edge.
pub fn tab_region(area: Rect, panel: Option<Rect>) -> Rect {
    let width = TAB_WIDTH_CELLS.min(area.width);
    let (x, y) = match panel {
        Some(panel) => {
            let centred = panel.x.saturating_add(panel.width.saturating_sub(width) / 2);
            let max_x = area.x.saturating_add(area.width - width);
            (centred.clamp(area.x, max_x), panel.y.saturating_sub(1).max(area.y))
        }
        None => (area.x.saturating_add((area.width - width) / 2), area.y),
    };
    Rect {
        x,
        y,
        width,
        height: area.height.min(1),
    }
}

/// One-cell border handles: corners are single cells, edges span the rest.
pub fn resize_handles_for_region(rect: Rect) -> Vec<ResizeHandle> {
    let mut handles = Vec::new();
    if rect.width == 0 || rect.height == 0 {
        return handles;
    }
    let right = rect.x.saturating_add(rect.width.saturating_sub(1));
    let bottom = rect.y.saturating_add(rect.height.saturating_sub(1));
    let corner = |x, y, edge| ResizeHandle {
        rect: Rect {
            x,
            y,
            width: 1,
            height: 1,
        },
        edge,
    };
    handles.push(corner(rect.x, rect.y, ResizeEdge::TopLeft));
    handles.push(corner(right, rect.y, ResizeEdge::TopRight));
    handles.push(corner(rect.x, bottom, ResizeEdge::BottomLeft));
    handles.push(corner(right, bottom, ResizeEdge::BottomRight));
    if rect.width > 2 {
        for (y, edge) in [(rect.y, ResizeEdge::Top), (bottom, ResizeEdge::Bottom)] {
            handles.push(ResizeHandle {
                rect: Rect {
                    x: rect.x.saturating_add(1),
                    y,
                    width: rect.width.saturating_sub(2),
                    height: 1,
                },
                edge,
            });
        }
    }
    if rect.height > 2 {
        for (x, edge) in [(rect.x, ResizeEdge::Left), (right, ResizeEdge::Right)] {
            handles.push(ResizeHandle {
                rect: Rect {
                    x,
                    y: rect.y.saturating_add(1),
                    width: 1,
                    height: rect.height.saturating_sub(2),
                },
                edge,
            });
        }
    }
    handles
}

/// Header row just inside the top border.
pub fn header_for_region(rect: Rect) -> Option<Rect> {
    if rect.width < 3 || rect.height < 3 {
        return None;
    }
    Some(Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: 1,
    })
}

/// Close and reset buttons, right-aligned in the header.
pub fn header_buttons(header: Rect) -> Option<(Rect, Rect)> {
    let needed = HEADER_BUTTON_CELLS.saturating_mul(2);
    if header.width <= needed {
        return None;
    }
    let close = Rect {
        x: header.x + header.width - HEADER_BUTTON_CELLS,
        y: header.y,
        width: HEADER_BUTTON_CELLS,
        height: 1,
    };
    let reset = Rect {
        x: close.x - HEADER_BUTTON_CELLS,
        ..close
    };
    Some((close, reset))
}

/// Hit regions for the tab and, when the panel is shown, its chrome.
///
/// Rebuilt every frame from the cells the panel currently covers.
#[derive(Debug, Clone, Default)]
pub struct PanelChrome {
    regions: RegionMap<ChromeTarget>,
}

impl PanelChrome {
    pub fn layout(area: Rect, panel: Option<Rect>) -> Self {
        let mut regions = RegionMap::default();
        regions.set(ChromeTarget::Tab, tab_region(area, panel));
        if let Some(panel) = panel {
            regions.set(ChromeTarget::Body, panel);
            for handle in resize_handles_for_region(panel) {
                regions.set(ChromeTarget::Resize(handle.edge), handle.rect);
            }
            if let Some(header) = header_for_region(panel) {
                regions.set(ChromeTarget::Header, header);
                if let Some((close, reset)) = header_buttons(header) {
                    regions.set(ChromeTarget::Close, close);
                    regions.set(ChromeTarget::Reset, reset);
                }
            }
        }
        Self { regions }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ChromeTarget> {
        self.regions.hit_test(column, row, &HIT_ORDER)
    }

    pub fn region(&self, target: ChromeTarget) -> Option<Rect> {
        self.regions.get(target)
    }
}

/// Highlight the border of `rect`, doubling the lines on the edge being
/// dragged (or the whole frame when no single edge is active).
pub fn render_resize_outline(frame: &mut UiFrame<'_>, rect: Rect, edge: Option<ResizeEdge>) {
    if rect.width < 3 || rect.height < 3 {
        return;
    }
    let bounds = frame.area();
    let buffer = frame.buffer_mut();
    let right = rect.x.saturating_add(rect.width.saturating_sub(1));
    let bottom = rect.y.saturating_add(rect.height.saturating_sub(1));
    let all = edge.is_none();
    let lit = |check: fn(ResizeEdge) -> bool| all || edge.is_some_and(check);

    let mut set = |x: u16, y: u16, symbol: &str| {
        if rect_contains(bounds, x, y)
            && let Some(cell) = buffer.cell_mut((x, y))
        {
            cell.set_symbol(symbol);
        }
    };

    if lit(ResizeEdge::touches_top) {
        for x in rect.x..=right {
            set(x, rect.y, "═");
        }
    }
    if lit(ResizeEdge::touches_bottom) {
        for x in rect.x..=right {
            set(x, bottom, "═");
        }
    }
    if lit(ResizeEdge::touches_left) {
        for y in rect.y..=bottom {
            set(rect.x, y, "║");
        }
    }
    if lit(ResizeEdge::touches_right) {
        for y in rect.y..=bottom {
            set(right, y, "║");
        }
    }

    if lit(ResizeEdge::touches_top) && lit(ResizeEdge::touches_left) {
        set(rect.x, rect.y, "╔");
    }
    if lit(ResizeEdge::touches_top) && lit(ResizeEdge::touches_right) {
        set(right, rect.y, "╗");
    }
    if lit(ResizeEdge::touches_bottom) && lit(ResizeEdge::touches_left) {
        set(rect.x, bottom, "╚");
    }
    if lit(ResizeEdge::touches_bottom) && lit(ResizeEdge::touches_right) {
        set(right, bottom, "╝");
    }
}
