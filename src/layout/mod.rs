pub mod floating;

use ratatui::prelude::Rect;
use std::collections::BTreeMap;

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::window::{FloatRect, Position, Viewport};

/// Conversion between terminal cells and viewport units.
///
/// Pointer positions are reported at the centre of the cell under the mouse
/// so a drag of one column always moves by exactly `cell_width` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_width: i32,
    pub cell_height: i32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
        }
    }
}

impl CellMetrics {
    pub fn new(cell_width: i32, cell_height: i32) -> Self {
        Self {
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
        }
    }

    pub fn viewport(&self, area: Rect) -> Viewport {
        Viewport::new(
            area.width as i32 * self.cell_width,
            area.height as i32 * self.cell_height,
        )
    }

    pub fn pointer(&self, column: u16, row: u16) -> Position {
        Position::new(
            column as i32 * self.cell_width + self.cell_width / 2,
            row as i32 * self.cell_height + self.cell_height / 2,
        )
    }

    /// Cells covered by `rect`, clipped to `area`.
    pub fn to_cells(&self, rect: FloatRect, area: Rect) -> Rect {
        let left = rect.x.div_euclid(self.cell_width);
        let top = rect.y.div_euclid(self.cell_height);
        let right = (rect.right() + self.cell_width - 1).div_euclid(self.cell_width);
        let bottom = (rect.bottom() + self.cell_height - 1).div_euclid(self.cell_height);

        let area_right = area.x as i32 + area.width as i32;
        let area_bottom = area.y as i32 + area.height as i32;
        let x0 = left.clamp(area.x as i32, area_right);
        let y0 = top.clamp(area.y as i32, area_bottom);
        let x1 = right.clamp(x0, area_right);
        let y1 = bottom.clamp(y0, area_bottom);
        Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionMap<T: Copy + Eq + Ord> {
    regions: BTreeMap<T, Rect>,
}

impl<T: Copy + Eq + Ord> Default for RegionMap<T> {
    fn default() -> Self {
        Self {
            regions: BTreeMap::new(),
        }
    }
}

impl<T: Copy + Eq + Ord> RegionMap<T> {
    pub fn ids(&self) -> Vec<T> {
        self.regions.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn set(&mut self, id: T, rect: Rect) {
        self.regions.insert(id, rect);
    }

    pub fn get(&self, id: T) -> Option<Rect> {
        self.regions.get(&id).copied()
    }

    /// First id in `ids` whose region contains the cell. The order of `ids`
    /// is the hit priority.
    pub fn hit_test(&self, column: u16, row: u16, ids: &[T]) -> Option<T> {
        for id in ids {
            if let Some(rect) = self.regions.get(id)
                && rect_contains(*rect, column, row)
            {
                return Some(*id);
            }
        }
        None
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}
