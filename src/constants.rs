//! Shared crate-wide constants.
//!
//! All geometry values are in viewport units. The terminal host maps one cell
//! to `DEFAULT_CELL_WIDTH` x `DEFAULT_CELL_HEIGHT` units unless configured
//! otherwise, so these numbers stay meaningful regardless of font size.

/// Width the panel takes on first mount and after a reset.
pub const DEFAULT_PANEL_WIDTH: i32 = 700;

/// Height the panel takes on first mount and after a reset.
pub const DEFAULT_PANEL_HEIGHT: i32 = 600;

/// Gap kept between the panel and the viewport edge when re-validating a
/// position (viewport resize, panel open).
pub const BOUNDS_MARGIN: i32 = 10;

/// Gap kept between the panel and the viewport edge while the user moves or
/// resizes it, and when the panel is centred.
pub const GESTURE_MARGIN: i32 = 20;

/// Vertical distance the pointer must travel while dragging the tab before
/// the panel opens (downwards) or closes (upwards).
pub const TAB_DRAG_THRESHOLD: i32 = 50;

/// Distance from the far viewport edge past which a panel origin counts as
/// substantially offscreen.
pub const OFFSCREEN_FAR_INSET: i32 = 100;

/// Negative origin past which a panel counts as substantially offscreen.
pub const OFFSCREEN_NEAR_LIMIT: i32 = -50;

/// Responsive minimum width tiers: `(viewport width below, minimum width)`.
pub const MIN_WIDTH_TIERS: [(i32, i32); 2] = [(768, 320), (1024, 350)];

/// Minimum width once the viewport is wider than every tier.
pub const MIN_WIDTH_FALLBACK: i32 = 400;

/// Responsive minimum height tiers: `(viewport height below, minimum height)`.
pub const MIN_HEIGHT_TIERS: [(i32, i32); 2] = [(600, 220), (800, 250)];

/// Minimum height once the viewport is taller than every tier.
pub const MIN_HEIGHT_FALLBACK: i32 = 300;

/// Viewport units per terminal column.
pub const DEFAULT_CELL_WIDTH: i32 = 8;

/// Viewport units per terminal row.
pub const DEFAULT_CELL_HEIGHT: i32 = 16;

/// Width of the tab strip, in terminal columns.
pub const TAB_WIDTH_CELLS: u16 = 14;

/// Width of each header button (reset, close), in terminal columns.
pub const HEADER_BUTTON_CELLS: u16 = 3;

/// Width of the menu sidebar in the exercise shell, in terminal columns.
pub const SIDEBAR_WIDTH_CELLS: u16 = 22;
