//! Pointer gesture modes and the global pointer subscription they hold.
//!
//! A gesture owns a [`PointerGrab`] for as long as it is active. Dropping the
//! gesture (returning to [`GestureMode::Idle`]) releases the grab, so every
//! path that ends a gesture also stops global move/up delivery.

use std::cell::Cell;
use std::rc::Rc;

use super::{FloatRect, Position, Size};
use crate::layout::floating::ResizeEdge;

/// Registry of document-level pointer listeners.
///
/// Hosts forward pointer-move and pointer-up events to the panel only while
/// [`GlobalPointer::is_subscribed`] reports an active listener.
#[derive(Debug, Clone, Default)]
pub struct GlobalPointer {
    listeners: Rc<Cell<usize>>,
}

impl GlobalPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> PointerGrab {
        self.listeners.set(self.listeners.get() + 1);
        tracing::trace!(listeners = self.listeners.get(), "pointer listener acquired");
        PointerGrab {
            listeners: Rc::clone(&self.listeners),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.listeners.get() > 0
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.get()
    }
}

/// Live registration on the [`GlobalPointer`]; released on drop.
#[derive(Debug)]
pub struct PointerGrab {
    listeners: Rc<Cell<usize>>,
}

impl Drop for PointerGrab {
    fn drop(&mut self) {
        self.listeners.set(self.listeners.get().saturating_sub(1));
        tracing::trace!(listeners = self.listeners.get(), "pointer listener released");
    }
}

/// The single active interaction, carrying the anchor captured at press time.
#[derive(Debug, Default)]
pub enum GestureMode {
    #[default]
    Idle,
    TabDragging {
        origin: Position,
        grab: PointerGrab,
    },
    Moving {
        /// Pointer minus panel origin at press time.
        offset: Position,
        grab: PointerGrab,
    },
    Resizing {
        edge: ResizeEdge,
        start: FloatRect,
        origin: Position,
        /// Minimum size for the viewport observed when the gesture began.
        min: Size,
        grab: PointerGrab,
    },
}

/// Anchor-free view of [`GestureMode`] for rendering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Idle,
    TabDragging,
    Moving,
    Resizing(ResizeEdge),
}

impl GestureMode {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureMode::Idle => GestureKind::Idle,
            GestureMode::TabDragging { .. } => GestureKind::TabDragging,
            GestureMode::Moving { .. } => GestureKind::Moving,
            GestureMode::Resizing { edge, .. } => GestureKind::Resizing(*edge),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, GestureMode::Idle)
    }
}
