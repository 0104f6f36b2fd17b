use crossterm::event::{Event, KeyEventKind};

/// Drops key releases and auto-repeats so every shortcut fires once per
/// press on terminals that report the full key lifecycle.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(key) if key.kind != KeyEventKind::Press => None,
            other => Some(other),
        }
    }
}
