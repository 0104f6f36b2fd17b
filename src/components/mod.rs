use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod list;
pub mod question_view;
pub mod status_bar;
pub mod workspace;

pub use list::ListComponent;
pub use question_view::QuestionView;
pub use status_bar::{Countdown, StatusBar};
pub use workspace::WorkspaceComponent;

/// Render-only widgets that make up the exercise screen.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect);

    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }
}
