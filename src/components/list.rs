use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::ui::UiFrame;

/// Static menu list with one highlighted entry.
pub struct ListComponent {
    items: Vec<String>,
    selected: usize,
    title: String,
}

impl ListComponent {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            title: title.into(),
        }
    }

    /// The exercise sidebar: problems, submissions, profile, settings.
    pub fn sidebar() -> Self {
        let mut list = Self::new("Code Test System");
        list.set_items(
            ["Problems", "Submissions", "Profile", "Settings"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        list
    }

    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, selected: usize) {
        self.selected = selected.min(self.items.len().saturating_sub(1));
    }
}

impl super::Component for ListComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width < 2 || area.height < 3 {
            return;
        }
        frame.render_widget(Block::default().borders(Borders::RIGHT), area);
        frame.set_string(
            area.x,
            area.y,
            &self.title,
            Style::default().add_modifier(Modifier::BOLD),
        );
        frame.set_string(
            area.x,
            area.y + 1,
            "MENU",
            Style::default().fg(Color::DarkGray),
        );

        let items = self
            .items
            .iter()
            .map(|item| ListItem::new(format!(" {item}")))
            .collect::<Vec<_>>();
        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected));
        }
        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::REVERSED),
        );
        let list_area = Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width - 1,
            height: area.height - 2,
        };
        frame.render_stateful_widget(list, list_area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use ratatui::buffer::Buffer;

    #[test]
    fn sidebar_has_four_entries_with_problems_active() {
        let list = ListComponent::sidebar();
        assert_eq!(list.items().len(), 4);
        assert_eq!(list.items()[list.selected()], "Problems");
    }

    #[test]
    fn selection_is_clamped_to_items() {
        let mut list = ListComponent::new("t");
        list.set_items(vec!["a".into(), "b".into(), "c".into()]);
        list.set_selected(10);
        assert_eq!(list.selected(), 2);
        list.set_items(vec!["a".into()]);
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn renders_title_and_highlight() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 8,
        };
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let mut list = ListComponent::sidebar();
        list.render(&mut frame, area);
        assert_eq!(buf[(0, 0)].symbol(), "C");
        assert_eq!(buf[(1, 2)].symbol(), "P");
        assert!(buf[(1, 2)].modifier.contains(Modifier::REVERSED));
        assert_eq!(buf[(19, 3)].symbol(), "│");
    }
}
