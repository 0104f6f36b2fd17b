use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::UiFrame;

const STARTER_CODE: &str = "// Enter your code here\nconsole.log(\"Hello World!\");";
const OUTPUT_PLACEHOLDER: &str = "Run your code to see output here.";

/// Read-only editor pane above an output pane.
pub struct WorkspaceComponent {
    code: String,
    output: String,
}

impl Default for WorkspaceComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceComponent {
    pub fn new() -> Self {
        Self {
            code: STARTER_CODE.to_string(),
            output: String::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn split(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);
        (chunks[0], chunks[1])
    }
}

impl super::Component for WorkspaceComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width < 3 || area.height < 4 {
            return;
        }
        let (code_area, output_area) = Self::split(area);

        let gutter = Style::default().fg(Color::DarkGray);
        let code_lines = self
            .code
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                let style = if line.trim_start().starts_with("//") {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{:>3} ", idx + 1), gutter),
                    Span::styled(line.to_string(), style),
                ])
            })
            .collect::<Vec<_>>();
        frame.render_widget(
            Paragraph::new(code_lines).block(Block::default().borders(Borders::ALL).title(" Code ")),
            code_area,
        );

        let output = if self.output.is_empty() {
            Line::from(Span::styled(OUTPUT_PLACEHOLDER, gutter))
        } else {
            Line::from(self.output.clone())
        };
        frame.render_widget(
            Paragraph::new(output).block(Block::default().borders(Borders::ALL).title(" Output ")),
            output_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use ratatui::buffer::Buffer;

    #[test]
    fn renders_starter_code_with_line_numbers() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 20,
        };
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        WorkspaceComponent::new().render(&mut frame, area);
        assert_eq!(buf[(0, 0)].symbol(), "┌");
        assert_eq!(buf[(3, 1)].symbol(), "1");
        assert_eq!(buf[(5, 1)].symbol(), "/");
        assert_eq!(buf[(5, 2)].symbol(), "c");
    }

    #[test]
    fn split_gives_code_the_larger_share() {
        let (code, output) = WorkspaceComponent::split(Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 20,
        });
        assert_eq!(code.height, 14);
        assert_eq!(output.height, 6);
        assert_eq!(output.y, 14);
    }
}
