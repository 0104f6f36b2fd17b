use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::question::Question;
use crate::ui::UiFrame;

const SCROLL_STEP: u16 = 3;

/// Scrollable body of the question panel.
pub struct QuestionView {
    text: Text<'static>,
    scroll: u16,
}

impl QuestionView {
    pub fn new(question: &Question) -> Self {
        Self {
            text: question_text(question),
            scroll: 0,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.text.lines.len().saturating_sub(1) as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max) as u16;
    }

    pub fn line_count(&self) -> usize {
        self.text.lines.len()
    }
}

fn heading(label: &str) -> Line<'static> {
    Line::from(Span::styled(
        label.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn labelled(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn question_text(question: &Question) -> Text<'static> {
    let mut lines = vec![heading("Problem Description"), Line::default()];
    lines.extend(
        question
            .description
            .lines()
            .map(|line| Line::from(line.to_string())),
    );

    if !question.examples.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Examples"));
        for (idx, example) in question.examples.iter().enumerate() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("Example {}:", idx + 1),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(labelled("Input", &example.input));
            lines.push(labelled("Output", &example.output));
            if let Some(explanation) = &example.explanation {
                lines.push(labelled("Explanation", explanation));
            }
        }
    }

    if !question.constraints.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Constraints"));
        for constraint in &question.constraints {
            lines.push(Line::from(format!("  • {constraint}")));
        }
    }
    Text::from(lines)
}

impl super::Component for QuestionView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let paragraph = Paragraph::new(self.text.clone())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.scroll_by(SCROLL_STEP as i32);
                true
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-(SCROLL_STEP as i32));
                true
            }
            _ => false,
        }
    }
}
