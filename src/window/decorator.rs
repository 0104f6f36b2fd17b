use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::layout::floating::{header_buttons, header_for_region};
use crate::question::Difficulty;
use crate::ui::UiFrame;

/// What the header strip shows besides the buttons.
#[derive(Debug, Clone, Copy)]
pub struct HeaderContent<'a> {
    pub title: &'a str,
    pub difficulty: Difficulty,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Draw border and header for a panel covering `rect` (in cells).
    /// `active` is true while the panel is being moved or resized.
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: Rect,
        header: HeaderContent<'_>,
        active: bool,
    );
}

#[derive(Debug)]
pub struct OpenStepDecorator;

impl WindowDecorator for OpenStepDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: Rect,
        header: HeaderContent<'_>,
        active: bool,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let header_style = if active {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        let border_style = Style::default().fg(Color::DarkGray).bg(Color::Reset);

        let outer_left = rect.x;
        let outer_top = rect.y;
        let outer_right = rect.x.saturating_add(rect.width).saturating_sub(1);
        let outer_bottom = rect.y.saturating_add(rect.height).saturating_sub(1);

        for x in outer_left..=outer_right {
            let (top, bottom) = if x == outer_left {
                ("┌", "└")
            } else if x == outer_right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            frame.set_string(x, outer_top, top, border_style);
            frame.set_string(x, outer_bottom, bottom, border_style);
        }
        for y in outer_top.saturating_add(1)..outer_bottom {
            frame.set_string(outer_left, y, "│", border_style);
            frame.set_string(outer_right, y, "│", border_style);
        }

        let Some(strip) = header_for_region(rect) else {
            return;
        };
        frame.fill(strip, header_style);

        let buttons = header_buttons(strip);
        let text_width = match buttons {
            Some((_, reset)) => reset.x.saturating_sub(strip.x),
            None => strip.width,
        };
        let title = format!(" {} ", header.title);
        let title_len = title.chars().count() as u16;
        frame.set_string(
            strip.x,
            strip.y,
            &crate::ui::truncate_to_width(&title, text_width as usize),
            header_style,
        );
        let badge = format!("[{}]", header.difficulty.label());
        let badge_len = badge.chars().count() as u16;
        if title_len + badge_len < text_width {
            frame.set_string(
                strip.x + title_len,
                strip.y,
                &badge,
                header_style.fg(header.difficulty.badge_color()),
            );
        }

        if let Some((close, reset)) = buttons {
            frame.set_string(reset.x, reset.y, " ⟲ ", header_style);
            frame.set_string(close.x, close.y, " ✕ ", header_style);
        }
    }
}
