use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::ui::UiFrame;

/// Remaining seconds below which the timer turns red.
const WARNING_SECONDS: u64 = 300;

/// Countdown from a fixed budget, saturating at zero.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    total: Duration,
    started: Instant,
}

impl Countdown {
    pub fn new(total: Duration) -> Self {
        Self::started_at(total, Instant::now())
    }

    pub fn started_at(total: Duration, started: Instant) -> Self {
        Self { total, started }
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.total
            .saturating_sub(now.saturating_duration_since(self.started))
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }
}

/// `MM:SS`, with minutes allowed past 99.
pub fn format_time(remaining: Duration) -> String {
    let seconds = remaining.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Top strip: greeting on the left, time left on the right.
pub struct StatusBar {
    user: String,
    countdown: Countdown,
    style: Style,
}

impl StatusBar {
    pub fn new<T: Into<String>>(user: T, countdown: Countdown) -> Self {
        Self {
            user: user.into(),
            countdown,
            style: Style::default().bg(Color::Black).fg(Color::White),
        }
    }

    pub fn greeting(&self) -> String {
        format!(" Hello {}", self.user)
    }

    pub fn timer_text(&self, remaining: Duration) -> String {
        format!("Time left: {} ", format_time(remaining))
    }

    fn render_at(&self, frame: &mut UiFrame<'_>, area: Rect, remaining: Duration) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let strip = Rect { height: 1, ..area };
        frame.fill(strip, self.style);
        frame.set_string(
            area.x,
            area.y,
            &self.greeting(),
            self.style.add_modifier(Modifier::BOLD),
        );

        let timer = self.timer_text(remaining);
        let timer_width = timer.chars().count() as u16;
        if timer_width < area.width {
            let timer_style = if remaining.as_secs() < WARNING_SECONDS {
                self.style.fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                self.style
            };
            frame.set_string(
                area.x + area.width - timer_width,
                area.y,
                &timer,
                timer_style,
            );
        }
    }
}

impl super::Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        let remaining = self.countdown.remaining();
        self.render_at(frame, area, remaining);
    }
}
