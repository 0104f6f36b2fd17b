//! The exercise screen: shell widgets behind a floating question panel.
//!
//! `CodepadApp` is the host for [`FloatingPanel`]. It translates terminal
//! cells into panel units, hit-tests the chrome, forwards pointer motion only
//! while the panel holds a pointer grab, and draws everything each frame.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Clear;

use crate::components::{
    Component, Countdown, ListComponent, QuestionView, StatusBar, WorkspaceComponent,
};
use crate::config::AppConfig;
use crate::constants::SIDEBAR_WIDTH_CELLS;
use crate::layout::floating::{ChromeTarget, PanelChrome, render_resize_outline, tab_region};
use crate::layout::{CellMetrics, rect_contains};
use crate::question::Question;
use crate::ui::UiFrame;
use crate::window::decorator::{HeaderContent, OpenStepDecorator, WindowDecorator};
use crate::window::{FloatingPanel, GestureKind};

pub struct CodepadApp {
    panel: FloatingPanel,
    chrome: PanelChrome,
    cells: CellMetrics,
    area: Rect,
    question: Question,
    question_view: QuestionView,
    status: StatusBar,
    sidebar: ListComponent,
    workspace: WorkspaceComponent,
    decorator: OpenStepDecorator,
    quit: bool,
}

impl CodepadApp {
    pub fn new(config: &AppConfig, question: Question, area: Rect) -> Self {
        let mut panel = FloatingPanel::new(config.cells.viewport(area));
        if config.open {
            panel.set_visible(true);
            let _ = panel.take_visibility_change();
        }
        let mut app = Self {
            panel,
            chrome: PanelChrome::default(),
            cells: config.cells,
            area,
            question_view: QuestionView::new(&question),
            question,
            status: StatusBar::new(config.user.clone(), Countdown::new(config.time_limit)),
            sidebar: ListComponent::sidebar(),
            workspace: WorkspaceComponent::new(),
            decorator: OpenStepDecorator,
            quit: false,
        };
        app.relayout();
        app
    }

    pub fn panel(&self) -> &FloatingPanel {
        &self.panel
    }

    pub fn chrome(&self) -> &PanelChrome {
        &self.chrome
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Cells the panel covers, or `None` while hidden.
    pub fn panel_cells(&self) -> Option<Rect> {
        self.panel
            .visible()
            .then(|| self.cells.to_cells(self.panel.rect(), self.area))
    }

    /// Terminal resized.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.panel.set_viewport(self.cells.viewport(area));
        self.relayout();
    }

    fn relayout(&mut self) {
        self.chrome = PanelChrome::layout(self.area, self.panel_cells());
    }

    /// Returns true when the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let handled = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(event, mouse),
            Event::Resize(cols, rows) => {
                self.resize(Rect::new(0, 0, *cols, *rows));
                true
            }
            _ => false,
        };
        if let Some(visible) = self.panel.take_visibility_change() {
            tracing::info!(visible, "question panel toggled");
        }
        self.relayout();
        handled
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
                true
            }
            KeyCode::Char('q') => {
                self.quit = true;
                true
            }
            KeyCode::Char('?') | KeyCode::Enter => {
                if self.panel.gesture_active() {
                    return false;
                }
                self.panel.toggle_visibility();
                true
            }
            KeyCode::Char('r') => self.panel.press_reset(),
            _ => false,
        }
    }

    fn handle_mouse(&mut self, event: &Event, mouse: &MouseEvent) -> bool {
        let (column, row) = (mouse.column, mouse.row);
        let pointer = self.cells.pointer(column, row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match self.chrome.hit_test(column, row) {
                Some(ChromeTarget::Body) => true,
                Some(target) => self.panel.press(target, pointer),
                None => false,
            },
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                if !self.panel.global_pointer().is_subscribed() {
                    return false;
                }
                self.panel.pointer_move(pointer);
                true
            }
            MouseEventKind::Up(_) => {
                let over_tab = self
                    .chrome
                    .region(ChromeTarget::Tab)
                    .is_some_and(|tab| rect_contains(tab, column, row));
                self.panel.pointer_up(over_tab)
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let over_panel = self
                    .panel_cells()
                    .is_some_and(|rect| rect_contains(rect, column, row));
                over_panel && self.question_view.handle_event(event)
            }
            _ => false,
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        if area != self.area {
            self.resize(area);
        }
        self.render_shell(frame, area);
        self.render_panel(frame);
        self.render_tab(frame, area);
    }

    fn render_shell(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        self.status.render(frame, rows[0]);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH_CELLS), Constraint::Min(0)])
            .split(rows[1]);
        self.sidebar.render(frame, columns[0]);
        self.workspace.render(frame, columns[1]);
    }

    fn render_panel(&mut self, frame: &mut UiFrame<'_>) {
        let Some(rect) = self.panel_cells() else {
            return;
        };
        let gesture = self.panel.gesture();
        frame.render_widget(Clear, rect);
        self.decorator.render_window(
            frame,
            rect,
            HeaderContent {
                title: &self.question.title,
                difficulty: self.question.difficulty,
            },
            matches!(gesture, GestureKind::Moving | GestureKind::Resizing(_)),
        );
        if rect.width > 2 && rect.height > 3 {
            let body = Rect {
                x: rect.x + 1,
                y: rect.y + 2,
                width: rect.width - 2,
                height: rect.height - 3,
            };
            self.question_view.render(frame, body);
        }
        if let GestureKind::Resizing(edge) = gesture {
            render_resize_outline(frame, rect, Some(edge));
        }
    }

    fn render_tab(&self, frame: &mut UiFrame<'_>, area: Rect) {
        let tab = tab_region(area, self.panel_cells());
        let style = if self.panel.gesture() == GestureKind::TabDragging {
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::Blue).fg(Color::White)
        };
        frame.fill(tab, style);
        let glyph = if self.panel.visible() { '⌃' } else { '⌄' };
        frame.set_string(
            tab.x.saturating_add(2),
            tab.y,
            &format!("{glyph} Question"),
            style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{FloatRect, Position};
    use ratatui::buffer::Buffer;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 160,
        height: 50,
    };

    fn app(open: bool) -> CodepadApp {
        let config = AppConfig {
            open,
            ..AppConfig::default()
        };
        CodepadApp::new(&config, Question::two_sum(), SCREEN)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    const LEFT: MouseButton = MouseButton::Left;

    #[test]
    fn panel_cells_follow_the_geometry() {
        let app = app(true);
        assert_eq!(app.panel().rect(), FloatRect::new(290, 100, 700, 600));
        assert_eq!(app.panel_cells(), Some(Rect::new(36, 6, 88, 38)));
        assert_eq!(app.chrome().region(ChromeTarget::Close), Some(Rect::new(120, 7, 3, 1)));
        assert!(self::app(false).panel_cells().is_none());
    }

    #[test]
    fn tab_click_toggles() {
        let mut app = app(false);
        assert!(app.handle_event(&mouse(MouseEventKind::Down(LEFT), 80, 0)));
        assert_eq!(app.panel().gesture(), GestureKind::TabDragging);
        assert!(app.handle_event(&mouse(MouseEventKind::Up(LEFT), 80, 0)));
        assert!(app.panel().visible());
        assert!(app.chrome().region(ChromeTarget::Header).is_some());
        assert_eq!(app.panel().global_pointer().listener_count(), 0);
    }

    #[test]
    fn release_away_from_tab_is_not_a_click() {
        let mut app = app(false);
        app.handle_event(&mouse(MouseEventKind::Down(LEFT), 80, 0));
        app.handle_event(&mouse(MouseEventKind::Up(LEFT), 20, 1));
        assert!(!app.panel().visible());
        assert_eq!(app.panel().gesture(), GestureKind::Idle);
    }

    #[test]
    fn tab_drag_opens_once() {
        let mut app = app(false);
        app.handle_event(&mouse(MouseEventKind::Down(LEFT), 80, 0));
        app.handle_event(&mouse(MouseEventKind::Drag(LEFT), 80, 4));
        assert!(app.panel().visible());
        assert_eq!(app.panel().gesture(), GestureKind::Idle);
        app.handle_event(&mouse(MouseEventKind::Drag(LEFT), 80, 8));
        assert!(!app.handle_event(&mouse(MouseEventKind::Up(LEFT), 80, 8)));
        assert!(app.panel().visible());
    }

    #[test]
    fn upward_tab_drag_closes_panel() {
        let mut app = app(true);
        let tab = app.chrome().region(ChromeTarget::Tab).unwrap();
        assert_eq!(tab, Rect::new(73, 5, 14, 1));
        assert!(app.handle_event(&mouse(MouseEventKind::Down(LEFT), 80, 5)));
        assert_eq!(app.panel().global_pointer().listener_count(), 1);
        // three rows is 48 units, one short of the threshold
        app.handle_event(&mouse(MouseEventKind::Drag(LEFT), 80, 2));
        assert!(app.panel().visible());
        app.handle_event(&mouse(MouseEventKind::Drag(LEFT), 80, 1));
        assert!(!app.panel().visible());
        assert_eq!(app.panel().gesture(), GestureKind::Idle);
        assert_eq!(app.panel().global_pointer().listener_count(), 0);
        assert!(!app.handle_event(&mouse(MouseEventKind::Up(LEFT), 80, 1)));
        assert!(!app.panel().visible());
        assert_eq!(app.chrome().region(ChromeTarget::Tab).map(|t| t.y), Some(0));
    }

    #[test]
    fn header_drag_moves_panel() {
        let mut app = app(true);
        assert!(app.handle_event(&mouse(MouseEventKind::Down(LEFT), 50, 7)));
        assert_eq!(app.panel().gesture(), GestureKind::Moving);
        app.handle_event(&mouse(MouseEventKind::Drag(LEFT), 56, 9));
        assert_eq!(app.panel().position(), Position::new(338, 132));
        app.handle_event(&mouse(MouseEventKind::Up(LEFT), 56, 9));
        assert_eq!(app.panel().gesture(), GestureKind::Idle);
        assert_eq!(app.panel_cells().map(|r| (r.x, r.y)), Some((42, 8)));
    }

    #[test]
    fn right_edge_resize() {
        let mut app = app(true);
        assert!(app.handle_event(&mouse(MouseEventKind::Down(LEFT), 123, 20)));
        assert_eq!(
            app.panel().gesture(),
            GestureKind::Resizing(crate::layout::floating::ResizeEdge::Right)
        );
        app.handle_event(&mouse(MouseEventKind::Drag(LEFT), 153, 20));
        assert_eq!(app.panel().size().width, 940);
        app.handle_event(&mouse(MouseEventKind::Up(LEFT), 153, 20));
        assert_eq!(app.panel().gesture(), GestureKind::Idle);
    }

    #[test]
    fn close_button_hides_without_dragging() {
        let mut app = app(true);
        assert!(app.handle_event(&mouse(MouseEventKind::Down(LEFT), 121, 7)));
        assert!(!app.panel().visible());
        assert_eq!(app.panel().gesture(), GestureKind::Idle);
        assert!(!app.handle_event(&mouse(MouseEventKind::Up(LEFT), 121, 7)));
    }

    #[test]
    fn motion_without_grab_is_ignored() {
        let mut app = app(true);
        let before = app.panel().rect();
        assert!(!app.handle_event(&mouse(MouseEventKind::Moved, 10, 10)));
        assert!(!app.handle_event(&mouse(MouseEventKind::Drag(LEFT), 10, 10)));
        assert_eq!(app.panel().rect(), before);
    }

    #[test]
    fn body_press_is_swallowed() {
        let mut app = app(true);
        assert!(app.handle_event(&mouse(MouseEventKind::Down(LEFT), 60, 20)));
        assert_eq!(app.panel().gesture(), GestureKind::Idle);
        assert!(!app.handle_event(&mouse(MouseEventKind::Down(LEFT), 5, 20)));
    }

    #[test]
    fn terminal_resize_reconciles_position() {
        let mut app = app(true);
        assert!(app.handle_event(&Event::Resize(100, 40)));
        assert_eq!(app.panel().viewport(), crate::window::Viewport::new(800, 640));
        assert_eq!(app.panel().position(), Position::new(90, 30));
        assert_eq!(app.panel().size().width, 700);
    }

    #[test]
    fn keyboard_shortcuts() {
        let mut app = app(false);
        assert!(app.handle_event(&key(KeyCode::Char('?'), KeyModifiers::NONE)));
        assert!(app.panel().visible());
        app.handle_event(&mouse(MouseEventKind::Down(LEFT), 50, 7));
        app.handle_event(&mouse(MouseEventKind::Drag(LEFT), 10, 2));
        app.handle_event(&mouse(MouseEventKind::Up(LEFT), 10, 2));
        assert_ne!(app.panel().position(), Position::new(290, 100));
        assert!(app.handle_event(&key(KeyCode::Char('r'), KeyModifiers::NONE)));
        assert_eq!(app.panel().position(), Position::new(290, 100));
        assert!(app.handle_event(&key(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!app.panel().visible());
        assert!(!app.should_quit());
        app.handle_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn renders_tab_panel_and_content() {
        let mut app = app(true);
        let mut buf = Buffer::empty(SCREEN);
        let mut frame = UiFrame::from_parts(SCREEN, &mut buf);
        app.render(&mut frame);
        assert_eq!(buf[(75, 5)].symbol(), "⌃");
        assert_eq!(buf[(36, 6)].symbol(), "┌");
        assert_eq!(buf[(38, 7)].symbol(), "T");
        assert_eq!(buf[(37, 8)].symbol(), "P");

        let mut app = self::app(false);
        let mut buf = Buffer::empty(SCREEN);
        let mut frame = UiFrame::from_parts(SCREEN, &mut buf);
        app.render(&mut frame);
        assert_eq!(buf[(75, 0)].symbol(), "⌄");
    }

    #[test]
    fn resize_outline_tracks_active_edge() {
        let mut app = app(true);
        app.handle_event(&mouse(MouseEventKind::Down(LEFT), 123, 20));
        let mut buf = Buffer::empty(SCREEN);
        let mut frame = UiFrame::from_parts(SCREEN, &mut buf);
        app.render(&mut frame);
        assert_eq!(buf[(123, 20)].symbol(), "║");
        assert_eq!(buf[(36, 20)].symbol(), "│");
    }
}
