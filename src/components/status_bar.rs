use std::time::{Duration, Instant};

use crossterm::event::Event;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::components::Component;

const DEFAULT_DURATION_MS: u64 = 4000;

const BAR_BG: Color = Color::Rgb(0x1a, 0x1a, 0x1a);
const SUMMARY_FG: Color = Color::Rgb(0xcc, 0xcc, 0xcc);
const HINT_FG: Color = Color::Rgb(0x77, 0x77, 0x77);
const INFO_FG: Color = Color::Rgb(0x7f, 0xd9, 0x62);
const ERROR_FG: Color = Color::Rgb(0xff, 0x55, 0x55);

const KEY_HINTS: &str = "q quit · r reload · p past · ←→↑↓ select · ⏎ copy link";
const KEY_HINTS_NO_PAST: &str = "q quit · r reload · ←→↑↓ select · ⏎ copy link";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    created_at: Instant,
    duration: Duration,
}

impl StatusMessage {
    pub fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Bottom line: board summary on the left, key hints or a transient
/// message on the right.
pub struct StatusBar {
    summary: String,
    message: Option<StatusMessage>,
    past_enabled: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            summary: String::new(),
            message: None,
            past_enabled: true,
        }
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    pub fn set_past_enabled(&mut self, enabled: bool) {
        self.past_enabled = enabled;
    }

    pub fn push(&mut self, message: StatusMessage) {
        self.message = Some(message);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(StatusMessage::new(StatusLevel::Info, text));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(StatusMessage::new(StatusLevel::Error, text));
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Drops an expired message. Returns true if one was removed.
    pub fn tick(&mut self) -> bool {
        if self.message.as_ref().is_some_and(StatusMessage::is_expired) {
            self.message = None;
            return true;
        }
        false
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_event(&mut self, _event: &Event) -> Option<Action> {
        None
    }

    fn update(&mut self, action: &Action) {
        if matches!(action, Action::Tick) {
            self.tick();
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let summary = Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.summary),
            Style::default().fg(SUMMARY_FG),
        )))
        .style(Style::default().bg(BAR_BG));
        frame.render_widget(summary, chunks[0]);

        let right = match &self.message {
            Some(message) => {
                let fg = match message.level {
                    StatusLevel::Info => INFO_FG,
                    StatusLevel::Error => ERROR_FG,
                };
                Span::styled(
                    format!("{} ", message.text),
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                )
            }
            None => {
                let hints = if self.past_enabled { KEY_HINTS } else { KEY_HINTS_NO_PAST };
                Span::styled(format!("{} ", hints), Style::default().fg(HINT_FG))
            }
        };
        let right = Paragraph::new(Line::from(right))
            .alignment(Alignment::Right)
            .style(Style::default().bg(BAR_BG));
        frame.render_widget(right, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(bar: &StatusBar, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal.draw(|frame| bar.render(frame, frame.area(), false)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..width).map(|x| buffer[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_message_expires_on_tick() {
        let mut bar = StatusBar::new();
        bar.push(StatusMessage::new(StatusLevel::Info, "Copied").with_duration(Duration::ZERO));
        assert!(bar.message().is_some());

        bar.update(&Action::Tick);
        assert!(bar.message().is_none());
        assert!(!bar.tick());
    }

    #[test]
    fn test_fresh_message_survives_tick() {
        let mut bar = StatusBar::new();
        bar.error("Clipboard unavailable");
        assert!(!bar.tick());
        assert_eq!(bar.message().unwrap().level, StatusLevel::Error);
    }

    #[test]
    fn test_render_summary_and_hints() {
        let mut bar = StatusBar::new();
        bar.set_summary("events-section");
        let line = rendered(&bar, 140);
        assert!(line.contains("events-section"));
        assert!(line.contains("p past"));

        bar.set_past_enabled(false);
        assert!(!rendered(&bar, 140).contains("p past"));
    }

    #[test]
    fn test_message_replaces_hints() {
        let mut bar = StatusBar::new();
        bar.info("Copied https://flite.city/e/a");
        let line = rendered(&bar, 140);
        assert!(line.contains("Copied https://flite.city/e/a"));
        assert!(!line.contains("q quit"));
    }
}
