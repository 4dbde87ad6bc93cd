//! Display model for one render cycle.
//!
//! Both the interactive board and the plain printer draw from a
//! [`BoardView`], so headings, messages, links and colours are decided here
//! once.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::color::contrast_foreground;
use crate::config::EventsConfig;
use crate::feed::{EventRecord, FeedError, FeedOutcome};

pub const DEFAULT_TITLE_COLOR: &str = "#fff";
pub const DEFAULT_BUTTON_COLOR: &str = "#007bff";
pub const PAST_TITLE_COLOR: &str = "#aaa";
pub const PAST_BUTTON_COLOR: &str = "#555";
pub const MESSAGE_COLOR: &str = "#ccc";
pub const ERROR_COLOR: &str = "#ff5555";

const DATE_FORMAT: &str = "%A, %B %-d, %Y at %I:%M %p";

/// Where the current render cycle stands.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Loading,
    Loaded(FeedOutcome),
    Failed(FeedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub text: String,
    pub kind: MessageKind,
}

impl MessageView {
    fn info(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: MessageKind::Info,
        }
    }

    fn error(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: MessageKind::Error,
        }
    }

    pub fn color(&self) -> &'static str {
        match self.kind {
            MessageKind::Info => MESSAGE_COLOR,
            MessageKind::Error => ERROR_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub title_color: String,
    pub date_line: String,
    pub venue: String,
    pub location: String,
    pub cover_image: Option<String>,
    pub button_label: String,
    pub button_background: String,
    pub button_foreground: &'static str,
    pub detail_url: String,
    pub is_past: bool,
}

impl CardView {
    pub fn new(event: &EventRecord, is_past: bool, config: &EventsConfig) -> Self {
        let accent = event.accent();
        let title_color = if is_past {
            PAST_TITLE_COLOR
        } else {
            accent.unwrap_or(DEFAULT_TITLE_COLOR)
        };
        let button_background = if is_past {
            PAST_BUTTON_COLOR
        } else {
            accent.unwrap_or(DEFAULT_BUTTON_COLOR)
        };
        let button_label = if is_past {
            &config.buttons.view_history
        } else {
            &config.buttons.view_details
        };

        Self {
            title: event.event_name.clone(),
            title_color: title_color.to_string(),
            date_line: format_event_date(&event.start_date_time, &Local),
            venue: event.venue_name.clone(),
            location: event.venue_location.clone(),
            cover_image: event.cover_image().map(str::to_string),
            button_label: button_label.clone(),
            button_background: button_background.to_string(),
            button_foreground: contrast_foreground(button_background).as_hex(),
            detail_url: config.detail_url(&event.slug),
            is_past,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Fetch still in flight.
    Loading,
    Cards(Vec<CardView>),
    Message(MessageView),
    /// Heading only.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub heading: String,
    pub body: SectionBody,
}

impl SectionView {
    pub fn cards(&self) -> &[CardView] {
        match &self.body {
            SectionBody::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&MessageView> {
        match &self.body {
            SectionBody::Message(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub container_id: String,
    pub upcoming: SectionView,
    /// Absent when past events are disabled.
    pub past: Option<SectionView>,
}

impl BoardView {
    pub fn build(config: &EventsConfig, state: &RenderState) -> Self {
        let headings = &config.headings;

        let (upcoming_body, past_body) = match state {
            RenderState::Loading => (SectionBody::Loading, SectionBody::Blank),
            // Failures and empty feeds only speak in the upcoming section.
            RenderState::Failed(_) => (
                SectionBody::Message(MessageView::error(&headings.error)),
                SectionBody::Blank,
            ),
            RenderState::Loaded(FeedOutcome::EmptyFeed) => (
                SectionBody::Message(MessageView::info(&headings.no_events)),
                SectionBody::Blank,
            ),
            RenderState::Loaded(FeedOutcome::Events(classification)) => (
                cards_or_message(&classification.upcoming, false, config, &headings.no_upcoming),
                cards_or_message(&classification.past, true, config, &headings.no_past),
            ),
        };

        Self {
            container_id: config.container_id.clone(),
            upcoming: SectionView {
                heading: headings.upcoming.clone(),
                body: upcoming_body,
            },
            past: config.enable_past_events.then(|| SectionView {
                heading: headings.past.clone(),
                body: past_body,
            }),
        }
    }
}

fn cards_or_message(
    events: &[EventRecord],
    is_past: bool,
    config: &EventsConfig,
    empty_text: &str,
) -> SectionBody {
    if events.is_empty() {
        SectionBody::Message(MessageView::info(empty_text))
    } else {
        SectionBody::Cards(
            events
                .iter()
                .map(|event| CardView::new(event, is_past, config))
                .collect(),
        )
    }
}

/// Long-form start date, e.g. `Saturday, June 1, 2024 at 08:00 PM`.
pub fn format_event_date<Tz>(start: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    start.with_timezone(tz).format(DATE_FORMAT).to_string()
}
