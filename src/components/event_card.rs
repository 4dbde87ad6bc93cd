use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::color;
use crate::present::CardView;

/// Rows a card occupies, borders included.
pub const CARD_HEIGHT: u16 = 8;

const CARD_BG: Color = Color::Rgb(0x22, 0x22, 0x22);
const CARD_BORDER: Color = Color::Rgb(0x33, 0x33, 0x33);
const SELECTED_BORDER: Color = Color::Rgb(0x88, 0x88, 0x88);
const DETAIL_FG: Color = Color::Rgb(0xcc, 0xcc, 0xcc);
const LOCATION_FG: Color = Color::Rgb(0x99, 0x99, 0x99);
const FLYER_FG: Color = Color::Rgb(0x66, 0x66, 0x66);

/// One event card. Past cards are drawn dimmed.
pub struct EventCard<'a> {
    card: &'a CardView,
    selected: bool,
}

impl<'a> EventCard<'a> {
    pub fn new(card: &'a CardView) -> Self {
        Self {
            card,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let card = self.card;
        let title_style = Style::default()
            .fg(color::to_color(&card.title_color))
            .add_modifier(Modifier::BOLD);

        let flyer = card
            .cover_image
            .as_deref()
            .map(|url| format!("▣ {}", url))
            .unwrap_or_default();

        let button = Span::styled(
            format!(" {} ", card.button_label),
            Style::default()
                .bg(color::to_color(&card.button_background))
                .fg(color::to_color(card.button_foreground))
                .add_modifier(Modifier::BOLD),
        );

        vec![
            Line::from(Span::styled(card.title.as_str(), title_style)),
            Line::from(Span::styled(card.date_line.as_str(), Style::default().fg(DETAIL_FG))),
            Line::from(Span::styled(
                card.venue.as_str(),
                Style::default().fg(DETAIL_FG).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.location.as_str(), Style::default().fg(LOCATION_FG))),
            Line::from(Span::styled(flyer, Style::default().fg(FLYER_FG))),
            Line::from(button),
        ]
    }
}

impl Widget for EventCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.selected { SELECTED_BORDER } else { CARD_BORDER };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(CARD_BG));
        if self.selected {
            block = block.border_type(BorderType::Thick);
        }

        let mut paragraph = Paragraph::new(self.lines())
            .block(block)
            .alignment(Alignment::Left);
        if self.card.is_past {
            paragraph = paragraph.style(Style::default().add_modifier(Modifier::DIM));
        }
        paragraph.render(area, buf);
    }
}
