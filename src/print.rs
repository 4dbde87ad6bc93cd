//! Non-interactive output of a board, used by `--print`.

use std::io::{self, Write};

use crate::config::EventsConfig;
use crate::present::{BoardView, CardView, SectionBody, SectionView};
use crate::toggle::PastToggle;

pub fn write_board(
    out: &mut impl Write,
    view: &BoardView,
    config: &EventsConfig,
    toggle: Option<PastToggle>,
) -> io::Result<()> {
    write_section(out, &view.upcoming)?;

    if let (Some(past), Some(toggle)) = (&view.past, toggle) {
        writeln!(out, "[ {} ]", toggle.label(&config.buttons))?;
        if toggle.is_shown() {
            writeln!(out)?;
            write_section(out, past)?;
        }
    }
    Ok(())
}

fn write_section(out: &mut impl Write, section: &SectionView) -> io::Result<()> {
    writeln!(out, "== {} ==", section.heading)?;
    match &section.body {
        SectionBody::Loading => writeln!(out, "Loading…")?,
        SectionBody::Blank => {}
        SectionBody::Message(message) => writeln!(out, "{}", message.text)?,
        SectionBody::Cards(cards) => {
            for card in cards {
                write_card(out, card)?;
            }
        }
    }
    writeln!(out)
}

fn write_card(out: &mut impl Write, card: &CardView) -> io::Result<()> {
    writeln!(out, "* {}", card.title)?;
    writeln!(out, "  {}", card.date_line)?;
    if !card.venue.is_empty() {
        writeln!(out, "  {}", card.venue)?;
    }
    if !card.location.is_empty() {
        writeln!(out, "  {}", card.location)?;
    }
    writeln!(out, "  {}: {}", card.button_label, card.detail_url)
}
