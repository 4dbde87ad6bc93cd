// Rendering - draw() method and title/status summaries

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::App;
use crate::components::Component;
use crate::error::{FliteError, Result};

const TITLE_BG: Color = Color::Rgb(0x11, 0x11, 0x11);
const TITLE_FG: Color = Color::Rgb(0xff, 0xff, 0xff);
const TITLE_DIM_FG: Color = Color::Rgb(0x88, 0x88, 0x88);

impl App {
    /// Main drawing method - renders entire UI
    pub(super) fn draw(&mut self) -> Result<()> {
        let summary = format!(
            "{} · {} · {} per row",
            self.board.breakpoint().as_str(),
            self.board.config().api_endpoint,
            self.board.columns(),
        );
        self.status_bar.set_summary(summary);

        let container_id = self.board.view().container_id.clone();
        let board = &self.board;
        let status_bar = &self.status_bar;

        self.terminal
            .draw(|frame| {
                let screen = frame.area();

                let title = Paragraph::new(Line::from(vec![
                    Span::styled(
                        " Flite Events ",
                        Style::default().fg(TITLE_FG).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("#{}", container_id), Style::default().fg(TITLE_DIM_FG)),
                ]))
                .style(Style::default().bg(TITLE_BG));
                let title_area = Rect::new(screen.x, screen.y, screen.width, screen.height.min(1));
                frame.render_widget(title, title_area);

                board.render(frame, Self::board_area(screen), true);

                if screen.height >= 2 {
                    let status_area = Rect::new(screen.x, screen.bottom() - 1, screen.width, 1);
                    status_bar.render(frame, status_area, false);
                }
            })
            .map_err(|e| FliteError::Terminal(e.to_string()))?;

        Ok(())
    }
}
