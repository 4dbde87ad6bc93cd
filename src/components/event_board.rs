use crossterm::event::{Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::event_card::{EventCard, CARD_HEIGHT};
use crate::action::Action;
use crate::color;
use crate::components::Component;
use crate::config::EventsConfig;
use crate::layout::{viewport_width, Breakpoint, Grid, GridLayout};
use crate::present::{BoardView, CardView, RenderState, SectionBody, SectionView};
use crate::toggle::{PastToggle, ToggleEffect};

const HEADING_HEIGHT: u16 = 2;
const MESSAGE_HEIGHT: u16 = 3;
const TOGGLE_HEIGHT: u16 = 3;
const GAP: u16 = 1;
const MOUSE_SCROLL_LINES: u16 = 3;
const CARD_ROW_PITCH: u32 = (CARD_HEIGHT + GAP) as u32;

const HEADING_FG: Color = Color::Rgb(0xff, 0xff, 0xff);
const TOGGLE_BG: Color = Color::Rgb(0x33, 0x33, 0x33);
const TOGGLE_BORDER: Color = Color::Rgb(0x44, 0x44, 0x44);

/// What occupies a region of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Heading(Grid),
    /// Loading indicator or a message spanning the grid.
    Body(Grid),
    Card(Grid, usize),
    ToggleButton,
}

/// Rectangle on the unscrolled board. Rows are `u32`: a long feed is taller
/// than a terminal coordinate can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u32,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(u32::from(self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub slot: Slot,
    pub area: Region,
}

/// Board geometry for a given width, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPlan {
    pub placements: Vec<Placement>,
    pub height: u32,
    /// Top of the past section when it is shown.
    pub past_top: Option<u32>,
}

impl BoardPlan {
    pub fn build(
        view: &BoardView,
        toggle: Option<PastToggle>,
        layout: &GridLayout,
        width: u16,
    ) -> Self {
        let mut plan = Self::default();
        let mut y = plan.place_section(Grid::Upcoming, &view.upcoming, layout, width, 0);

        if let (Some(past), Some(toggle)) = (&view.past, toggle) {
            y = y.saturating_add(u32::from(GAP));
            plan.placements.push(Placement {
                slot: Slot::ToggleButton,
                area: Region::new(0, y, width, TOGGLE_HEIGHT),
            });
            y = y.saturating_add(u32::from(TOGGLE_HEIGHT));

            if toggle.is_shown() {
                y = y.saturating_add(u32::from(GAP));
                plan.past_top = Some(y);
                y = plan.place_section(Grid::Past, past, layout, width, y);
            }
        }

        plan.height = y;
        plan
    }

    fn place_section(
        &mut self,
        grid: Grid,
        section: &SectionView,
        layout: &GridLayout,
        width: u16,
        top: u32,
    ) -> u32 {
        self.placements.push(Placement {
            slot: Slot::Heading(grid),
            area: Region::new(0, top, width, HEADING_HEIGHT),
        });
        let top = top.saturating_add(u32::from(HEADING_HEIGHT));

        match &section.body {
            SectionBody::Blank => top,
            SectionBody::Loading | SectionBody::Message(_) => {
                self.placements.push(Placement {
                    slot: Slot::Body(grid),
                    area: Region::new(0, top, width, MESSAGE_HEIGHT),
                });
                top.saturating_add(u32::from(MESSAGE_HEIGHT))
            }
            SectionBody::Cards(cards) => {
                let columns = layout.columns(grid).unwrap_or(1);
                let card_width = (width.saturating_sub(GAP * (columns - 1)) / columns).max(1);
                let per_row = usize::from(columns);

                for index in 0..cards.len() {
                    let row = u32::try_from(index / per_row).unwrap_or(u32::MAX);
                    let col = (index % per_row) as u16;
                    self.placements.push(Placement {
                        slot: Slot::Card(grid, index),
                        area: Region::new(
                            col.saturating_mul(card_width.saturating_add(GAP)),
                            top.saturating_add(row.saturating_mul(CARD_ROW_PITCH)),
                            card_width,
                            CARD_HEIGHT,
                        ),
                    });
                }

                let rows = u32::try_from(cards.len().div_ceil(per_row)).unwrap_or(u32::MAX);
                top.saturating_add(rows.saturating_mul(CARD_ROW_PITCH))
            }
        }
    }

    /// Cards in reading order.
    pub fn cards(&self) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(|p| matches!(p.slot, Slot::Card(..)))
    }
}

/// Scrollable board of upcoming and past events for one render cycle.
pub struct EventBoard {
    config: EventsConfig,
    view: BoardView,
    toggle: Option<PastToggle>,
    layout: GridLayout,
    cell_width_px: u16,
    viewport: Rect,
    scroll: u32,
    selected: usize,
}

impl EventBoard {
    pub fn new(config: EventsConfig, cell_width_px: u16) -> Self {
        let view = BoardView::build(&config, &RenderState::Loading);
        let toggle = PastToggle::for_config(&config);
        let layout = GridLayout::new(&config.cards_per_row, config.enable_past_events);
        Self {
            config,
            view,
            toggle,
            layout,
            cell_width_px,
            viewport: Rect::default(),
            scroll: 0,
            selected: 0,
        }
    }

    /// Starts over for a new render cycle, keeping the current viewport.
    pub fn reset(&mut self, config: EventsConfig) {
        let viewport = self.viewport;
        *self = Self::new(config, self.cell_width_px);
        self.set_viewport(viewport.width, viewport.height);
    }

    pub fn set_cell_width(&mut self, cell_width_px: u16) {
        self.cell_width_px = cell_width_px;
        self.set_viewport(self.viewport.width, self.viewport.height);
    }

    pub fn set_state(&mut self, state: &RenderState) {
        self.view = BoardView::build(&self.config, state);
        self.clamp_selection();
        self.clamp_scroll();
    }

    /// Applies a new content size and recomputes the grid columns.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        self.layout.apply(
            viewport_width(width, self.cell_width_px),
            &self.config.cards_per_row,
        );
        self.clamp_scroll();
        self.ensure_selected_visible();
    }

    pub fn config(&self) -> &EventsConfig {
        &self.config
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn toggle(&self) -> Option<PastToggle> {
        self.toggle
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.layout.breakpoint()
    }

    pub fn columns(&self) -> u16 {
        self.layout.columns(Grid::Upcoming).unwrap_or(1)
    }

    pub fn scroll(&self) -> u32 {
        self.scroll
    }

    pub fn plan(&self) -> BoardPlan {
        BoardPlan::build(&self.view, self.toggle, &self.layout, self.viewport.width)
    }

    fn card(&self, grid: Grid, index: usize) -> Option<&CardView> {
        let section = match grid {
            Grid::Upcoming => Some(&self.view.upcoming),
            Grid::Past => self.view.past.as_ref(),
        };
        section.and_then(|s| s.cards().get(index))
    }

    pub fn selected_card(&self) -> Option<&CardView> {
        let plan = self.plan();
        let placement = plan.cards().nth(self.selected)?;
        match placement.slot {
            Slot::Card(grid, index) => self.card(grid, index),
            _ => None,
        }
    }

    fn toggle_past(&mut self) {
        let Some(toggle) = self.toggle else {
            return;
        };
        let (toggle, effect) = toggle.toggle();
        self.toggle = Some(toggle);
        tracing::debug!(shown = toggle.is_shown(), "Past events toggled");

        if effect == ToggleEffect::ScrollIntoView {
            if let Some(top) = self.plan().past_top {
                self.scroll = top;
            }
        }
        self.clamp_selection();
        self.clamp_scroll();
    }

    fn max_scroll(&self) -> u32 {
        self.plan()
            .height
            .saturating_sub(u32::from(self.viewport.height))
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn clamp_selection(&mut self) {
        let count = self.plan().cards().count();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.plan().cards().count();
        if count == 0 {
            return;
        }
        self.selected = self
            .selected
            .saturating_add_signed(delta)
            .min(count - 1);
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        let plan = self.plan();
        let Some(placement) = plan.cards().nth(self.selected) else {
            return;
        };
        let top = placement.area.y;
        let bottom = placement.area.bottom();
        let visible = u32::from(self.viewport.height);

        if top < self.scroll {
            self.scroll = top;
        } else if bottom > self.scroll.saturating_add(visible) {
            self.scroll = bottom.saturating_sub(visible);
        }
        self.clamp_scroll();
    }

    fn scroll_by(&mut self, delta: i64) {
        let next = (i64::from(self.scroll) + delta).max(0);
        self.scroll = u32::try_from(next).unwrap_or(u32::MAX);
        self.clamp_scroll();
    }

    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('p') | KeyCode::Char('t') if self.toggle.is_some() => {
                Some(Action::TogglePast)
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Action::SelectNext),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Some(Action::SelectPrev),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectUp),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectDown),
            KeyCode::PageUp => Some(Action::ScrollPageUp),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::ScrollPageDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::ScrollToTop),
            KeyCode::Enter | KeyCode::Char('y') => Some(Action::CopyDetailUrl),
            _ => None,
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp(MOUSE_SCROLL_LINES)),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown(MOUSE_SCROLL_LINES)),
            _ => None,
        }
    }

    fn section(&self, grid: Grid) -> Option<&SectionView> {
        match grid {
            Grid::Upcoming => Some(&self.view.upcoming),
            Grid::Past => self.view.past.as_ref(),
        }
    }

    fn render_slot(&self, frame: &mut Frame, slot: Slot, area: Rect, selected: bool) {
        match slot {
            Slot::Heading(grid) => {
                let Some(section) = self.section(grid) else { return };
                let heading = Paragraph::new(Line::from(Span::styled(
                    section.heading.as_str(),
                    Style::default().fg(HEADING_FG).add_modifier(Modifier::BOLD),
                )));
                frame.render_widget(heading, area);
            }
            Slot::Body(grid) => {
                let Some(section) = self.section(grid) else { return };
                let line = match &section.body {
                    SectionBody::Loading => Line::from(Span::styled(
                        "Loading events…",
                        Style::default()
                            .fg(color::to_color(crate::present::MESSAGE_COLOR))
                            .add_modifier(Modifier::ITALIC),
                    )),
                    SectionBody::Message(message) => Line::from(Span::styled(
                        message.text.as_str(),
                        Style::default().fg(color::to_color(message.color())),
                    )),
                    _ => return,
                };
                let body = Paragraph::new(vec![Line::default(), line])
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                frame.render_widget(body, area);
            }
            Slot::Card(grid, index) => {
                if let Some(card) = self.card(grid, index) {
                    frame.render_widget(EventCard::new(card).selected(selected), area);
                }
            }
            Slot::ToggleButton => {
                let Some(toggle) = self.toggle else { return };
                let label = toggle.label(&self.config.buttons);
                let width = (label.chars().count() as u16 + 6).min(area.width);
                let button_area = Rect::new(
                    area.x + (area.width.saturating_sub(width)) / 2,
                    area.y,
                    width,
                    area.height,
                );
                let button = Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(TOGGLE_BG).fg(HEADING_FG))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(TOGGLE_BORDER)),
                    );
                frame.render_widget(button, button_area);
            }
        }
    }
}

impl Component for EventBoard {
    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        let page = i64::from(self.viewport.height.max(1));
        match action {
            Action::Resize { cols, rows } => self.set_viewport(*cols, *rows),
            Action::TogglePast => self.toggle_past(),
            Action::SelectNext => self.move_selection(1),
            Action::SelectPrev => self.move_selection(-1),
            Action::SelectDown => self.move_selection(self.columns() as isize),
            Action::SelectUp => self.move_selection(-(self.columns() as isize)),
            Action::ScrollUp(lines) => self.scroll_by(-i64::from(*lines)),
            Action::ScrollDown(lines) => self.scroll_by(i64::from(*lines)),
            Action::ScrollPageUp => self.scroll_by(-page),
            Action::ScrollPageDown => self.scroll_by(page),
            Action::ScrollToTop => self.scroll = 0,
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let plan = BoardPlan::build(&self.view, self.toggle, &self.layout, area.width);
        let top = self.scroll;
        let bottom = self.scroll.saturating_add(u32::from(area.height));

        for (card_index, placement) in plan
            .placements
            .iter()
            .scan(0usize, |cards, p| {
                let index = *cards;
                if matches!(p.slot, Slot::Card(..)) {
                    *cards += 1;
                }
                Some((index, p))
            })
        {
            // Only whole regions are drawn; partially scrolled ones are skipped.
            if placement.area.y < top || placement.area.bottom() > bottom {
                continue;
            }
            // Within the viewport, so the offset fits a terminal row.
            let offset = u16::try_from(placement.area.y - top).unwrap_or(area.height);
            let target = Rect::new(
                area.x + placement.area.x,
                area.y + offset,
                placement.area.width,
                placement.area.height,
            );
            let selected =
                focused && matches!(placement.slot, Slot::Card(..)) && card_index == self.selected;
            self.render_slot(frame, placement.slot, target, selected);
        }
    }
}
