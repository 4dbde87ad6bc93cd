// App module - split into submodules for maintainability
// - mod.rs: App struct, constructor, render cycle bookkeeping
// - event_loop.rs: Main run() loop
// - rendering.rs: All UI drawing (draw method)
// - handlers.rs: Event handlers and action dispatch

mod event_loop;
mod handlers;
mod rendering;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use arboard::Clipboard;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::action::Action;
use crate::cli::Cli;
use crate::components::{Component, EventBoard, StatusBar};
use crate::config::{ConfigManager, ConfigOverride, ConfigWatcherMode};
use crate::error::{FliteError, Result};
use crate::feed::{FeedClient, FeedDispatcher, FeedEvent, FeedOutcome};
use crate::present::RenderState;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    should_quit: bool,
    needs_redraw: bool,
    // Configuration system
    config_manager: ConfigManager,
    config_watcher: Option<ConfigWatcherMode>,
    cli_override: ConfigOverride,
    // Render cycles
    dispatcher: FeedDispatcher,
    board: EventBoard,
    status_bar: StatusBar,
    clipboard: Option<Clipboard>,
    last_tick: Instant,
    last_render: Instant,
}

impl App {
    pub fn new(cli: &Cli, config_manager: ConfigManager) -> Result<Self> {
        let general = config_manager.app_config().general.clone();
        let client = FeedClient::http(Duration::from_secs(general.request_timeout_secs))?;
        let dispatcher = FeedDispatcher::new(client);

        let config_watcher = if general.watch_config && config_manager.config_dir().is_dir() {
            Some(ConfigWatcherMode::start(
                config_manager.config_dir(),
                general.tick_interval_ms,
            ))
        } else {
            None
        };

        let cli_override = cli.to_override();
        let events = config_manager.resolve_events(&cli_override);
        let board = EventBoard::new(events, config_manager.app_config().display.cell_width_px);

        enable_raw_mode().map_err(|e| FliteError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| FliteError::Terminal(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| FliteError::Terminal(e.to_string()))?;

        let mut app = Self {
            terminal,
            should_quit: false,
            needs_redraw: true,
            config_manager,
            config_watcher,
            cli_override,
            dispatcher,
            board,
            status_bar: StatusBar::new(),
            clipboard: Clipboard::new().ok(),
            last_tick: Instant::now(),
            last_render: Instant::now(),
        };

        let size = app
            .terminal
            .size()
            .map_err(|e| FliteError::Terminal(e.to_string()))?;
        let board_area = Self::board_area(Rect::new(0, 0, size.width, size.height));
        app.board.update(&Action::Resize {
            cols: board_area.width,
            rows: board_area.height,
        });

        Ok(app)
    }

    /// Region below the title bar and above the status bar.
    pub(super) fn board_area(screen: Rect) -> Rect {
        Rect::new(
            screen.x,
            screen.y + 1,
            screen.width,
            screen.height.saturating_sub(2),
        )
    }

    pub(super) fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Starts a new render cycle: resolves configuration afresh, resets the
    /// board to its loading state and spawns the fetch.
    pub(super) fn start_render(&mut self) {
        let events = self.config_manager.resolve_events(&self.cli_override);
        self.board
            .set_cell_width(self.config_manager.app_config().display.cell_width_px);
        self.board.reset(events.clone());
        self.status_bar.set_past_enabled(events.enable_past_events);
        self.dispatcher.start(events);
        self.last_render = Instant::now();
        self.mark_dirty();
    }

    pub(super) fn handle_feed_event(&mut self, event: FeedEvent) {
        if !self.dispatcher.is_current(&event) {
            tracing::warn!(
                generation = event.generation,
                current = self.dispatcher.current_generation(),
                "Dropping result from superseded render cycle"
            );
            return;
        }

        let state = match event.result {
            Ok(outcome) => {
                match &outcome {
                    FeedOutcome::Events(classification) => tracing::info!(
                        generation = event.generation,
                        upcoming = classification.upcoming.len(),
                        past = classification.past.len(),
                        "Render cycle finished"
                    ),
                    FeedOutcome::EmptyFeed => {
                        tracing::info!(generation = event.generation, "Feed returned no events")
                    }
                }
                RenderState::Loaded(outcome)
            }
            Err(e) => {
                self.status_bar.error(e.to_string());
                RenderState::Failed(e)
            }
        };
        self.board.set_state(&state);
        self.mark_dirty();
    }

    fn refresh_due(&self) -> bool {
        let secs = self.config_manager.app_config().general.refresh_interval_secs;
        secs > 0 && self.last_render.elapsed() >= Duration::from_secs(secs)
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config_manager.app_config().general.tick_interval_ms.max(1))
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}
