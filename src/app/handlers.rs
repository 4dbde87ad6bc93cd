// Event handlers and action dispatch

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use super::App;
use crate::action::Action;
use crate::components::Component;
use crate::error::Result;

impl App {
    pub(super) fn handle_event(&mut self, event: CrosstermEvent) -> Option<Action> {
        match &event {
            CrosstermEvent::Key(key) => self.handle_key(*key),
            CrosstermEvent::Mouse(_) => self.board.handle_event(&event),
            CrosstermEvent::Resize(cols, rows) => {
                let area = Self::board_area(Rect::new(0, 0, *cols, *rows));
                Some(Action::Resize {
                    cols: area.width,
                    rows: area.height,
                })
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        #[cfg(debug_assertions)]
        tracing::debug!("Key event: {:?}", key);

        if let Some(action) = global_key_action(&key) {
            return Some(action);
        }
        self.board.handle_event(&CrosstermEvent::Key(key))
    }

    pub(super) fn dispatch(&mut self, action: Action) -> Result<()> {
        match &action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                if self.status_bar.tick() {
                    self.mark_dirty();
                }
                if self.refresh_due() {
                    tracing::debug!("Refresh interval elapsed");
                    self.start_render();
                }
            }
            Action::Reload => {
                self.config_manager.reload_all();
                self.status_bar.info("Reloading events");
                self.start_render();
            }
            Action::ConfigChanged(path) => {
                tracing::info!("Config file changed: {}", path.display());
                self.config_manager.reload_file(path);
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.status_bar.info(format!("Reloaded {}", name));
                self.start_render();
            }
            Action::CopyDetailUrl => {
                self.copy_selected_url();
                self.mark_dirty();
            }
            _ => {
                self.board.update(&action);
                self.mark_dirty();
            }
        }
        Ok(())
    }

    fn copy_selected_url(&mut self) {
        let Some(url) = self.board.selected_card().map(|card| card.detail_url.clone()) else {
            self.status_bar.info("No event selected");
            return;
        };

        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(url.clone()) {
                Ok(()) => self.status_bar.info(format!("Copied {}", url)),
                Err(e) => {
                    tracing::warn!("Failed to copy to clipboard: {}", e);
                    self.status_bar.error(format!("Clipboard error: {}", url));
                }
            },
            None => self.status_bar.error(format!("Clipboard unavailable: {}", url)),
        }
    }
}

/// Keys handled before the board sees them.
fn global_key_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Reload),
        _ => None,
    }
}
