// Event loop - main run() method

use std::time::{Duration, Instant};

use crossterm::event;

use super::App;
use crate::action::Action;
use crate::config::ConfigEvent;
use crate::error::{FliteError, Result};

impl App {
    pub fn run(&mut self) -> Result<()> {
        let mut feed_rx = self
            .dispatcher
            .take_event_rx()
            .ok_or(FliteError::ChannelClosed)?;

        self.start_render();

        loop {
            // ---- 1. Poll non-input sources ----

            while let Ok(feed_event) = feed_rx.try_recv() {
                self.handle_feed_event(feed_event);
            }

            // Tick (drives message expiry and the refresh interval)
            if self.last_tick.elapsed() >= self.tick_interval() {
                self.dispatch(Action::Tick)?;
                self.last_tick = Instant::now();
            }

            // Poll config watcher for file changes
            let config_events: Vec<_> = if let Some(ref mut watcher) = self.config_watcher {
                watcher.poll_events()
            } else {
                Vec::new()
            };

            for event in config_events {
                match event {
                    ConfigEvent::Changed(path) => {
                        self.dispatch(Action::ConfigChanged(path))?;
                    }
                    ConfigEvent::Error(msg) => {
                        tracing::warn!("Config watcher error: {}", msg);
                    }
                }
            }

            if self.should_quit {
                break;
            }

            // ---- 2. Poll user input (keys/mouse/resize) ----

            let ready = event::poll(Duration::from_millis(16))
                .map_err(|e| FliteError::Terminal(e.to_string()))?;
            if ready {
                let event = event::read().map_err(|e| FliteError::Terminal(e.to_string()))?;

                // Any user input implies we want to give UI feedback
                self.mark_dirty();

                if let Some(action) = self.handle_event(event) {
                    self.dispatch(action)?;
                }
            }

            if self.should_quit {
                break;
            }

            // ---- 3. Draw once if anything changed ----

            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }
        }

        Ok(())
    }
}
