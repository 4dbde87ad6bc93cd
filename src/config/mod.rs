mod events;
mod watcher;

pub use events::{
    resolve, Buttons, ButtonsOverride, CardsPerRow, CardsPerRowOverride, ConfigOverride,
    EventsConfig, Headings, HeadingsOverride,
};
pub use watcher::{ConfigEvent, ConfigWatcherMode};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FliteError, Result};

const CONFIG_DIR: &str = "flite-events";
const MAIN_CONFIG_FILE: &str = "config.toml";
const EVENTS_CONFIG_FILE: &str = "events.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_interval_ms: u64,
    pub log_level: String,
    /// Directory for log files. Defaults to the platform data directory.
    pub log_file: Option<PathBuf>,
    pub watch_config: bool,
    pub request_timeout_secs: u64,
    /// Re-run the render cycle every N seconds. Zero disables it.
    pub refresh_interval_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            log_level: "info".to_string(),
            log_file: None,
            watch_config: true,
            request_timeout_secs: 15,
            refresh_interval_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Approximate pixel width of one terminal cell, used to map the terminal
    /// width onto the breakpoint table.
    pub cell_width_px: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { cell_width_px: 8 }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    events_override: ConfigOverride,
    /// Problems hit while reading config files that have not been logged yet.
    load_warnings: Vec<String>,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = Self::default_config_dir()?;
        Ok(Self::load_from(config_dir))
    }

    /// Uses an explicit directory, which must exist.
    pub fn with_dir(config_dir: PathBuf) -> Result<Self> {
        if !config_dir.is_dir() {
            return Err(FliteError::ConfigNotFound { path: config_dir });
        }
        Ok(Self::load_from(config_dir))
    }

    /// Loads without logging. The tracing subscriber is not installed yet
    /// when the first load runs, so problems are kept for
    /// [`ConfigManager::report_load_warnings`].
    fn load_from(config_dir: PathBuf) -> Self {
        let mut load_warnings = Vec::new();
        let app_config = Self::load_app_config(&config_dir, &mut load_warnings);
        let events_override = Self::load_events_override(&config_dir, &mut load_warnings);
        Self {
            config_dir,
            app_config,
            events_override,
            load_warnings,
        }
    }

    /// Drains the pending load problems.
    pub fn take_load_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.load_warnings)
    }

    /// Logs the pending load problems at warn level.
    pub fn report_load_warnings(&mut self) {
        for warning in self.take_load_warnings() {
            tracing::warn!("{}", warning);
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    /// Overrides read from `events.toml`.
    pub fn events_override(&self) -> &ConfigOverride {
        &self.events_override
    }

    /// Resolves the board configuration for a new render cycle, with `cli`
    /// layered over the file overrides.
    pub fn resolve_events(&self, cli: &ConfigOverride) -> EventsConfig {
        let overrides = self.events_override.clone().layer(cli.clone());
        resolve(&EventsConfig::default(), &overrides)
    }

    pub fn reload_all(&mut self) {
        self.app_config = Self::load_app_config(&self.config_dir, &mut self.load_warnings);
        self.events_override =
            Self::load_events_override(&self.config_dir, &mut self.load_warnings);
        self.report_load_warnings();
    }

    pub fn reload_file(&mut self, path: &Path) {
        let file_name = path.file_name().and_then(|n| n.to_str());

        match file_name {
            Some(MAIN_CONFIG_FILE) => {
                self.app_config = Self::load_app_config(&self.config_dir, &mut self.load_warnings);
            }
            Some(EVENTS_CONFIG_FILE) => {
                self.events_override =
                    Self::load_events_override(&self.config_dir, &mut self.load_warnings);
            }
            _ => {
                self.reload_all();
            }
        }
        self.report_load_warnings();
    }

    fn default_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| FliteError::Config("Could not determine config directory".to_string()))
    }

    /// Directory used for log files when `general.log_file` is unset.
    pub fn default_log_dir() -> PathBuf {
        BaseDirs::new()
            .map(|dirs| dirs.data_local_dir().join(CONFIG_DIR).join("logs"))
            .unwrap_or_else(|| std::env::temp_dir().join(CONFIG_DIR))
    }

    fn load_app_config(config_dir: &Path, warnings: &mut Vec<String>) -> AppConfig {
        let path = config_dir.join(MAIN_CONFIG_FILE);
        Self::load_toml_file(&path, warnings).unwrap_or_default()
    }

    fn load_events_override(config_dir: &Path, warnings: &mut Vec<String>) -> ConfigOverride {
        let path = config_dir.join(EVENTS_CONFIG_FILE);
        Self::load_toml_file(&path, warnings).unwrap_or_default()
    }

    fn load_toml_file<T: for<'de> Deserialize<'de> + Default>(
        path: &Path,
        warnings: &mut Vec<String>,
    ) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), e));
                    None
                }
            },
            Err(e) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), e));
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Writes `config.toml` and `events.toml` with default values, leaving
    /// existing files alone. Returns the paths that were written.
    pub fn write_default_configs(&self) -> Result<Vec<PathBuf>> {
        self.ensure_config_dir()?;
        let mut written = Vec::new();

        let main_path = self.config_dir.join(MAIN_CONFIG_FILE);
        if !main_path.exists() {
            let content = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| FliteError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&main_path, content)?;
            written.push(main_path);
        }

        let events_path = self.config_dir.join(EVENTS_CONFIG_FILE);
        if !events_path.exists() {
            let content = toml::to_string_pretty(&EventsConfig::default()).map_err(|e| {
                FliteError::Config(format!("Failed to serialize events config: {}", e))
            })?;
            std::fs::write(&events_path, content)?;
            written.push(events_path);
        }

        Ok(written)
    }
}
