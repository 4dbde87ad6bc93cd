use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant, SystemTime};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::{EVENTS_CONFIG_FILE, MAIN_CONFIG_FILE};
use crate::error::{FliteError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    Changed(PathBuf),
    Error(String),
}

/// Only the two files the board reads trigger a reload; editor swap files
/// and unrelated TOML in the same directory are ignored.
fn is_watched_file(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some(MAIN_CONFIG_FILE) | Some(EVENTS_CONFIG_FILE)
    )
}

pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<ConfigEvent>,
}

impl ConfigWatcher {
    pub fn new(config_dir: &Path) -> Result<Self> {
        let (tx, rx) = channel::<ConfigEvent>();
        let watcher = Self::setup_watcher(config_dir, tx)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    fn setup_watcher(config_dir: &Path, tx: Sender<ConfigEvent>) -> Result<RecommendedWatcher> {
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
            match result {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in event.paths.into_iter().filter(|p| is_watched_file(p)) {
                            let _ = tx.send(ConfigEvent::Changed(path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(ConfigEvent::Error(e.to_string()));
                }
            }
        })
        .map_err(|e| FliteError::Config(format!("Failed to create watcher: {}", e)))?;

        if !config_dir.exists() {
            return Err(FliteError::ConfigNotFound {
                path: config_dir.to_path_buf(),
            });
        }

        watcher
            .watch(config_dir, RecursiveMode::NonRecursive)
            .map_err(|e| FliteError::Config(format!("Failed to watch config dir: {}", e)))?;

        Ok(watcher)
    }

    pub fn poll_events(&self) -> Vec<ConfigEvent> {
        self.rx.try_iter().collect()
    }
}

/// Fallback when no native watcher is available: compares modification
/// times of the watched files at most once per interval.
pub struct TickBasedWatcher {
    config_dir: PathBuf,
    last_check: Instant,
    check_interval: Duration,
    file_mtimes: HashMap<PathBuf, SystemTime>,
}

impl TickBasedWatcher {
    pub fn new(config_dir: PathBuf, check_interval_ms: u64) -> Self {
        let mut watcher = Self {
            config_dir,
            last_check: Instant::now(),
            check_interval: Duration::from_millis(check_interval_ms),
            file_mtimes: HashMap::new(),
        };
        for (path, mtime) in watcher.scan() {
            watcher.file_mtimes.insert(path, mtime);
        }
        watcher
    }

    fn scan(&self) -> Vec<(PathBuf, SystemTime)> {
        [MAIN_CONFIG_FILE, EVENTS_CONFIG_FILE]
            .iter()
            .map(|name| self.config_dir.join(name))
            .filter_map(|path| {
                let mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
                Some((path, mtime))
            })
            .collect()
    }

    pub fn check(&mut self) -> Vec<ConfigEvent> {
        if self.last_check.elapsed() < self.check_interval {
            return Vec::new();
        }
        self.last_check = Instant::now();

        let mut events = Vec::new();
        for (path, mtime) in self.scan() {
            let changed = self
                .file_mtimes
                .get(&path)
                .map(|&old| old != mtime)
                .unwrap_or(true);

            if changed {
                self.file_mtimes.insert(path.clone(), mtime);
                events.push(ConfigEvent::Changed(path));
            }
        }
        events
    }
}

pub enum ConfigWatcherMode {
    Notify(ConfigWatcher),
    Tick(TickBasedWatcher),
}

impl ConfigWatcherMode {
    /// Prefers a native watcher and degrades to mtime polling.
    pub fn start(config_dir: &Path, fallback_interval_ms: u64) -> Self {
        match ConfigWatcher::new(config_dir) {
            Ok(watcher) => Self::Notify(watcher),
            Err(e) => {
                tracing::warn!("Config watcher unavailable, falling back to polling: {}", e);
                Self::Tick(TickBasedWatcher::new(config_dir.to_path_buf(), fallback_interval_ms))
            }
        }
    }

    pub fn poll_events(&mut self) -> Vec<ConfigEvent> {
        match self {
            Self::Notify(watcher) => watcher.poll_events(),
            Self::Tick(watcher) => watcher.check(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_watched_file() {
        assert!(is_watched_file(Path::new("/tmp/x/config.toml")));
        assert!(is_watched_file(Path::new("events.toml")));
        assert!(!is_watched_file(Path::new("theme.toml")));
        assert!(!is_watched_file(Path::new("events.toml.swp")));
    }

    #[test]
    fn test_tick_based_watcher_reports_change() {
        let temp_dir = TempDir::new().unwrap();
        let events_path = temp_dir.path().join(EVENTS_CONFIG_FILE);
        fs::write(&events_path, "container_id = \"a\"").unwrap();

        let mut watcher = TickBasedWatcher::new(temp_dir.path().to_path_buf(), 0);
        assert!(watcher.check().is_empty());

        std::thread::sleep(Duration::from_millis(20));
        fs::write(&events_path, "container_id = \"b\"\n# touched").unwrap();
        // Force a distinct mtime on filesystems with coarse timestamps.
        let later = SystemTime::now() + Duration::from_secs(5);
        fs::File::options()
            .write(true)
            .open(&events_path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let events = watcher.check();
        assert_eq!(events, vec![ConfigEvent::Changed(events_path)]);
    }

    #[test]
    fn test_tick_based_watcher_sees_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut watcher = TickBasedWatcher::new(temp_dir.path().to_path_buf(), 0);

        let main_path = temp_dir.path().join(MAIN_CONFIG_FILE);
        fs::write(&main_path, "[general]").unwrap();

        assert_eq!(watcher.check(), vec![ConfigEvent::Changed(main_path)]);
    }

    #[test]
    fn test_missing_dir_falls_back_to_tick() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent");
        let mode = ConfigWatcherMode::start(&missing, 1000);
        assert!(matches!(mode, ConfigWatcherMode::Tick(_)));
    }
}
