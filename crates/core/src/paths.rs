//! Centralized path functions for all app storage locations.

use std::path::PathBuf;

const APP_DIR: &str = "liftlog";

/// App cache root: `~/Library/Caches/liftlog/` (macOS) or `~/.cache/liftlog/` (Linux).
pub fn app_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(APP_DIR))
}

/// SQLite database file: `<app_cache_dir>/liftlog.db`.
pub fn db_path() -> Option<PathBuf> {
    app_cache_dir().map(|d| d.join("liftlog.db"))
}

/// Rolling log files: `<app_cache_dir>/logs/`.
pub fn log_dir() -> Option<PathBuf> {
    app_cache_dir().map(|d| d.join("logs"))
}

/// Default config file: `<config_dir>/liftlog/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_live_under_app_dir() {
        if let Some(cache) = app_cache_dir() {
            assert!(cache.ends_with("liftlog"));
            assert_eq!(db_path().unwrap(), cache.join("liftlog.db"));
            assert_eq!(log_dir().unwrap(), cache.join("logs"));
        }
        if let Some(config) = config_path() {
            assert!(config.ends_with("liftlog/config.toml"));
        }
    }
}
