use chrono::Local;
use std::fs::{create_dir_all, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_LEVEL_ENV;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("org-cli")
        .join("logs")
}

/// Send tracing output to a fresh timestamped file under the cache dir.
///
/// Terminal output stays reserved for command results. The level comes from
/// `ORG_LOG` (an `EnvFilter` directive), defaulting to `info`.
pub fn init_logging() -> Result<PathBuf, Box<dyn std::error::Error>> {
    init_logging_in(&log_dir())
}

pub fn init_logging_in(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    create_dir_all(dir)?;

    let log_file = dir.join(format!("org-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
    let file = OpenOptions::new().create(true).append(true).open(&log_file)?;

    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    if let Ok(mut slot) = LOG_FILE.lock() {
        *slot = Some(log_file.clone());
    }
    tracing::info!(path = %log_file.display(), "logging initialized");

    Ok(log_file)
}

/// Record panics in the log before the default hook prints them.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };

        tracing::error!(%location, "PANIC: {}", payload);
        default_hook(info);
    }));
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|path| path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_logging_creates_log_file() {
        let dir = TempDir::new().unwrap();
        let path = init_logging_in(&dir.path().join("logs")).unwrap();

        assert!(path.exists());
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("org-") && n.ends_with(".log")));
        assert_eq!(get_log_file_path(), Some(path));
    }
}
