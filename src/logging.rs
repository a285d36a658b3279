use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter directives are read from this variable, `RUST_LOG` style.
pub const LOG_ENV: &str = "DEX_LOG";

pub fn log_path() -> Option<PathBuf> {
  dirs::data_local_dir().map(|d| d.join("dex").join("dex.log"))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  OpenOptions::new().create(true).append(true).open(path)
}

/// Sends `tracing` output to the log file, since the terminal belongs to the
/// UI. Logging is skipped entirely when the file can't be opened.
pub fn init() -> Option<PathBuf> {
  let path = log_path()?;
  let file = open_log_file(&path).ok()?;

  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .with_target(false)
    .try_init()
    .ok()?;

  tracing::info!("dex v{} starting", env!("CARGO_PKG_VERSION"));
  Some(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_log_path_under_data_dir() {
    if let Some(path) = log_path() {
      assert!(path.ends_with("dex/dex.log"));
    }
  }

  #[test]
  fn test_open_log_file_creates_parents() {
    let dir = std::env::temp_dir().join(format!("dex_log_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("dex.log");
    open_log_file(&path).unwrap();
    assert!(path.exists());
    let _ = fs::remove_dir_all(&dir);
  }
}
