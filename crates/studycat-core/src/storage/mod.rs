mod config;
pub mod database;
pub mod snapshot;

pub use config::{BadgesConfig, Config, SessionConfig, StorageConfig};
pub use database::Database;
pub use snapshot::{MemorySnapshotStore, SnapshotStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/studycat[-dev]/` based on STUDYCAT_ENV.
///
/// Set STUDYCAT_ENV=dev to use development data directory.
/// STUDYCAT_DATA_DIR overrides the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("STUDYCAT_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYCAT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studycat-dev")
            } else {
                base_dir.join("studycat")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
