//! Error types for studycat-core.
//!
//! Engine operations never fail with these; they report rejections through
//! [`crate::ops::OpStatus`]. The hierarchy below is used by the fallible
//! edges of the library: configuration, snapshot storage and input parsing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON that does not decode into an `AppState`.
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Failures of the SQLite snapshot database.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("cannot open snapshot database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Another process holds the write lock.
    #[error("snapshot database is busy")]
    Busy,

    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("cannot write {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("bad value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("no such config key: {0}")]
    UnknownKey(String),

    #[error("toml: {0}")]
    Toml(String),
}

/// Why an operation was refused.
///
/// Returned inside [`crate::ops::OpStatus::Rejected`] when an operation's
/// precondition does not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task name must not be empty")]
    EmptyTaskName,

    #[error("priority {0} is out of range (expected 1-5)")]
    PriorityOutOfRange(u8),

    #[error("study minutes must be greater than zero")]
    ZeroMinutes,

    #[error("not enough catcoins: need {needed}, have {available}")]
    InsufficientCatcoins { needed: u64, available: u64 },

    #[error("accessory '{0}' is already owned")]
    AlreadyOwned(String),

    /// Unrecognized badge id, shop item or chart period.
    #[error("unknown {kind}: '{value}'")]
    Unknown { kind: &'static str, value: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                StorageError::Busy
            }
            _ => StorageError::Sqlite(err),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(ConfigError::Toml(err.to_string()))
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Config(ConfigError::Toml(err.to_string()))
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
