use thiserror::Error;

/// Failure reported by a key-value backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the pause engine
#[derive(Debug, Error)]
pub enum PauseError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read '{key}': {reason}")]
    StorageRead { key: String, reason: String },

    #[error("failed to write '{key}': {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("a break is already running")]
    AlreadyRunning,

    #[error("no break is running")]
    NotRunning,
}

impl PauseError {
    pub fn read(key: &str, reason: impl ToString) -> Self {
        Self::StorageRead {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write(key: &str, reason: impl ToString) -> Self {
        Self::StorageWrite {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type PauseResult<T> = Result<T, PauseError>;
