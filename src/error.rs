//! Error types.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A single detection could not be used. The rest of its frame is still processed.
    #[error("malformed detection in frame {frame_id}: {reason}")]
    MalformedDetection { frame_id: u64, reason: String },

    /// No zone was configured. Fatal at startup.
    #[error("no zone configured; at least one zone rectangle is required")]
    MissingZoneConfiguration,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(frame_id: u64, reason: impl Into<String>) -> Self {
        Self::MalformedDetection {
            frame_id,
            reason: reason.into(),
        }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
