//! Audio session port

use std::fmt;

use thiserror::Error;

/// What the session is activated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSessionCategory {
    Record,
    PlayAndRecord,
}

impl AudioSessionCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::PlayAndRecord => "play-and-record",
        }
    }
}

impl fmt::Display for AudioSessionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audio session errors
#[derive(Debug, Clone, Error)]
pub enum AudioSessionError {
    #[error("Audio host unavailable: {0}")]
    HostUnavailable(String),

    #[error("Category '{0}' not supported by this host")]
    UnsupportedCategory(AudioSessionCategory),
}

/// Port for the platform audio session
pub trait AudioSession: Send + Sync {
    /// Activate the session for the given category
    fn activate(&self, category: AudioSessionCategory) -> Result<(), AudioSessionError>;
}
