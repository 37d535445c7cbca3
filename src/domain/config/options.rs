//! Adapter selection value objects

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidValueError;

/// Which recorder implementation captures audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderBackend {
    /// FFmpeg child process (AAC and FLAC)
    #[default]
    Ffmpeg,
    /// In-process cpal capture (FLAC only)
    Cpal,
}

impl RecorderBackend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ffmpeg => "ffmpeg",
            Self::Cpal => "cpal",
        }
    }
}

impl FromStr for RecorderBackend {
    type Err = InvalidValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ffmpeg" => Ok(Self::Ffmpeg),
            "cpal" => Ok(Self::Cpal),
            _ => Err(InvalidValueError {
                kind: "backend",
                input: s.to_string(),
                expected: "ffmpeg, cpal",
            }),
        }
    }
}

impl fmt::Display for RecorderBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How microphone permission is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionPolicy {
    /// Granted when the host exposes a default input device
    #[default]
    Device,
    /// Always granted
    Always,
}

impl PermissionPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Always => "always",
        }
    }
}

impl FromStr for PermissionPolicy {
    type Err = InvalidValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "device" => Ok(Self::Device),
            "always" => Ok(Self::Always),
            _ => Err(InvalidValueError {
                kind: "permission",
                input: s.to_string(),
                expected: "device, always",
            }),
        }
    }
}

impl fmt::Display for PermissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
