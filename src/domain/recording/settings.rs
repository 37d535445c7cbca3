//! Encoder settings value objects

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidValueError;

/// Default sample rate for voice memos (12kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 12_000;

/// Default channel count (mono)
pub const DEFAULT_CHANNELS: u16 = 1;

/// Container/codec of the recorded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioFormat {
    /// MPEG-4 AAC in an `.m4a` container
    #[default]
    Aac,
    /// Lossless FLAC
    Flac,
}

impl AudioFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Flac => "flac",
        }
    }

    /// File extension written for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Aac => "m4a",
            Self::Flac => "flac",
        }
    }
}

impl FromStr for AudioFormat {
    type Err = InvalidValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aac" | "m4a" => Ok(Self::Aac),
            "flac" => Ok(Self::Flac),
            _ => Err(InvalidValueError {
                kind: "format",
                input: s.to_string(),
                expected: "aac, flac",
            }),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encoder quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AudioQuality {
    Min,
    Low,
    Medium,
    #[default]
    High,
    Max,
}

impl AudioQuality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Max => "max",
        }
    }

    /// AAC bitrate in kbit/s per channel
    pub const fn aac_bitrate_kbps(&self) -> u32 {
        match self {
            Self::Min => 16,
            Self::Low => 24,
            Self::Medium => 32,
            Self::High => 48,
            Self::Max => 64,
        }
    }

    /// FLAC compression level (0 = fastest, 12 = smallest)
    pub const fn flac_compression_level(&self) -> u8 {
        match self {
            Self::Min => 0,
            Self::Low => 3,
            Self::Medium => 5,
            Self::High => 8,
            Self::Max => 12,
        }
    }
}

impl FromStr for AudioQuality {
    type Err = InvalidValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "min" => Ok(Self::Min),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "max" => Ok(Self::Max),
            _ => Err(InvalidValueError {
                kind: "quality",
                input: s.to_string(),
                expected: "min, low, medium, high, max",
            }),
        }
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encoder configuration handed to the recorder factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderSettings {
    pub format: AudioFormat,
    pub sample_rate: u32,
    pub channels: u16,
    pub quality: AudioQuality,
}

impl EncoderSettings {
    /// AAC, 12kHz, mono, high quality
    pub const fn voice_memo() -> Self {
        Self {
            format: AudioFormat::Aac,
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            quality: AudioQuality::High,
        }
    }

    /// Total AAC bitrate in kbit/s
    pub fn aac_bitrate_kbps(&self) -> u32 {
        self.quality.aac_bitrate_kbps() * u32::from(self.channels.max(1))
    }
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self::voice_memo()
    }
}

impl fmt::Display for EncoderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}Hz {}ch {}",
            self.format, self.sample_rate, self.channels, self.quality
        )
    }
}
