//! Application configuration value object

use serde::{Deserialize, Serialize};

use super::options::{PermissionPolicy, RecorderBackend};
use crate::domain::recording::{
    AudioFormat, AudioQuality, EncoderSettings, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE,
};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial contents of the recording name field
    pub recording_name: Option<String>,
    /// Directory recordings are written to (defaults to the documents folder)
    pub output_dir: Option<String>,
    pub backend: Option<String>,
    pub format: Option<String>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub quality: Option<String>,
    pub permission: Option<String>,
    /// FFmpeg input as `<demuxer>:<device>`, e.g. `pulse:default`
    pub ffmpeg_input: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            recording_name: None,
            output_dir: None,
            backend: Some(RecorderBackend::default().to_string()),
            format: Some(AudioFormat::default().to_string()),
            sample_rate: Some(DEFAULT_SAMPLE_RATE),
            channels: Some(DEFAULT_CHANNELS),
            quality: Some(AudioQuality::default().to_string()),
            permission: Some(PermissionPolicy::default().to_string()),
            ffmpeg_input: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            recording_name: other.recording_name.or(self.recording_name),
            output_dir: other.output_dir.or(self.output_dir),
            backend: other.backend.or(self.backend),
            format: other.format.or(self.format),
            sample_rate: other.sample_rate.or(self.sample_rate),
            channels: other.channels.or(self.channels),
            quality: other.quality.or(self.quality),
            permission: other.permission.or(self.permission),
            ffmpeg_input: other.ffmpeg_input.or(self.ffmpeg_input),
        }
    }

    /// Get the initial recording name, or empty if not set
    pub fn recording_name_or_default(&self) -> String {
        self.recording_name.clone().unwrap_or_default()
    }

    /// Get backend as parsed RecorderBackend, or default if not set/invalid
    pub fn backend_or_default(&self) -> RecorderBackend {
        self.backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get permission policy, or default if not set/invalid
    pub fn permission_or_default(&self) -> PermissionPolicy {
        self.permission
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Build encoder settings, falling back to the voice memo preset per field
    pub fn encoder_settings(&self) -> EncoderSettings {
        let preset = EncoderSettings::voice_memo();
        EncoderSettings {
            format: self
                .format
                .as_ref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(preset.format),
            sample_rate: self
                .sample_rate
                .filter(|rate| *rate > 0)
                .unwrap_or(preset.sample_rate),
            channels: self
                .channels
                .filter(|channels| *channels > 0)
                .unwrap_or(preset.channels),
            quality: self
                .quality
                .as_ref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(preset.quality),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.recording_name.is_none());
        assert!(config.output_dir.is_none());
        assert_eq!(config.backend, Some("ffmpeg".to_string()));
        assert_eq!(config.format, Some("aac".to_string()));
        assert_eq!(config.sample_rate, Some(12_000));
        assert_eq!(config.channels, Some(1));
        assert_eq!(config.quality, Some("high".to_string()));
        assert_eq!(config.permission, Some("device".to_string()));
        assert_eq!(config.encoder_settings(), EncoderSettings::voice_memo());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.backend.is_none());
        assert!(config.format.is_none());
        assert!(config.sample_rate.is_none());
        assert!(config.ffmpeg_input.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            recording_name: Some("base".to_string()),
            format: Some("aac".to_string()),
            sample_rate: Some(12_000),
            ..Default::default()
        };

        let other = AppConfig {
            recording_name: Some("other".to_string()),
            format: None, // Should not override
            sample_rate: Some(44_100),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.recording_name, Some("other".to_string()));
        assert_eq!(merged.format, Some("aac".to_string())); // Kept from base
        assert_eq!(merged.sample_rate, Some(44_100));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig::defaults();
        let merged = base.clone().merge(AppConfig::empty());
        assert_eq!(merged, base);
    }

    #[test]
    fn encoder_settings_from_config() {
        let config = AppConfig {
            format: Some("flac".to_string()),
            sample_rate: Some(16_000),
            channels: Some(2),
            quality: Some("low".to_string()),
            ..Default::default()
        };
        let settings = config.encoder_settings();
        assert_eq!(settings.format, AudioFormat::Flac);
        assert_eq!(settings.sample_rate, 16_000);
        assert_eq!(settings.channels, 2);
        assert_eq!(settings.quality, AudioQuality::Low);
    }

    #[test]
    fn encoder_settings_ignore_invalid_values() {
        let config = AppConfig {
            format: Some("mp3".to_string()),
            sample_rate: Some(0),
            channels: Some(0),
            quality: Some("ultra".to_string()),
            ..Default::default()
        };
        assert_eq!(config.encoder_settings(), EncoderSettings::voice_memo());
    }

    #[test]
    fn selection_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.backend_or_default(), RecorderBackend::Ffmpeg);
        assert_eq!(config.permission_or_default(), PermissionPolicy::Device);
        assert_eq!(config.recording_name_or_default(), "");
    }

    #[test]
    fn selection_parses_configured_values() {
        let config = AppConfig {
            backend: Some("cpal".to_string()),
            permission: Some("always".to_string()),
            ..Default::default()
        };
        assert_eq!(config.backend_or_default(), RecorderBackend::Cpal);
        assert_eq!(config.permission_or_default(), PermissionPolicy::Always);
    }
}
