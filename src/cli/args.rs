//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::config::AppConfig;

/// AudioGalaxy - record the microphone to a file in your documents folder
#[derive(Parser, Debug)]
#[command(name = "audio-galaxy")]
#[command(version)]
#[command(about = "Record the microphone to an AAC (.m4a) file from the terminal")]
#[command(long_about = None)]
pub struct Cli {
    /// Initial recording name (file name without extension)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Directory recordings are written to (default: documents folder)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Recorder backend (ffmpeg, cpal)
    #[arg(short = 'b', long, value_name = "BACKEND")]
    pub backend: Option<String>,

    /// Output format (aac, flac)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Sample rate in Hz
    #[arg(long, value_name = "HZ")]
    pub sample_rate: Option<u32>,

    /// Encoder quality (min, low, medium, high, max)
    #[arg(short = 'q', long, value_name = "QUALITY")]
    pub quality: Option<String>,

    /// Microphone permission policy (device, always)
    #[arg(long, value_name = "POLICY")]
    pub permission: Option<String>,

    /// Config file to use instead of the XDG location
    #[arg(long, value_name = "PATH", env = "AUDIO_GALAXY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config layer built from command-line overrides
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            recording_name: self.name.clone(),
            output_dir: self
                .output_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().to_string()),
            backend: self.backend.clone(),
            format: self.format.clone(),
            sample_rate: self.sample_rate,
            quality: self.quality.clone(),
            permission: self.permission.clone(),
            ..Default::default()
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "recording_name",
    "output_dir",
    "backend",
    "format",
    "sample_rate",
    "channels",
    "quality",
    "permission",
    "ffmpeg_input",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["audio-galaxy"]);
        assert!(cli.name.is_none());
        assert!(cli.output_dir.is_none());
        assert!(cli.backend.is_none());
        assert!(cli.format.is_none());
        assert!(cli.sample_rate.is_none());
        assert!(cli.command.is_none());
        assert_eq!(cli.to_config(), AppConfig::empty());
    }

    #[test]
    fn cli_parses_recording_options() {
        let cli = Cli::parse_from([
            "audio-galaxy",
            "-n",
            "Interview1",
            "-o",
            "/tmp/rec",
            "--backend",
            "cpal",
            "--format",
            "flac",
            "--sample-rate",
            "16000",
            "-q",
            "max",
            "--permission",
            "always",
        ]);

        let config = cli.to_config();
        assert_eq!(config.recording_name, Some("Interview1".to_string()));
        assert_eq!(config.output_dir, Some("/tmp/rec".to_string()));
        assert_eq!(config.backend, Some("cpal".to_string()));
        assert_eq!(config.format, Some("flac".to_string()));
        assert_eq!(config.sample_rate, Some(16_000));
        assert_eq!(config.quality, Some("max".to_string()));
        assert_eq!(config.permission, Some("always".to_string()));
        assert!(config.channels.is_none());
    }

    #[test]
    fn cli_parses_config_path_option() {
        let cli = Cli::parse_from(["audio-galaxy", "--config", "/tmp/ag.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ag.toml")));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["audio-galaxy", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["audio-galaxy", "config", "set", "format", "flac"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "format");
            assert_eq!(value, "flac");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_rejects_non_numeric_sample_rate() {
        let result = Cli::try_parse_from(["audio-galaxy", "--sample-rate", "fast"]);
        assert!(result.is_err());
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("recording_name"));
        assert!(is_valid_config_key("ffmpeg_input"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
