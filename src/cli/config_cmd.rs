//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, PermissionPolicy, RecorderBackend};
use crate::domain::error::ConfigError;
use crate::domain::recording::{AudioFormat, AudioQuality};
use crate::infrastructure::FfmpegInput;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(&config_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &config_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "recording_name" => config.recording_name = Some(value.to_string()),
        "output_dir" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
            config.output_dir = Some(value.to_string());
        }
        "backend" => {
            let backend: RecorderBackend = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.backend = Some(backend.to_string());
        }
        "format" => {
            let format: AudioFormat = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.format = Some(format.to_string());
        }
        "sample_rate" => {
            config.sample_rate = Some(parse_positive::<u32>(value).map_err(invalid)?);
        }
        "channels" => {
            config.channels = Some(parse_positive::<u16>(value).map_err(invalid)?);
        }
        "quality" => {
            let quality: AudioQuality = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.quality = Some(quality.to_string());
        }
        "permission" => {
            let policy: PermissionPolicy = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.permission = Some(policy.to_string());
        }
        "ffmpeg_input" => {
            let input: FfmpegInput = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.ffmpeg_input = Some(input.to_string());
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }

    Ok(())
}

fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "recording_name" => config.recording_name.clone(),
        "output_dir" => config.output_dir.clone(),
        "backend" => config.backend.clone(),
        "format" => config.format.clone(),
        "sample_rate" => config.sample_rate.map(|v| v.to_string()),
        "channels" => config.channels.map(|v| v.to_string()),
        "quality" => config.quality.clone(),
        "permission" => config.permission.clone(),
        "ffmpeg_input" => config.ffmpeg_input.clone(),
        _ => None,
    }
}

/// Parse a strictly positive integer
fn parse_positive<T>(value: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(format!("Invalid value '{}'. Expected a positive integer", value)),
    }
}
