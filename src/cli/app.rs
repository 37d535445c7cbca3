//! Main app runner for the recording page

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::ConfigStore;
use crate::application::{ControllerConfig, PageDispatcher, RecordingController};
use crate::domain::config::{AppConfig, PermissionPolicy, RecorderBackend};
use crate::domain::error::InvalidValueError;
use crate::domain::recording::{AudioFormat, AudioQuality, RecorderState};
use crate::infrastructure::{
    create_permission, create_recorder_factory, documents_dir, FfmpegInput, HostAudioSession,
    LoggingFinishedObserver, TracingDiagnostics, XdgConfigStore,
};

use super::page::{render_page, run_page_loop, spawn_stdin_reader, TerminalView};
use super::presenter::Presenter;
use super::signals::install_shutdown_handlers;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Config store at `path`, or the XDG default
pub fn config_store(path: Option<&Path>) -> XdgConfigStore {
    match path {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    }
}

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "Ignoring config file");
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Reject values that would otherwise fall back to defaults silently
pub fn validate_config(config: &AppConfig) -> Result<(), InvalidValueError> {
    let backend = match &config.backend {
        Some(backend) => Some(backend.parse::<RecorderBackend>()?),
        None => None,
    };
    let format = match &config.format {
        Some(format) => Some(format.parse::<AudioFormat>()?),
        None => None,
    };
    if let Some(quality) = &config.quality {
        quality.parse::<AudioQuality>()?;
    }
    if let Some(permission) = &config.permission {
        permission.parse::<PermissionPolicy>()?;
    }
    if let Some(input) = &config.ffmpeg_input {
        input.parse::<FfmpegInput>()?;
    }
    if config.sample_rate == Some(0) {
        return Err(InvalidValueError {
            kind: "sample rate",
            input: "0".to_string(),
            expected: "a positive number of Hz",
        });
    }
    if config.channels == Some(0) {
        return Err(InvalidValueError {
            kind: "channel count",
            input: "0".to_string(),
            expected: "a positive number",
        });
    }

    // The cpal recorder only writes mono FLAC
    if backend == Some(RecorderBackend::Cpal) {
        let format = format.unwrap_or_default();
        let channels = config.channels.unwrap_or(1);
        if format != AudioFormat::Flac || channels != 1 {
            return Err(InvalidValueError {
                kind: "backend",
                input: format!("cpal with format {} and {} channel(s)", format, channels),
                expected: "ffmpeg, or cpal with format flac and 1 channel",
            });
        }
    }
    Ok(())
}

/// Run the interactive recording page until quit, EOF or a shutdown signal
pub async fn run_page(config: AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let input = match config.ffmpeg_input.as_deref() {
        Some(value) => match value.parse::<FfmpegInput>() {
            Ok(input) => input,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => FfmpegInput::platform_default(),
    };

    let settings = config.encoder_settings();
    let backend = config.backend_or_default();
    let documents = documents_dir(config.output_dir.as_deref().map(Path::new));
    if !documents.is_dir() {
        presenter.warn(&format!(
            "Output directory {} does not exist; recordings will fail",
            documents.display()
        ));
    }

    let (dispatcher, mut events) = PageDispatcher::channel();
    if let Err(e) = install_shutdown_handlers(&dispatcher) {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let diagnostics = TracingDiagnostics;
    let mut controller = RecordingController::new(
        create_permission(config.permission_or_default()),
        HostAudioSession::new(),
        create_recorder_factory(backend, input.clone()),
        TerminalView::new(config.recording_name_or_default()),
        diagnostics,
        Arc::new(LoggingFinishedObserver::new(diagnostics)),
        dispatcher.clone(),
        ControllerConfig {
            documents_dir: documents,
            settings,
        },
    );

    info!(
        %backend,
        settings = %controller.settings(),
        ffmpeg_input = %input,
        permission = %config.permission_or_default(),
        "Recording page ready"
    );
    render_page(&controller, &presenter);

    if let Err(e) = spawn_stdin_reader(dispatcher) {
        presenter.error(&format!("Failed to read input: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    run_page_loop(&mut controller, &mut events, &presenter).await;

    let was_recording = controller.state() == RecorderState::Recording;
    presenter.start_spinner("Finishing recording...");
    controller.shutdown().await;
    if was_recording {
        presenter.spinner_success("Recording saved");
    } else {
        presenter.stop_spinner();
    }

    ExitCode::from(EXIT_SUCCESS)
}
