//! FFmpeg-based recorder adapter

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::ensure_output_dir;
use super::pending::{PendingGuard, PendingWrites};
use crate::application::ports::{
    AudioRecorder, RecorderError, RecorderFactory, RecordingFinishedObserver,
};
use crate::domain::error::InvalidValueError;
use crate::domain::recording::{AudioFormat, EncoderSettings};

/// Time FFmpeg gets to finalize the container after a stop request
const STOP_GRACE: Duration = Duration::from_secs(5);

/// Exit code FFmpeg uses when it was interrupted by a signal
const INTERRUPTED_EXIT_CODE: i32 = 255;

/// Capture source passed to FFmpeg as `-f <demuxer> -i <device>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegInput {
    demuxer: String,
    device: String,
}

impl FfmpegInput {
    pub fn new(demuxer: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            demuxer: demuxer.into(),
            device: device.into(),
        }
    }

    /// Default microphone source for the current platform
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("avfoundation", ":0")
        } else if cfg!(windows) {
            Self::new("dshow", "audio=Microphone")
        } else {
            Self::new("pulse", "default")
        }
    }

    pub fn demuxer(&self) -> &str {
        &self.demuxer
    }

    pub fn device(&self) -> &str {
        &self.device
    }
}

impl Default for FfmpegInput {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl FromStr for FfmpegInput {
    type Err = InvalidValueError;

    /// Parse `<demuxer>:<device>`; the device may itself contain colons
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once(':') {
            Some((demuxer, device)) if !demuxer.is_empty() && !device.is_empty() => {
                Ok(Self::new(demuxer, device))
            }
            _ => Err(InvalidValueError {
                kind: "ffmpeg input",
                input: s.to_string(),
                expected: "<demuxer>:<device>, e.g. pulse:default or avfoundation::0",
            }),
        }
    }
}

impl fmt::Display for FfmpegInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.demuxer, self.device)
    }
}

/// Build FFmpeg args for recording into `output_path`
fn build_ffmpeg_args(
    input: &FfmpegInput,
    output_path: &Path,
    settings: &EncoderSettings,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-hide_banner".into(),
        "-nostats".into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        input.demuxer().into(),
        "-i".into(),
        input.device().into(),
        "-ar".into(),
        settings.sample_rate.to_string(),
        "-ac".into(),
        settings.channels.to_string(),
    ];

    match settings.format {
        AudioFormat::Aac => args.extend([
            "-c:a".into(),
            "aac".into(),
            "-b:a".into(),
            format!("{}k", settings.aac_bitrate_kbps()),
        ]),
        AudioFormat::Flac => args.extend([
            "-c:a".into(),
            "flac".into(),
            "-compression_level".into(),
            settings.quality.flac_compression_level().to_string(),
        ]),
    }

    // Overwrite an existing file with the same name
    args.push("-y".into());
    args.push(output_path.to_string_lossy().to_string());

    args
}

/// Creates FFmpeg child-process recorders
pub struct FfmpegRecorderFactory {
    input: FfmpegInput,
    pending: PendingWrites,
}

impl FfmpegRecorderFactory {
    pub fn new(input: FfmpegInput) -> Self {
        Self {
            input,
            pending: PendingWrites::new(),
        }
    }
}

impl Default for FfmpegRecorderFactory {
    fn default() -> Self {
        Self::new(FfmpegInput::platform_default())
    }
}

#[async_trait]
impl RecorderFactory for FfmpegRecorderFactory {
    fn create(
        &self,
        path: &Path,
        settings: &EncoderSettings,
    ) -> Result<Box<dyn AudioRecorder>, RecorderError> {
        if settings.sample_rate == 0 || settings.channels == 0 {
            return Err(RecorderError::InvalidSettings(format!(
                "sample rate and channel count must be positive (got {})",
                settings
            )));
        }
        ensure_output_dir(path)?;

        let args = build_ffmpeg_args(&self.input, path, settings);
        debug!(args = ?args, "Prepared ffmpeg recorder");

        Ok(Box::new(FfmpegRecorder {
            path: path.to_path_buf(),
            args,
            observer: None,
            running: Arc::new(AtomicBool::new(false)),
            stop_tx: None,
            pending: self.pending.clone(),
        }))
    }

    async fn flush(&self) {
        self.pending.wait_idle().await;
    }
}

/// One FFmpeg capture bound to one output file
pub struct FfmpegRecorder {
    path: PathBuf,
    args: Vec<String>,
    observer: Option<Arc<dyn RecordingFinishedObserver>>,
    running: Arc<AtomicBool>,
    stop_tx: Option<oneshot::Sender<()>>,
    pending: PendingWrites,
}

impl FfmpegRecorder {
    /// Spawn FFmpeg process
    fn spawn_ffmpeg(args: &[String]) -> Result<Child, RecorderError> {
        Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RecorderError::FfmpegNotFound
                } else {
                    RecorderError::StartFailed(e.to_string())
                }
            })
    }

    /// Ask FFmpeg to finish the file: `q` on stdin, SIGINT as fallback
    async fn request_stop(child: &mut Child) {
        if let Some(mut stdin) = child.stdin.take() {
            if stdin.write_all(b"q").await.is_ok() && stdin.flush().await.is_ok() {
                return;
            }
        }

        #[cfg(unix)]
        if let Some(id) = child.id() {
            use nix::sys::signal::{self, Signal};
            use nix::unistd::Pid;

            if let Err(e) = signal::kill(Pid::from_raw(id as i32), Signal::SIGINT) {
                warn!(error = %e, "Failed to signal ffmpeg");
            }
            return;
        }

        let _ = child.start_kill();
    }

    /// Owns the child until it exits, then reports to the observer
    async fn supervise(
        mut child: Child,
        stop_rx: oneshot::Receiver<()>,
        running: Arc<AtomicBool>,
        observer: Option<Arc<dyn RecordingFinishedObserver>>,
        _guard: PendingGuard,
    ) {
        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf).await;
                buf
            })
        });

        // A dropped sender counts as a stop request
        let exited_early = tokio::select! {
            status = child.wait() => Some(status),
            _ = stop_rx => None,
        };
        let stopped_on_request = exited_early.is_none();

        let status = match exited_early {
            Some(status) => status,
            None => {
                Self::request_stop(&mut child).await;
                match timeout(STOP_GRACE, child.wait()).await {
                    Ok(status) => status,
                    Err(_) => {
                        warn!("ffmpeg did not finish within {:?}, killing it", STOP_GRACE);
                        let _ = child.kill().await;
                        child.wait().await
                    }
                }
            }
        };
        running.store(false, Ordering::SeqCst);

        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        let success = match &status {
            Ok(status) => exit_is_success(status, stopped_on_request),
            Err(e) => {
                warn!(error = %e, "Failed to wait for ffmpeg");
                false
            }
        };

        if !success {
            warn!(
                stopped_on_request,
                "ffmpeg exited with error: {}",
                stderr.lines().last().unwrap_or("unknown error")
            );
        }

        if let Some(observer) = observer {
            observer.finished(success);
        }
    }
}

fn exit_is_success(status: &ExitStatus, stopped_on_request: bool) -> bool {
    status.success() || (stopped_on_request && status.code() == Some(INTERRUPTED_EXIT_CODE))
}

impl AudioRecorder for FfmpegRecorder {
    fn set_finished_observer(&mut self, observer: Arc<dyn RecordingFinishedObserver>) {
        self.observer = Some(observer);
    }

    fn record(&mut self) -> Result<(), RecorderError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(RecorderError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        let handle = Handle::try_current()
            .map_err(|e| RecorderError::StartFailed(format!("No async runtime: {}", e)))?;

        let child = Self::spawn_ffmpeg(&self.args)?;
        let (stop_tx, stop_rx) = oneshot::channel();

        self.running.store(true, Ordering::SeqCst);
        handle.spawn(Self::supervise(
            child,
            stop_rx,
            Arc::clone(&self.running),
            self.observer.clone(),
            self.pending.begin(),
        ));
        self.stop_tx = Some(stop_tx);

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }

    fn is_recording(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
