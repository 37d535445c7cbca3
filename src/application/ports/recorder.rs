//! Recorder port interfaces

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{AudioFormat, EncoderSettings};

/// Recorder errors
#[derive(Debug, Clone, Error)]
pub enum RecorderError {
    #[error("Format '{format}' is not supported by the {backend} recorder")]
    UnsupportedFormat {
        format: AudioFormat,
        backend: &'static str,
    },

    #[error("Invalid encoder settings: {0}")]
    InvalidSettings(String),

    #[error("No audio input device available")]
    NoInputDevice,

    #[error("Cannot write to {path}: {reason}")]
    StorageUnavailable { path: String, reason: String },

    #[error("FFmpeg not found. Please install ffmpeg.")]
    FfmpegNotFound,

    #[error("Failed to create recorder: {0}")]
    CreationFailed(String),

    #[error("Failed to start recording: {0}")]
    StartFailed(String),
}

/// Receives the outcome of a capture once the recorder has finished with the file.
///
/// May be called from any thread. `success` is false for every kind of failure.
pub trait RecordingFinishedObserver: Send + Sync {
    fn finished(&self, success: bool);
}

/// Handle on one recorder bound to one output file
pub trait AudioRecorder: Send {
    /// Register the observer notified when capture ends
    fn set_finished_observer(&mut self, observer: Arc<dyn RecordingFinishedObserver>);

    /// Begin capturing into the bound file
    fn record(&mut self) -> Result<(), RecorderError>;

    /// Stop capturing. Finalization may continue in the background and is
    /// reported through the observer.
    fn stop(&mut self);

    /// Check if currently capturing
    fn is_recording(&self) -> bool;

    /// The bound output file
    fn path(&self) -> &Path;
}

/// Port for creating recorders
#[async_trait]
pub trait RecorderFactory: Send + Sync {
    /// Create a recorder bound to `path` with the given encoder settings.
    ///
    /// # Returns
    /// A recorder handle, not yet capturing, or the reason it cannot record
    fn create(
        &self,
        path: &Path,
        settings: &EncoderSettings,
    ) -> Result<Box<dyn AudioRecorder>, RecorderError>;

    /// Wait until every stopped recorder has finished writing its file
    async fn flush(&self);
}
