//! Recording infrastructure module
//!
//! Two recorder backends: an FFmpeg child process (AAC or FLAC) and an
//! in-process cpal capture that writes FLAC.

mod cpal_recorder;
mod ffmpeg;
mod flac_encoder;
mod pending;

use std::path::Path;

use async_trait::async_trait;

pub use cpal_recorder::{CpalRecorder, CpalRecorderFactory};
pub use ffmpeg::{FfmpegInput, FfmpegRecorder, FfmpegRecorderFactory};
pub use flac_encoder::{encode_to_flac, EncodingError};
pub use pending::{PendingGuard, PendingWrites};

use crate::application::ports::{AudioRecorder, RecorderError, RecorderFactory};
use crate::domain::config::RecorderBackend;
use crate::domain::recording::EncoderSettings;

/// Create the recorder factory for the selected backend
pub fn create_recorder_factory(
    backend: RecorderBackend,
    input: FfmpegInput,
) -> Box<dyn RecorderFactory> {
    match backend {
        RecorderBackend::Ffmpeg => Box::new(FfmpegRecorderFactory::new(input)),
        RecorderBackend::Cpal => Box::new(CpalRecorderFactory::new()),
    }
}

#[async_trait]
impl RecorderFactory for Box<dyn RecorderFactory> {
    fn create(
        &self,
        path: &Path,
        settings: &EncoderSettings,
    ) -> Result<Box<dyn AudioRecorder>, RecorderError> {
        (**self).create(path, settings)
    }

    async fn flush(&self) {
        (**self).flush().await
    }
}

/// The output file's directory must already exist
pub(crate) fn ensure_output_dir(path: &Path) -> Result<(), RecorderError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if parent.is_dir() {
        Ok(())
    } else {
        Err(RecorderError::StorageUnavailable {
            path: path.display().to_string(),
            reason: format!("directory {} does not exist", parent.display()),
        })
    }
}
