//! Recording domain module

mod file_path;
mod session;
mod settings;

pub use file_path::{resolve_file_path, DEFAULT_RECORDING_NAME};
pub use session::{InvalidStateTransition, RecorderState, RecordingSession};
pub use settings::{
    AudioFormat, AudioQuality, EncoderSettings, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE,
};
