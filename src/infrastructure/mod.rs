//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio host, FFmpeg and the config directory.

pub mod audio_session;
pub mod config;
pub mod diagnostics;
pub mod permission;
pub mod recording;
pub mod storage;

// Re-export adapters
pub use audio_session::HostAudioSession;
pub use config::XdgConfigStore;
pub use diagnostics::{LoggingFinishedObserver, TracingDiagnostics};
pub use permission::{create_permission, AlwaysGrantPermission, DevicePermission};
pub use recording::{
    create_recorder_factory, CpalRecorderFactory, FfmpegInput, FfmpegRecorderFactory,
};
pub use storage::documents_dir;
