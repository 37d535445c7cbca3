//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_session;
pub mod config;
pub mod diagnostics;
pub mod permission;
pub mod recorder;
pub mod view;

// Re-export common types
pub use audio_session::{AudioSession, AudioSessionCategory, AudioSessionError};
pub use config::ConfigStore;
pub use diagnostics::Diagnostics;
pub use permission::{MicPermission, PermissionCallback};
pub use recorder::{AudioRecorder, RecorderError, RecorderFactory, RecordingFinishedObserver};
pub use view::RecordingView;
