//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod page;
pub mod recording;

// Re-export common types
pub use config::{AppConfig, PermissionPolicy, RecorderBackend};
pub use error::*;
pub use page::{ButtonLabel, StatusLog};
pub use recording::{
    resolve_file_path, AudioFormat, AudioQuality, EncoderSettings, RecorderState,
    RecordingSession,
};
