//! Application layer - Use cases and port interfaces
//!
//! Contains the recording controller, the page event queue and the
//! trait definitions for external system interactions.

pub mod controller;
pub mod dispatch;
pub mod ports;

// Re-export use cases
pub use controller::{ControllerConfig, RecordingController};
pub use dispatch::{PageDispatcher, PageEvent};
