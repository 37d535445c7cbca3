//! AudioGalaxy - record the microphone to a file from a terminal page
//!
//! A single interactive page with a recording name field, a record/stop
//! toggle and a status log. Toggling requests microphone permission, then
//! starts a recorder writing an AAC (`.m4a`) or FLAC file to the documents
//! directory.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Recording session state, encoder settings, file naming, config
//! - **Application**: The recording controller, the page event queue and port traits
//! - **Infrastructure**: Adapter implementations (FFmpeg, cpal, permission probe, XDG config)
//! - **CLI**: Argument parsing, the terminal page loop and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
