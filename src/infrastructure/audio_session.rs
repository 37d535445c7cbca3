//! Host audio session adapter
//!
//! Desktop hosts have no session object to configure. Activation only checks
//! that an audio host is compiled in.

use cpal::traits::HostTrait;
use tracing::debug;

use crate::application::ports::{AudioSession, AudioSessionCategory, AudioSessionError};

/// Audio session backed by the cpal default host
#[derive(Debug, Default)]
pub struct HostAudioSession;

impl HostAudioSession {
    pub fn new() -> Self {
        Self
    }
}

impl AudioSession for HostAudioSession {
    fn activate(&self, category: AudioSessionCategory) -> Result<(), AudioSessionError> {
        if cpal::available_hosts().is_empty() {
            return Err(AudioSessionError::HostUnavailable(
                "no audio host available on this platform".to_string(),
            ));
        }

        let host = cpal::default_host();
        debug!(host = host.id().name(), %category, "Audio session activated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_follows_host_availability() {
        let session = HostAudioSession::new();
        let result = session.activate(AudioSessionCategory::PlayAndRecord);
        assert_eq!(result.is_ok(), !cpal::available_hosts().is_empty());
    }

    #[test]
    fn activation_can_repeat() {
        let session = HostAudioSession::new();
        let first = session.activate(AudioSessionCategory::Record).is_ok();
        let second = session.activate(AudioSessionCategory::PlayAndRecord).is_ok();
        assert_eq!(first, second);
    }
}
