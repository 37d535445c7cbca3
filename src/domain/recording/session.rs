//! Recording session state machine

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Toggle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    AwaitingPermission,
    Recording,
}

impl RecorderState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingPermission => "awaiting-permission",
            Self::Recording => "recording",
        }
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: RecorderState,
    pub action: String,
}

/// One start-to-stop recording attempt.
///
/// State machine:
///   IDLE -> AWAITING_PERMISSION (request_permission)
///   AWAITING_PERMISSION -> RECORDING (start_recording)
///   AWAITING_PERMISSION -> IDLE (abandon)
///   RECORDING -> IDLE (stop_recording)
///
/// The target path is fixed when the permission request is issued and
/// discarded when the session returns to idle.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: RecorderState,
    file_path: Option<PathBuf>,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Target file of the current attempt, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_awaiting_permission(&self) -> bool {
        self.state == RecorderState::AwaitingPermission
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Transition from IDLE to AWAITING_PERMISSION, binding the target path
    pub fn request_permission(&mut self, file_path: PathBuf) -> Result<(), InvalidStateTransition> {
        self.expect(RecorderState::Idle, "request permission")?;
        self.state = RecorderState::AwaitingPermission;
        self.file_path = Some(file_path);
        Ok(())
    }

    /// Transition from AWAITING_PERMISSION to RECORDING
    pub fn start_recording(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect(RecorderState::AwaitingPermission, "start recording")?;
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// Transition from AWAITING_PERMISSION back to IDLE (denied or failed to start)
    pub fn abandon(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect(RecorderState::AwaitingPermission, "abandon")?;
        self.reset();
        Ok(())
    }

    /// Transition from RECORDING to IDLE
    pub fn stop_recording(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect(RecorderState::Recording, "stop recording")?;
        self.reset();
        Ok(())
    }

    fn expect(&self, state: RecorderState, action: &str) -> Result<(), InvalidStateTransition> {
        if self.state != state {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.state = RecorderState::Idle;
        self.file_path = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> PathBuf {
        PathBuf::from("/docs/MyAudioCat.m4a")
    }

    #[test]
    fn new_session_is_idle() {
        let session = RecordingSession::new();
        assert_eq!(session.state(), RecorderState::Idle);
        assert!(!session.is_awaiting_permission());
        assert!(!session.is_recording());
        assert!(session.file_path().is_none());
    }

    #[test]
    fn request_permission_binds_path() {
        let mut session = RecordingSession::new();
        session.request_permission(path()).unwrap();
        assert!(session.is_awaiting_permission());
        assert_eq!(session.file_path(), Some(path().as_path()));
    }

    #[test]
    fn request_permission_twice_fails() {
        let mut session = RecordingSession::new();
        session.request_permission(path()).unwrap();

        let err = session.request_permission(path()).unwrap_err();
        assert_eq!(err.current_state, RecorderState::AwaitingPermission);
        assert!(err.action.contains("request permission"));
    }

    #[test]
    fn start_recording_keeps_path() {
        let mut session = RecordingSession::new();
        session.request_permission(path()).unwrap();
        session.start_recording().unwrap();
        assert!(session.is_recording());
        assert_eq!(session.file_path(), Some(path().as_path()));
    }

    #[test]
    fn start_recording_from_idle_fails() {
        let mut session = RecordingSession::new();
        let err = session.start_recording().unwrap_err();
        assert_eq!(err.current_state, RecorderState::Idle);
    }

    #[test]
    fn abandon_returns_to_idle_and_clears_path() {
        let mut session = RecordingSession::new();
        session.request_permission(path()).unwrap();
        session.abandon().unwrap();
        assert_eq!(session.state(), RecorderState::Idle);
        assert!(session.file_path().is_none());
    }

    #[test]
    fn abandon_while_recording_fails() {
        let mut session = RecordingSession::new();
        session.request_permission(path()).unwrap();
        session.start_recording().unwrap();

        let err = session.abandon().unwrap_err();
        assert_eq!(err.current_state, RecorderState::Recording);
    }

    #[test]
    fn stop_recording_from_idle_fails() {
        let mut session = RecordingSession::new();
        let err = session.stop_recording().unwrap_err();
        assert_eq!(err.current_state, RecorderState::Idle);
    }

    #[test]
    fn full_cycle() {
        let mut session = RecordingSession::new();

        session.request_permission(path()).unwrap();
        session.start_recording().unwrap();
        session.stop_recording().unwrap();
        assert_eq!(session.state(), RecorderState::Idle);
        assert!(session.file_path().is_none());

        // Can start another cycle with a different target
        session
            .request_permission(PathBuf::from("/docs/Interview1.m4a"))
            .unwrap();
        assert!(session.is_awaiting_permission());
    }

    #[test]
    fn state_display() {
        assert_eq!(RecorderState::Idle.to_string(), "idle");
        assert_eq!(
            RecorderState::AwaitingPermission.to_string(),
            "awaiting-permission"
        );
        assert_eq!(RecorderState::Recording.to_string(), "recording");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: RecorderState::Recording,
            action: "request permission".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("request permission"));
        assert!(msg.contains("recording"));
    }
}
