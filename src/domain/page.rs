//! Page value objects: the toggle label and the status log

use std::fmt;

/// Label of the record/stop toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonLabel {
    #[default]
    StartRecording,
    StopRecording,
}

impl ButtonLabel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StartRecording => "Start Recording",
            Self::StopRecording => "Stop Recording",
        }
    }
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only list of status lines shown to the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLog {
    lines: Vec<String>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.lines.push(message.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.lines.iter().any(|line| line == message)
    }

    /// Text-area rendering: every line followed by a newline
    pub fn text(&self) -> String {
        self.lines.iter().map(|line| format!("{}\n", line)).collect()
    }
}
