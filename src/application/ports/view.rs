//! Page view port

use crate::domain::page::ButtonLabel;

/// The UI surface the controller reads from and writes to.
/// Only ever touched from the page loop.
pub trait RecordingView {
    /// Current contents of the recording name field
    fn recording_name(&self) -> String;

    /// Replace the toggle button label
    fn set_button_label(&mut self, label: ButtonLabel);

    /// Append one line to the status text area
    fn append_status(&mut self, message: &str);
}
