//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::page::ButtonLabel;
use crate::domain::recording::RecorderState;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list and page status)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one status log line
    pub fn status_line(&self, line: &str) {
        println!("{} {}", "│".dimmed(), line);
    }

    /// Render the toggle button
    pub fn button(&self, label: ButtonLabel) {
        let text = format!("[ {} ]", label);
        let styled = match label {
            ButtonLabel::StartRecording => text.green().bold(),
            ButtonLabel::StopRecording => text.red().bold(),
        };
        println!("{}  {}", styled, "(Enter to toggle)".dimmed());
    }

    /// Colored recorder state
    pub fn format_state(&self, state: RecorderState) -> String {
        match state {
            RecorderState::Idle => state.to_string().normal().to_string(),
            RecorderState::AwaitingPermission => state.to_string().yellow().to_string(),
            RecorderState::Recording => format!("{} {}", "●".red(), state),
        }
    }

    /// Input prompt without newline
    pub fn prompt(&self) {
        print!("{} ", ">".cyan());
        let _ = io::stdout().flush();
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_state_names_every_state() {
        colored::control::set_override(false);
        let presenter = Presenter::new();

        assert_eq!(presenter.format_state(RecorderState::Idle), "idle");
        assert_eq!(
            presenter.format_state(RecorderState::AwaitingPermission),
            "awaiting-permission"
        );
        assert!(presenter
            .format_state(RecorderState::Recording)
            .ends_with("recording"));
    }

    #[test]
    fn spinner_lifecycle_without_terminal() {
        let mut presenter = Presenter::new();
        presenter.start_spinner("Finishing recording...");
        assert!(presenter.spinner.is_some());
        presenter.spinner_success("Done");
        assert!(presenter.spinner.is_none());
        presenter.stop_spinner();
    }
}
