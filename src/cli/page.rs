//! Terminal recording page
//!
//! The page loop is the only context that touches the controller and the
//! view. Stdin is read on a worker thread and signals are handled by tokio
//! tasks; both reach the loop through [`PageDispatcher`].

use std::io::BufRead;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::application::ports::{
    AudioSession, Diagnostics, MicPermission, RecorderFactory, RecordingView,
};
use crate::application::{PageDispatcher, PageEvent, RecordingController};
use crate::domain::page::{ButtonLabel, StatusLog};
use crate::domain::recording::DEFAULT_RECORDING_NAME;

use super::presenter::Presenter;

const HELP: &[(&str, &str)] = &[
    ("<Enter>, r, toggle", "Start or stop recording"),
    ("name <text>", "Set the recording name (empty for the default)"),
    ("status", "Show state, name and target file"),
    ("log", "Print the status log"),
    ("help", "Show this help"),
    ("q, quit", "Stop recording and exit"),
];

/// Terminal rendering of the name field, toggle button and status area
pub struct TerminalView {
    name: String,
    label: ButtonLabel,
    log: StatusLog,
    presenter: Presenter,
    echo: bool,
}

impl TerminalView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: ButtonLabel::default(),
            log: StatusLog::new(),
            presenter: Presenter::new(),
            echo: true,
        }
    }

    /// A view that keeps state without printing
    pub fn quiet(name: impl Into<String>) -> Self {
        Self {
            echo: false,
            ..Self::new(name)
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn label(&self) -> ButtonLabel {
        self.label
    }

    pub fn log(&self) -> &StatusLog {
        &self.log
    }
}

impl RecordingView for TerminalView {
    fn recording_name(&self) -> String {
        self.name.clone()
    }

    fn set_button_label(&mut self, label: ButtonLabel) {
        if self.label == label {
            return;
        }
        self.label = label;
        if self.echo {
            self.presenter.button(label);
        }
    }

    fn append_status(&mut self, message: &str) {
        self.log.push(message);
        if self.echo {
            self.presenter.status_line(message);
        }
    }
}

/// A line typed at the page prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    Toggle,
    Name(String),
    Status,
    Log,
    Help,
    Quit,
    Unknown(String),
}

impl PageCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" | "r" | "toggle" => Self::Toggle,
            "name" => Self::Name(rest.to_string()),
            "status" => Self::Status,
            "log" => Self::Log,
            "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Whether the page loop keeps running after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Forward stdin lines to the page loop; EOF shuts the page down
pub fn spawn_stdin_reader(dispatcher: PageDispatcher) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("page-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if !dispatcher.post(PageEvent::Input(line)) {
                    return;
                }
            }
            debug!("stdin closed");
            dispatcher.post(PageEvent::Shutdown);
        })?;
    Ok(())
}

/// Print the initial page
pub fn render_page<P, S, F, D>(
    controller: &RecordingController<P, S, F, TerminalView, D>,
    presenter: &Presenter,
) where
    P: MicPermission,
    S: AudioSession,
    F: RecorderFactory,
    D: Diagnostics,
{
    presenter.info(&format!(
        "Recordings are saved as {}",
        controller.resolve_file_path().display()
    ));
    presenter.info("Type 'help' for commands");
    presenter.button(controller.view().label());
}

/// Consume page events until quit or shutdown
pub async fn run_page_loop<P, S, F, D>(
    controller: &mut RecordingController<P, S, F, TerminalView, D>,
    events: &mut UnboundedReceiver<PageEvent>,
    presenter: &Presenter,
) where
    P: MicPermission,
    S: AudioSession,
    F: RecorderFactory,
    D: Diagnostics,
{
    while let Some(event) = events.recv().await {
        if handle_event(controller, event, presenter) == Flow::Quit {
            break;
        }
    }
}

/// Apply one event to the controller
pub fn handle_event<P, S, F, D>(
    controller: &mut RecordingController<P, S, F, TerminalView, D>,
    event: PageEvent,
    presenter: &Presenter,
) -> Flow
where
    P: MicPermission,
    S: AudioSession,
    F: RecorderFactory,
    D: Diagnostics,
{
    match event {
        PageEvent::Input(line) => handle_command(controller, PageCommand::parse(&line), presenter),
        PageEvent::PermissionResolved { granted } => {
            controller.on_permission_result(granted);
            Flow::Continue
        }
        PageEvent::Shutdown => Flow::Quit,
    }
}

fn handle_command<P, S, F, D>(
    controller: &mut RecordingController<P, S, F, TerminalView, D>,
    command: PageCommand,
    presenter: &Presenter,
) -> Flow
where
    P: MicPermission,
    S: AudioSession,
    F: RecorderFactory,
    D: Diagnostics,
{
    match command {
        PageCommand::Toggle => controller.toggle_recording(),
        PageCommand::Name(name) => {
            controller.view_mut().set_name(name);
            presenter.info(&format!(
                "Next recording: {}",
                controller.resolve_file_path().display()
            ));
        }
        PageCommand::Status => print_status(controller, presenter),
        PageCommand::Log => {
            for line in controller.view().log().lines() {
                presenter.status_line(line);
            }
        }
        PageCommand::Help => {
            for (command, description) in HELP {
                presenter.key_value(command, description);
            }
        }
        PageCommand::Quit => return Flow::Quit,
        PageCommand::Unknown(line) => {
            presenter.warn(&format!("Unknown command '{}'. Type 'help' for commands", line));
        }
    }
    Flow::Continue
}

fn print_status<P, S, F, D>(
    controller: &RecordingController<P, S, F, TerminalView, D>,
    presenter: &Presenter,
) where
    P: MicPermission,
    S: AudioSession,
    F: RecorderFactory,
    D: Diagnostics,
{
    let view = controller.view();
    let name = view.recording_name();
    let file = match controller.active_file_path() {
        Some(path) => path.to_path_buf(),
        None => controller.resolve_file_path(),
    };

    presenter.key_value("state", &presenter.format_state(controller.state()));
    presenter.key_value("button", view.label().as_str());
    presenter.key_value(
        "name",
        if name.is_empty() {
            DEFAULT_RECORDING_NAME
        } else {
            name.as_str()
        },
    );
    presenter.key_value("file", &file.display().to_string());
    presenter.key_value("encoder", &controller.settings().to_string());
}
