//! Diagnostic channel backed by `tracing`

use tracing::{error, info};

use crate::application::ports::{Diagnostics, RecordingFinishedObserver};

/// Forwards diagnostics to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        info!(target: "audio_galaxy::page", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "audio_galaxy::page", "{}", message);
    }
}

/// Logs the outcome of each finished recording.
///
/// Called from recorder worker contexts; it only writes to the diagnostic
/// channel and never touches the page.
#[derive(Debug, Clone, Default)]
pub struct LoggingFinishedObserver<D: Diagnostics> {
    diagnostics: D,
}

impl<D: Diagnostics> LoggingFinishedObserver<D> {
    pub fn new(diagnostics: D) -> Self {
        Self { diagnostics }
    }
}

impl<D: Diagnostics> RecordingFinishedObserver for LoggingFinishedObserver<D> {
    fn finished(&self, success: bool) {
        self.diagnostics
            .info(&format!("Finished recording. Successful: {}", success));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Diagnostics for Captured {
        fn info(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("info: {}", message));
        }

        fn error(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("error: {}", message));
        }
    }

    #[test]
    fn logs_success_flag() {
        let captured = Captured::default();
        let observer = LoggingFinishedObserver::new(captured.clone());

        observer.finished(true);
        observer.finished(false);

        assert_eq!(
            *captured.lines.lock().unwrap(),
            vec![
                "info: Finished recording. Successful: true".to_string(),
                "info: Finished recording. Successful: false".to_string(),
            ]
        );
    }

    #[test]
    fn observer_runs_on_worker_thread() {
        let captured = Captured::default();
        let observer: Arc<dyn RecordingFinishedObserver> =
            Arc::new(LoggingFinishedObserver::new(captured.clone()));

        std::thread::spawn(move || observer.finished(true))
            .join()
            .unwrap();

        assert_eq!(captured.lines.lock().unwrap().len(), 1);
    }

    #[test]
    fn tracing_diagnostics_without_subscriber_is_silent() {
        TracingDiagnostics.info("Recording completed");
        TracingDiagnostics.error("Error starting recorder: boom");
    }
}
