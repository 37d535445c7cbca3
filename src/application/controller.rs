//! Record/stop toggle use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::page::ButtonLabel;
use crate::domain::recording::{
    resolve_file_path, EncoderSettings, RecorderState, RecordingSession,
};

use super::dispatch::{PageDispatcher, PageEvent};
use super::ports::{
    AudioRecorder, AudioSession, AudioSessionCategory, Diagnostics, MicPermission,
    RecorderFactory, RecordingFinishedObserver, RecordingView,
};

/// Configuration for the recording controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Directory recordings are written to
    pub documents_dir: PathBuf,
    /// Encoder configuration for every recorder
    pub settings: EncoderSettings,
}

/// Mediates the record/stop gesture, permission acquisition and the recorder lifecycle.
///
/// Owned by the page loop. Permission answers come back as
/// [`PageEvent::PermissionResolved`] and must be fed to
/// [`on_permission_result`](Self::on_permission_result) from that loop.
pub struct RecordingController<P, S, F, V, D>
where
    P: MicPermission,
    S: AudioSession,
    F: RecorderFactory,
    V: RecordingView,
    D: Diagnostics,
{
    permission: P,
    audio_session: S,
    recorders: F,
    view: V,
    diagnostics: D,
    observer: Arc<dyn RecordingFinishedObserver>,
    dispatcher: PageDispatcher,
    config: ControllerConfig,
    session: RecordingSession,
    recorder: Option<Box<dyn AudioRecorder>>,
}

impl<P, S, F, V, D> RecordingController<P, S, F, V, D>
where
    P: MicPermission,
    S: AudioSession,
    F: RecorderFactory,
    V: RecordingView,
    D: Diagnostics,
{
    /// Create a new controller in idle state
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        permission: P,
        audio_session: S,
        recorders: F,
        view: V,
        diagnostics: D,
        observer: Arc<dyn RecordingFinishedObserver>,
        dispatcher: PageDispatcher,
        config: ControllerConfig,
    ) -> Self {
        Self {
            permission,
            audio_session,
            recorders,
            view,
            diagnostics,
            observer,
            dispatcher,
            config,
            session: RecordingSession::new(),
            recorder: None,
        }
    }

    /// Get the current toggle state
    pub fn state(&self) -> RecorderState {
        self.session.state()
    }

    /// Target file of the attempt in progress, if any
    pub fn active_file_path(&self) -> Option<&Path> {
        self.session.file_path()
    }

    pub fn settings(&self) -> &EncoderSettings {
        &self.config.settings
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Handle the user's record/stop gesture
    pub fn toggle_recording(&mut self) {
        match self.session.state() {
            RecorderState::Recording if self.recorder_is_live() => {
                self.stop_recording();
                return;
            }
            RecorderState::Recording => self.discard_dead_recorder(),
            RecorderState::AwaitingPermission => {
                self.diagnostics
                    .info("Permission request already pending, ignoring toggle");
                return;
            }
            RecorderState::Idle => {}
        }

        let file_path = self.resolve_file_path();

        // An inactive session surfaces later as a recorder failure
        if let Err(e) = self
            .audio_session
            .activate(AudioSessionCategory::PlayAndRecord)
        {
            self.diagnostics
                .error(&format!("Failed to activate audio session: {}", e));
        }

        if let Err(e) = self.session.request_permission(file_path) {
            self.diagnostics.error(&e.to_string());
            return;
        }

        let dispatcher = self.dispatcher.clone();
        self.permission
            .request_record_permission(Box::new(move |granted| {
                dispatcher.post(PageEvent::PermissionResolved { granted });
            }));
    }

    /// Continue a toggle once the permission answer is back on the page loop
    pub fn on_permission_result(&mut self, granted: bool) {
        if !self.session.is_awaiting_permission() {
            self.diagnostics.info(&format!(
                "Ignoring permission result while {}",
                self.session.state()
            ));
            return;
        }

        if !granted {
            self.report_status("Mic Permission denied");
            self.abandon_session();
            return;
        }

        self.report_status("Mic Permission granted");
        self.start_recording();
    }

    /// Output file for the name currently in the name field
    pub fn resolve_file_path(&self) -> PathBuf {
        resolve_file_path(
            &self.view.recording_name(),
            &self.config.documents_dir,
            self.config.settings.format,
        )
    }

    fn start_recording(&mut self) {
        let Some(file_path) = self.session.file_path().map(Path::to_path_buf) else {
            return;
        };

        let mut recorder = match self.recorders.create(&file_path, &self.config.settings) {
            Ok(recorder) => recorder,
            Err(e) => {
                self.diagnostics
                    .error(&format!("Error creating recorder: {}", e));
                self.abandon_session();
                return;
            }
        };

        recorder.set_finished_observer(Arc::clone(&self.observer));

        let status = format!("Recording file on path {}", recorder.path().display());
        self.report_status(&status);

        if let Err(e) = recorder.record() {
            self.diagnostics
                .error(&format!("Error starting recorder: {}", e));
            self.abandon_session();
            return;
        }

        self.view.set_button_label(ButtonLabel::StopRecording);
        if let Err(e) = self.session.start_recording() {
            self.diagnostics.error(&e.to_string());
        }
        self.recorder = Some(recorder);
    }

    /// Stop the active recording; does nothing when not recording
    pub fn stop_recording(&mut self) {
        if !self.session.is_recording() {
            return;
        }
        if !self.recorder_is_live() {
            self.discard_dead_recorder();
            return;
        }

        self.report_status("Stoping recording");
        if let Some(mut recorder) = self.recorder.take() {
            recorder.stop();
        }
        self.view.set_button_label(ButtonLabel::StartRecording);
        self.report_status("Recording completed");

        if let Err(e) = self.session.stop_recording() {
            self.diagnostics.error(&e.to_string());
        }
    }

    /// Append a line to the status log and mirror it to diagnostics
    pub fn report_status(&mut self, message: &str) {
        self.view.append_status(message);
        self.diagnostics.info(message);
    }

    /// Stop any active recording and wait for files to be finalized
    pub async fn shutdown(&mut self) {
        self.stop_recording();
        self.recorders.flush().await;
    }

    fn recorder_is_live(&self) -> bool {
        self.recorder.as_ref().is_some_and(|r| r.is_recording())
    }

    /// Return to idle after the recorder ended without a stop request
    fn discard_dead_recorder(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            self.diagnostics.info(&format!(
                "Recorder for {} is no longer running",
                recorder.path().display()
            ));
        }
        self.view.set_button_label(ButtonLabel::StartRecording);
        if let Err(e) = self.session.stop_recording() {
            self.diagnostics.error(&e.to_string());
        }
    }

    fn abandon_session(&mut self) {
        if let Err(e) = self.session.abandon() {
            self.diagnostics.error(&e.to_string());
        }
    }
}
