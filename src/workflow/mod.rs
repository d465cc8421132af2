pub mod preview;
pub mod selection;
pub mod spawner;
pub mod view;

use std::sync::{
    Arc,
    mpsc::{self, Receiver, Sender},
};

use log::{debug, error, info, warn};

use crate::api::{ClientError, Credentials, HistoryEntry, PredictResponse, PredictionService};

pub use preview::{NoPreview, PreviewHandle, PreviewSink};
pub use selection::{FileSource, SelectedFile, VIDEO_EXTENSIONS};
pub use spawner::{InlineSpawner, TaskSpawner};
pub use view::{HistoryRow, Notice, NoticeKind, ProgressView, ResultView, format_confidence};

use preview::PreviewSlot;

/// Lifecycle stage of one upload-to-result cycle.
///
/// A failed submission shows a notice and goes straight back to `Ready`, so the
/// same file can be submitted again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Submitting,
    Done,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SignInState {
    SignedOut,
    SigningIn,
    SignedIn { email: String },
    SigningOut { email: String },
    Rejected { reason: String },
}

/// Results coming back from background requests.
enum Completion {
    Predicted {
        file_name: String,
        outcome: Result<PredictResponse, ClientError>,
    },
    HistoryLoaded {
        generation: u64,
        outcome: Result<Vec<HistoryEntry>, ClientError>,
    },
    SignedIn {
        email: String,
        outcome: Result<(), ClientError>,
    },
    SignedOut {
        email: String,
        outcome: Result<(), ClientError>,
    },
}

/// `UploadWorkflow` owns everything the upload screen shows: the selected video, its
/// preview, the submission state, the last result and the history table.
///
/// Requests run through the `TaskSpawner` and report back over a channel; nothing
/// changes until the owner calls [`UploadWorkflow::poll`], typically once per frame.
pub struct UploadWorkflow {
    service: Arc<dyn PredictionService>,
    spawner: Box<dyn TaskSpawner>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,

    phase: Phase,
    selected: Option<SelectedFile>,
    preview: PreviewSlot,
    progress: Option<ProgressView>,
    result: Option<ResultView>,
    notice: Option<Notice>,

    history: Vec<HistoryRow>,
    history_visible: bool,
    history_generation: u64,
    history_pending: bool,

    sign_in: SignInState,
}

impl UploadWorkflow {
    pub fn new(
        service: Arc<dyn PredictionService>,
        spawner: Box<dyn TaskSpawner>,
        preview_sink: Box<dyn PreviewSink>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            service,
            spawner,
            completion_tx,
            completion_rx,
            phase: Phase::Idle,
            selected: None,
            preview: PreviewSlot::new(preview_sink),
            progress: None,
            result: None,
            notice: None,
            history: Vec::new(),
            history_visible: false,
            history_generation: 0,
            history_pending: false,
            sign_in: SignInState::SignedOut,
        }
    }

    /// Replaces the selection. `None` (nothing picked) leaves everything as it was.
    ///
    /// A selection made while a submission is in flight does not cancel it; the
    /// phase stays `Submitting` until that response is applied.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        let Some(file) = file else {
            return;
        };
        info!("Selected {}", file.file_name());
        self.preview.show(&file);
        self.selected = Some(file);
        if self.phase != Phase::Submitting {
            self.phase = Phase::Ready;
        }
    }

    /// Uploads the selected file. Returns whether a request was issued.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            debug!("Submit ignored in phase {:?}", self.phase);
            return false;
        }
        let Some(file) = self.selected.clone() else {
            return false;
        };

        self.phase = Phase::Submitting;
        self.progress = Some(ProgressView::reset());
        // the card only ever shows the answer to the latest submission
        self.result = None;
        info!("Submitting {} for prediction", file.file_name());

        let service = Arc::clone(&self.service);
        let completion_tx = self.completion_tx.clone();
        self.spawner.spawn(Box::new(move || {
            let outcome = service.predict(&file);
            let completion = Completion::Predicted {
                file_name: file.file_name().to_string(),
                outcome,
            };
            if completion_tx.send(completion).is_err() {
                debug!("Workflow closed before the prediction completed");
            }
        }));
        true
    }

    /// Reloads the history table. Only the newest request's answer is applied and
    /// it replaces every row.
    pub fn refresh_history(&mut self) {
        self.history_generation += 1;
        self.history_pending = true;
        let generation = self.history_generation;
        debug!("Refreshing history (request {})", generation);

        let service = Arc::clone(&self.service);
        let completion_tx = self.completion_tx.clone();
        self.spawner.spawn(Box::new(move || {
            let outcome = service.history();
            if completion_tx
                .send(Completion::HistoryLoaded { generation, outcome })
                .is_err()
            {
                debug!("Workflow closed before the history request completed");
            }
        }));
    }

    pub fn sign_in(&mut self, credentials: Credentials) {
        if matches!(
            self.sign_in,
            SignInState::SigningIn | SignInState::SigningOut { .. }
        ) {
            return;
        }
        self.sign_in = SignInState::SigningIn;

        let service = Arc::clone(&self.service);
        let completion_tx = self.completion_tx.clone();
        self.spawner.spawn(Box::new(move || {
            let outcome = service.sign_in(&credentials);
            let completion = Completion::SignedIn {
                email: credentials.email,
                outcome,
            };
            if completion_tx.send(completion).is_err() {
                debug!("Workflow closed before sign-in completed");
            }
        }));
    }

    /// Ends the server session. Only does something while signed in.
    pub fn sign_out(&mut self) {
        let SignInState::SignedIn { email } = &self.sign_in else {
            return;
        };
        let email = email.clone();
        self.sign_in = SignInState::SigningOut {
            email: email.clone(),
        };

        let service = Arc::clone(&self.service);
        let completion_tx = self.completion_tx.clone();
        self.spawner.spawn(Box::new(move || {
            let outcome = service.sign_out();
            if completion_tx
                .send(Completion::SignedOut { email, outcome })
                .is_err()
            {
                debug!("Workflow closed before sign-out completed");
            }
        }));
    }

    /// Applies every finished request. Returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion);
            changed = true;
        }
        changed
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Predicted { file_name, outcome } => match outcome {
                Ok(PredictResponse::Prediction(result)) => {
                    info!(
                        "{} classified as {} ({})",
                        file_name,
                        result.label,
                        format_confidence(result.confidence)
                    );
                    self.result = Some(ResultView::new(&file_name, &result));
                    self.phase = Phase::Done;
                    self.refresh_history();
                }
                Ok(PredictResponse::Rejected { error }) => {
                    warn!("Prediction for {} rejected: {}", file_name, error);
                    self.notice = Some(Notice::rejected(&error));
                    self.phase = Phase::Ready;
                }
                Err(e) => {
                    error!("Prediction for {} failed: {}", file_name, e);
                    self.notice = Some(Notice::failed(&e));
                    self.phase = Phase::Ready;
                }
            },
            Completion::HistoryLoaded {
                generation,
                outcome,
            } => {
                if generation != self.history_generation {
                    debug!("Dropping stale history response {}", generation);
                    return;
                }
                self.history_pending = false;
                match outcome {
                    Ok(entries) => {
                        self.history = view::history_rows(&entries);
                        self.history_visible = true;
                    }
                    Err(e) => warn!("Could not refresh prediction history: {}", e),
                }
            }
            Completion::SignedIn { email, outcome } => {
                self.sign_in = match outcome {
                    Ok(()) => SignInState::SignedIn { email },
                    Err(e) => {
                        warn!("Sign-in as {} failed: {}", email, e);
                        SignInState::Rejected {
                            reason: e.to_string(),
                        }
                    }
                };
            }
            Completion::SignedOut { email, outcome } => {
                self.sign_in = match outcome {
                    Ok(()) => {
                        info!("Signed out {}", email);
                        SignInState::SignedOut
                    }
                    Err(e) => {
                        warn!("Sign-out of {} failed: {}", email, e);
                        SignInState::SignedIn { email }
                    }
                };
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// A file is selected and no submission is in flight. A pending history refresh
    /// does not lock submission; its answer is superseded by the next refresh.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && self.phase != Phase::Submitting
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Submitting
            || self.history_pending
            || matches!(
                self.sign_in,
                SignInState::SigningIn | SignInState::SigningOut { .. }
            )
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.current()
    }

    pub fn progress(&self) -> Option<&ProgressView> {
        self.progress.as_ref()
    }

    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn history(&self) -> &[HistoryRow] {
        &self.history
    }

    pub fn history_visible(&self) -> bool {
        self.history_visible
    }

    pub fn sign_in_state(&self) -> &SignInState {
        &self.sign_in
    }
}
