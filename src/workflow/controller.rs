use std::sync::Arc;

use tokio::{sync::RwLock, task::AbortHandle};

use crate::{
    error::{AppError, AppResult},
    models::{AnalysisResult, IdentityPair, SelectedFile},
    services::AnalysisClient,
};

use super::{
    acquisition::FileAcquisition,
    state::{transition, Effect, Event, Notice, Transition, WorkflowState},
    validator::{validate, Field, ValidationOutcome},
};

/// How a submit request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was already in flight; nothing was sent
    Ignored,
    /// Validation failed; nothing was sent
    Invalid(Field),
    Succeeded,
    Failed,
    /// The file was replaced while the request was in flight; its outcome was dropped
    Superseded,
}

/// What a caller gets back from `submit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub outcome: SubmitOutcome,
    pub notices: Vec<Notice>,
}

impl Submission {
    fn new(outcome: SubmitOutcome, t: &Transition) -> Self {
        Self {
            outcome,
            notices: t.notices().cloned().collect(),
        }
    }
}

/// Immutable view of the session handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub file_name: Option<String>,
    pub identity: IdentityPair,
    pub state: WorkflowState,
    pub is_dragging: bool,
}

impl Snapshot {
    /// Whether the submit action should be enabled
    pub fn can_submit(&self) -> bool {
        self.file_name.is_some() && !self.state.is_submitting()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_submitting()
    }
}

/// Shared session state
#[derive(Clone)]
pub struct WorkflowSession {
    inner: Arc<RwLock<SessionInner>>,
    client: Arc<dyn AnalysisClient>,
}

/// Inner state that can be modified
struct SessionInner {
    acquisition: FileAcquisition,
    identity: IdentityPair,
    state: WorkflowState,
    /// Bumped on every new selection so stale outcomes can be recognised
    selection: u64,
    /// Last dispatch started, and last dispatch whose outcome was applied
    attempt: u64,
    landed: u64,
}

impl SessionInner {
    fn apply(&mut self, event: Event) -> Transition {
        let current = std::mem::take(&mut self.state);
        let from = current.label();
        let t = transition(current, event);
        self.state = t.next.clone();

        tracing::debug!(from, to = self.state.label(), "Workflow transition");

        t
    }

    /// Applies the outcome of dispatch `attempt`, unless it already landed
    fn land(
        &mut self,
        attempt: u64,
        selection: u64,
        file_name: &str,
        outcome: AppResult<AnalysisResult>,
    ) -> Submission {
        if self.landed >= attempt {
            return Submission {
                outcome: SubmitOutcome::Superseded,
                notices: Vec::new(),
            };
        }
        self.landed = attempt;

        if self.selection != selection {
            tracing::info!(file = %file_name, "Discarding analysis for a replaced file");
            let t = self.apply(Event::AnalysisSuperseded);
            return Submission::new(SubmitOutcome::Superseded, &t);
        }

        match outcome {
            Ok(result) => {
                tracing::info!(
                    file = %file_name,
                    items = result.items.len(),
                    "Recommendations received"
                );
                let t = self.apply(Event::AnalysisSucceeded(result));
                Submission::new(SubmitOutcome::Succeeded, &t)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    network = e.is_network(),
                    file = %file_name,
                    "Error analyzing chat"
                );
                let t = self.apply(Event::AnalysisFailed(e.to_string()));
                Submission::new(SubmitOutcome::Failed, &t)
            }
        }
    }

    /// Returns to `Idle` when dispatch `attempt` was cancelled before landing
    fn abandon(&mut self, attempt: u64) {
        if self.landed >= attempt {
            return;
        }
        self.landed = attempt;
        tracing::info!("Analysis cancelled before completion");
        self.apply(Event::AnalysisAbandoned);
    }

    fn select(&mut self, changed: bool) -> Vec<Effect> {
        if !changed {
            return Vec::new();
        }
        self.selection += 1;
        self.apply(Event::FileSelected).effects
    }
}

impl WorkflowSession {
    /// Creates an idle session with no file and blank names
    pub fn new(client: Arc<dyn AnalysisClient>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                acquisition: FileAcquisition::new(),
                identity: IdentityPair::default(),
                state: WorkflowState::Idle,
                selection: 0,
                attempt: 0,
                landed: 0,
            })),
            client,
        }
    }

    pub async fn set_user_name(&self, name: impl Into<String>) {
        self.inner.write().await.identity.set_user_name(name);
    }

    pub async fn set_friend_name(&self, name: impl Into<String>) {
        self.inner.write().await.identity.set_friend_name(name);
    }

    pub async fn on_drag_over(&self) {
        self.inner.write().await.acquisition.on_drag_over();
    }

    pub async fn on_drag_leave(&self) {
        self.inner.write().await.acquisition.on_drag_leave();
    }

    /// Handles a drop on the upload region; a new file clears any shown result
    pub async fn on_drop(&self, files: Vec<SelectedFile>) -> Vec<Effect> {
        let mut inner = self.inner.write().await;
        let changed = inner.acquisition.on_drop(files);
        inner.select(changed)
    }

    /// Handles a file picked through the browse dialog
    pub async fn on_pick(&self, files: Vec<SelectedFile>) -> Vec<Effect> {
        let mut inner = self.inner.write().await;
        let changed = inner.acquisition.on_pick(files);
        inner.select(changed)
    }

    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().await;
        Snapshot {
            file_name: inner.acquisition.current_file().map(|f| f.name.clone()),
            identity: inner.identity.clone(),
            state: inner.state.clone(),
            is_dragging: inner.acquisition.is_dragging(),
        }
    }

    /// Validates the inputs and, when they are complete, runs one analysis
    ///
    /// At most one analysis runs per session: a call made while another is in
    /// flight returns `SubmitOutcome::Ignored` without touching the client.
    /// The lock is released while the request is in flight. Dropping the
    /// returned future cancels the request and puts the session back in `Idle`.
    pub async fn submit(&self) -> Submission {
        let (file, identity, selection, attempt) = {
            let mut inner = self.inner.write().await;

            if inner.state.is_submitting() {
                tracing::debug!("Submit ignored, analysis already in flight");
                return Submission {
                    outcome: SubmitOutcome::Ignored,
                    notices: Vec::new(),
                };
            }

            let file = inner.acquisition.current_file().cloned();
            let verdict = validate(
                &inner.identity.user_name,
                &inner.identity.friend_name,
                file.as_deref(),
            );
            let t = inner.apply(Event::SubmitRequested(verdict));

            // validate() never passes without a file
            let file = match (verdict, file) {
                (ValidationOutcome::Ok, Some(file)) => file,
                (ValidationOutcome::MissingField(field), _) => {
                    tracing::info!(%field, "Submit rejected, missing input");
                    return Submission::new(SubmitOutcome::Invalid(field), &t);
                }
                (ValidationOutcome::Ok, None) => {
                    return Submission::new(SubmitOutcome::Invalid(Field::File), &t);
                }
            };

            inner.attempt += 1;
            (file, inner.identity.clone(), inner.selection, inner.attempt)
        };

        let file_name = file.name.clone();
        let shared = Arc::clone(&self.inner);
        let client = Arc::clone(&self.client);
        let task = tokio::spawn(async move {
            let outcome = client
                .analyze(&file, &identity.user_name, &identity.friend_name)
                .await;
            let submission = shared
                .write()
                .await
                .land(attempt, selection, &file.name, outcome);
            submission
        });

        let mut in_flight = InFlight {
            inner: Arc::clone(&self.inner),
            attempt,
            task: Some(task.abort_handle()),
        };

        let submission = match task.await {
            Ok(submission) => submission,
            Err(e) => {
                tracing::error!(error = %e, "Analysis task join error");
                let outcome = Err(AppError::Internal(e.to_string()));
                self.inner
                    .write()
                    .await
                    .land(attempt, selection, &file_name, outcome)
            }
        };

        in_flight.task = None;
        submission
    }
}

/// Cancels the request of a `submit` future dropped before it finished
struct InFlight {
    inner: Arc<RwLock<SessionInner>>,
    attempt: u64,
    task: Option<AbortHandle>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();

        let attempt = self.attempt;
        match self.inner.try_write() {
            Ok(mut inner) => inner.abandon(attempt),
            Err(_) => {
                if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                    let inner = Arc::clone(&self.inner);
                    runtime.spawn(async move {
                        inner.write().await.abandon(attempt);
                    });
                }
            }
        }
    }
}
