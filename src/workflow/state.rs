use std::fmt::Display;

use crate::models::AnalysisResult;

use super::validator::{Field, ValidationOutcome};

/// Message shown for every failed analysis, whatever the cause
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze chat history. Please try again later.";

/// The single authoritative phase of the upload workflow
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl WorkflowState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            WorkflowState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Submitting => "submitting",
            WorkflowState::Succeeded(_) => "succeeded",
            WorkflowState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Info,
    Error,
}

impl Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A transient, user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn missing_field(field: Field) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: "Missing information".to_string(),
            description: field.prompt().to_string(),
        }
    }

    pub fn no_recommendations() -> Self {
        Self {
            level: NoticeLevel::Info,
            title: "No recommendations found".to_string(),
            description: "We couldn't generate any recommendations from this chat history. \
                          Try uploading a different file."
                .to_string(),
        }
    }

    pub fn analysis_failed() -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            description: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.title, self.description)
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone)]
pub enum Event {
    /// A new file replaced the selection
    FileSelected,
    /// The user asked to submit; carries the validator's verdict
    SubmitRequested(ValidationOutcome),
    AnalysisSucceeded(AnalysisResult),
    /// Carries the underlying cause for logging only
    AnalysisFailed(String),
    /// The in-flight outcome belongs to a file that has since been replaced
    AnalysisSuperseded,
    /// The caller stopped waiting and the in-flight request was cancelled
    AnalysisAbandoned,
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClearResult,
    ShowNotice(Notice),
    Dispatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: WorkflowState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: WorkflowState, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }

    fn stay(state: WorkflowState) -> Self {
        Self::to(state, Vec::new())
    }

    pub fn dispatches(&self) -> bool {
        self.effects.contains(&Effect::Dispatch)
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::ShowNotice(notice) => Some(notice),
            _ => None,
        })
    }
}

/// Computes the next state and the effects for one event
///
/// Pure: no I/O, no logging, so any front end can drive it.
pub fn transition(state: WorkflowState, event: Event) -> Transition {
    match (state, event) {
        // One analysis at a time
        (WorkflowState::Submitting, Event::SubmitRequested(_)) => {
            Transition::stay(WorkflowState::Submitting)
        }

        // Selection changes while a request is in flight; its outcome is
        // discarded later through AnalysisSuperseded
        (WorkflowState::Submitting, Event::FileSelected) => {
            Transition::to(WorkflowState::Submitting, vec![Effect::ClearResult])
        }

        (_, Event::FileSelected) => Transition::to(WorkflowState::Idle, vec![Effect::ClearResult]),

        (_, Event::SubmitRequested(ValidationOutcome::MissingField(field))) => Transition::to(
            WorkflowState::Idle,
            vec![Effect::ShowNotice(Notice::missing_field(field))],
        ),

        (_, Event::SubmitRequested(ValidationOutcome::Ok)) => Transition::to(
            WorkflowState::Submitting,
            vec![Effect::ClearResult, Effect::Dispatch],
        ),

        (WorkflowState::Submitting, Event::AnalysisSucceeded(result)) => {
            let effects = if result.is_empty() {
                vec![Effect::ShowNotice(Notice::no_recommendations())]
            } else {
                Vec::new()
            };
            Transition::to(WorkflowState::Succeeded(result), effects)
        }

        (WorkflowState::Submitting, Event::AnalysisFailed(_)) => Transition::to(
            WorkflowState::Failed(GENERIC_FAILURE_MESSAGE.to_string()),
            vec![Effect::ShowNotice(Notice::analysis_failed())],
        ),

        (WorkflowState::Submitting, Event::AnalysisSuperseded | Event::AnalysisAbandoned) => {
            Transition::stay(WorkflowState::Idle)
        }

        // Outcomes with no request in flight
        (
            state,
            Event::AnalysisSucceeded(_)
            | Event::AnalysisFailed(_)
            | Event::AnalysisSuperseded
            | Event::AnalysisAbandoned,
        ) => Transition::stay(state),
    }
}
