//! Upload-and-recommendation workflow
//!
//! `state` holds the pure transition function; `controller` owns a session
//! (file, names, state) and performs the effects the transitions ask for.

pub mod acquisition;
pub mod controller;
pub mod state;
pub mod validator;

pub use acquisition::FileAcquisition;
pub use controller::{Snapshot, Submission, SubmitOutcome, WorkflowSession};
pub use state::{
    transition, Effect, Event, Notice, NoticeLevel, Transition, WorkflowState,
    GENERIC_FAILURE_MESSAGE,
};
pub use validator::{validate, Field, ValidationOutcome};
