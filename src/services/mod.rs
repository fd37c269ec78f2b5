pub mod providers;
pub mod submission_id;

pub use providers::{AnalysisClient, HttpAnalysisClient};
pub use submission_id::SubmissionId;
