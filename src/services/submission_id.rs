use uuid::Uuid;

/// HTTP header carrying the submission ID to the analysis service
pub const SUBMISSION_ID_HEADER: &str = "x-request-id";

/// Identifies one analysis request across client and service logs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    /// Creates a new random submission ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
