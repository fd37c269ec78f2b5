//! Analysis service client abstraction
//!
//! The workflow only depends on this trait, so the HTTP client can be swapped
//! for a mock in tests or for another transport later.

use crate::{
    error::AppResult,
    models::{AnalysisResult, SelectedFile},
};

pub mod http;

pub use http::HttpAnalysisClient;

/// Sends a chat file to an analysis backend and returns its recommendations
///
/// Implementations perform exactly one attempt per call: no retries and no
/// caching, even for an identical file and names.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Upload `file` along with both names and wait for the analysis
    ///
    /// Any transport, status or decoding problem is returned as an error in
    /// the network category (see `AppError::is_network`).
    async fn analyze(
        &self,
        file: &SelectedFile,
        user_name: &str,
        friend_name: &str,
    ) -> AppResult<AnalysisResult>;
}
