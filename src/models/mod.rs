use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod identity;
pub mod selected_file;

pub use identity::IdentityPair;
pub use selected_file::SelectedFile;

/// A single gift suggestion returned by the analysis service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationItem {
    pub name: String,
    pub description: String,
    /// External product reference; absent, null and "" all mean "no link"
    pub link: Option<String>,
}

impl RecommendationItem {
    /// Returns the link only when it carries something to click on
    pub fn visible_link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }
}

/// Outcome of one successful analysis call
///
/// A new result always replaces the previous one wholesale; items are kept in
/// the order the service sent them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResult {
    pub notes: String,
    pub items: Vec<RecommendationItem>,
    pub received_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(notes: String, items: Vec<RecommendationItem>) -> Self {
        Self {
            notes,
            items,
            received_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Analysis Service API Types
// ============================================================================

/// Raw success body of `POST /api/analyze-chat`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeChatResponse {
    pub recommendations: GiftRecommendations,
}

/// The `recommendations` object nested inside the success body
#[derive(Debug, Clone, Deserialize)]
pub struct GiftRecommendations {
    pub notes: String,
    pub gift_ideas: Vec<RecommendationItem>,
}

impl From<AnalyzeChatResponse> for AnalysisResult {
    fn from(response: AnalyzeChatResponse) -> Self {
        let GiftRecommendations { notes, gift_ideas } = response.recommendations;
        AnalysisResult::new(notes, gift_ideas)
    }
}
