use std::fmt::{self, Display};

use crate::models::{AnalysisResult, RecommendationItem};

/// One display unit per recommendation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationCard<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub link: Option<&'a str>,
}

impl<'a> From<&'a RecommendationItem> for RecommendationCard<'a> {
    fn from(item: &'a RecommendationItem) -> Self {
        Self {
            name: &item.name,
            description: &item.description,
            link: item.visible_link(),
        }
    }
}

/// Cards in the order the service returned them
pub fn cards(result: &AnalysisResult) -> Vec<RecommendationCard<'_>> {
    result.items.iter().map(RecommendationCard::from).collect()
}

impl Display for RecommendationCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "   {}", self.description)?;
        if let Some(link) = self.link {
            writeln!(f, "   View Product -> {}", link)?;
        }
        Ok(())
    }
}

/// The results section: heading, optional notes, numbered cards
pub struct ResultsView<'a> {
    pub friend_name: &'a str,
    pub result: &'a AnalysisResult,
}

impl<'a> ResultsView<'a> {
    pub fn new(friend_name: &'a str, result: &'a AnalysisResult) -> Self {
        Self {
            friend_name,
            result,
        }
    }
}

impl Display for ResultsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty results are announced by a notice instead
        if self.result.is_empty() {
            return Ok(());
        }

        writeln!(f, "Gift Recommendations for {}", self.friend_name.trim())?;
        writeln!(f)?;

        let notes = self.result.notes.trim();
        if !notes.is_empty() {
            writeln!(f, "Analysis Notes")?;
            for line in notes.lines() {
                writeln!(f, "  {}", line)?;
            }
            writeln!(f)?;
        }

        for (index, card) in cards(self.result).iter().enumerate() {
            write!(f, "{}. {}", index + 1, card)?;
        }
        Ok(())
    }
}
