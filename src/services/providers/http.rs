//! HTTP client for the chat analysis service
//!
//! API Flow:
//! 1. Multipart `POST /api/analyze-chat` with parts `file`, `user_name`, `friend_name`
//! 2. Success body `{ "recommendations": { "notes", "gift_ideas": [...] } }`
//!
//! Anything else (non-2xx, unreadable body, timeout) is a failed analysis.

use std::time::Duration;

use reqwest::{
    multipart::{Form, Part},
    Client as HttpClient,
};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{AnalysisResult, AnalyzeChatResponse, SelectedFile},
    services::{
        providers::AnalysisClient,
        submission_id::{SubmissionId, SUBMISSION_ID_HEADER},
    },
};

/// Endpoint path dedicated to chat analysis
pub const ANALYZE_CHAT_PATH: &str = "/api/analyze-chat";

const FILE_MIME: &str = "application/octet-stream";

#[derive(Clone)]
pub struct HttpAnalysisClient {
    http_client: HttpClient,
    api_url: String,
}

impl HttpAnalysisClient {
    /// Creates a client for the service at `api_url`, bounding each request by `timeout`
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let api_url = api_url.into();
        if api_url.trim().is_empty() {
            return Err(AppError::Config(
                "Analysis API URL cannot be empty".to_string(),
            ));
        }

        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.analysis_api_url.clone(), config.request_timeout())
    }

    /// Full URL of the analysis endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), ANALYZE_CHAT_PATH)
    }

    fn build_form(file: &SelectedFile, user_name: &str, friend_name: &str) -> AppResult<Form> {
        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(FILE_MIME)?;

        Ok(Form::new()
            .part("file", part)
            .text("user_name", user_name.to_string())
            .text("friend_name", friend_name.to_string()))
    }

    /// Decodes the success body, unwrapping the `recommendations` object
    fn parse_response(body: &str) -> AppResult<AnalysisResult> {
        let response: AnalyzeChatResponse = serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %body,
                "Failed to deserialize analysis response"
            );
            AppError::Decode(format!("Failed to parse analysis response: {}", e))
        })?;

        Ok(response.into())
    }

    async fn send(
        &self,
        submission_id: SubmissionId,
        file: &SelectedFile,
        user_name: &str,
        friend_name: &str,
    ) -> AppResult<AnalysisResult> {
        let form = Self::build_form(file, user_name, friend_name)?;

        let response = self
            .http_client
            .post(self.endpoint())
            .header(SUBMISSION_ID_HEADER, submission_id.to_string())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Analysis service returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw analysis response");

        let result = Self::parse_response(&response_text)?;

        tracing::info!(
            items = result.items.len(),
            has_notes = !result.notes.is_empty(),
            "Analysis completed"
        );

        Ok(result)
    }
}

#[async_trait::async_trait]
impl AnalysisClient for HttpAnalysisClient {
    #[tracing::instrument(
        name = "analysis_request",
        skip_all,
        fields(submission_id = tracing::field::Empty, file = %file.name)
    )]
    async fn analyze(
        &self,
        file: &SelectedFile,
        user_name: &str,
        friend_name: &str,
    ) -> AppResult<AnalysisResult> {
        let submission_id = SubmissionId::new();
        tracing::Span::current().record("submission_id", tracing::field::display(submission_id));

        tracing::info!(
            endpoint = %self.endpoint(),
            bytes = file.len(),
            "Submitting chat for analysis"
        );

        self.send(submission_id, file, user_name, friend_name)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Analysis request failed"))
    }
}
