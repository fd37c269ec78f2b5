use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the chat analysis service
    #[serde(default = "default_analysis_api_url")]
    pub analysis_api_url: String,

    /// Upper bound for one analysis request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_analysis_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis_api_url: default_analysis_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Replaces the service URL when one was given on the command line
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.analysis_api_url = url;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_vars(vars(&[
            ("ANALYSIS_API_URL", "https://gifts.example.com"),
            ("REQUEST_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.analysis_api_url, "https://gifts.example.com");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        let result = Config::from_vars(vars(&[("REQUEST_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_url_takes_precedence() {
        let config = Config::default().with_api_url(Some("http://10.0.0.5:8000".to_string()));
        assert_eq!(config.analysis_api_url, "http://10.0.0.5:8000");

        let unchanged = Config::default().with_api_url(None);
        assert_eq!(unchanged.analysis_api_url, "http://localhost:8000");
    }
}
