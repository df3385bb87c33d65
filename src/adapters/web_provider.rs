use crate::domain::ports::NumberProvider;
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_SEPARATOR: &str = ";";

/// Fetches a list of numbers over HTTP.
///
/// The response body is either a JSON array, one entry per element, or plain
/// text split on the separator (`;` by default).
#[derive(Debug, Clone)]
pub struct WebProvider {
    endpoint: String,
    separator: String,
    client: Client,
}

impl WebProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn entries(&self, body: &str) -> Vec<String> {
        let body = body.trim();

        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(body) {
            return items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect();
        }

        body.split(self.separator.as_str())
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect()
    }
}

#[async_trait]
impl NumberProvider for WebProvider {
    async fn take_numbers(&self) -> Result<Vec<String>> {
        tracing::debug!("Requesting numbers from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);
        if !status.is_success() {
            return Err(CalcError::ProviderError {
                message: format!("{} responded with {}", self.endpoint, status),
            });
        }

        let body = response.text().await?;
        Ok(self.entries(&body))
    }
}
