use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Summary, SummaryModel};

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    text: &'a str,
    model: SummaryModel,
}

#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    summary: Option<String>,
    model: Option<String>,
    time_taken: Option<f64>,
    error: Option<String>,
}

pub struct Summarizer {
    client: Client,
    base_url: String,
}

impl Summarizer {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn generate_summary(&self, text: &str, model: SummaryModel) -> Result<Summary> {
        if text.trim().is_empty() {
            return Err(AppError::Summarizer("No text provided".to_string()));
        }

        let response = self
            .client
            .post(format!("{}/summarize", self.base_url))
            .json(&SummarizeRequest { text, model })
            .send()
            .await
            .map_err(|e| AppError::Summarizer(e.to_string()))?;

        let status = response.status();
        let body: SummarizeResponse = response
            .json()
            .await
            .map_err(|e| AppError::Summarizer(format!("HTTP {}: unreadable response: {}", status, e)))?;

        if !status.is_success() {
            return Err(AppError::Summarizer(format!(
                "API error: HTTP {} {}",
                status,
                body.error.unwrap_or_default()
            )));
        }

        let summary = body
            .summary
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Summarizer("No summary received from the server".to_string()))?;

        Ok(Summary {
            summary,
            model: body.model.unwrap_or_else(|| model.to_string().to_uppercase()),
            time_taken: body.time_taken.unwrap_or_default(),
        })
    }
}
