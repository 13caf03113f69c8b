use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Credential;
use crate::error::{AppError, Result};
use crate::models::{Category, Region};

const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";

/// One top-headlines request made with a single credential.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn top_headlines(
        &self,
        credential: &Credential,
        category: Category,
        region: &Region,
    ) -> Result<Vec<Article>>;
}

#[derive(Debug, Deserialize)]
struct TopHeadlinesResponse {
    status: Option<String>,
    message: Option<String>,
    articles: Option<Vec<Article>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
}

pub struct NewsApiClient {
    client: Client,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsdesk/1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    async fn top_headlines(
        &self,
        credential: &Credential,
        category: Category,
        region: &Region,
    ) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, TOP_HEADLINES_PATH))
            .query(&[
                ("country", region.as_str()),
                ("category", category.as_str()),
                ("apiKey", credential.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<TopHeadlinesResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_default();
            return Err(AppError::RemoteUnavailable(format!(
                "News API error: HTTP {} {}",
                status, detail
            )));
        }

        let body: TopHeadlinesResponse = response
            .json()
            .await
            .map_err(|e| AppError::RemoteUnavailable(format!("Failed to parse News API response: {}", e)))?;

        if let Some(status) = body.status.as_deref().filter(|s| *s != "ok") {
            return Err(AppError::RemoteUnavailable(format!(
                "News API returned status {}: {}",
                status,
                body.message.unwrap_or_default()
            )));
        }

        body.articles
            .ok_or_else(|| AppError::RemoteUnavailable("News API response has no articles".to_string()))
    }
}
