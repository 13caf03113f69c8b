use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Category, SummaryEvent, UserIdentity};

/// The service that remembers which category each user last summarized.
#[async_trait]
pub trait RemotePreferenceStore: Send + Sync {
    /// Most recent summarized category. `NotFound` when the user has none yet.
    async fn last_category(&self, user: &UserIdentity) -> Result<Category>;

    async fn store_summary(&self, event: &SummaryEvent) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct LastCategoryResponse {
    category: Option<String>,
}

#[derive(Debug, Serialize)]
struct StoreSummaryRequest<'a> {
    email: &'a str,
    category: Category,
}

#[derive(Debug, Deserialize)]
struct StoreSummaryResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

pub struct PreferenceApiClient {
    client: Client,
    base_url: Url,
}

impl PreferenceApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("invalid preference API URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl RemotePreferenceStore for PreferenceApiClient {
    async fn last_category(&self, user: &UserIdentity) -> Result<Category> {
        let url = self.endpoint(&["api", "last-category", user.as_str()])?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::RemoteUnavailable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(AppError::NotFound(format!("no summarized category for {}", user)))
            }
            status if !status.is_success() => {
                return Err(AppError::RemoteUnavailable(format!(
                    "preference API returned HTTP {}",
                    status
                )))
            }
            _ => {}
        }

        let body: LastCategoryResponse = response
            .json()
            .await
            .map_err(|e| AppError::RemoteUnavailable(format!("malformed response: {}", e)))?;

        body.category
            .ok_or_else(|| AppError::RemoteUnavailable("response has no category".to_string()))?
            .parse()
    }

    async fn store_summary(&self, event: &SummaryEvent) -> Result<()> {
        let url = self.endpoint(&["api", "store-summary"])?;
        let request = StoreSummaryRequest {
            email: event.user.as_str(),
            category: event.category,
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Write(e.to_string()))?;

        let status = response.status();
        let body: Option<StoreSummaryResponse> = response.json().await.ok();

        match body {
            Some(body) if status.is_success() && body.success => Ok(()),
            Some(body) => Err(AppError::Write(
                body.message
                    .unwrap_or_else(|| format!("preference API returned HTTP {}", status)),
            )),
            None => Err(AppError::Write(format!(
                "preference API returned HTTP {} with an unreadable body",
                status
            ))),
        }
    }
}
