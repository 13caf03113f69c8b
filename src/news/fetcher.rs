use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{Credential, NewsApiConfig};
use crate::error::{AppError, Result};
use crate::models::{Category, Headline, Region};

use super::client::{Article, HeadlineSource, NewsApiClient};

/// Fetches top headlines, failing over through the configured credentials in order.
#[derive(Clone)]
pub struct HeadlineFetcher {
    credentials: Arc<[Credential]>,
    source: Arc<dyn HeadlineSource>,
}

impl HeadlineFetcher {
    pub fn new(config: &NewsApiConfig) -> Result<Self> {
        let source = NewsApiClient::new(&config.base_url, config.timeout)?;
        Self::with_source(config.credentials.clone(), Arc::new(source))
    }

    pub fn with_source(credentials: Vec<Credential>, source: Arc<dyn HeadlineSource>) -> Result<Self> {
        if credentials.is_empty() {
            return Err(AppError::Config(
                "no news API keys configured (set news_api_keys in config.toml)".to_string(),
            ));
        }

        Ok(Self {
            credentials: credentials.into(),
            source,
        })
    }

    /// One pass over the credentials: the first well-formed answer wins, even an empty one.
    pub async fn fetch_headlines(&self, category: Category, region: &Region) -> Result<Vec<Headline>> {
        let mut last_error = None;

        for (index, credential) in self.credentials.iter().enumerate() {
            match self.source.top_headlines(credential, category, region).await {
                Ok(articles) => {
                    tracing::debug!(
                        "Fetched {} {} headlines for {} with key #{}",
                        articles.len(),
                        category,
                        region,
                        index
                    );
                    return Ok(articles
                        .into_iter()
                        .map(|article| headline_from_article(article, category))
                        .collect());
                }
                Err(e) => {
                    tracing::warn!("News API key #{} failed, trying next key: {}", index, e);
                    last_error = Some(e);
                }
            }
        }

        tracing::error!("All {} news API keys failed", self.credentials.len());
        Err(AppError::AllCredentialsExhausted {
            attempts: self.credentials.len(),
            last_error: Box::new(last_error.unwrap_or_else(|| {
                AppError::RemoteUnavailable("no attempt was made".to_string())
            })),
        })
    }
}

fn headline_from_article(article: Article, category: Category) -> Headline {
    Headline {
        title: article
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Untitled".to_string()),
        description: article.description.map(|d| plain_text(&d)),
        url: article.url.filter(|u| !u.trim().is_empty()),
        image_url: article.url_to_image,
        published_at: article.published_at.as_deref().and_then(parse_datetime),
        category,
    }
}

/// Some providers put markup in descriptions; flatten it to text.
fn plain_text(text: &str) -> String {
    if !text.contains('<') {
        return text.trim().to_string();
    }

    match html2text::from_read(text.as_bytes(), 10_000) {
        Ok(plain) => plain.trim().to_string(),
        Err(e) => {
            tracing::debug!("Failed to convert description HTML to text: {}", e);
            text.trim().to_string()
        }
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}


#[cfg(test)]
mod tests {
    use super::testing::{article, failure, ScriptedSource};
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn keys(names: &[&str]) -> Vec<Credential> {
        names.iter().map(|n| Credential::new(*n)).collect()
    }

    fn fetcher(source: &Arc<ScriptedSource>) -> HeadlineFetcher {
        HeadlineFetcher::with_source(keys(&["A", "B", "C"]), source.clone()).unwrap()
    }

    #[tokio::test]
    async fn fails_over_until_a_key_succeeds() {
        let source = Arc::new(ScriptedSource::new(vec![
            failure("rate limited"),
            failure("unauthorized"),
            Ok(vec![article("Moon Landing"), article("Mars Rover")]),
        ]));

        let headlines = fetcher(&source)
            .fetch_headlines(Category::Science, &Region::default())
            .await
            .unwrap();

        assert_eq!(source.keys_used(), vec!["A", "B", "C"]);
        assert_eq!(headlines.len(), 2);
        assert!(headlines.iter().all(|h| h.category == Category::Science));
        assert_eq!(headlines[0].title, "Moon Landing");
    }

    #[tokio::test]
    async fn exhausting_every_key_is_terminal() {
        let source = Arc::new(ScriptedSource::new(vec![
            failure("first"),
            failure("second"),
            failure("third"),
            Ok(vec![article("Never Reached")]),
        ]));

        let result = fetcher(&source)
            .fetch_headlines(Category::Business, &Region::default())
            .await;

        assert_eq!(source.keys_used(), vec!["A", "B", "C"]);
        match result {
            Err(AppError::AllCredentialsExhausted { attempts, last_error }) => {
                assert_eq!(attempts, 3);
                assert!(last_error.to_string().contains("third"));
            }
            other => panic!("expected AllCredentialsExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_result_is_not_a_failure() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![]), Ok(vec![article("Unused")])]));

        let headlines = fetcher(&source)
            .fetch_headlines(Category::Health, &Region::default())
            .await
            .unwrap();

        assert!(headlines.is_empty());
        assert_eq!(source.keys_used(), vec!["A"]);
    }

    #[tokio::test]
    async fn every_fetch_starts_from_the_first_key() {
        let source = Arc::new(ScriptedSource::new(vec![
            failure("busy"),
            Ok(vec![article("One")]),
            Ok(vec![article("Two")]),
        ]));
        let fetcher = fetcher(&source);

        fetcher.fetch_headlines(Category::General, &Region::default()).await.unwrap();
        fetcher.fetch_headlines(Category::Sports, &Region::default()).await.unwrap();

        assert_eq!(source.keys_used(), vec!["A", "B", "A"]);
    }

    #[test]
    fn empty_credential_list_is_rejected() {
        let source = Arc::new(ScriptedSource::new(vec![]));
        let result = HeadlineFetcher::with_source(Vec::new(), source);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn article_fields_map_onto_headline() {
        let headline = headline_from_article(
            Article {
                title: None,
                description: Some("<p>Storms <b>ahead</b></p>".to_string()),
                url: Some("https://example.com/weather".to_string()),
                url_to_image: Some("https://example.com/cloud.png".to_string()),
                published_at: Some("2025-03-01T08:00:00Z".to_string()),
            },
            Category::General,
        );

        assert_eq!(headline.title, "Untitled");
        assert!(!headline.description.as_deref().unwrap().contains('<'));
        assert!(headline.description.as_deref().unwrap().contains("Storms"));
        assert_eq!(headline.image_url.as_deref(), Some("https://example.com/cloud.png"));
        assert_eq!(
            headline.published_at.map(|d| d.to_rfc3339()),
            Some("2025-03-01T08:00:00+00:00".to_string())
        );
    }

    #[tokio::test]
    async fn article_without_link_does_not_fail_the_key() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::UrlEncoded("apiKey".into(), "A".into()))
            .with_status(200)
            .with_body(
                r#"{"status":"ok","totalResults":2,"articles":[
                    {"title":"Budget Passes","url":"https://example.com/budget"},
                    {"title":"[Removed]","url":null}
                ]}"#,
            )
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::UrlEncoded("apiKey".into(), "B".into()))
            .expect(0)
            .create_async()
            .await;

        let config = NewsApiConfig {
            base_url: server.url(),
            credentials: keys(&["A", "B"]),
            timeout: Duration::from_secs(5),
        };
        let headlines = HeadlineFetcher::new(&config)
            .unwrap()
            .fetch_headlines(Category::Business, &Region::default())
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].url.as_deref(), Some("https://example.com/budget"));
        assert_eq!(headlines[1].title, "[Removed]");
        assert_eq!(headlines[1].url, None);
    }

    #[tokio::test]
    async fn http_failover_hits_each_key_once() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::UrlEncoded("apiKey".into(), "A".into()))
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::UrlEncoded("apiKey".into(), "B".into()))
            .with_status(200)
            .with_body(r#"{"status":"ok","totalResults":1,"articles":[{"title":"Hello","url":"https://example.com/hello"}]}"#)
            .expect(1)
            .create_async()
            .await;
        let third = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::UrlEncoded("apiKey".into(), "C".into()))
            .expect(0)
            .create_async()
            .await;

        let config = NewsApiConfig {
            base_url: server.url(),
            credentials: keys(&["A", "B", "C"]),
            timeout: Duration::from_secs(5),
        };
        let headlines = HeadlineFetcher::new(&config)
            .unwrap()
            .fetch_headlines(Category::Entertainment, &Region::new("ca"))
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        third.assert_async().await;
        assert_eq!(headlines.len(), 1);
        assert_eq!(headlines[0].category, Category::Entertainment);
    }
}
