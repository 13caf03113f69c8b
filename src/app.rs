use std::sync::Arc;

use crate::ai::Summarizer;
use crate::config::Config;
use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::models::{Category, Headline, PreferenceRecord, Region, Summary, SummaryModel, UserIdentity};
use crate::news::HeadlineFetcher;
use crate::preferences::LocalPreferences;
use crate::services::{CategoryResolver, PreferenceApiClient};

/// Result of a summarize request. `recorded` is false when the summary could not be
/// remembered remotely; the summary itself is still good.
#[derive(Debug)]
pub struct SummaryOutcome {
    pub headline: Headline,
    pub summary: Summary,
    pub recorded: bool,
}

pub struct App {
    local: LocalPreferences,
    resolver: CategoryResolver,
    fetcher: HeadlineFetcher,
    summarizer: Summarizer,
    default_region: Region,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let repository = Repository::new(&config.db_path).await?;
        let local = LocalPreferences::new(Arc::new(repository));
        let remote = PreferenceApiClient::new(&config.preference_api_url, config.request_timeout())?;
        let fetcher = HeadlineFetcher::new(&config.news_api())?;
        let summarizer = Summarizer::new(&config.summarizer_url, config.request_timeout())?;

        Ok(Self::from_parts(
            local.clone(),
            CategoryResolver::new(Arc::new(remote), local),
            fetcher,
            summarizer,
            Region::new(config.default_country.clone()),
        ))
    }

    pub fn from_parts(
        local: LocalPreferences,
        resolver: CategoryResolver,
        fetcher: HeadlineFetcher,
        summarizer: Summarizer,
        default_region: Region,
    ) -> Self {
        Self {
            local,
            resolver,
            fetcher,
            summarizer,
            default_region,
        }
    }

    pub async fn signup(&self, user: &UserIdentity, name: &str) -> Result<PreferenceRecord> {
        let record = self.local.create_record(user, name).await?;
        tracing::info!("Created preference record for {}", user);
        Ok(record)
    }

    pub async fn set_preferred_category(&self, user: &UserIdentity, category: Category) -> Result<()> {
        self.resolver.set_preferred_category(user, category).await
    }

    /// Entering the news view: resolve the category once, then load its headlines.
    pub async fn open(
        &self,
        user: UserIdentity,
        explicit_category: Option<Category>,
        region: Option<Region>,
    ) -> Result<NewsSession<'_>> {
        let category = self.resolver.resolve(&user, explicit_category).await;
        let mut session = NewsSession {
            app: self,
            user,
            category,
            region: region.unwrap_or_else(|| self.default_region.clone()),
            headlines: Vec::new(),
        };
        session.refresh().await?;
        Ok(session)
    }
}

/// One user's view of the headlines. Changing category or region refetches.
pub struct NewsSession<'a> {
    app: &'a App,
    pub user: UserIdentity,
    pub category: Category,
    pub region: Region,
    pub headlines: Vec<Headline>,
}

impl NewsSession<'_> {
    pub async fn refresh(&mut self) -> Result<()> {
        self.headlines = self
            .app
            .fetcher
            .fetch_headlines(self.category, &self.region)
            .await?;

        if self.headlines.is_empty() {
            tracing::info!("No headlines for {} in {}", self.category, self.region);
        }
        Ok(())
    }

    /// Remembers the choice locally (best effort) and shows that category.
    pub async fn select_category(&mut self, category: Category) -> Result<()> {
        if let Err(e) = self.app.resolver.set_preferred_category(&self.user, category).await {
            tracing::warn!("Could not save preferred category for {}: {}", self.user, e);
        }
        self.category = category;
        self.refresh().await
    }

    pub async fn select_region(&mut self, region: Region) -> Result<()> {
        self.region = region;
        self.refresh().await
    }

    pub async fn summarize(&self, index: usize, model: SummaryModel) -> Result<SummaryOutcome> {
        let headline = self
            .headlines
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("no headline at position {}", index)))?;

        let summary = self
            .app
            .summarizer
            .generate_summary(headline.summary_source(), model)
            .await?;

        let recorded = match self
            .app
            .resolver
            .record_summarization(&self.user, self.category)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Summary produced but category was not recorded: {}", e);
                false
            }
        };

        Ok(SummaryOutcome {
            headline,
            summary,
            recorded,
        })
    }
}
