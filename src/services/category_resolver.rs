use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Category, SummaryEvent, UserIdentity};
use crate::preferences::LocalPreferences;

use super::RemotePreferenceStore;

/// Where a category can come from, in the order they are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    LastSummarized,
    LocalPreference,
}

const LOOKUP_ORDER: [Source; 2] = [Source::LastSummarized, Source::LocalPreference];

/// Decides which category a user sees when the news view opens.
#[derive(Clone)]
pub struct CategoryResolver {
    remote: Arc<dyn RemotePreferenceStore>,
    local: LocalPreferences,
}

impl CategoryResolver {
    pub fn new(remote: Arc<dyn RemotePreferenceStore>, local: LocalPreferences) -> Self {
        Self { remote, local }
    }

    /// Never fails: a failing source is logged and the next one is tried, ending at
    /// [`Category::General`]. An explicit category skips every lookup.
    pub async fn resolve(&self, user: &UserIdentity, explicit: Option<Category>) -> Category {
        if let Some(category) = explicit {
            return category;
        }

        for source in LOOKUP_ORDER {
            match self.lookup(source, user).await {
                Ok(category) => {
                    tracing::debug!("Resolved category {} for {} from {:?}", category, user, source);
                    return category;
                }
                Err(AppError::NotFound(reason)) => {
                    tracing::debug!("{:?} has nothing for {}: {}", source, user, reason);
                }
                Err(e) => {
                    tracing::warn!("{:?} lookup failed for {}, skipping: {}", source, user, e);
                }
            }
        }

        Category::default()
    }

    async fn lookup(&self, source: Source, user: &UserIdentity) -> Result<Category> {
        match source {
            Source::LastSummarized => self.remote.last_category(user).await,
            Source::LocalPreference => self.local.category(user).await,
        }
    }

    /// Remembers the category of a summary that was just produced.
    /// Callers should treat an error as non-fatal.
    pub async fn record_summarization(&self, user: &UserIdentity, category: Category) -> Result<()> {
        let event = SummaryEvent::now(user.clone(), category);
        tracing::debug!("Recording summary of {} for {} at {}", category, user, event.timestamp);
        self.remote.store_summary(&event).await.map_err(|e| match e {
            AppError::Write(_) => e,
            other => AppError::Write(other.to_string()),
        })
    }

    pub async fn set_preferred_category(&self, user: &UserIdentity, category: Category) -> Result<()> {
        self.local.set_category(user, category).await
    }
}
