use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Category, UserIdentity};
use crate::error::Result;

/// Per-user profile kept in the local store under `user_<email>`.
///
/// The category is kept as the raw stored string so that a value outside the known
/// set can be told apart from a corrupt record. Fields this crate does not know about
/// are carried through unchanged on rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "newsPreference", default)]
    pub news_preference: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PreferenceRecord {
    pub fn new(user: &UserIdentity, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Some(user.as_str().to_string()),
            news_preference: Category::default().to_string(),
            extra: Map::new(),
        }
    }

    pub fn category(&self) -> Result<Category> {
        self.news_preference.parse()
    }

    pub fn set_category(&mut self, category: Category) {
        self.news_preference = category.to_string();
    }
}

/// A successful summarization, reported to the remote preference service.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEvent {
    pub user: UserIdentity,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
}

impl SummaryEvent {
    pub fn now(user: UserIdentity, category: Category) -> Self {
        Self {
            user,
            category,
            timestamp: Utc::now(),
        }
    }
}
