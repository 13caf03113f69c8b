use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use crate::models::{Category, PreferenceRecord, UserIdentity};

const KEY_PREFIX: &str = "user_";

/// Typed access to the per-user profile records in the local key-value store.
#[derive(Clone)]
pub struct LocalPreferences {
    store: Arc<dyn KeyValueStore>,
}

impl LocalPreferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn key(user: &UserIdentity) -> String {
        format!("{}{}", KEY_PREFIX, user.as_str())
    }

    pub async fn record(&self, user: &UserIdentity) -> Result<PreferenceRecord> {
        let bytes = self
            .store
            .get(&Self::key(user))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no preference record for {}", user)))?;
        let record = serde_json::from_slice(&bytes)?;
        Ok(record)
    }

    /// The stored category, rejecting values outside the known set.
    pub async fn category(&self, user: &UserIdentity) -> Result<Category> {
        self.record(user).await?.category()
    }

    /// Creates the record written at signup, starting on the default category.
    pub async fn create_record(&self, user: &UserIdentity, name: &str) -> Result<PreferenceRecord> {
        if self.store.get(&Self::key(user)).await?.is_some() {
            return Err(AppError::Write(format!("user {} already exists", user)));
        }

        let record = PreferenceRecord::new(user, name);
        self.write(user, &record).await?;
        Ok(record)
    }

    /// Overwrites the category of an existing record, leaving every other field intact.
    pub async fn set_category(&self, user: &UserIdentity, category: Category) -> Result<()> {
        let mut record = self.record(user).await?;
        record.set_category(category);
        self.write(user, &record).await
    }

    async fn write(&self, user: &UserIdentity, record: &PreferenceRecord) -> Result<()> {
        let bytes = serde_json::to_vec(record)?;
        self.store
            .set(&Self::key(user), bytes)
            .await
            .map_err(|e| AppError::Write(e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;
    use serde_json::Value;

    fn ann() -> UserIdentity {
        UserIdentity::new("ann@example.com").unwrap()
    }

    #[tokio::test]
    async fn set_category_requires_existing_record() {
        let prefs = LocalPreferences::new(Arc::new(MemoryStore::default()));
        let result = prefs.set_category(&ann(), Category::Sports).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn set_category_preserves_other_fields() {
        let store = Arc::new(MemoryStore::with(
            "user_ann@example.com",
            r#"{"name":"Ann","email":"ann@example.com","newsPreference":"general","avatar":"cat.png"}"#,
        ));
        let prefs = LocalPreferences::new(store.clone());

        prefs.set_category(&ann(), Category::Science).await.unwrap();

        let stored: Value = serde_json::from_str(&store.raw("user_ann@example.com").unwrap()).unwrap();
        assert_eq!(stored["newsPreference"], "science");
        assert_eq!(stored["name"], "Ann");
        assert_eq!(stored["avatar"], "cat.png");
    }

    #[tokio::test]
    async fn create_record_starts_on_general() {
        let store = Arc::new(MemoryStore::default());
        let prefs = LocalPreferences::new(store.clone());

        prefs.create_record(&ann(), "Ann").await.unwrap();

        assert_eq!(prefs.category(&ann()).await.unwrap(), Category::General);
        assert_eq!(prefs.record(&ann()).await.unwrap().name, "Ann");
    }

    #[tokio::test]
    async fn create_record_refuses_duplicates() {
        let prefs = LocalPreferences::new(Arc::new(MemoryStore::default()));
        prefs.create_record(&ann(), "Ann").await.unwrap();

        let second = prefs.create_record(&ann(), "Other Ann").await;
        assert!(matches!(second, Err(AppError::Write(_))));
        assert_eq!(prefs.record(&ann()).await.unwrap().name, "Ann");
    }

    #[tokio::test]
    async fn store_write_failure_is_a_write_error() {
        let store = MemoryStore::with("user_ann@example.com", r#"{"name":"Ann","newsPreference":"general"}"#)
            .failing_writes();
        let prefs = LocalPreferences::new(Arc::new(store));

        let result = prefs.set_category(&ann(), Category::Health).await;
        assert!(matches!(result, Err(AppError::Write(_))));
    }

    #[tokio::test]
    async fn store_read_failure_propagates() {
        let store = MemoryStore::with("user_ann@example.com", r#"{"name":"Ann","newsPreference":"general"}"#)
            .failing_reads();
        let prefs = LocalPreferences::new(Arc::new(store));

        assert!(matches!(prefs.category(&ann()).await, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn corrupt_record_is_a_json_error() {
        let prefs = LocalPreferences::new(Arc::new(MemoryStore::with("user_ann@example.com", "not json")));
        assert!(matches!(prefs.category(&ann()).await, Err(AppError::Json(_))));
    }
}
