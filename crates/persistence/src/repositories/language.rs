//! Language repository for database operations.

use domain::models::{Language, NewLanguage};

use crate::db::ConnectionManager;
use crate::entities::LanguageEntity;
use crate::error::PersistenceError;
use crate::query::{Insert, Select};
use crate::schema::LANGUAGES;

/// Repository for supported UI languages.
#[derive(Clone)]
pub struct LanguageRepository {
    db: ConnectionManager,
}

impl LanguageRepository {
    /// Creates a new LanguageRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Register a language. Codes are unique.
    pub async fn create(&self, language: NewLanguage) -> Result<Language, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &LANGUAGES)
            .value("code", language.code)
            .value("name", language.name)
            .build("add_language")?;
        let entity: LanguageEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List every registered language in insertion order.
    pub async fn list(&self) -> Result<Vec<Language>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &LANGUAGES)
            .order_by("id")
            .build("get_languages")?;
        let entities: Vec<LanguageEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}
