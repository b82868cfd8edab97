//! Translation repository for database operations.

use domain::models::{NewTranslation, Translation};

use crate::db::ConnectionManager;
use crate::entities::TranslationEntity;
use crate::error::PersistenceError;
use crate::query::{Insert, Select};
use crate::schema::TRANSLATIONS;

/// Repository for UI string translations.
#[derive(Clone)]
pub struct TranslationRepository {
    db: ConnectionManager,
}

impl TranslationRepository {
    /// Creates a new TranslationRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Store the translation of a key for one language code.
    pub async fn create(
        &self,
        translation: NewTranslation,
    ) -> Result<Translation, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &TRANSLATIONS)
            .value("lang_code", translation.lang_code)
            .value("key", translation.key)
            .value("value", translation.value)
            .build("add_translation")?;
        let entity: TranslationEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// All translations for one language.
    pub async fn list(&self, lang_code: &str) -> Result<Vec<Translation>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &TRANSLATIONS)
            .eq("lang_code", lang_code)
            .order_by("id")
            .build("get_translations")?;
        let entities: Vec<TranslationEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}
