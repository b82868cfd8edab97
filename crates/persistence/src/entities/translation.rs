//! Translation entity (database row mapping).

use sqlx::FromRow;

use domain::models::Translation;

#[derive(Debug, Clone, FromRow)]
pub struct TranslationEntity {
    pub id: i64,
    pub lang_code: Option<String>,
    pub key: String,
    pub value: String,
}

impl From<TranslationEntity> for Translation {
    fn from(entity: TranslationEntity) -> Self {
        Self {
            id: entity.id,
            lang_code: entity.lang_code,
            key: entity.key,
            value: entity.value,
        }
    }
}
