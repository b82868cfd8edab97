//! Language entity (database row mapping).

use sqlx::FromRow;

use domain::models::Language;

#[derive(Debug, Clone, FromRow)]
pub struct LanguageEntity {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl From<LanguageEntity> for Language {
    fn from(entity: LanguageEntity) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
        }
    }
}
