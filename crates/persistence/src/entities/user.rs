//! User entity (database row mapping).

use sqlx::FromRow;

use domain::models::User;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub username: String,
    pub role_id: Option<i64>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            username: entity.username,
            role_id: entity.role_id,
        }
    }
}
