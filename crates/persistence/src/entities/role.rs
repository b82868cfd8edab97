//! Role entity (database row mapping).

use sqlx::FromRow;

use domain::models::Role;

/// Database row mapping for the roles table.
#[derive(Debug, Clone, FromRow)]
pub struct RoleEntity {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub name: String,
    /// Comma-delimited capability list.
    pub permissions: String,
}

impl From<RoleEntity> for Role {
    fn from(entity: RoleEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            name: entity.name,
            permissions: entity.permissions,
        }
    }
}
