//! Role repository for database operations.

use domain::models::{NewRole, Permissions, Role};

use crate::db::ConnectionManager;
use crate::entities::RoleEntity;
use crate::error::PersistenceError;
use crate::query::{Filters, Insert, Params, Scope, Select};
use crate::schema::ROLES;

/// Repository for tenant role database operations.
#[derive(Clone)]
pub struct RoleRepository {
    db: ConnectionManager,
}

impl RoleRepository {
    /// Creates a new RoleRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Create a role with its capability list.
    pub async fn create(&self, role: NewRole) -> Result<Role, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &ROLES)
            .value("tenant_id", role.tenant_id)
            .value("name", role.name)
            .value("permissions", role.permissions.to_string())
            .build("add_role")?;
        let entity: RoleEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List roles, optionally restricted to one tenant.
    pub async fn list(
        &self,
        tenant: Scope<i64>,
        filters: &Filters,
    ) -> Result<Vec<Role>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &ROLES)
            .scope("tenant_id", tenant)
            .filters(filters)
            .order_by("id")
            .build("get_roles")?;
        let entities: Vec<RoleEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Whether the role assigned to `username` grants `permission`.
    ///
    /// Unknown users and users without a role have no permissions.
    pub async fn check_permission(
        &self,
        username: &str,
        permission: &str,
    ) -> Result<bool, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let mut params = Params::new(conn.dialect());
        let sql = format!(
            "SELECT roles.permissions FROM roles \
             JOIN users ON roles.id = users.role_id \
             WHERE users.username = {}",
            params.push(username)
        );
        let statement = params.finish("check_permission", sql);

        let granted: Option<String> = conn.fetch_optional_scalar(&statement).await?;
        Ok(granted.is_some_and(|raw| Permissions::parse(&raw).contains(permission)))
    }
}
