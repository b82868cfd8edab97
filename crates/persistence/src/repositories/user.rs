//! User repository for database operations.

use domain::models::{NewUser, User};

use crate::db::ConnectionManager;
use crate::entities::UserEntity;
use crate::error::PersistenceError;
use crate::query::{Filters, Insert, Scope, Select};
use crate::schema::USERS;

/// Repository for user-to-role assignments.
#[derive(Clone)]
pub struct UserRepository {
    db: ConnectionManager,
}

impl UserRepository {
    /// Creates a new UserRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Create a user, optionally assigned to a role.
    pub async fn create(&self, user: NewUser) -> Result<User, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &USERS)
            .value("tenant_id", user.tenant_id)
            .value("username", user.username)
            .value("role_id", user.role_id)
            .build("add_user")?;
        let entity: UserEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List users, optionally restricted to one tenant.
    pub async fn list(
        &self,
        tenant: Scope<i64>,
        filters: &Filters,
    ) -> Result<Vec<User>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &USERS)
            .scope("tenant_id", tenant)
            .filters(filters)
            .order_by("id")
            .build("get_users")?;
        let entities: Vec<UserEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}
