//! Account repository for database operations.

use domain::models::{Account, NewAccount};

use crate::db::ConnectionManager;
use crate::entities::AccountEntity;
use crate::error::PersistenceError;
use crate::query::{Filters, Insert, Scope, Select};
use crate::schema::ACCOUNTS;

/// Repository for financial account database operations.
#[derive(Clone)]
pub struct AccountRepository {
    db: ConnectionManager,
}

impl AccountRepository {
    /// Creates a new AccountRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    pub async fn create(&self, account: NewAccount) -> Result<Account, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &ACCOUNTS)
            .value("tenant_id", account.tenant_id)
            .value("account_type", account.account_type)
            .value("account_name", account.account_name)
            .build("add_account")?;
        let entity: AccountEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List accounts, optionally restricted to one tenant.
    pub async fn list(
        &self,
        tenant: Scope<i64>,
        filters: &Filters,
    ) -> Result<Vec<Account>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &ACCOUNTS)
            .scope("tenant_id", tenant)
            .filters(filters)
            .order_by("id")
            .build("get_accounts")?;
        let entities: Vec<AccountEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}
