//! Account entity (database row mapping).

use sqlx::FromRow;

use domain::models::Account;

/// Database row mapping for the accounts table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountEntity {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub account_type: String,
    pub account_name: String,
}

impl From<AccountEntity> for Account {
    fn from(entity: AccountEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            account_type: entity.account_type,
            account_name: entity.account_name,
        }
    }
}
