//! Transaction repository for database operations.

use domain::models::{NewTransaction, Transaction};

use crate::db::ConnectionManager;
use crate::entities::TransactionEntity;
use crate::error::PersistenceError;
use crate::query::{Filters, Insert, Scope, Select};
use crate::schema::TRANSACTIONS;

/// Repository for ledger transactions.
#[derive(Clone)]
pub struct TransactionRepository {
    db: ConnectionManager,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Record a transaction. The backend stamps its date.
    pub async fn create(&self, transaction: NewTransaction) -> Result<Transaction, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &TRANSACTIONS)
            .value("tenant_id", transaction.tenant_id)
            .value("category", transaction.category)
            .value("amount", transaction.amount)
            .value("description", transaction.description)
            .value("vat_amount", transaction.vat_amount)
            .value("account_id", transaction.account_id)
            .value("payment_type", transaction.payment_type)
            .build("add_transaction")?;
        let entity: TransactionEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List transactions, optionally restricted to one tenant.
    pub async fn list(
        &self,
        tenant: Scope<i64>,
        filters: &Filters,
    ) -> Result<Vec<Transaction>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &TRANSACTIONS)
            .scope("tenant_id", tenant)
            .filters(filters)
            .order_by("id")
            .build("get_transactions")?;
        let entities: Vec<TransactionEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}
