//! Transaction entity (database row mapping).

use chrono::NaiveDateTime;
use sqlx::FromRow;

use domain::models::Transaction;

/// Database row mapping for the transactions table.
#[derive(Debug, Clone, FromRow)]
pub struct TransactionEntity {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub vat_amount: Option<f64>,
    pub account_id: Option<i64>,
    pub payment_type: Option<String>,
    pub date: Option<NaiveDateTime>,
}

impl From<TransactionEntity> for Transaction {
    fn from(entity: TransactionEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            category: entity.category,
            amount: entity.amount,
            description: entity.description,
            vat_amount: entity.vat_amount,
            account_id: entity.account_id,
            payment_type: entity.payment_type,
            date: entity.date,
        }
    }
}
