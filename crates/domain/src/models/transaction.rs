//! Financial transaction domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Transaction domain model, scoped by tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub vat_amount: Option<f64>,
    pub account_id: Option<i64>,
    pub payment_type: Option<String>,
    /// Set by the database when the row is written.
    pub date: Option<NaiveDateTime>,
}

/// Request to record a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewTransaction {
    pub tenant_id: i64,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    #[serde(default)]
    pub vat_amount: f64,
    pub account_id: Option<i64>,
    pub payment_type: Option<String>,
}

impl NewTransaction {
    /// Creates a transaction with no VAT, account or payment type.
    pub fn new(tenant_id: i64, category: impl Into<String>, amount: f64) -> Self {
        Self {
            tenant_id,
            category: category.into(),
            amount,
            description: None,
            vat_amount: 0.0,
            account_id: None,
            payment_type: None,
        }
    }
}
