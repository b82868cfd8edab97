//! Account domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account domain model, scoped by tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Account {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub account_type: String,
    pub account_name: String,
}

/// Request to open an account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewAccount {
    pub tenant_id: i64,
    #[validate(length(min = 1, message = "Account type is required"))]
    pub account_type: String,
    #[validate(length(min = 1, max = 200, message = "Account name must be 1-200 characters"))]
    pub account_name: String,
}
