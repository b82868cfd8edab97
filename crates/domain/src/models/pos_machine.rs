//! Point-of-sale machine domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// POS machine linked to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PosMachine {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub serial_number: String,
    pub account_id: Option<i64>,
}

/// Request to register a POS machine.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewPosMachine {
    pub tenant_id: i64,
    #[validate(length(min = 1, max = 100, message = "Serial number must be 1-100 characters"))]
    pub serial_number: String,
    pub account_id: Option<i64>,
}
