//! User domain models.
//!
//! Users hold a single role; `check_permission` resolves a username to
//! that role's capability list.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub username: String,
    pub role_id: Option<i64>,
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewUser {
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,
    pub role_id: Option<i64>,
    pub tenant_id: Option<i64>,
}
