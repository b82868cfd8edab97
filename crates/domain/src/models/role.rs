//! Role domain models.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::Permissions;

/// Role domain model, scoped by tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Role {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub name: String,
    /// Comma-delimited capability list as stored.
    pub permissions: String,
}

impl Role {
    /// Parsed capability list.
    pub fn capabilities(&self) -> Permissions {
        Permissions::parse(&self.permissions)
    }
}

/// Request to create a role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewRole {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_permissions"))]
    pub permissions: Permissions,
    pub tenant_id: Option<i64>,
}

fn validate_permissions(permissions: &Permissions) -> Result<(), ValidationError> {
    if permissions.is_empty() {
        let mut err = ValidationError::new("permissions_empty");
        err.message = Some("At least one permission is required".into());
        return Err(err);
    }
    Ok(())
}
