//! Vendor domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Status given to vendors that are added without one.
pub const DEFAULT_VENDOR_STATUS: &str = "Lead";

/// Sales pipeline stage given to vendors that are added without one.
pub const DEFAULT_SALES_STAGE: &str = "Lead";

/// Country recorded for vendors added through the detailed form, which does not ask for one.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Vendor domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub country: String,
    pub city: Option<String>,
    pub sales_agent: Option<String>,
    pub branch: Option<String>,
    pub status: String,
    pub sales_stage: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub account_id: Option<i64>,
}

/// Request to add a vendor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewVendor {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub mobile: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    pub city: Option<String>,
    pub sales_agent: Option<String>,
    pub branch: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_sales_stage")]
    pub sales_stage: String,
}

impl NewVendor {
    /// Creates a vendor request with the default status and sales stage.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        mobile: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            mobile: mobile.into(),
            country: country.into(),
            city: None,
            sales_agent: None,
            branch: None,
            status: default_status(),
            sales_stage: default_sales_stage(),
        }
    }
}

fn default_status() -> String {
    DEFAULT_VENDOR_STATUS.to_string()
}

fn default_sales_stage() -> String {
    DEFAULT_SALES_STAGE.to_string()
}

/// Request to add a vendor with full contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct VendorDetails {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    pub city: Option<String>,
    pub branch: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub account_id: Option<i64>,
}

/// Partial vendor update. Only fields that are `Some` are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct VendorUpdate {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub sales_agent: Option<String>,
    pub branch: Option<String>,
    pub status: Option<String>,
    pub sales_stage: Option<String>,
}

impl VendorUpdate {
    /// Returns true if no field would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.mobile.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.sales_agent.is_none()
            && self.branch.is_none()
            && self.status.is_none()
            && self.sales_stage.is_none()
    }
}
