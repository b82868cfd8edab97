//! Customer domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Customer {
    pub id: i64,
    pub vendor_id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub license_number: Option<String>,
    pub license_country: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub rating: Option<i64>,
    pub blacklisted: bool,
}

/// Request to register a customer with a vendor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewCustomer {
    pub vendor_id: i64,
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub license_number: Option<String>,
    pub license_country: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    #[validate(range(min = 0, max = 5, message = "Rating must be between 0 and 5"))]
    pub rating: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_out_of_range() {
        let customer = NewCustomer {
            vendor_id: 1,
            name: "Jane".into(),
            email: None,
            phone: None,
            id_number: None,
            license_number: None,
            license_country: None,
            license_expiry: None,
            rating: Some(9),
        };
        assert!(customer.validate().is_err());
    }
}
