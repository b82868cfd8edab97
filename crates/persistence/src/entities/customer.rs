//! Customer entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;

use domain::models::Customer;

/// Database row mapping for the customers table.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerEntity {
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
    /// Stored as BOOLEAN on PostgreSQL and 0/1 on SQLite.
    pub blacklisted: Option<bool>,
}

impl From<CustomerEntity> for Customer {
    fn from(entity: CustomerEntity) -> Self {
        Self {
            id: entity.id,
            vendor_id: entity.vendor_id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            id_number: entity.id_number,
            license_number: entity.license_number,
            license_country: entity.license_country,
            license_expiry: entity.license_expiry,
            rating: entity.rating,
            blacklisted: entity.blacklisted.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_blacklist_flag_means_not_blacklisted() {
        let entity = CustomerEntity {
            id: 1,
            vendor_id: Some(1),
            name: "Jane Roe".to_string(),
            email: None,
            phone: None,
            id_number: None,
            license_number: Some("DL-1234".to_string()),
            license_country: Some("UK".to_string()),
            license_expiry: NaiveDate::from_ymd_opt(2030, 1, 31),
            rating: Some(4),
            blacklisted: None,
        };

        let customer: Customer = entity.into();
        assert!(!customer.blacklisted);
        assert_eq!(customer.rating, Some(4));
    }
}
