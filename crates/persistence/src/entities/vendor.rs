//! Vendor entity (database row mapping).

use sqlx::FromRow;

use domain::models::Vendor;

/// Database row mapping for the vendors table.
#[derive(Debug, Clone, FromRow)]
pub struct VendorEntity {
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

impl From<VendorEntity> for Vendor {
    fn from(entity: VendorEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            mobile: entity.mobile,
            country: entity.country,
            city: entity.city,
            sales_agent: entity.sales_agent,
            branch: entity.branch,
            status: entity.status,
            sales_stage: entity.sales_stage,
            address: entity.address,
            phone: entity.phone,
            website: entity.website,
            description: entity.description,
            account_id: entity.account_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_entity_to_domain() {
        let entity = VendorEntity {
            id: 3,
            name: "Desert Wheels".to_string(),
            email: Some("ops@desertwheels.example".to_string()),
            mobile: Some("+971500000000".to_string()),
            country: "UAE".to_string(),
            city: Some("Dubai".to_string()),
            sales_agent: None,
            branch: None,
            status: "Lead".to_string(),
            sales_stage: Some("Lead".to_string()),
            address: None,
            phone: None,
            website: None,
            description: None,
            account_id: Some(1),
        };

        let vendor: Vendor = entity.clone().into();
        assert_eq!(vendor.id, entity.id);
        assert_eq!(vendor.email, entity.email);
        assert_eq!(vendor.sales_stage.as_deref(), Some("Lead"));
        assert_eq!(vendor.account_id, Some(1));
    }
}
