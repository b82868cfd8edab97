//! Vendor repository for database operations.

use tracing::debug;

use domain::models::{
    NewVendor, Vendor, VendorDetails, VendorUpdate, DEFAULT_VENDOR_STATUS, UNKNOWN_COUNTRY,
};

use crate::db::ConnectionManager;
use crate::entities::VendorEntity;
use crate::error::PersistenceError;
use crate::query::{delete_by_id, Filters, Insert, Select, Update};
use crate::schema::VENDORS;

/// Repository for vendor-related database operations.
#[derive(Clone)]
pub struct VendorRepository {
    db: ConnectionManager,
}

impl VendorRepository {
    /// Creates a new VendorRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Insert a vendor with its primary contact details.
    pub async fn create(&self, vendor: NewVendor) -> Result<Vendor, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &VENDORS)
            .value("name", vendor.name)
            .value("email", vendor.email)
            .value("mobile", vendor.mobile)
            .value("country", vendor.country)
            .value("city", vendor.city)
            .value("sales_agent", vendor.sales_agent)
            .value("branch", vendor.branch)
            .value("status", vendor.status)
            .value("sales_stage", vendor.sales_stage)
            .build("add_vendor")?;
        let entity: VendorEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// Insert a vendor from its extended contact sheet.
    ///
    /// The sheet carries no country or status, so the vendor is recorded as
    /// an `Unknown`-country lead.
    pub async fn create_detailed(&self, details: VendorDetails) -> Result<Vendor, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &VENDORS)
            .value("name", details.name)
            .value("country", UNKNOWN_COUNTRY)
            .value("status", DEFAULT_VENDOR_STATUS)
            .value("city", details.city)
            .value("branch", details.branch)
            .value("address", details.address)
            .value("phone", details.phone)
            .value("email", details.email)
            .value("website", details.website)
            .value("description", details.description)
            .value("account_id", details.account_id)
            .build("add_vendor_detailed")?;
        let entity: VendorEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List vendors matching every filter. No filters lists all vendors.
    pub async fn list(&self, filters: &Filters) -> Result<Vec<Vendor>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &VENDORS)
            .filters(filters)
            .order_by("id")
            .build("get_vendors")?;
        let entities: Vec<VendorEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Update the supplied fields of a vendor.
    ///
    /// Returns the updated vendor, or `None` if the vendor does not exist or
    /// the update carried no fields.
    pub async fn update(
        &self,
        id: i64,
        update: VendorUpdate,
    ) -> Result<Option<Vendor>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Update::new(conn.dialect(), &VENDORS)
            .set_opt("name", update.name)
            .set_opt("email", update.email)
            .set_opt("mobile", update.mobile)
            .set_opt("country", update.country)
            .set_opt("city", update.city)
            .set_opt("sales_agent", update.sales_agent)
            .set_opt("branch", update.branch)
            .set_opt("status", update.status)
            .set_opt("sales_stage", update.sales_stage)
            .build("update_vendor", id)?;

        let Some(statement) = statement else {
            debug!(vendor_id = id, "empty vendor update skipped");
            return Ok(None);
        };
        let entity: Option<VendorEntity> = conn.fetch_optional(&statement).await?;
        Ok(entity.map(Into::into))
    }

    /// Delete a vendor. Returns the number of rows removed.
    pub async fn delete(&self, id: i64) -> Result<u64, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = delete_by_id(conn.dialect(), &VENDORS, "remove_vendor", id);
        conn.execute(&statement).await
    }
}
