//! Customer repository for database operations.

use domain::models::{Customer, NewCustomer};

use crate::db::ConnectionManager;
use crate::entities::CustomerEntity;
use crate::error::PersistenceError;
use crate::query::{Filters, Insert, Scope, Select, Update};
use crate::schema::CUSTOMERS;

/// Repository for renter database operations.
#[derive(Clone)]
pub struct CustomerRepository {
    db: ConnectionManager,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Register a customer with a vendor. New customers are not blacklisted.
    pub async fn create(&self, customer: NewCustomer) -> Result<Customer, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &CUSTOMERS)
            .value("vendor_id", customer.vendor_id)
            .value("name", customer.name)
            .value("email", customer.email)
            .value("phone", customer.phone)
            .value("id_number", customer.id_number)
            .value("license_number", customer.license_number)
            .value("license_country", customer.license_country)
            .value("license_expiry", customer.license_expiry)
            .value("rating", customer.rating)
            .build("add_customer")?;
        let entity: CustomerEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List customers, optionally restricted to one vendor.
    pub async fn list(
        &self,
        vendor: Scope<i64>,
        filters: &Filters,
    ) -> Result<Vec<Customer>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &CUSTOMERS)
            .scope("vendor_id", vendor)
            .filters(filters)
            .order_by("id")
            .build("get_customers")?;
        let entities: Vec<CustomerEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Set or clear the blacklist flag. Returns the number of rows changed.
    pub async fn set_blacklisted(&self, id: i64, blacklisted: bool) -> Result<u64, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Update::new(conn.dialect(), &CUSTOMERS)
            .set("blacklisted", blacklisted)
            .build("blacklist_customer", id)?;
        match statement {
            Some(statement) => conn.execute(&statement).await,
            None => Ok(0),
        }
    }
}
