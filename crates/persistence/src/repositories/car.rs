//! Car repository for database operations.

use domain::models::{Car, CarUpdate, NewCar};

use crate::db::ConnectionManager;
use crate::entities::CarEntity;
use crate::error::PersistenceError;
use crate::query::{delete_by_id, Filters, Insert, Scope, Select, Update};
use crate::schema::CARS;

/// Repository for fleet database operations.
#[derive(Clone)]
pub struct CarRepository {
    db: ConnectionManager,
}

impl CarRepository {
    /// Creates a new CarRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Add a car to a vendor's fleet.
    pub async fn create(&self, car: NewCar) -> Result<Car, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &CARS)
            .value("vendor_id", car.vendor_id)
            .value("name", car.name)
            .value("rates", car.rates)
            .value("insurance", car.insurance)
            .value("mileage", car.mileage)
            .value("fuel_level", car.fuel_level)
            .value("year", car.year)
            .value("status", car.status)
            .value("type", car.car_type)
            .value("features", car.features)
            .build("add_car")?;
        let entity: CarEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List cars, optionally restricted to one vendor.
    pub async fn list(
        &self,
        vendor: Scope<i64>,
        filters: &Filters,
    ) -> Result<Vec<Car>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &CARS)
            .scope("vendor_id", vendor)
            .filters(filters)
            .order_by("id")
            .build("get_cars")?;
        let entities: Vec<CarEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Replace every mutable attribute of a car.
    ///
    /// Optional attributes left as `None` are cleared.
    pub async fn update(&self, id: i64, car: CarUpdate) -> Result<Option<Car>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Update::new(conn.dialect(), &CARS)
            .set("name", car.name)
            .set("rates", car.rates)
            .set("insurance", car.insurance)
            .set("mileage", car.mileage)
            .set("fuel_level", car.fuel_level)
            .set("status", car.status)
            .set("year", car.year)
            .set("type", car.car_type)
            .set("features", car.features)
            .build("update_car", id)?;

        match statement {
            Some(statement) => {
                let entity: Option<CarEntity> = conn.fetch_optional(&statement).await?;
                Ok(entity.map(Into::into))
            }
            None => Ok(None),
        }
    }

    /// Delete a car. Returns the number of rows removed.
    pub async fn delete(&self, id: i64) -> Result<u64, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = delete_by_id(conn.dialect(), &CARS, "remove_car", id);
        conn.execute(&statement).await
    }
}
