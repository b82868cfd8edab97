//! Car entity (database row mapping).

use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

use domain::models::Car;

/// Database row mapping for the cars table.
///
/// JSON columns are JSONB on PostgreSQL and serialized TEXT on SQLite;
/// `Json` decodes both.
#[derive(Debug, Clone, FromRow)]
pub struct CarEntity {
    pub id: i64,
    pub vendor_id: Option<i64>,
    pub name: String,
    pub rates: Json<Value>,
    pub insurance: Option<String>,
    pub mileage: Option<i64>,
    pub fuel_level: Option<i64>,
    pub year: Option<i64>,
    pub status: Option<String>,
    #[sqlx(rename = "type")]
    pub car_type: Option<String>,
    pub features: Option<Json<Value>>,
}

impl From<CarEntity> for Car {
    fn from(entity: CarEntity) -> Self {
        Self {
            id: entity.id,
            vendor_id: entity.vendor_id,
            name: entity.name,
            rates: entity.rates.0,
            insurance: entity.insurance,
            mileage: entity.mileage,
            fuel_level: entity.fuel_level,
            year: entity.year,
            status: entity.status,
            car_type: entity.car_type,
            features: entity.features.map(|features| features.0),
        }
    }
}
