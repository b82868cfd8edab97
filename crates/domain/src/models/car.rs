//! Car domain models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Status given to cars that are added without one.
pub const DEFAULT_CAR_STATUS: &str = "Available";

/// Car domain model.
///
/// `rates` and `features` are free-form JSON documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Car {
    pub id: i64,
    pub vendor_id: Option<i64>,
    pub name: String,
    pub rates: Value,
    pub insurance: Option<String>,
    pub mileage: Option<i64>,
    pub fuel_level: Option<i64>,
    pub year: Option<i64>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    pub features: Option<Value>,
}

/// Request to add a car to a vendor's fleet.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewCar {
    pub vendor_id: i64,
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    pub rates: Value,
    pub insurance: String,
    #[validate(range(min = 0, message = "Mileage cannot be negative"))]
    pub mileage: i64,
    #[validate(range(min = 0, max = 100, message = "Fuel level must be between 0 and 100"))]
    pub fuel_level: i64,
    pub year: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    pub features: Option<Value>,
}

impl NewCar {
    /// Creates a car request with status `Available` and no optional attributes.
    pub fn new(
        vendor_id: i64,
        name: impl Into<String>,
        rates: Value,
        insurance: impl Into<String>,
        mileage: i64,
        fuel_level: i64,
    ) -> Self {
        Self {
            vendor_id,
            name: name.into(),
            rates,
            insurance: insurance.into(),
            mileage,
            fuel_level,
            year: None,
            status: default_status(),
            car_type: None,
            features: None,
        }
    }
}

fn default_status() -> String {
    DEFAULT_CAR_STATUS.to_string()
}

/// Full replacement of a car's mutable attributes.
///
/// Unlike vendor updates, `None` values here clear the stored column.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CarUpdate {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    pub rates: Value,
    pub insurance: String,
    #[validate(range(min = 0, message = "Mileage cannot be negative"))]
    pub mileage: i64,
    #[validate(range(min = 0, max = 100, message = "Fuel level must be between 0 and 100"))]
    pub fuel_level: i64,
    pub status: String,
    pub year: Option<i64>,
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    pub features: Option<Value>,
}
