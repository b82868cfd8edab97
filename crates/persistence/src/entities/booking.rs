//! Booking entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;

use domain::models::Booking;

/// Database row mapping for the bookings table.
#[derive(Debug, Clone, FromRow)]
pub struct BookingEntity {
    pub id: i64,
    pub vendor_id: Option<i64>,
    pub car_id: Option<i64>,
    pub user_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration: Option<String>,
    pub cost: Option<f64>,
    pub contract_number: Option<String>,
    pub payment_type: Option<String>,
    pub account_id: Option<i64>,
}

impl From<BookingEntity> for Booking {
    fn from(entity: BookingEntity) -> Self {
        Self {
            id: entity.id,
            vendor_id: entity.vendor_id,
            car_id: entity.car_id,
            user_name: entity.user_name,
            start_date: entity.start_date,
            end_date: entity.end_date,
            duration: entity.duration,
            cost: entity.cost,
            contract_number: entity.contract_number,
            payment_type: entity.payment_type,
            account_id: entity.account_id,
        }
    }
}
