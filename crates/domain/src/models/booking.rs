//! Booking domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Booking domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Booking {
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

/// Request to book a car.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_booking_dates"))]
pub struct NewBooking {
    pub vendor_id: i64,
    pub car_id: i64,
    #[validate(length(min = 1, message = "User name is required"))]
    pub user_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: String,
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost: f64,
    #[validate(length(min = 1, max = 100, message = "Contract number must be 1-100 characters"))]
    pub contract_number: String,
    pub payment_type: String,
    pub account_id: Option<i64>,
}

fn validate_booking_dates(booking: &NewBooking) -> Result<(), ValidationError> {
    if booking.end_date < booking.start_date {
        let mut err = ValidationError::new("booking_dates");
        err.message = Some("End date cannot be before start date".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(start: NaiveDate, end: NaiveDate) -> NewBooking {
        NewBooking {
            vendor_id: 1,
            car_id: 1,
            user_name: "jdoe".into(),
            start_date: start,
            end_date: end,
            duration: "3 days".into(),
            cost: 120.0,
            contract_number: "C-1".into(),
            payment_type: "Card".into(),
            account_id: None,
        }
    }

    #[test]
    fn test_booking_dates_in_order() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        assert!(booking(start, end).validate().is_ok());
    }

    #[test]
    fn test_booking_end_before_start_rejected() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert!(booking(start, end).validate().is_err());
    }
}
