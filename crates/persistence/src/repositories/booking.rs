//! Booking repository for database operations.

use domain::models::{Booking, NewBooking};

use crate::db::ConnectionManager;
use crate::entities::BookingEntity;
use crate::error::PersistenceError;
use crate::query::{Filters, Insert, Scope, Select};
use crate::schema::BOOKINGS;

/// Repository for rental booking database operations.
#[derive(Clone)]
pub struct BookingRepository {
    db: ConnectionManager,
}

impl BookingRepository {
    /// Creates a new BookingRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    /// Record a booking.
    ///
    /// A duplicate contract number is rejected by the backend; see
    /// [`PersistenceError::is_unique_violation`].
    pub async fn create(&self, booking: NewBooking) -> Result<Booking, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &BOOKINGS)
            .value("vendor_id", booking.vendor_id)
            .value("car_id", booking.car_id)
            .value("user_name", booking.user_name)
            .value("start_date", booking.start_date)
            .value("end_date", booking.end_date)
            .value("duration", booking.duration)
            .value("cost", booking.cost)
            .value("contract_number", booking.contract_number)
            .value("payment_type", booking.payment_type)
            .value("account_id", booking.account_id)
            .build("add_booking")?;
        let entity: BookingEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    /// List bookings, optionally for one vendor and optionally only those
    /// starting after today.
    pub async fn list(
        &self,
        vendor: Scope<i64>,
        filters: &Filters,
        future_only: bool,
    ) -> Result<Vec<Booking>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let dialect = conn.dialect();
        let mut select = Select::new(dialect, &BOOKINGS).scope("vendor_id", vendor);
        if future_only {
            select = select.condition(format!("start_date > {}", dialect.current_date()));
        }
        let statement = select
            .filters(filters)
            .order_by("id")
            .build("get_bookings")?;
        let entities: Vec<BookingEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}
