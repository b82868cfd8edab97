//! Booking scope, future filter and contract uniqueness.

mod common;

use common::{days_from_today, fake_booking, fake_car, fake_vendor, setup, test_database_url};
use persistence::repositories::{BookingRepository, CarRepository, VendorRepository};
use persistence::{ConnectionManager, DatabaseConfig, Filters, Scope};
use rentmaster::RentalService;
use serde_json::json;
use tempfile::TempDir;

async fn vendor_with_car(ctx: &common::TestContext) -> (i64, i64) {
    create_vendor_with_car(&ctx.db).await
}

async fn create_vendor_with_car(db: &ConnectionManager) -> (i64, i64) {
    let vendor = VendorRepository::new(db.clone())
        .create(fake_vendor("Kenya"))
        .await
        .unwrap();
    let car = CarRepository::new(db.clone())
        .create(fake_car(vendor.id))
        .await
        .unwrap();
    (vendor.id, car.id)
}

/// Books one car on two dates and filters by the first through a JSON map.
async fn assert_start_date_filter(service: &RentalService, db: &ConnectionManager) {
    let (v1, c1) = create_vendor_with_car(db).await;
    let start = days_from_today(7);
    service
        .add_booking(fake_booking(v1, c1, start, &format!("D-{v1}-1")))
        .await;
    service
        .add_booking(fake_booking(v1, c1, days_from_today(20), &format!("D-{v1}-2")))
        .await;

    let map = json!({"start_date": start.to_string()});
    let filters = Filters::from_json(map.as_object().unwrap());

    let found = BookingRepository::new(db.clone())
        .list(Scope::Exactly(v1), &filters, false)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].start_date, Some(start));

    let via_service = service.get_bookings(Scope::Exactly(v1), &filters, false).await;
    assert_eq!(via_service.len(), 1);
}

#[tokio::test]
async fn test_future_bookings_of_one_vendor() {
    let ctx = setup().await;
    let (v1, c1) = vendor_with_car(&ctx).await;
    let (v2, c2) = vendor_with_car(&ctx).await;

    let s = &ctx.service;
    s.add_booking(fake_booking(v1, c1, days_from_today(10), "C-100")).await;
    s.add_booking(fake_booking(v1, c1, days_from_today(-10), "C-101")).await;
    s.add_booking(fake_booking(v2, c2, days_from_today(5), "C-200")).await;

    let upcoming = s.get_bookings(Scope::Exactly(v1), &Filters::new(), true).await;
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].contract_number.as_deref(), Some("C-100"));
    assert!(upcoming[0].start_date.unwrap() > days_from_today(0));

    let all_of_v1 = s.get_bookings(Scope::Exactly(v1), &Filters::new(), false).await;
    assert_eq!(all_of_v1.len(), 2);

    let everything = s.get_bookings(Scope::Any, &Filters::new(), false).await;
    assert_eq!(everything.len(), 3);

    let future_everywhere = s.get_bookings(Scope::Any, &Filters::new(), true).await;
    assert_eq!(future_everywhere.len(), 2);
}

#[tokio::test]
async fn test_booking_filters_combine_with_scope() {
    let ctx = setup().await;
    let (v1, c1) = vendor_with_car(&ctx).await;

    let mut cash = fake_booking(v1, c1, days_from_today(3), "C-300");
    cash.payment_type = "Cash".to_string();
    ctx.service.add_booking(cash).await;
    ctx.service
        .add_booking(fake_booking(v1, c1, days_from_today(4), "C-301"))
        .await;

    let found = ctx
        .service
        .get_bookings(
            Scope::Exactly(v1),
            &Filters::new().eq("payment_type", "Cash"),
            false,
        )
        .await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].payment_type.as_deref(), Some("Cash"));
}

#[tokio::test]
async fn test_duplicate_contract_number_is_rejected() {
    let ctx = setup().await;
    let (v1, c1) = vendor_with_car(&ctx).await;

    ctx.service
        .add_booking(fake_booking(v1, c1, days_from_today(1), "C-DUP"))
        .await;
    let before = ctx
        .service
        .get_bookings(Scope::Any, &Filters::new(), false)
        .await
        .len();

    ctx.service
        .add_booking(fake_booking(v1, c1, days_from_today(2), "C-DUP"))
        .await;
    let after = ctx
        .service
        .get_bookings(Scope::Any, &Filters::new(), false)
        .await
        .len();
    assert_eq!(before, after);

    let err = BookingRepository::new(ctx.db.clone())
        .create(fake_booking(v1, c1, days_from_today(2), "C-DUP"))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn test_booking_with_reversed_dates_is_not_written() {
    let ctx = setup().await;
    let (v1, c1) = vendor_with_car(&ctx).await;

    let mut booking = fake_booking(v1, c1, days_from_today(5), "C-400");
    booking.end_date = days_from_today(1);
    ctx.service.add_booking(booking).await;

    assert!(ctx
        .service
        .get_bookings(Scope::Any, &Filters::new(), false)
        .await
        .is_empty());
}

#[tokio::test]
async fn test_start_date_filter_from_json() {
    let ctx = setup().await;
    assert_start_date_filter(&ctx.service, &ctx.db).await;
}

#[tokio::test]
async fn test_start_date_filter_from_json_on_primary() {
    let Some(url) = test_database_url() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let dir = TempDir::new().unwrap();
    let db = ConnectionManager::new(DatabaseConfig {
        url: Some(url),
        ..DatabaseConfig::fallback_only(dir.path().join("rentmaster.db"))
    });
    let service = RentalService::new(db.clone());
    service.init_db().await.unwrap();
    assert!(db.is_postgres().await);

    assert_start_date_filter(&service, &db).await;
}
