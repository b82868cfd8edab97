//! Domain models for RentMaster.

pub mod account;
pub mod booking;
pub mod car;
pub mod customer;
pub mod language;
pub mod permission;
pub mod pos_machine;
pub mod role;
pub mod transaction;
pub mod translation;
pub mod user;
pub mod vendor;

pub use account::{Account, NewAccount};
pub use booking::{Booking, NewBooking};
pub use car::{Car, CarUpdate, NewCar, DEFAULT_CAR_STATUS};
pub use customer::{Customer, NewCustomer};
pub use language::{Language, NewLanguage};
pub use permission::Permissions;
pub use pos_machine::{NewPosMachine, PosMachine};
pub use role::{NewRole, Role};
pub use transaction::{NewTransaction, Transaction};
pub use translation::{NewTranslation, Translation};
pub use user::{NewUser, User};
pub use vendor::{
    NewVendor, Vendor, VendorDetails, VendorUpdate, DEFAULT_SALES_STAGE, DEFAULT_VENDOR_STATUS,
    UNKNOWN_COUNTRY,
};
