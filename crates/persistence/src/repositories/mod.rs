//! Repository implementations for database operations.
//!
//! Every repository holds a [`ConnectionManager`](crate::db::ConnectionManager)
//! and renders its statements for whichever backend is live at call time.

pub mod account;
pub mod booking;
pub mod car;
pub mod customer;
pub mod language;
pub mod pos_machine;
pub mod role;
pub mod transaction;
pub mod translation;
pub mod user;
pub mod vendor;

pub use account::AccountRepository;
pub use booking::BookingRepository;
pub use car::CarRepository;
pub use customer::CustomerRepository;
pub use language::LanguageRepository;
pub use pos_machine::PosMachineRepository;
pub use role::RoleRepository;
pub use transaction::TransactionRepository;
pub use translation::TranslationRepository;
pub use user::UserRepository;
pub use vendor::VendorRepository;
