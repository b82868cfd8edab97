//! Database entity definitions.
//!
//! Entities are direct mappings to database rows. They derive `FromRow`
//! generically, so the same entity decodes rows from either backend.

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

pub use account::AccountEntity;
pub use booking::BookingEntity;
pub use car::CarEntity;
pub use customer::CustomerEntity;
pub use language::LanguageEntity;
pub use pos_machine::PosMachineEntity;
pub use role::RoleEntity;
pub use transaction::TransactionEntity;
pub use translation::TranslationEntity;
pub use user::UserEntity;
pub use vendor::VendorEntity;
