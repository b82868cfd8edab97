//! RentMaster application layer.
//!
//! Wires configuration and logging to the persistence crate and exposes
//! [`RentalService`], the fail-soft call surface used by the rest of the
//! application.

pub mod config;
pub mod logging;
pub mod service;

pub use service::RentalService;
