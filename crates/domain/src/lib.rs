//! Domain layer for the RentMaster backend.
//!
//! This crate contains:
//! - Domain models (Vendor, Car, Booking, Customer, ...)
//! - Input types for creating and updating records, with validation rules
//! - The role capability list

pub mod models;
