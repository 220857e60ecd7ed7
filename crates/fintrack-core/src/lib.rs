//! # Fintrack Core
//!
//! The domain layer of the Fintrack personal-finance tracker.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
