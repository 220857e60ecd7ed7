//! # Fintrack Infrastructure
//!
//! Concrete implementations of the ports defined in `fintrack-core`.
//! This crate contains the database repositories and token validation.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory repositories only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - Bearer-token validation via jsonwebtoken

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCategoryRepository, PostgresTransactionRepository, PostgresUserRepository, connect,
};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
