//! # Fintrack Shared
//!
//! Wire types shared between the API server and any Rust client.
//! Field names follow the JSON contract consumed by the web client
//! (camelCase throughout).

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
