//! Token validation implementations.

mod jwt;

pub use jwt::{JwtConfig, JwtTokenService};
