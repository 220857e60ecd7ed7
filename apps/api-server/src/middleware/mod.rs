//! Request-pipeline pieces: the bearer-token identity extractor and the
//! application error type.

pub mod auth;
pub mod error;
