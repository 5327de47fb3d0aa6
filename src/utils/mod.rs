//! Shared utilities: error type, token issuing/verification, password hashing.

pub mod errors;
pub mod jwt;
pub mod password;
