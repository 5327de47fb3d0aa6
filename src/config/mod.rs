//! Configuration modules, each loaded from environment variables once at
//! process start and treated as immutable thereafter.
//!
//! - [`cors`]: allowed browser origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: token signing secret and lifetime

pub mod cors;
pub mod database;
pub mod jwt;
