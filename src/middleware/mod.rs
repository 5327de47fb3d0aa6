//! Request-processing middleware.
//!
//! Authentication and authorization are two separate passes:
//!
//! 1. [`auth::authenticate`] verifies a bearer token if one is present and
//!    attaches a `Principal` to the request; invalid tokens leave the request
//!    anonymous rather than failing it.
//! 2. [`policy::enforce_policy`] evaluates the static route-to-roles table
//!    and rejects with 401 (no principal) or 403 (wrong role).
//!
//! The net behavior for an invalid token on a protected route is still a 401,
//! but the rejection is an explicit policy branch, not a verification error.

pub mod auth;
pub mod policy;
