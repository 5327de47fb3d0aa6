//! Cross-entity progress aggregation for a single student.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
