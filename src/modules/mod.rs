//! Feature modules. Each follows the same structure: `controller.rs` for HTTP
//! handlers, `service.rs` for the logic, `model.rs` for DTOs and row shapes,
//! `router.rs` for the axum wiring.

pub mod auth;
pub mod progress;
