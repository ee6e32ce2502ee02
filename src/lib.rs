//! Orgdesk - organization administration gateway
//!
//! This crate serves the admin console's organization chart, department
//! selector and directory screens, forwarding CRUD to the remote
//! organization service.

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod org;
pub mod permission;
pub mod routes;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
