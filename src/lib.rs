//! Account Service Library
//!
//! Re-exports modules for the server binary, tools, and integration tests.

pub mod api;
pub mod credentials;
pub mod domain;
pub mod handlers;
pub mod projection;
pub mod service;
pub mod store;
pub mod validation;

pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorResponse};
pub use service::AccountService;
