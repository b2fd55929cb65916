//! Request extractors

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection renders as an `AppError` body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
