//! Projection module
//!
//! Read-side views over the account table.

mod paginator;

pub use paginator::{total_pages, AccountPage, PageRequest, Paginator, PAGE_MAX, SIZE_PAGE_MAX};
