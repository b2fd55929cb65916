//! Domain module
//!
//! Core domain types shared by the store, the workflow and the façade.

pub mod account;
pub mod outcome;

pub use account::{Account, AccountChange, AccountSummary, NewAccount};
pub use outcome::{MutationOutcome, VerifyOutcome};
