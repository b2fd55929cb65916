//! Command Handlers module
//!
//! Handlers that orchestrate account operations over the store.
//! Every mutation of an existing account goes through `MutationWorkflow`.

mod commands;
mod create_account_handler;
mod mutation_handler;


pub use commands::*;
pub use create_account_handler::CreateAccountHandler;
pub use mutation_handler::MutationWorkflow;
