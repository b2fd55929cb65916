//! Account Store module
//!
//! The only layer that touches persistence. `AccountStore` is implemented by
//! PostgreSQL (production), an in-memory table (tests and local runs), and a
//! deadline decorator that bounds every call.

mod deadline;
mod error;
#[cfg(test)]
mod failing;
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::credentials::StoredCredential;
use crate::domain::{AccountChange, AccountSummary, NewAccount};

pub use deadline::DeadlineStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;

#[cfg(test)]
pub(crate) use failing::FailingStore;

/// A `LIMIT`/`OFFSET` window over the active accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

/// One row of a windowed read, carrying the count of the whole filtered set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedRow {
    pub account: AccountSummary,
    pub total_count: u64,
}

/// Trait for account storage operations
///
/// Every read except `insert`'s uniqueness check ignores disabled rows.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new active account; fails with `DuplicateUsername` if the
    /// name is taken by any row, disabled or not
    async fn insert(&self, account: NewAccount) -> StoreResult<()>;

    /// Public fields of an active account
    async fn find_active(&self, username: &str) -> StoreResult<Option<AccountSummary>>;

    /// Stored credential of an active account
    async fn active_credential(&self, username: &str) -> StoreResult<Option<StoredCredential>>;

    /// Conditionally apply `change`.
    ///
    /// The write lands only on a row matching `username`, still active, and
    /// still holding `expected`. Returns the number of rows affected (0 or 1).
    async fn apply_change(
        &self,
        username: &str,
        expected: &StoredCredential,
        change: &AccountChange,
    ) -> StoreResult<u64>;

    /// Active accounts in natural order within `window`, each row annotated
    /// with the total number of active accounts
    async fn page_active(&self, window: PageWindow) -> StoreResult<Vec<CountedRow>>;

    /// Number of active accounts
    async fn count_active(&self) -> StoreResult<u64>;
}
