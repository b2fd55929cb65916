//! Store double whose credential reads or conditional writes fail

use async_trait::async_trait;

use crate::credentials::StoredCredential;
use crate::domain::{AccountChange, AccountSummary, NewAccount};

use super::{AccountStore, CountedRow, MemoryAccountStore, PageWindow, StoreError, StoreResult};

/// Delegates to a memory store, failing the selected calls with a pool error
pub(crate) struct FailingStore {
    pub inner: MemoryAccountStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl FailingStore {
    /// Fails `active_credential`
    pub fn on_reads(inner: MemoryAccountStore) -> Self {
        Self {
            inner,
            fail_reads: true,
            fail_writes: false,
        }
    }

    /// Fails `apply_change`
    pub fn on_writes(inner: MemoryAccountStore) -> Self {
        Self {
            inner,
            fail_reads: false,
            fail_writes: true,
        }
    }
}

fn pool_failure() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl AccountStore for FailingStore {
    async fn insert(&self, account: NewAccount) -> StoreResult<()> {
        self.inner.insert(account).await
    }

    async fn find_active(&self, username: &str) -> StoreResult<Option<AccountSummary>> {
        self.inner.find_active(username).await
    }

    async fn active_credential(&self, username: &str) -> StoreResult<Option<StoredCredential>> {
        if self.fail_reads {
            return Err(pool_failure());
        }
        self.inner.active_credential(username).await
    }

    async fn apply_change(
        &self,
        username: &str,
        expected: &StoredCredential,
        change: &AccountChange,
    ) -> StoreResult<u64> {
        if self.fail_writes {
            return Err(pool_failure());
        }
        self.inner.apply_change(username, expected, change).await
    }

    async fn page_active(&self, window: PageWindow) -> StoreResult<Vec<CountedRow>> {
        self.inner.page_active(window).await
    }

    async fn count_active(&self) -> StoreResult<u64> {
        self.inner.count_active().await
    }
}
