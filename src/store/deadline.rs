//! Deadline decorator
//!
//! Bounds every call on the wrapped store so a stalled pool or database
//! turns into a `StoreError::Timeout` instead of a hung request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::credentials::StoredCredential;
use crate::domain::{AccountChange, AccountSummary, NewAccount};

use super::{AccountStore, CountedRow, PageWindow, StoreError, StoreResult};

/// Wraps an `AccountStore`, failing calls that run past `deadline`
#[derive(Debug, Clone)]
pub struct DeadlineStore<S> {
    inner: S,
    deadline: Duration,
}

impl<S: AccountStore> DeadlineStore<S> {
    pub fn new(inner: S, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    async fn within<T, F>(&self, call: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send,
    {
        match tokio::time::timeout(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(deadline_ms = %self.deadline.as_millis(), "Store call timed out");
                Err(StoreError::Timeout(self.deadline))
            }
        }
    }
}

#[async_trait]
impl<S: AccountStore> AccountStore for DeadlineStore<S> {
    async fn insert(&self, account: NewAccount) -> StoreResult<()> {
        self.within(self.inner.insert(account)).await
    }

    async fn find_active(&self, username: &str) -> StoreResult<Option<AccountSummary>> {
        self.within(self.inner.find_active(username)).await
    }

    async fn active_credential(&self, username: &str) -> StoreResult<Option<StoredCredential>> {
        self.within(self.inner.active_credential(username)).await
    }

    async fn apply_change(
        &self,
        username: &str,
        expected: &StoredCredential,
        change: &AccountChange,
    ) -> StoreResult<u64> {
        self.within(self.inner.apply_change(username, expected, change))
            .await
    }

    async fn page_active(&self, window: PageWindow) -> StoreResult<Vec<CountedRow>> {
        self.within(self.inner.page_active(window)).await
    }

    async fn count_active(&self) -> StoreResult<u64> {
        self.within(self.inner.count_active()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryAccountStore;

    /// Store whose reads never finish in time
    struct StalledStore;

    #[async_trait]
    impl AccountStore for StalledStore {
        async fn insert(&self, _account: NewAccount) -> StoreResult<()> {
            Ok(())
        }

        async fn find_active(&self, _username: &str) -> StoreResult<Option<AccountSummary>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }

        async fn active_credential(
            &self,
            _username: &str,
        ) -> StoreResult<Option<StoredCredential>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }

        async fn apply_change(
            &self,
            _username: &str,
            _expected: &StoredCredential,
            _change: &AccountChange,
        ) -> StoreResult<u64> {
            Ok(0)
        }

        async fn page_active(&self, _window: PageWindow) -> StoreResult<Vec<CountedRow>> {
            Ok(Vec::new())
        }

        async fn count_active(&self) -> StoreResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let store = DeadlineStore::new(StalledStore, Duration::from_millis(20));

        let err = store.find_active("alice123").await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(d) if d == Duration::from_millis(20)));

        // calls that finish in time pass through untouched
        assert_eq!(store.count_active().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fast_store_passes_through() {
        let store = DeadlineStore::new(MemoryAccountStore::new(), Duration::from_secs(1));
        assert!(store.find_active("nobody").await.unwrap().is_none());
        assert_eq!(store.count_active().await.unwrap(), 0);
    }
}
