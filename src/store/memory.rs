//! In-memory Account Store
//!
//! Keeps rows in insertion order, which stands in for the `created_at`
//! ordering of the Postgres table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::credentials::StoredCredential;
use crate::domain::{Account, AccountChange, AccountSummary, NewAccount};

use super::{AccountStore, CountedRow, PageWindow, StoreError, StoreResult};

/// Account store held entirely in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full row for `username`, including disabled ones
    pub async fn snapshot(&self, username: &str) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts.iter().find(|a| a.username == username).cloned()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, account: NewAccount) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.username == account.username) {
            return Err(StoreError::DuplicateUsername(account.username));
        }

        let now = Utc::now();
        accounts.push(Account {
            username: account.username,
            credential: account.credential,
            about: None,
            age: None,
            disabled: false,
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    async fn find_active(&self, username: &str) -> StoreResult<Option<AccountSummary>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.username == username && !a.disabled)
            .map(Account::summary))
    }

    async fn active_credential(&self, username: &str) -> StoreResult<Option<StoredCredential>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.username == username && !a.disabled)
            .map(|a| a.credential.clone()))
    }

    async fn apply_change(
        &self,
        username: &str,
        expected: &StoredCredential,
        change: &AccountChange,
    ) -> StoreResult<u64> {
        let mut accounts = self.accounts.write().await;
        match accounts
            .iter_mut()
            .find(|a| a.username == username && !a.disabled && a.credential == *expected)
        {
            Some(account) => {
                change.apply_to(account);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn page_active(&self, window: PageWindow) -> StoreResult<Vec<CountedRow>> {
        let accounts = self.accounts.read().await;
        let total_count = accounts.iter().filter(|a| !a.disabled).count() as u64;
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(0);

        Ok(accounts
            .iter()
            .filter(|a| !a.disabled)
            .skip(offset)
            .take(limit)
            .map(|a| CountedRow {
                account: a.summary(),
                total_count,
            })
            .collect())
    }

    async fn count_active(&self) -> StoreResult<u64> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().filter(|a| !a.disabled).count() as u64)
    }
}
