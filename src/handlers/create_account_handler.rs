//! Account Creation Handler
//!
//! Derives the stored credential and inserts the new row.

use std::sync::Arc;

use crate::credentials::derive_credential;
use crate::domain::NewAccount;
use crate::store::{AccountStore, StoreResult};

use super::CreateAccountCommand;

/// Handler for account creation
#[derive(Clone)]
pub struct CreateAccountHandler {
    store: Arc<dyn AccountStore>,
}

impl CreateAccountHandler {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Execute the create account command
    ///
    /// New accounts start active with no `about` or `age`.
    pub async fn execute(&self, command: CreateAccountCommand) -> StoreResult<()> {
        let account = NewAccount {
            credential: derive_credential(&command.password),
            username: command.username,
        };
        let username = account.username.clone();

        self.store.insert(account).await?;

        tracing::info!(username = %username, "Account created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::credential_matches;
    use crate::store::MemoryAccountStore;

    #[tokio::test]
    async fn test_created_account_stores_derived_credential() {
        let store = MemoryAccountStore::new();
        let handler = CreateAccountHandler::new(Arc::new(store.clone()));

        handler
            .execute(CreateAccountCommand::new(
                "alice123".to_string(),
                "secretpw".to_string(),
            ))
            .await
            .unwrap();

        let row = store.snapshot("alice123").await.unwrap();
        assert!(!row.disabled);
        assert!(row.about.is_none());
        assert!(row.age.is_none());
        assert_ne!(row.credential.as_str(), "secretpw");
        assert!(credential_matches("secretpw", &row.credential));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_store_error() {
        let store = Arc::new(MemoryAccountStore::new());
        let handler = CreateAccountHandler::new(store);
        let command = CreateAccountCommand::new("alice123".to_string(), "secretpw".to_string());

        handler.execute(command.clone()).await.unwrap();
        let err = handler.execute(command).await.unwrap_err();
        assert!(err.is_duplicate());
    }
}
