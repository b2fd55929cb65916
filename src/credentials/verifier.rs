//! Credential Verifier
//!
//! Re-checks the caller's current password before any mutation.

use std::sync::Arc;

use crate::domain::VerifyOutcome;
use crate::store::{AccountStore, StoreResult};

use super::credential_matches;

/// Verifies a claimed password against the active account row
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn AccountStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Verify `password` for `username`.
    ///
    /// Disabled accounts are invisible and yield `NotFound`. Store failures
    /// are returned as `Err` and must not be read as not-found or denied.
    pub async fn verify(&self, username: &str, password: &str) -> StoreResult<VerifyOutcome> {
        let stored = match self.store.active_credential(username).await? {
            Some(stored) => stored,
            None => return Ok(VerifyOutcome::NotFound),
        };

        if credential_matches(password, &stored) {
            Ok(VerifyOutcome::Verified(stored))
        } else {
            Ok(VerifyOutcome::Denied)
        }
    }
}
