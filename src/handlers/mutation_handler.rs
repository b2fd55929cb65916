//! Mutation Workflow
//!
//! Credential-gated updates: profile fields, password, and disable all share
//! the same verify-then-conditionally-write protocol.
//!
//! Verification and the write are separate statements. The write's predicate
//! pins both `disabled = FALSE` and the exact credential that was verified,
//! so it only lands while the caller's verification still holds. If the row
//! moved underneath us the outcome is re-derived from a fresh verification.

use std::sync::Arc;

use crate::credentials::CredentialVerifier;
use crate::domain::{MutationOutcome, VerifyOutcome};
use crate::store::{AccountStore, StoreResult};

use super::MutateAccountCommand;

/// Verify + conditional write attempts before giving up as not-found
const MAX_ATTEMPTS: usize = 2;

/// Handler for credential-gated account mutations
#[derive(Clone)]
pub struct MutationWorkflow {
    verifier: CredentialVerifier,
    store: Arc<dyn AccountStore>,
}

impl MutationWorkflow {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            verifier: CredentialVerifier::new(store.clone()),
            store,
        }
    }

    /// Execute the mutate account command
    ///
    /// Store failures are returned as `Err` and never folded into an outcome.
    pub async fn execute(&self, command: MutateAccountCommand) -> StoreResult<MutationOutcome> {
        let MutateAccountCommand {
            username,
            current_password,
            change,
        } = command;

        let change = match change.into_change() {
            Ok(change) => change,
            Err(violations) => return Ok(MutationOutcome::Invalid(violations)),
        };

        for attempt in 1..=MAX_ATTEMPTS {
            let expected = match self.verifier.verify(&username, &current_password).await? {
                VerifyOutcome::Verified(credential) => credential,
                VerifyOutcome::NotFound => return Ok(MutationOutcome::NotFound),
                VerifyOutcome::Denied => {
                    tracing::info!(username = %username, change = change.kind(), "Credential check denied");
                    return Ok(MutationOutcome::Denied);
                }
            };

            let rows_affected = self.store.apply_change(&username, &expected, &change).await?;
            if rows_affected > 0 {
                tracing::info!(username = %username, change = change.kind(), "Account change applied");
                return Ok(MutationOutcome::Applied);
            }

            tracing::warn!(
                username = %username,
                change = change.kind(),
                attempt = attempt,
                "Account changed between verification and write"
            );
        }

        Ok(MutationOutcome::NotFound)
    }
}
