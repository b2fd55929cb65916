//! Outcome Types
//!
//! Results of credential verification and gated mutations. Store failures are
//! never encoded here; they travel separately as `StoreError`.

use crate::credentials::StoredCredential;
use crate::validation::Violation;

/// Result of checking a claimed password against an active account
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    /// Password matched; carries the credential that was matched
    Verified(StoredCredential),
    /// No active account with that username
    NotFound,
    /// Account exists but the password does not match
    Denied,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified(_))
    }
}

/// Result of a credential-gated mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Applied,
    NotFound,
    Denied,
    /// The change itself violates field constraints
    Invalid(Vec<Violation>),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}
