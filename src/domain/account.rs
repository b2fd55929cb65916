//! Account types
//!
//! The persisted account record and the views and changes derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credentials::StoredCredential;

/// Username length bounds, in characters
pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 150;

/// Password length bounds, in characters (applies to the submitted secret)
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 128;

pub const ABOUT_MAX_CHARS: usize = 256;

pub const AGE_MIN: i64 = 1;
pub const AGE_MAX: i64 = 255;

/// A full account row, including the tombstone flag.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub credential: StoredCredential,
    pub about: Option<String>,
    pub age: Option<u8>,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Public projection of the account
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            username: self.username.clone(),
            about: self.about.clone(),
            age: self.age,
        }
    }
}

/// Data required to insert a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub credential: StoredCredential,
}

/// Publicly visible account fields.
///
/// Absent optional fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub username: String,
    pub about: Option<String>,
    pub age: Option<u8>,
}

/// A mutation applied by the credential-gated workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountChange {
    /// Overwrite both profile fields; `None` clears the column
    SetProfile {
        about: Option<String>,
        age: Option<u8>,
    },
    /// Replace the stored credential
    SetPassword(StoredCredential),
    /// Soft-delete the account
    Disable,
}

impl AccountChange {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            AccountChange::SetProfile { .. } => "set_profile",
            AccountChange::SetPassword(_) => "set_password",
            AccountChange::Disable => "disable",
        }
    }

    /// Apply this change to an in-memory record.
    pub fn apply_to(&self, account: &mut Account) {
        match self {
            AccountChange::SetProfile { about, age } => {
                account.about = about.clone();
                account.age = *age;
            }
            AccountChange::SetPassword(credential) => {
                account.credential = credential.clone();
            }
            AccountChange::Disable => account.disabled = true,
        }
        account.updated_at = Utc::now();
    }
}
