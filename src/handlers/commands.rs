//! Command definitions
//!
//! Commands represent intentions to change the system state. They carry the
//! caller's raw input; handlers turn them into domain changes.

use crate::credentials::derive_credential;
use crate::domain::AccountChange;
use crate::validation::{rules, FieldValue, Schema, Validate, Violation};

// =========================================================================
// CreateAccountCommand
// =========================================================================

/// Command to create a new account
#[derive(Debug, Clone)]
pub struct CreateAccountCommand {
    pub username: String,
    pub password: String,
}

impl CreateAccountCommand {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

// =========================================================================
// MutateAccountCommand
// =========================================================================

/// Change requested by the account owner, before validation
#[derive(Debug, Clone, PartialEq)]
pub enum RequestedChange {
    SetProfile {
        about: Option<String>,
        age: Option<i64>,
    },
    SetPassword {
        new_password: String,
    },
    Disable,
}

impl Validate for RequestedChange {
    /// Fields of other variants read as absent and are skipped
    fn schema() -> Schema {
        Schema::new()
            .field("about", rules::about())
            .field("age", rules::age())
            .field("new_password", rules::password_length())
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match (self, field) {
            (RequestedChange::SetProfile { about, .. }, "about") => {
                FieldValue::Text(about.as_deref())
            }
            (RequestedChange::SetProfile { age, .. }, "age") => {
                FieldValue::Integer(age.map(i128::from))
            }
            (RequestedChange::SetPassword { new_password }, "new_password") => {
                FieldValue::Text(Some(new_password))
            }
            (_, "age") => FieldValue::Integer(None),
            _ => FieldValue::Text(None),
        }
    }
}

impl RequestedChange {
    /// Validate and convert into a storable `AccountChange`.
    ///
    /// A new password is derived into a fresh credential here, so the raw
    /// secret never reaches the store.
    pub fn into_change(self) -> Result<AccountChange, Vec<Violation>> {
        self.validate()?;

        let change = match self {
            RequestedChange::SetProfile { about, age } => AccountChange::SetProfile {
                about,
                // in range after validation
                age: age.and_then(|value| u8::try_from(value).ok()),
            },
            RequestedChange::SetPassword { new_password } => {
                AccountChange::SetPassword(derive_credential(&new_password))
            }
            RequestedChange::Disable => AccountChange::Disable,
        };
        Ok(change)
    }
}

/// Command to change an account, gated on its current password
#[derive(Debug, Clone)]
pub struct MutateAccountCommand {
    pub username: String,
    pub current_password: String,
    pub change: RequestedChange,
}

impl MutateAccountCommand {
    pub fn new(username: String, current_password: String, change: RequestedChange) -> Self {
        Self {
            username,
            current_password,
            change,
        }
    }

    pub fn set_profile(
        username: String,
        current_password: String,
        about: Option<String>,
        age: Option<i64>,
    ) -> Self {
        Self::new(
            username,
            current_password,
            RequestedChange::SetProfile { about, age },
        )
    }

    pub fn set_password(username: String, current_password: String, new_password: String) -> Self {
        Self::new(
            username,
            current_password,
            RequestedChange::SetPassword { new_password },
        )
    }

    pub fn disable(username: String, current_password: String) -> Self {
        Self::new(username, current_password, RequestedChange::Disable)
    }
}
