//! Request bodies
//!
//! Field names are the wire contract. Every field defaults when omitted, so a
//! missing field surfaces as a `required` violation instead of a parse error.

use serde::{Deserialize, Serialize};

use crate::projection::{PAGE_MAX, SIZE_PAGE_MAX};
use crate::validation::{rules, Constraint, FieldValue, Schema, Validate};

fn text(value: &str) -> FieldValue<'_> {
    FieldValue::Text(Some(value))
}

/// POST /v1/new-user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for CreateAccountRequest {
    fn schema() -> Schema {
        Schema::new()
            .field("username", rules::username())
            .field("password", rules::password())
            .field(
                "confirm_password",
                [Constraint::Required, Constraint::EqualsField("password")],
            )
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "username" => text(&self.username),
            "password" => text(&self.password),
            "confirm_password" => text(&self.confirm_password),
            _ => FieldValue::Text(None),
        }
    }
}

/// PATCH /v1/update-common-data-user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub current_password: String,
    pub about: Option<String>,
    pub age: Option<i64>,
}

impl Validate for UpdateProfileRequest {
    fn schema() -> Schema {
        Schema::new()
            .field("username", rules::username())
            .field("current_password", rules::password())
            .field("about", rules::about())
            .field("age", rules::age())
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "username" => text(&self.username),
            "current_password" => text(&self.current_password),
            "about" => FieldValue::Text(self.about.as_deref()),
            "age" => FieldValue::Integer(self.age.map(i128::from)),
            _ => FieldValue::Text(None),
        }
    }
}

/// PATCH /v1/update-password-user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePasswordRequest {
    pub username: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl Validate for UpdatePasswordRequest {
    fn schema() -> Schema {
        Schema::new()
            .field("username", rules::username())
            .field("current_password", rules::password())
            .field("new_password", rules::password())
            .field(
                "confirm_password",
                [Constraint::Required, Constraint::EqualsField("new_password")],
            )
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "username" => text(&self.username),
            "current_password" => text(&self.current_password),
            "new_password" => text(&self.new_password),
            "confirm_password" => text(&self.confirm_password),
            _ => FieldValue::Text(None),
        }
    }
}

/// DELETE /v1/disable-user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisableAccountRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for DisableAccountRequest {
    fn schema() -> Schema {
        Schema::new()
            .field("username", rules::username())
            .field("password", rules::password())
            .field(
                "confirm_password",
                [Constraint::Required, Constraint::EqualsField("password")],
            )
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "username" => text(&self.username),
            "password" => text(&self.password),
            "confirm_password" => text(&self.confirm_password),
            _ => FieldValue::Text(None),
        }
    }
}

/// GET /v1/list-users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListAccountsRequest {
    pub size_page: u64,
    pub page: u64,
}

impl Validate for ListAccountsRequest {
    fn schema() -> Schema {
        Schema::new()
            .field(
                "size_page",
                [
                    Constraint::Required,
                    Constraint::Range {
                        min: 1,
                        max: i128::from(SIZE_PAGE_MAX),
                    },
                ],
            )
            .field(
                "page",
                [
                    Constraint::Required,
                    Constraint::Range {
                        min: 1,
                        max: i128::from(PAGE_MAX),
                    },
                ],
            )
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "size_page" => FieldValue::Integer(Some(i128::from(self.size_page))),
            "page" => FieldValue::Integer(Some(i128::from(self.page))),
            _ => FieldValue::Integer(None),
        }
    }
}
