//! Field rules shared by request bodies and commands

use crate::domain::account::{
    ABOUT_MAX_CHARS, AGE_MAX, AGE_MIN, PASSWORD_MAX_CHARS, PASSWORD_MIN_CHARS,
    USERNAME_MAX_CHARS, USERNAME_MIN_CHARS,
};

use super::Constraint;

pub fn username() -> Vec<Constraint> {
    vec![
        Constraint::Required,
        Constraint::MinChars(USERNAME_MIN_CHARS),
        Constraint::MaxChars(USERNAME_MAX_CHARS),
    ]
}

/// Length bounds only; callers add `Required` where the field is mandatory
pub fn password_length() -> Vec<Constraint> {
    vec![
        Constraint::MinChars(PASSWORD_MIN_CHARS),
        Constraint::MaxChars(PASSWORD_MAX_CHARS),
    ]
}

pub fn password() -> Vec<Constraint> {
    let mut rules = vec![Constraint::Required];
    rules.extend(password_length());
    rules
}

pub fn about() -> Vec<Constraint> {
    vec![Constraint::MaxChars(ABOUT_MAX_CHARS)]
}

pub fn age() -> Vec<Constraint> {
    vec![Constraint::Range {
        min: i128::from(AGE_MIN),
        max: i128::from(AGE_MAX),
    }]
}
