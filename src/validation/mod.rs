//! Request validation
//!
//! A schema maps field names to ordered constraint lists. Checking a value
//! against the schema yields every violated field, not just the first one.
//! Within a single field, evaluation stops at the first failing constraint.

pub mod rules;

use serde::Serialize;

/// A single constraint on a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Present and non-zero (non-empty text, non-zero integer)
    Required,
    /// At least this many characters
    MinChars(usize),
    /// At most this many characters
    MaxChars(usize),
    /// Integer within `min..=max`
    Range { min: i128, max: i128 },
    /// Text equal to another field's text
    EqualsField(&'static str),
}

/// Value of a field as seen by the validator.
///
/// `None` means the field was omitted; constraints after the first are
/// skipped for omitted optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Integer(Option<i128>),
}

impl<'a> FieldValue<'a> {
    fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Text(None) | FieldValue::Integer(None))
    }

    fn is_zero(&self) -> bool {
        matches!(self, FieldValue::Text(Some("")) | FieldValue::Integer(Some(0)))
    }
}

/// One failed constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Join violations into a single human-readable line
pub fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered field → constraints mapping
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<(&'static str, Vec<Constraint>)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field and its constraints, evaluated in the given order
    pub fn field(mut self, name: &'static str, constraints: impl Into<Vec<Constraint>>) -> Self {
        self.rules.push((name, constraints.into()));
        self
    }

    /// Check `target`, collecting one violation per failing field
    pub fn check<T: Validate + ?Sized>(&self, target: &T) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = self
            .rules
            .iter()
            .filter_map(|(field, constraints)| check_field(target, field, constraints))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_field<T: Validate + ?Sized>(
    target: &T,
    field: &'static str,
    constraints: &[Constraint],
) -> Option<Violation> {
    let value = target.field_value(field);

    if !constraints.contains(&Constraint::Required) && value.is_absent() {
        return None;
    }

    constraints
        .iter()
        .find_map(|constraint| check_constraint(target, field, value, constraint))
}

fn check_constraint<T: Validate + ?Sized>(
    target: &T,
    field: &'static str,
    value: FieldValue<'_>,
    constraint: &Constraint,
) -> Option<Violation> {
    let failed = |message: String| Some(Violation::new(field, message));

    match (constraint, value) {
        (Constraint::Required, v) if v.is_absent() || v.is_zero() => {
            failed("is required".to_string())
        }
        (Constraint::Required, _) => None,
        (Constraint::MinChars(min), FieldValue::Text(Some(text))) => {
            (text.chars().count() < *min).then(|| Violation::new(field, format!("must be at least {} characters", min)))
        }
        (Constraint::MaxChars(max), FieldValue::Text(Some(text))) => {
            (text.chars().count() > *max).then(|| Violation::new(field, format!("must be at most {} characters", max)))
        }
        (Constraint::Range { min, max }, FieldValue::Integer(Some(n))) => {
            (n < *min || n > *max).then(|| Violation::new(field, format!("must be between {} and {}", min, max)))
        }
        (Constraint::EqualsField(other), FieldValue::Text(Some(text))) => {
            match target.field_value(other) {
                FieldValue::Text(Some(other_text)) if other_text == text => None,
                _ => failed(format!("must equal {}", other)),
            }
        }
        (_, v) if v.is_absent() => None,
        (constraint, _) => failed(format!("has the wrong type for {:?}", constraint)),
    }
}

/// Types that can be checked against a `Schema`
pub trait Validate {
    /// Constraints for this type's fields
    fn schema() -> Schema
    where
        Self: Sized;

    /// Look up a field by its wire name
    fn field_value(&self, field: &str) -> FieldValue<'_>;

    /// Check `self` against `Self::schema()`
    fn validate(&self) -> Result<(), Vec<Violation>>
    where
        Self: Sized,
    {
        Self::schema().check(self)
    }
}

/// Character-count check for values outside a request body (path params)
pub fn within_chars(value: &str, min: usize, max: usize) -> bool {
    let count = value.chars().count();
    count >= min && count <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Signup {
        username: String,
        password: String,
        confirm: String,
        age: Option<i64>,
    }

    impl Validate for Signup {
        fn schema() -> Schema {
            Schema::new()
                .field("username", [Constraint::Required, Constraint::MinChars(3), Constraint::MaxChars(5)])
                .field("password", [Constraint::Required, Constraint::MinChars(8)])
                .field("confirm", [Constraint::Required, Constraint::EqualsField("password")])
                .field("age", [Constraint::Range { min: 1, max: 255 }])
        }

        fn field_value(&self, field: &str) -> FieldValue<'_> {
            match field {
                "username" => FieldValue::Text(Some(&self.username)),
                "password" => FieldValue::Text(Some(&self.password)),
                "confirm" => FieldValue::Text(Some(&self.confirm)),
                "age" => FieldValue::Integer(self.age.map(i128::from)),
                _ => FieldValue::Text(None),
            }
        }
    }

    fn valid() -> Signup {
        Signup {
            username: "bob".to_string(),
            password: "secretpw".to_string(),
            confirm: "secretpw".to_string(),
            age: None,
        }
    }

    #[test]
    fn test_valid_value_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_all_failing_fields_reported() {
        let signup = Signup {
            username: "ab".to_string(),
            password: "short".to_string(),
            confirm: "other".to_string(),
            age: Some(0),
        };

        let violations = signup.validate().unwrap_err();
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["username", "password", "confirm", "age"]);
    }

    #[test]
    fn test_first_failure_per_field_only() {
        let signup = Signup {
            username: String::new(),
            ..valid()
        };
        let violations = signup.validate().unwrap_err();
        assert_eq!(violations, vec![Violation::new("username", "is required")]);
    }

    #[test]
    fn test_char_counting_is_not_bytes() {
        // five characters, ten bytes
        let signup = Signup {
            username: "ééééé".to_string(),
            ..valid()
        };
        assert!(signup.validate().is_ok());
    }

    #[test]
    fn test_optional_field_skipped_when_absent() {
        let signup = Signup { age: None, ..valid() };
        assert!(signup.validate().is_ok());

        let signup = Signup { age: Some(256), ..valid() };
        let violations = signup.validate().unwrap_err();
        assert_eq!(violations[0].to_string(), "age: must be between 1 and 255");
    }

    #[test]
    fn test_describe_joins_messages() {
        let violations = vec![
            Violation::new("username", "is required"),
            Violation::new("age", "must be between 1 and 255"),
        ];
        assert_eq!(
            describe(&violations),
            "username: is required; age: must be between 1 and 255"
        );
    }

    #[test]
    fn test_within_chars() {
        assert!(within_chars("abc", 3, 150));
        assert!(!within_chars("ab", 3, 150));
        assert!(!within_chars(&"x".repeat(151), 3, 150));
    }
}
