//! Declarative validation schemas.
//!
//! Each payload type declares a static table of field checks once; the same table backs
//! client-side pre-submit validation for resources and for the pricing tree. The first
//! failing check wins and is reported with the path of the offending field.

use thiserror::Error;

/// A single validation rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Trimmed text must have at least this many characters
    MinLen(usize),
    /// Text must have at most this many characters
    MaxLen(usize),
    /// Number must be greater than or equal to this value
    Min(f64),
    /// Text must look like an email address
    Email,
    /// Text must be a three letter uppercase currency code
    CurrencyCode,
    /// List must hold at least this many items
    MinItems(usize),
}

/// A rule paired with the message shown when it fails
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub rule: Rule,
    pub message: &'static str,
}

impl Check {
    pub const fn required(message: &'static str) -> Self {
        Self {
            rule: Rule::MinLen(1),
            message,
        }
    }

    pub const fn min_len(len: usize, message: &'static str) -> Self {
        Self {
            rule: Rule::MinLen(len),
            message,
        }
    }

    pub const fn max_len(len: usize, message: &'static str) -> Self {
        Self {
            rule: Rule::MaxLen(len),
            message,
        }
    }

    pub const fn min(value: f64, message: &'static str) -> Self {
        Self {
            rule: Rule::Min(value),
            message,
        }
    }

    pub const fn email(message: &'static str) -> Self {
        Self {
            rule: Rule::Email,
            message,
        }
    }

    pub const fn currency_code(message: &'static str) -> Self {
        Self {
            rule: Rule::CurrencyCode,
            message,
        }
    }

    pub const fn min_items(count: usize, message: &'static str) -> Self {
        Self {
            rule: Rule::MinItems(count),
            message,
        }
    }
}

/// The checks that apply to one named field
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub field: &'static str,
    pub checks: &'static [Check],
}

impl FieldSchema {
    pub const fn new(field: &'static str, checks: &'static [Check]) -> Self {
        Self { field, checks }
    }
}

/// The current value of a field, as seen by the schema
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Items(usize),
    /// Optional field that is not set; its checks are skipped
    Absent,
}

/// A failed validation, naming the path of the offending field
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{path}: {message}")]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Nest this error below `prefix`, e.g. `metaTitle` becomes `seo[0].metaTitle`
    pub fn prefixed(self, prefix: &str) -> Self {
        let path = if self.path.is_empty() {
            prefix.to_string()
        } else {
            format!("{}.{}", prefix, self.path)
        };

        Self {
            path,
            message: self.message,
        }
    }
}

/// Types validated against a declarative schema
pub trait Validate {
    /// Static checks for this value
    fn schema(&self) -> &'static [FieldSchema];

    /// Current value of the named field
    fn field(&self, name: &str) -> FieldValue<'_>;

    /// Validate nested values; runs after the value's own fields pass
    fn validate_nested(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(self)?;
        self.validate_nested()
    }
}

/// Evaluate the schema of `value`, returning the first failing field
pub fn validate_fields<V: Validate + ?Sized>(value: &V) -> Result<(), ValidationError> {
    for field_schema in value.schema() {
        let field_value = value.field(field_schema.field);

        for check in field_schema.checks {
            if !passes(check.rule, field_value) {
                return Err(ValidationError::new(field_schema.field, check.message));
            }
        }
    }

    Ok(())
}

/// Validate every item of a list, prefixing errors with `name[index]`
pub fn validate_each<V: Validate>(name: &str, items: &[V]) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|e| e.prefixed(&format!("{}[{}]", name, index)))?;
    }

    Ok(())
}

fn passes(rule: Rule, value: FieldValue<'_>) -> bool {
    match (rule, value) {
        (_, FieldValue::Absent) => true,
        (Rule::MinLen(len), FieldValue::Text(text)) => text.trim().chars().count() >= len,
        (Rule::MaxLen(len), FieldValue::Text(text)) => text.chars().count() <= len,
        (Rule::Min(min), FieldValue::Number(number)) => number.is_finite() && number >= min,
        (Rule::Email, FieldValue::Text(text)) => is_email(text),
        (Rule::CurrencyCode, FieldValue::Text(text)) => is_currency_code(text),
        (Rule::MinItems(count), FieldValue::Items(len)) => len >= count,
        // A rule applied to the wrong kind of value never passes
        _ => false,
    }
}

fn is_email(text: &str) -> bool {
    let Some((local, domain)) = text.trim().split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !domain.contains('@')
}

/// Three ASCII uppercase letters, e.g. `USD`
pub fn is_currency_code(text: &str) -> bool {
    text.len() == 3 && text.chars().all(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account {
        name: String,
        email: String,
        balance: Option<f64>,
    }

    const ACCOUNT_SCHEMA: &[FieldSchema] = &[
        FieldSchema::new(
            "name",
            &[Check::min_len(2, "Name must be at least 2 characters long")],
        ),
        FieldSchema::new("email", &[Check::email("Invalid email address")]),
        FieldSchema::new("balance", &[Check::min(0.0, "Balance cannot be negative")]),
    ];

    impl Validate for Account {
        fn schema(&self) -> &'static [FieldSchema] {
            ACCOUNT_SCHEMA
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "name" => FieldValue::Text(&self.name),
                "email" => FieldValue::Text(&self.email),
                "balance" => self.balance.map_or(FieldValue::Absent, FieldValue::Number),
                _ => FieldValue::Absent,
            }
        }
    }

    fn account() -> Account {
        Account {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            balance: None,
        }
    }

    #[test]
    fn valid_value_passes() {
        assert_eq!(account().validate(), Ok(()));
    }

    #[test]
    fn reports_first_failing_field() {
        let mut value = account();
        value.name = " ".to_string();
        value.email = "nope".to_string();

        let err = value.validate().unwrap_err();
        assert_eq!(err.path, "name");
        assert_eq!(err.message, "Name must be at least 2 characters long");
    }

    #[test]
    fn absent_optional_field_is_skipped() {
        let mut value = account();
        value.balance = Some(-1.0);
        assert_eq!(value.validate().unwrap_err().path, "balance");

        value.balance = None;
        assert!(value.validate().is_ok());
    }

    #[test]
    fn validate_each_prefixes_index() {
        let mut second = account();
        second.email = "missing-at.example.com".to_string();

        let err = validate_each("users", &[account(), second]).unwrap_err();
        assert_eq!(err.path, "users[1].email");
        assert_eq!(err.to_string(), "users[1].email: Invalid email address");
    }

    #[test]
    fn currency_codes_must_be_three_uppercase_letters() {
        assert!(is_currency_code("USD"));
        assert!(!is_currency_code("usd"));
        assert!(!is_currency_code("US"));
        assert!(!is_currency_code("US1"));
    }
}
