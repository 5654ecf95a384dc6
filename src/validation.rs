//! Field constraints and aggregated violation reporting.
//!
//! Every check appends to a [`Violations`] list instead of returning early, so
//! a single response can report all broken constraints at once.

use serde_json::Value;
use std::fmt;

/// Maximum length (in characters) accepted for task text fields.
pub const MAX_TEXT_LEN: usize = 255;

/// A single broken constraint on a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// An ordered collection of constraint violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(Violation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Whether any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected violations.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{}]: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

/// Require a positive integer.
pub fn positive(violations: &mut Violations, field: &str, value: i64) {
    if value <= 0 {
        violations.push(field, "This value should be positive.");
    }
}

/// Require an integer within `min..=max`.
pub fn in_range(violations: &mut Violations, field: &str, value: i64, min: i64, max: i64) {
    if value < min || value > max {
        violations.push(
            field,
            format!("This value should be between {} and {}.", min, max),
        );
    }
}

/// Raw value of a text field before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput<'a> {
    Missing,
    Text(&'a str),
    /// Present but not a string (a JSON number, array, object or bool).
    WrongType,
}

impl<'a> From<Option<&'a str>> for TextInput<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(TextInput::Missing, TextInput::Text)
    }
}

impl<'a> From<Option<&'a Value>> for TextInput<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => TextInput::Missing,
            Some(Value::String(s)) => TextInput::Text(s),
            Some(_) => TextInput::WrongType,
        }
    }
}

/// Require a present, non-blank string of at most `max_len` characters.
///
/// Returns the value when it satisfied every constraint.
pub fn required_text<'a>(
    violations: &mut Violations,
    field: &str,
    value: TextInput<'a>,
    max_len: usize,
) -> Option<&'a str> {
    let value = match value {
        TextInput::Text(value) => value,
        TextInput::Missing => {
            violations.push(field, "This field is missing.");
            return None;
        }
        TextInput::WrongType => {
            violations.push(field, "This value should be of type string.");
            return None;
        }
    };
    if value.trim().is_empty() {
        violations.push(field, "This value should not be blank.");
        return None;
    }
    if value.chars().count() > max_len {
        violations.push(
            field,
            format!(
                "This value is too long. It should have {} characters or less.",
                max_len
            ),
        );
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_violation() {
        let mut violations = Violations::new();
        positive(&mut violations, "page", 0);
        in_range(&mut violations, "per_page", 101, 1, 100);

        assert_eq!(
            violations.to_string(),
            "[page]: This value should be positive.\n\
             [per_page]: This value should be between 1 and 100."
        );
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut violations = Violations::new();
        in_range(&mut violations, "n", 1, 1, 100);
        in_range(&mut violations, "n", 100, 1, 100);
        assert!(violations.is_empty());

        in_range(&mut violations, "n", 0, 1, 100);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_required_text_rejects_missing_blank_and_long() {
        let mut violations = Violations::new();
        assert!(required_text(&mut violations, "a", TextInput::Missing, 5).is_none());
        assert!(required_text(&mut violations, "b", TextInput::Text(""), 5).is_none());
        assert!(required_text(&mut violations, "c", TextInput::Text("   "), 5).is_none());
        assert!(required_text(&mut violations, "d", TextInput::Text("toolong"), 5).is_none());
        assert_eq!(violations.len(), 4);
        assert!(violations.has_field("a"));
        assert!(violations.has_field("d"));
    }

    #[test]
    fn test_required_text_counts_characters_not_bytes() {
        let mut violations = Violations::new();
        let accented = "é".repeat(MAX_TEXT_LEN);
        assert_eq!(
            required_text(&mut violations, "name", TextInput::Text(&accented), MAX_TEXT_LEN),
            Some(accented.as_str())
        );
        assert!(violations.into_result().is_ok());
    }

    #[test]
    fn test_json_values_map_to_text_input() {
        let number = serde_json::json!(123);
        let text = serde_json::json!("B");
        assert_eq!(TextInput::from(Some(&number)), TextInput::WrongType);
        assert_eq!(TextInput::from(Some(&text)), TextInput::Text("B"));
        assert_eq!(TextInput::from(Some(&Value::Null)), TextInput::Missing);
        assert_eq!(TextInput::from(None::<&Value>), TextInput::Missing);

        let mut violations = Violations::new();
        assert!(required_text(&mut violations, "name", TextInput::WrongType, 5).is_none());
        assert_eq!(
            violations.to_string(),
            "[name]: This value should be of type string."
        );
    }
}
