//! Field descriptors and validation shared by every intake wizard.
//!
//! Sections describe their fields declaratively; the wizard engine validates a
//! section by walking its descriptor against the raw string values held in the
//! flow. Descriptors are rebuilt on demand because some sections reshape
//! themselves (the academic section grows or shrinks its semester fields).

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A validation failure pinned to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub section: &'static str,
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

/// Collected field errors for a section or a whole submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        section: &'static str,
        field: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.0.push(FieldError {
            section,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    /// Message recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Supported data kinds for form fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Date,
    Choice(Vec<String>),
}

type ValidatorCallback = dyn Fn(&str) -> Result<String, String> + Send + Sync;
type SharedValidatorCallback = Arc<ValidatorCallback>;

/// Built-in validation helpers.
#[derive(Clone)]
pub enum Validator {
    None,
    Integer,
    Year,
    Score,
    Date,
    Email,
    Phone,
    OneOf(Vec<String>),
    Custom(SharedValidatorCallback),
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Validator::None => "None",
            Validator::Integer => "Integer",
            Validator::Year => "Year",
            Validator::Score => "Score",
            Validator::Date => "Date",
            Validator::Email => "Email",
            Validator::Phone => "Phone",
            Validator::OneOf(_) => "OneOf",
            Validator::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}

impl Validator {
    /// Checks a non-empty raw value and returns its normalized form.
    pub fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let trimmed = input.trim();
        match self {
            Validator::None => Ok(trimmed.to_string()),
            Validator::Integer => parse_count(trimmed)
                .map(|v| v.to_string())
                .map_err(ValidationError::new),
            Validator::Year => parse_year(trimmed)
                .map(|v| v.to_string())
                .map_err(ValidationError::new),
            Validator::Score => parse_score(trimmed)
                .map(|_| trimmed.to_string())
                .map_err(ValidationError::new),
            Validator::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|d| d.to_string())
                .map_err(|_| ValidationError::new("Use YYYY-MM-DD format")),
            Validator::Email => {
                let valid = trimmed
                    .split_once('@')
                    .map(|(user, domain)| {
                        !user.is_empty() && domain.contains('.') && !domain.starts_with('.')
                    })
                    .unwrap_or(false);
                if valid {
                    Ok(trimmed.to_string())
                } else {
                    Err(ValidationError::new("Enter a valid email address"))
                }
            }
            Validator::Phone => {
                let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
                let allowed = trimmed
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
                if allowed && (7..=15).contains(&digits) {
                    Ok(trimmed.to_string())
                } else {
                    Err(ValidationError::new("Enter a phone number (7-15 digits)"))
                }
            }
            Validator::OneOf(options) => {
                let normalized = trimmed.to_lowercase();
                options
                    .iter()
                    .find(|candidate| candidate.to_lowercase() == normalized)
                    .cloned()
                    .ok_or_else(|| {
                        ValidationError::new(format!(
                            "Value must be one of: {}",
                            options.join(", ")
                        ))
                    })
            }
            Validator::Custom(func) => func(trimmed).map_err(ValidationError::new),
        }
    }
}

/// Parses a calendar year (four digits, 1900..=2100).
pub fn parse_year(raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (1900..=2100).contains(year))
        .ok_or_else(|| "Enter a four-digit year (e.g., 2026)".to_string())
}

/// Parses a result score; a trailing `%` is accepted and stripped.
pub fn parse_score(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| "Enter a non-negative numeric score (e.g., 8.5 or 91.2%)".to_string())
}

/// Parses a non-negative whole number.
pub fn parse_count(raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| "Enter a whole number (0 or greater)".to_string())
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub read_only: bool,
    pub help: Option<&'static str>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
        validator: Validator,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: true,
            read_only: false,
            help: None,
            validator,
        }
    }

    /// Text field with no format constraint.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text, Validator::None)
    }

    /// Single-choice field; values are matched case-insensitively.
    pub fn choice(key: impl Into<String>, label: impl Into<String>, options: &[&str]) -> Self {
        let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        Self::new(
            key,
            label,
            FieldKind::Choice(options.clone()),
            Validator::OneOf(options),
        )
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Validates one raw value against this descriptor.
    ///
    /// Empty values fail only when the field is required; non-empty values
    /// always go through the validator.
    pub fn check(&self, raw: &str) -> Result<(), ValidationError> {
        if raw.trim().is_empty() {
            if self.required {
                return Err(ValidationError::new(format!("{} is required", self.label)));
            }
            return Ok(());
        }
        self.validator.validate(raw).map(|_| ())
    }
}

/// Ordered field list for one wizard section.
#[derive(Debug, Clone)]
pub struct SectionDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl SectionDescriptor {
    pub fn new(name: &'static str, title: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name,
            title,
            fields,
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Runs every field check, collecting all failures.
    pub fn validate<F>(&self, value_of: F) -> FieldErrors
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            let raw = value_of(&field.key).unwrap_or_default();
            if let Err(err) = field.check(&raw) {
                errors.push(self.name, field.key.clone(), err.message);
            }
        }
        errors
    }
}
