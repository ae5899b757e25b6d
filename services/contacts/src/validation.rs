//! Input validation utilities
//!
//! Request payloads are checked field by field with a [`Validator`], which
//! collects every failure into a [`ValidationErrors`] map keyed by field name.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::Patch;

/// Field name to messages mapping returned with a 400 response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// A single error not tied to a field
    pub fn message(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add("message", message);
        errors
    }

    /// Record a message against `field`
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Collects validation failures while normalizing input values
///
/// Strings are trimmed and blank strings count as absent, so `""` fails a
/// required check and clears an optional one.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field must be present and non-blank.
    ///
    /// Returns the trimmed value, or an empty string when the check failed.
    pub fn required(&mut self, field: &str, value: Option<String>, max: usize) -> String {
        match normalize(value) {
            Some(value) => {
                self.max_length(field, &value, max);
                value
            }
            None => {
                self.errors.add(field, required_message(field));
                String::new()
            }
        }
    }

    /// Same as [`Validator::required`] for a partial update field.
    pub fn required_patch(&mut self, field: &str, value: Patch<String>, max: usize) -> String {
        self.required(field, value.into_option(), max)
    }

    /// The field may be absent; a present value is length-checked.
    pub fn optional(&mut self, field: &str, value: Option<String>, max: usize) -> Option<String> {
        let value = normalize(value);
        if let Some(value) = &value {
            self.max_length(field, value, max);
        }
        value
    }

    /// Optional partial update field; blank strings become [`Patch::Null`].
    pub fn optional_patch(&mut self, field: &str, value: Patch<String>, max: usize) -> Patch<String> {
        match value {
            Patch::Value(value) => match self.optional(field, Some(value), max) {
                Some(value) => Patch::Value(value),
                None => Patch::Null,
            },
            other => other,
        }
    }

    /// A present value must look like an email address.
    pub fn email(&mut self, field: &str, value: Option<&str>) {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("Failed to compile email regex")
        });

        if let Some(value) = value {
            if !regex.is_match(value) {
                self.errors.add(
                    field,
                    format!("The {} field must be a valid email address.", label(field)),
                );
            }
        }
    }

    /// A present value may only hold digits, spaces and `+-()`.
    pub fn phone(&mut self, field: &str, value: Option<&str>) {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX
            .get_or_init(|| Regex::new(r"^\+?[0-9 ()-]+$").expect("Failed to compile phone regex"));

        if let Some(value) = value {
            if !regex.is_match(value) {
                self.errors
                    .add(field, format!("The {} field format is invalid.", label(field)));
            }
        }
    }

    /// Finish validation, failing if any rule was violated
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn max_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.errors.add(
                field,
                format!(
                    "The {} field must not be greater than {} characters.",
                    label(field),
                    max
                ),
            );
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

fn required_message(field: &str) -> String {
    format!("The {} field is required.", label(field))
}
