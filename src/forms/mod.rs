//! Form definitions backing the clinic pages.
//!
//! Every form is trimmed, validated into a sparse [`FieldErrors`] map, and
//! only then mapped to the payload the backend expects.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

pub mod auth;
pub mod booking;
pub mod dentist;
pub mod patient;
pub mod publication;
pub mod service;

/// Minimal password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\s-]{8,}$").expect("phone pattern is valid"));

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(FieldErrors),

    #[error("malformed form body: {0}")]
    Malformed(String),
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        FormError::Validation(FieldErrors::from(&errors))
    }
}

/// Sparse map from field name to the message shown next to it.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message; the first message recorded for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when no field failed.
    pub fn into_result(self) -> Result<(), FormError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FormError::Validation(self))
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                fields.insert(field.to_string(), message);
            }
        }
        fields
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{joined}")
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// `user@domain.tld`; blank values are left to the required check.
pub fn email_format(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(error("email", "Format d'email invalide"))
    }
}

/// At least eight digits, spaces, `+` or `-`; blank values are left to the required check.
pub fn phone_format(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(error("phone", "Format de téléphone invalide"))
    }
}

pub fn password_length(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(error(
            "password",
            "Le mot de passe doit contenir au moins 6 caractères",
        ))
    }
}

/// ISO `YYYY-MM-DD` date as sent by date inputs.
pub fn date_format(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_date(value).is_some() {
        Ok(())
    } else {
        Err(error("date", "Date invalide"))
    }
}

/// Non-negative decimal amount.
pub fn amount_format(value: &str) -> Result<(), ValidationError> {
    match parse_amount(value) {
        _ if value.is_empty() => Ok(()),
        Some(amount) if amount >= 0.0 => Ok(()),
        _ => Err(error("amount", "Montant invalide")),
    }
}

/// Strictly positive whole number.
pub fn count_format(value: &str) -> Result<(), ValidationError> {
    match value.parse::<u32>() {
        _ if value.is_empty() => Ok(()),
        Ok(count) if count > 0 => Ok(()),
        _ => Err(error("count", "Nombre invalide")),
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Finite decimal, accepting a comma as decimal separator.
pub fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rule() {
        assert!(email_format("a@b.co").is_ok());
        assert!(email_format("a@b").is_err());
        assert!(email_format("a.b@").is_err());
        assert!(email_format("a b@c.de").is_err());
        assert!(email_format("").is_ok());
    }

    #[test]
    fn password_rule() {
        assert!(password_length("12345").is_err());
        assert!(password_length("123456").is_ok());
        assert!(password_length("").is_ok());
    }

    #[test]
    fn phone_rule() {
        assert!(phone_format("+216 71 000 000").is_ok());
        assert!(phone_format("06-12-34-56-78").is_ok());
        assert!(phone_format("1234567").is_err());
        assert!(phone_format("06 12 ab 56").is_err());
    }

    #[test]
    fn amount_and_count_rules() {
        assert_eq!(parse_amount("12,5"), Some(12.5));
        assert_eq!(parse_amount("NaN"), None);
        assert!(amount_format("-1").is_err());
        assert!(amount_format("40").is_ok());
        assert!(count_format("0").is_err());
        assert!(count_format("3").is_ok());
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "L'email est requis");
        errors.insert("email", "Format d'email invalide");
        assert_eq!(errors.get("email"), Some("L'email est requis"));
        assert_eq!(errors.len(), 1);
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
