//! Per-field validation rules.
//!
//! A rule is selected by the input's `name` attribute; names with no rule
//! are unconstrained and always pass. Values are trimmed before any rule
//! runs, and the expiry comparison is anchored on a caller-supplied clock
//! so tests control "now".

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FieldError;

lazy_static! {
    static ref MATRICOLA_PATTERN: Regex = Regex::new(r"^[0-9]{6,8}$").unwrap();
}

/// Minimum password length accepted by the portal.
pub const MIN_PASSWORD_LEN: usize = 3;

/// Value format of the licence expiry field (`<input type="date">`).
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Rule attached to a logical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Student id: required, 6 to 8 ASCII digits.
    Matricola,
    /// Portal password: required, minimum length.
    Password,
    /// Licence expiry: optional, must be a future date when present.
    ExpiryDate,
    /// No rule; the field always passes.
    Unconstrained,
}

impl FieldRule {
    /// Select the rule for a field name.
    pub fn for_name(name: &str) -> Self {
        match name {
            "matricola" => FieldRule::Matricola,
            "password" | "contrasena" => FieldRule::Password,
            "vencimiento_licencia" => FieldRule::ExpiryDate,
            _ => FieldRule::Unconstrained,
        }
    }
}

/// Result of evaluating one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The rule ran and the value passed; the field earns success decoration.
    Accepted,
    /// No rule applied (unknown field, or an empty optional field). Valid,
    /// but the field stays undecorated.
    Skipped,
    /// The rule rejected the value.
    Rejected(FieldError),
}

impl FieldOutcome {
    /// Whether the field lets the form submit.
    pub fn is_valid(&self) -> bool {
        !matches!(self, FieldOutcome::Rejected(_))
    }

    /// The error, if the value was rejected.
    pub fn error(&self) -> Option<FieldError> {
        match self {
            FieldOutcome::Rejected(error) => Some(*error),
            _ => None,
        }
    }
}

/// Evaluate a field's raw value against the rule for its name.
pub fn evaluate_field(name: &str, raw_value: &str, now: DateTime<Utc>) -> FieldOutcome {
    let value = raw_value.trim();
    match FieldRule::for_name(name) {
        FieldRule::Matricola => check_matricola(value),
        FieldRule::Password => check_password(value),
        FieldRule::ExpiryDate => check_expiry(value, now),
        FieldRule::Unconstrained => FieldOutcome::Skipped,
    }
}

fn check_matricola(value: &str) -> FieldOutcome {
    if value.is_empty() {
        return FieldOutcome::Rejected(FieldError::MatricolaRequired);
    }
    if !MATRICOLA_PATTERN.is_match(value) {
        return FieldOutcome::Rejected(FieldError::MatricolaFormat);
    }
    FieldOutcome::Accepted
}

fn check_password(value: &str) -> FieldOutcome {
    if value.is_empty() {
        return FieldOutcome::Rejected(FieldError::PasswordRequired);
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return FieldOutcome::Rejected(FieldError::PasswordTooShort);
    }
    FieldOutcome::Accepted
}

fn check_expiry(value: &str, now: DateTime<Utc>) -> FieldOutcome {
    if value.is_empty() {
        // Optional field: absent is fine, but earns no success mark.
        return FieldOutcome::Skipped;
    }
    match NaiveDate::parse_from_str(value, EXPIRY_DATE_FORMAT) {
        Ok(date) => {
            // A date input carries no time of day; it expires at midnight UTC,
            // so "today" is already not in the future.
            let expiry = date.and_time(NaiveTime::MIN).and_utc();
            if expiry <= now {
                FieldOutcome::Rejected(FieldError::ExpiryNotFuture)
            } else {
                FieldOutcome::Accepted
            }
        }
        Err(_) => FieldOutcome::Rejected(FieldError::ExpiryInvalidFormat),
    }
}
