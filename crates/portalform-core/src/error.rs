use serde::Serialize;
use thiserror::Error;

/// A single field's validation failure.
///
/// The display string is the exact message shown under the field, so this
/// enum doubles as the message catalog. Never fatal: the user recovers by
/// correcting the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("La matrícula es obligatoria")]
    MatricolaRequired,

    #[error("La matrícula debe tener entre 6 y 8 dígitos")]
    MatricolaFormat,

    #[error("La contraseña es obligatoria")]
    PasswordRequired,

    #[error("La contraseña es demasiado corta")]
    PasswordTooShort,

    #[error("La fecha de vencimiento debe ser futura")]
    ExpiryNotFuture,

    #[error("La fecha de vencimiento no es una fecha válida")]
    ExpiryInvalidFormat,
}

impl FieldError {
    /// Stable machine name for logs and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldError::MatricolaRequired => "matricola_required",
            FieldError::MatricolaFormat => "matricola_format",
            FieldError::PasswordRequired => "password_required",
            FieldError::PasswordTooShort => "password_too_short",
            FieldError::ExpiryNotFuture => "expiry_not_future",
            FieldError::ExpiryInvalidFormat => "expiry_invalid_format",
        }
    }
}
