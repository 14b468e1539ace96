//! Two-tier field validation for the login and registration forms
//!
//! [`instant_check`] runs on every keystroke and only flags format
//! violations on non-empty input, so active typing is never interrupted with
//! a "required" error. [`validate`] runs on blur and on submit, adds the
//! required-field rules, and is the authoritative gate for submission.
//!
//! The rule table is shared by every form; messages are the product's
//! user-facing strings.

mod error_set;

pub use error_set::ValidationErrorSet;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::transport::RegistrationData;

/// Maximum number of digits accepted in an identification number.
pub const MAX_IDENTIFICATION_DIGITS: usize = 10;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

pub const MSG_NAME_REQUIRED: &str = "El nombre es obligatorio.";
pub const MSG_NAME_FORMAT: &str = "Solo se permiten letras, espacios, guiones y acentos.";
pub const MSG_IDENTIFICATION_REQUIRED: &str = "La cédula es obligatoria.";
pub const MSG_IDENTIFICATION_FORMAT: &str = "La cédula solo debe contener números maximo 10 Digitos";
pub const MSG_IDENTIFICATION_DIGITS_ONLY: &str = "Caracter Invalido solo Numeros";
pub const MSG_EMAIL_REQUIRED: &str = "El correo electrónico es obligatorio.";
pub const MSG_EMAIL_FORBIDDEN: &str = "El correo contiene caracteres especiales inválidos.";
pub const MSG_EMAIL_FORMAT: &str = "Formato de correo inválido (ej. usuario@dominio.com).";
pub const MSG_PASSWORD_REQUIRED: &str = "La contraseña es obligatoria.";
pub const MSG_PASSWORD_MIN_LENGTH: &str = "La contraseña debe tener al menos 6 caracteres.";

// Letters (including accented Latin vowels and ñ/ü), spaces and hyphens.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ\s-]+$").unwrap());

static DIGITS_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

// Characters never allowed in the email field, regardless of shape.
static EMAIL_FORBIDDEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>"'();:\\,]"#).unwrap());

// Standard local@domain.tld shape.
static EMAIL_SHAPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// The validated form fields, shared by the login and registration forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Identification,
    Email,
    Password,
}

impl Field {
    /// All validated fields, in form order.
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Identification,
        Field::Email,
        Field::Password,
    ];

    /// The form input name for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Identification => "identification",
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full validation of one field: required, format and length rules.
///
/// Runs on blur and on submit; a `Some` result is the message to attach to
/// the field. Whitespace-only input counts as empty. Trimming applies to the
/// required check only; the format rules see the value exactly as typed.
pub fn validate(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::Name => {
            if value.trim().is_empty() {
                Some(MSG_NAME_REQUIRED)
            } else if !NAME_PATTERN.is_match(value) {
                Some(MSG_NAME_FORMAT)
            } else {
                None
            }
        }
        Field::Identification => {
            if value.trim().is_empty() {
                Some(MSG_IDENTIFICATION_REQUIRED)
            } else if !DIGITS_PATTERN.is_match(value)
                || value.chars().count() > MAX_IDENTIFICATION_DIGITS
            {
                Some(MSG_IDENTIFICATION_FORMAT)
            } else {
                None
            }
        }
        Field::Email => {
            if value.trim().is_empty() {
                Some(MSG_EMAIL_REQUIRED)
            } else if EMAIL_FORBIDDEN_PATTERN.is_match(value) {
                // The forbidden-character rule wins over the shape rule.
                Some(MSG_EMAIL_FORBIDDEN)
            } else if !EMAIL_SHAPE_PATTERN.is_match(value) {
                Some(MSG_EMAIL_FORMAT)
            } else {
                None
            }
        }
        Field::Password => {
            if value.trim().is_empty() {
                Some(MSG_PASSWORD_REQUIRED)
            } else if value.chars().count() < MIN_PASSWORD_CHARS {
                Some(MSG_PASSWORD_MIN_LENGTH)
            } else {
                None
            }
        }
    }
}

/// Keystroke-time validation of one field.
///
/// Flags format violations only, never emptiness, and (except for the
/// forbidden-character rule, which is vacuously safe on empty input) only on
/// input that is non-empty after trimming. Intentionally more lenient than
/// [`validate`].
pub fn instant_check(field: Field, value: &str) -> Option<&'static str> {
    let typed = !value.trim().is_empty();
    match field {
        Field::Name => (typed && !NAME_PATTERN.is_match(value)).then_some(MSG_NAME_FORMAT),
        Field::Identification => {
            (typed && !DIGITS_PATTERN.is_match(value)).then_some(MSG_IDENTIFICATION_DIGITS_ONLY)
        }
        Field::Email => EMAIL_FORBIDDEN_PATTERN
            .is_match(value)
            .then_some(MSG_EMAIL_FORBIDDEN),
        Field::Password => {
            (typed && value.chars().count() < MIN_PASSWORD_CHARS).then_some(MSG_PASSWORD_MIN_LENGTH)
        }
    }
}

/// Validates a whole registration payload, as the form does on submit.
pub fn validate_registration(data: &RegistrationData) -> ValidationErrorSet {
    let mut errors = ValidationErrorSet::new();
    errors.apply(Field::Name, validate(Field::Name, &data.name));
    errors.apply(
        Field::Identification,
        validate(Field::Identification, &data.identification),
    );
    errors.apply(Field::Email, validate(Field::Email, &data.email));
    errors.apply(Field::Password, validate(Field::Password, &data.password));
    errors
}
