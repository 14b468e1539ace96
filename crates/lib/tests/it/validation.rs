//! Validation engine integration tests

use pfeps_session::validation::{
    Field, MSG_EMAIL_FORBIDDEN, MSG_EMAIL_FORMAT, MSG_IDENTIFICATION_DIGITS_ONLY,
    MSG_IDENTIFICATION_FORMAT, MSG_NAME_FORMAT, MSG_PASSWORD_MIN_LENGTH, ValidationErrorSet,
    instant_check, validate, validate_registration,
};

use crate::helpers::valid_registration;

#[test]
fn instant_check_never_reports_required() {
    for field in Field::ALL {
        assert_eq!(instant_check(field, ""), None);
        assert_eq!(instant_check(field, "   "), None);
    }
    // And non-empty valid input is silent too.
    assert_eq!(instant_check(Field::Name, "Juan Pérez"), None);
    assert_eq!(instant_check(Field::Identification, "12345"), None);
    assert_eq!(instant_check(Field::Email, "a@b.com"), None);
    assert_eq!(instant_check(Field::Password, "123456"), None);
}

#[test]
fn required_fires_on_whitespace_only_input() {
    for field in Field::ALL {
        assert!(validate(field, "   ").is_some(), "{field} must be required");
        assert!(validate(field, "").is_some(), "{field} must be required");
    }
}

#[test]
fn identification_accepts_exactly_ten_digits() {
    assert_eq!(validate(Field::Identification, "0123456789"), None);
    assert_eq!(
        validate(Field::Identification, "01234567890"),
        Some(MSG_IDENTIFICATION_FORMAT)
    );
    assert_eq!(
        validate(Field::Identification, "12a"),
        Some(MSG_IDENTIFICATION_FORMAT)
    );
}

#[test]
fn identification_instant_check_flags_characters_not_length() {
    // A stray letter is flagged immediately with the keystroke message.
    assert_eq!(
        instant_check(Field::Identification, "12a"),
        Some(MSG_IDENTIFICATION_DIGITS_ONLY)
    );
    // Length is a full-validation concern only.
    assert_eq!(instant_check(Field::Identification, "01234567890"), None);
}

#[test]
fn forbidden_email_characters_take_precedence_over_shape() {
    assert_eq!(
        validate(Field::Email, "a<b@c.com"),
        Some(MSG_EMAIL_FORBIDDEN)
    );
    assert_eq!(
        instant_check(Field::Email, "a<b@c.com"),
        Some(MSG_EMAIL_FORBIDDEN)
    );
    // Shape problems only surface on full validation.
    assert_eq!(validate(Field::Email, "ab@c"), Some(MSG_EMAIL_FORMAT));
    assert_eq!(instant_check(Field::Email, "ab@c"), None);
}

#[test]
fn password_length_boundary_is_exact() {
    assert_eq!(validate(Field::Password, "12345"), Some(MSG_PASSWORD_MIN_LENGTH));
    assert_eq!(validate(Field::Password, "123456"), None);
    assert_eq!(
        instant_check(Field::Password, "12345"),
        Some(MSG_PASSWORD_MIN_LENGTH)
    );
}

#[test]
fn trimming_applies_to_the_required_check_only() {
    // Surrounding whitespace is not stripped before the format rules run:
    // the name pattern tolerates spaces, the digits pattern does not.
    assert_eq!(validate(Field::Name, " Juan "), None);
    assert_eq!(
        validate(Field::Identification, " 123 "),
        Some(MSG_IDENTIFICATION_FORMAT)
    );
}

#[test]
fn error_set_entries_are_independent() {
    let mut errors = ValidationErrorSet::new();
    errors.apply(Field::Email, validate(Field::Email, "bad"));
    errors.apply(Field::Password, validate(Field::Password, "123"));
    assert_eq!(errors.len(), 2);

    // Fixing the email does not clear the stale password error.
    errors.apply(Field::Email, validate(Field::Email, "a@b.com"));
    assert_eq!(errors.get(Field::Email), None);
    assert_eq!(errors.get(Field::Password), Some(MSG_PASSWORD_MIN_LENGTH));
    assert!(!errors.is_empty());

    errors.apply(Field::Password, validate(Field::Password, "123456"));
    assert!(errors.is_empty());
}

#[test]
fn instant_check_clears_a_resolved_error() {
    let mut errors = ValidationErrorSet::new();
    errors.apply(Field::Name, instant_check(Field::Name, "Juan3"));
    assert_eq!(errors.get(Field::Name), Some(MSG_NAME_FORMAT));

    // The user deletes the offending character.
    errors.apply(Field::Name, instant_check(Field::Name, "Juan"));
    assert!(errors.is_empty());
}

#[test]
fn validate_registration_collects_every_field() {
    let mut data = valid_registration();
    assert!(validate_registration(&data).is_empty());

    data.name = "J0sé".to_string();
    data.identification = "12a".to_string();
    data.email = "nope".to_string();
    data.password = "123".to_string();
    let errors = validate_registration(&data);
    assert_eq!(errors.len(), 4);
    let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, Field::ALL.to_vec());
}
