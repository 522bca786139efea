//! Per-step form validation. Each step exposes a schema over the shared
//! email/secret/code fields, producing field-level error strings and an
//! overall-valid flag. The flow controller trusts this layer: it only ever
//! receives payloads that passed the active step's schema.

use crate::features::auth::flow::Step;
use regex::Regex;

/// One-time codes are a fixed-length numeric string.
pub const CODE_LENGTH: usize = 6;
const SECRET_MIN_LENGTH: usize = 8;
/// Punctuation accepted as the required special character in a secret.
const SECRET_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Raw values of the shared form fields, snapshotted at validation time.
#[derive(Clone, Debug, Default)]
pub struct FormValues {
    pub email: String,
    pub password: String,
    pub otp: String,
}

/// Field-level validation messages for the active step. Fields outside the
/// step's schema are always `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub otp: Option<String>,
}

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.otp.is_none()
    }
}

/// Validates the fields the given step's schema covers.
pub fn validate_step(step: Step, values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors {
        email: email_error(&values.email),
        ..FieldErrors::default()
    };

    match step {
        Step::AwaitingIdentifier => {}
        Step::PasswordlessChallenge => {
            errors.otp = code_error(&values.otp);
        }
        Step::RegistrationRequired => {
            errors.password = secret_error(&values.password);
        }
        Step::ConfirmRegistration => {
            errors.otp = code_error(&values.otp);
            errors.password = secret_error(&values.password);
        }
    }

    errors
}

fn email_error(email: &str) -> Option<String> {
    if is_valid_email(email) {
        None
    } else {
        Some("Invalid email address".to_string())
    }
}

fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

fn code_error(code: &str) -> Option<String> {
    if code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit()) {
        None
    } else {
        Some("OTP must be 6 digits".to_string())
    }
}

/// Secret complexity policy: length plus one of each required character
/// class. The first unmet rule is reported, in policy order.
fn secret_error(secret: &str) -> Option<String> {
    if secret.len() < SECRET_MIN_LENGTH {
        return Some("Password must be at least 8 characters long".to_string());
    }
    if !secret.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain at least 1 number".to_string());
    }
    if !secret.chars().any(|c| SECRET_SYMBOLS.contains(c)) {
        return Some("Password must contain at least 1 special character".to_string());
    }
    if !secret.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least 1 uppercase letter".to_string());
    }
    if !secret.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain at least 1 lowercase letter".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(email: &str, password: &str, otp: &str) -> FormValues {
        FormValues {
            email: email.to_string(),
            password: password.to_string(),
            otp: otp.to_string(),
        }
    }

    #[test]
    fn identifier_step_only_checks_email() {
        let errors = validate_step(Step::AwaitingIdentifier, &values("test@test.com", "", ""));
        assert!(errors.is_valid());

        let errors = validate_step(Step::AwaitingIdentifier, &values("not-an-email", "", ""));
        assert_eq!(errors.email.as_deref(), Some("Invalid email address"));
        assert_eq!(errors.password, None);
        assert_eq!(errors.otp, None);
    }

    #[test]
    fn email_rejects_whitespace_and_missing_domain_dot() {
        assert!(is_valid_email("name@inbox.im"));
        assert!(!is_valid_email("name@inbox"));
        assert!(!is_valid_email("na me@inbox.im"));
        assert!(!is_valid_email("@inbox.im"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn challenge_step_requires_six_digit_code() {
        let ok = validate_step(
            Step::PasswordlessChallenge,
            &values("test@test.com", "", "123456"),
        );
        assert!(ok.is_valid());

        for code in ["12345", "1234567", "12345a", ""] {
            let errors = validate_step(
                Step::PasswordlessChallenge,
                &values("test@test.com", "", code),
            );
            assert_eq!(errors.otp.as_deref(), Some("OTP must be 6 digits"));
        }
    }

    #[test]
    fn registration_step_enforces_secret_policy() {
        let ok = validate_step(
            Step::RegistrationRequired,
            &values("test@test.com", "Test123@", ""),
        );
        assert!(ok.is_valid());

        let cases = [
            ("Test12@", "Password must be at least 8 characters long"),
            ("Testtest@", "Password must contain at least 1 number"),
            ("Testtest1", "Password must contain at least 1 special character"),
            ("testtest1@", "Password must contain at least 1 uppercase letter"),
            ("TESTTEST1@", "Password must contain at least 1 lowercase letter"),
        ];
        for (secret, message) in cases {
            let errors = validate_step(
                Step::RegistrationRequired,
                &values("test@test.com", secret, ""),
            );
            assert_eq!(errors.password.as_deref(), Some(message), "{secret}");
        }
    }

    #[test]
    fn confirmation_step_checks_code_and_secret() {
        let ok = validate_step(
            Step::ConfirmRegistration,
            &values("test@test.com", "Test123@", "123456"),
        );
        assert!(ok.is_valid());

        let errors = validate_step(
            Step::ConfirmRegistration,
            &values("test@test.com", "short", "12345x"),
        );
        assert!(errors.password.is_some());
        assert!(errors.otp.is_some());
        assert!(!errors.is_valid());
    }
}
