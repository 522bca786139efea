//! Capability contract between the step flow and the identity provider.
//! The flow controller only ever sees this trait and its error taxonomy;
//! the wire protocol stays inside the provider client.

use async_trait::async_trait;
use thiserror::Error;

/// Opaque token correlating a started passwordless attempt with its later
/// code verification. Never persisted beyond the in-memory session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeSession(String);

impl ChallengeSession {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque credential issued on successful authentication, forwarded to
/// session establishment. Must never be logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outcome of a registration call. The flow only advances to confirmation
/// once the provider confirms it delivered a code by email.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub delivery_confirmed: bool,
}

/// Closed set of failure kinds the flow distinguishes. Anything the provider
/// reports outside this set collapses into `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthErrorKind {
    UserNotFound,
    RateLimited,
    NotAuthorized,
    UserNotConfirmed,
    TooManyAttempts,
    UserAlreadyExists,
    CodeMismatch,
    Unknown,
}

impl AuthErrorKind {
    /// Maps a provider error code to a kind. Codes arrive as the bare
    /// exception name; unrecognized codes map to `Unknown`.
    pub fn from_provider_code(code: &str) -> Self {
        match code {
            "UserNotFoundException" => Self::UserNotFound,
            "LimitExceededException" => Self::RateLimited,
            "NotAuthorizedException" => Self::NotAuthorized,
            "UserNotConfirmedException" => Self::UserNotConfirmed,
            "TooManyRequestsException" => Self::TooManyAttempts,
            "UsernameExistsException" => Self::UserAlreadyExists,
            "CodeMismatchException" => Self::CodeMismatch,
            _ => Self::Unknown,
        }
    }

    /// Fixed user-facing message for the kind, or `None` when the caller
    /// should fall back to its step-specific generic message.
    pub fn user_message(self) -> Option<&'static str> {
        match self {
            Self::UserNotFound => Some("User not found. Please sign up."),
            Self::RateLimited => Some("Too many requests. Please try again later."),
            Self::NotAuthorized => Some("Invalid email or password. Please try again."),
            Self::UserNotConfirmed => {
                Some("Please confirm your email address before signing in.")
            }
            Self::TooManyAttempts => Some("Too many failed attempts. Please try again later."),
            Self::UserAlreadyExists => Some("User already exists. Please sign in."),
            Self::CodeMismatch => Some("Invalid verification code. Please try again."),
            Self::Unknown => None,
        }
    }
}

/// Failure reported by the auth backend, carrying the machine-readable kind
/// the flow maps to a user-facing message.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Unknown, message)
    }
}

/// The six operations the step flow needs from the identity provider.
///
/// Implementations run on the browser's single-threaded executor, so the
/// futures do not need to be `Send`.
#[async_trait(?Send)]
pub trait AuthBackend {
    /// Reports whether an account exists for the identifier.
    async fn existence_check(&self, identifier: &str) -> Result<bool, AuthError>;

    /// Starts a passwordless challenge and returns the session token needed
    /// to verify the emailed code.
    async fn start_passwordless(&self, identifier: &str) -> Result<ChallengeSession, AuthError>;

    /// Verifies the one-time code against the challenge session.
    async fn verify_code(
        &self,
        identifier: &str,
        code: &str,
        session: &ChallengeSession,
    ) -> Result<Credential, AuthError>;

    /// Registers a new account.
    async fn register(&self, identifier: &str, secret: &str)
        -> Result<RegistrationReceipt, AuthError>;

    /// Confirms a registration with the emailed code.
    async fn confirm_registration(&self, identifier: &str, code: &str) -> Result<(), AuthError>;

    /// Password sign-in, issuing a credential.
    async fn sign_in(&self, identifier: &str, secret: &str) -> Result<Credential, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_codes_map_to_their_kinds() {
        assert_eq!(
            AuthErrorKind::from_provider_code("UserNotFoundException"),
            AuthErrorKind::UserNotFound
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("LimitExceededException"),
            AuthErrorKind::RateLimited
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("NotAuthorizedException"),
            AuthErrorKind::NotAuthorized
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("UserNotConfirmedException"),
            AuthErrorKind::UserNotConfirmed
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("TooManyRequestsException"),
            AuthErrorKind::TooManyAttempts
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("UsernameExistsException"),
            AuthErrorKind::UserAlreadyExists
        );
        assert_eq!(
            AuthErrorKind::from_provider_code("CodeMismatchException"),
            AuthErrorKind::CodeMismatch
        );
    }

    #[test]
    fn unrecognized_provider_code_maps_to_unknown() {
        assert_eq!(
            AuthErrorKind::from_provider_code("InternalErrorException"),
            AuthErrorKind::Unknown
        );
        assert_eq!(AuthErrorKind::from_provider_code(""), AuthErrorKind::Unknown);
    }

    #[test]
    fn known_kinds_have_fixed_messages_and_unknown_has_none() {
        assert_eq!(
            AuthErrorKind::CodeMismatch.user_message(),
            Some("Invalid verification code. Please try again.")
        );
        assert_eq!(
            AuthErrorKind::UserAlreadyExists.user_message(),
            Some("User already exists. Please sign in.")
        );
        assert_eq!(AuthErrorKind::Unknown.user_message(), None);
    }
}
