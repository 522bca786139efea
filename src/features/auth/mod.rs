//! Auth feature module covering the multi-step checkout sign-in flow.
//!
//! Flow Overview: an identifier submission runs an existence check and routes
//! the user to either the passwordless challenge or registration. The
//! challenge step starts an email one-time-code exchange and verifies the
//! code; registration signs the user up and confirms the account with the
//! emailed code before signing in. Successful terminal steps hand the issued
//! credential to session establishment and navigate to checkout.
//!
//! The step state machine lives in [`flow`] and depends only on the
//! [`backend::AuthBackend`] capability, so it is exercised natively in tests
//! against a scripted backend while the browser build wires in the identity
//! provider client from [`cognito`].

pub(crate) mod backend;
#[cfg(target_arch = "wasm32")]
pub(crate) mod client;
pub(crate) mod cognito;
pub(crate) mod flow;
pub(crate) mod validate;
