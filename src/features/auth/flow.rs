//! Step state machine for the checkout sign-in/sign-up flow. The controller
//! owns the session state, validates step preconditions, invokes the auth
//! backend, and applies the transition implied by each outcome. It never
//! performs navigation or session establishment itself; terminal success
//! hands the issued credential back to the caller.
//!
//! Flow Overview: AwaitingIdentifier runs the existence check and branches to
//! PasswordlessChallenge or RegistrationRequired. The challenge step starts a
//! passwordless exchange on entry and verifies the emailed code on submit.
//! Registration advances to ConfirmRegistration once the provider confirms
//! code delivery by email; confirmation then signs the user in.
//!
//! Every submission carries a generation token. When a submission resolves
//! with a token that no longer matches the controller's current generation, a
//! newer submission has started in the meantime and the stale result is
//! discarded without touching state.

use crate::features::auth::backend::{AuthBackend, AuthError, ChallengeSession, Credential};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shown when a code is submitted before the challenge session exists.
const SESSION_MISSING: &str = "Session not found";
/// Fallback for unrecognized failures during the existence check.
const EMAIL_CHECK_FALLBACK: &str = "An error occurred during email check. Please try again.";
/// Fallback for unrecognized failures on every other step.
const SIGN_IN_FALLBACK: &str = "An error occurred during sign in. Please try again.";

/// The four stages of the flow. Success has no terminal step; the caller
/// leaves the flow entirely once a credential is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    AwaitingIdentifier,
    PasswordlessChallenge,
    RegistrationRequired,
    ConfirmRegistration,
}

/// State owned by the controller for the lifetime of one sign-in attempt.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub step: Step,
    pub error_message: Option<String>,
    pub is_submitting: bool,
    pub challenge_session: Option<ChallengeSession>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            step: Step::AwaitingIdentifier,
            error_message: None,
            is_submitting: false,
            challenge_session: None,
        }
    }
}

/// Result of one submission, from the caller's point of view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The flow stayed in place or moved to another step; read the state.
    Continue,
    /// Terminal success: deliver the credential downstream and exit the flow.
    SignedIn(Credential),
    /// A newer submission started while this one was in flight; the result
    /// was discarded and state is untouched.
    Superseded,
}

/// Governs whether a failed confirmation call still attempts the follow-up
/// password sign-in. `AttemptSignIn` preserves the historical behavior where
/// the confirmation error is recorded but sign-in proceeds; `Halt` stops the
/// submission at the confirmation failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfirmationPolicy {
    #[default]
    AttemptSignIn,
    Halt,
}

/// The step flow controller. Single-threaded; interior mutability lets the
/// UI share one instance across event handlers.
pub struct LoginFlow {
    backend: Rc<dyn AuthBackend>,
    state: Rc<RefCell<SessionState>>,
    generation: Cell<u64>,
    policy: ConfirmationPolicy,
}

impl LoginFlow {
    pub fn new(backend: Rc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            state: Rc::new(RefCell::new(SessionState::default())),
            generation: Cell::new(0),
            policy: ConfirmationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current state, cloned for rendering.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Submits the identifier from AwaitingIdentifier and branches on the
    /// existence check.
    pub async fn submit_identifier(&self, identifier: &str) -> Outcome {
        let generation = self.begin();
        let result = self.backend.existence_check(identifier).await;
        if !self.is_current(generation) {
            return Outcome::Superseded;
        }

        let mut state = self.state.borrow_mut();
        state.is_submitting = false;
        match result {
            Ok(true) => state.step = Step::PasswordlessChallenge,
            Ok(false) => state.step = Step::RegistrationRequired,
            Err(err) => state.error_message = Some(surface(&err, EMAIL_CHECK_FALLBACK)),
        }
        Outcome::Continue
    }

    /// Starts the passwordless challenge on step entry and stores the
    /// challenge session. Not a form submission: `is_submitting` is left
    /// alone and a failure leaves the session empty with an error surfaced.
    pub async fn start_challenge(&self, identifier: &str) -> Outcome {
        let generation = self.generation.get();
        let result = self.backend.start_passwordless(identifier).await;
        if !self.is_current(generation) {
            return Outcome::Superseded;
        }

        let mut state = self.state.borrow_mut();
        match result {
            Ok(session) => state.challenge_session = Some(session),
            Err(err) => state.error_message = Some(surface(&err, SIGN_IN_FALLBACK)),
        }
        Outcome::Continue
    }

    /// Verifies the one-time code. Requires the challenge session; without
    /// it the backend is never called and the submission fails terminally.
    pub async fn submit_code(&self, identifier: &str, code: &str) -> Outcome {
        let generation = self.begin();
        let session = self.state.borrow().challenge_session.clone();
        let Some(session) = session else {
            let mut state = self.state.borrow_mut();
            state.is_submitting = false;
            state.error_message = Some(SESSION_MISSING.to_string());
            return Outcome::Continue;
        };

        let result = self.backend.verify_code(identifier, code, &session).await;
        if !self.is_current(generation) {
            return Outcome::Superseded;
        }

        let mut state = self.state.borrow_mut();
        state.is_submitting = false;
        match result {
            Ok(credential) => Outcome::SignedIn(credential),
            Err(err) => {
                state.error_message = Some(surface(&err, SIGN_IN_FALLBACK));
                Outcome::Continue
            }
        }
    }

    /// Registers the account. The flow advances to ConfirmRegistration only
    /// once the provider confirms it delivered the code by email.
    pub async fn submit_registration(&self, identifier: &str, secret: &str) -> Outcome {
        let generation = self.begin();
        let result = self.backend.register(identifier, secret).await;
        if !self.is_current(generation) {
            return Outcome::Superseded;
        }

        let mut state = self.state.borrow_mut();
        state.is_submitting = false;
        match result {
            Ok(receipt) if receipt.delivery_confirmed => {
                state.step = Step::ConfirmRegistration;
            }
            Ok(_) => {}
            Err(err) => state.error_message = Some(surface(&err, SIGN_IN_FALLBACK)),
        }
        Outcome::Continue
    }

    /// Confirms the registration with the emailed code, then signs in with
    /// the secret. A confirmation failure is recorded and, under the default
    /// policy, sign-in is still attempted.
    pub async fn submit_confirmation(
        &self,
        identifier: &str,
        code: &str,
        secret: &str,
    ) -> Outcome {
        let generation = self.begin();
        let confirmation = self.backend.confirm_registration(identifier, code).await;
        if !self.is_current(generation) {
            return Outcome::Superseded;
        }

        if let Err(err) = confirmation {
            self.state.borrow_mut().error_message = Some(surface(&err, SIGN_IN_FALLBACK));
            if self.policy == ConfirmationPolicy::Halt {
                self.state.borrow_mut().is_submitting = false;
                return Outcome::Continue;
            }
        }

        let result = self.backend.sign_in(identifier, secret).await;
        if !self.is_current(generation) {
            return Outcome::Superseded;
        }

        let mut state = self.state.borrow_mut();
        state.is_submitting = false;
        match result {
            Ok(credential) => Outcome::SignedIn(credential),
            Err(err) => {
                state.error_message = Some(surface(&err, SIGN_IN_FALLBACK));
                Outcome::Continue
            }
        }
    }

    /// Opens a submission: clears the previous error, raises the submitting
    /// flag, and issues the generation token that guards the result.
    fn begin(&self) -> u64 {
        {
            let mut state = self.state.borrow_mut();
            state.error_message = None;
            state.is_submitting = true;
        }
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    #[cfg(test)]
    fn state_handle(&self) -> Rc<RefCell<SessionState>> {
        Rc::clone(&self.state)
    }
}

/// Resolves the user-facing message for a backend failure: the fixed message
/// for known kinds, the step's generic fallback otherwise.
fn surface(err: &AuthError, fallback: &'static str) -> String {
    err.kind
        .user_message()
        .map_or_else(|| fallback.to_string(), str::to_string)
}
