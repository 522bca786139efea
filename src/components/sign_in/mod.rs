//! Multi-step sign-in form for the checkout page.
//!
//! Flow Overview
//!
//! 1. The shopper enters an email; an existence check routes them to the
//!    passwordless challenge (known account) or to registration (new one).
//! 2. Known accounts receive a one-time code and exchange it for a
//!    credential.
//! 3. New accounts choose a password, then confirm with an emailed code;
//!    confirmation chains straight into a password sign-in.
//! 4. On success the credential is handed to the backend session endpoint
//!    and the browser navigates to the checkout page.
//!
//! State lives in [`LoginFlow`]; components dispatch submissions through a
//! [`SignInScope`] handed down explicitly and mirror the controller state
//! into a signal after every call.

mod step_challenge;
mod step_confirm;
mod step_identifier;
mod step_register;

use std::rc::Rc;

use leptos::prelude::*;

use crate::app_lib::config::AppConfig;
use crate::components::{Alert, AlertKind};
use crate::features::auth::backend::AuthBackend;
use crate::features::auth::cognito::CognitoClient;
use crate::features::auth::flow::{LoginFlow, SessionState, Step};
use crate::features::auth::validate::FormValues;

use step_challenge::StepChallenge;
use step_confirm::StepConfirm;
use step_identifier::StepIdentifier;
use step_register::StepRegister;

pub(super) const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 disabled:bg-gray-100 disabled:text-gray-500";
pub(super) const LABEL_CLASS: &str = "mb-2 block text-sm font-medium text-gray-700";
pub(super) const FIELD_ERROR_CLASS: &str = "mt-1 text-sm text-red-800";

/// Everything a step component needs: the flow controller, a signal mirror
/// of its state, and the shared field values. Cloned and passed down
/// explicitly instead of being provided through context.
#[derive(Clone)]
pub(crate) struct SignInScope {
    flow: Rc<LoginFlow>,
    state: RwSignal<SessionState>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub otp: RwSignal<String>,
}

impl SignInScope {
    fn new(backend: Rc<dyn AuthBackend>) -> Self {
        let flow = Rc::new(LoginFlow::new(backend));
        let state = RwSignal::new(flow.snapshot());
        Self {
            flow,
            state,
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            otp: RwSignal::new(String::new()),
        }
    }

    pub fn flow(&self) -> Rc<LoginFlow> {
        Rc::clone(&self.flow)
    }

    pub fn state(&self) -> RwSignal<SessionState> {
        self.state
    }

    /// Copies the controller state into the signal so the view reacts.
    /// Call after every flow method returns.
    pub fn sync(&self) {
        self.state.set(self.flow.snapshot());
    }

    /// Snapshot of the form fields, untracked; email and code come back
    /// trimmed, the secret is taken verbatim.
    pub fn values(&self) -> FormValues {
        FormValues {
            email: self.email.get_untracked().trim().to_string(),
            password: self.password.get_untracked(),
            otp: self.otp.get_untracked().trim().to_string(),
        }
    }
}

/// Entry point mounted by the checkout page. Wires the provider client to
/// a fresh flow and renders the form.
#[component]
pub fn SignIn() -> impl IntoView {
    let config = AppConfig::load();
    let backend: Rc<dyn AuthBackend> = Rc::new(CognitoClient::from_config(&config));
    let scope = SignInScope::new(backend);

    view! { <SignInForm scope=scope /> }
}

/// Renders the active step plus a single assertive alert region shared by
/// every step.
#[component]
fn SignInForm(scope: SignInScope) -> impl IntoView {
    let state = scope.state();
    let step_scope = scope.clone();
    // Keyed on the step alone so error or submitting updates within a step
    // do not tear down and remount the step component.
    let step = Memo::new(move |_| state.get().step);

    view! {
        <div class="flex w-full flex-col gap-4">
            {move || {
                let scope = step_scope.clone();
                match step.get() {
                    Step::AwaitingIdentifier => view! { <StepIdentifier scope=scope /> }.into_any(),
                    Step::PasswordlessChallenge => view! { <StepChallenge scope=scope /> }.into_any(),
                    Step::RegistrationRequired => view! { <StepRegister scope=scope /> }.into_any(),
                    Step::ConfirmRegistration => view! { <StepConfirm scope=scope /> }.into_any(),
                }
            }}
            {move || {
                state
                    .get()
                    .error_message
                    .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
            }}
        </div>
    }
}
