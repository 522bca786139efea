//! Passwordless challenge step: the exchange is started as soon as the
//! step mounts, then the emailed code is collected and verified.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::sign_in::{FIELD_ERROR_CLASS, INPUT_CLASS, LABEL_CLASS, SignInScope};
use crate::components::{Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::flow::{Outcome, Step};
use crate::features::auth::validate::{FormValues, validate_step};

#[component]
pub fn StepChallenge(scope: SignInScope) -> impl IntoView {
    let email = scope.email;
    let otp = scope.otp;
    let state = scope.state();
    let (touched, set_touched) = signal(false);

    // Request the one-time code on entry. Runs once per mount; the parent
    // only remounts this component on an actual step change.
    let start_scope = scope.clone();
    spawn_local(async move {
        let identifier = start_scope.email.get_untracked().trim().to_string();
        start_scope.flow().start_challenge(&identifier).await;
        start_scope.sync();
    });

    let errors = Memo::new(move |_| {
        let values = FormValues {
            email: email.get().trim().to_string(),
            otp: otp.get().trim().to_string(),
            ..FormValues::default()
        };
        validate_step(Step::PasswordlessChallenge, &values)
    });

    let submit_scope = scope.clone();
    let submit = Action::new_local(move |_: &()| {
        let scope = submit_scope.clone();
        async move {
            let values = scope.values();
            let outcome = scope.flow().submit_code(&values.email, &values.otp).await;
            if let Outcome::SignedIn(credential) = outcome {
                client::establish_session(&credential).await;
                client::redirect_to_checkout();
                return;
            }
            scope.sync();
        }
    });
    let pending = submit.pending();

    // The code cannot be verified before the challenge exchange has
    // produced a session.
    let not_ready = Signal::derive(move || state.get().challenge_session.is_none());
    let disabled = Signal::derive(move || pending.get() || not_ready.get());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_touched.set(true);
        if errors.get_untracked().is_valid() && !pending.get_untracked() {
            submit.dispatch(());
        }
    };

    view! {
        <form class="flex w-full flex-col gap-4" novalidate=true on:submit=on_submit>
            <p class="text-gray-900">"Enter the code sent to your email"</p>
            <div>
                <label class=LABEL_CLASS for="email">"Email"</label>
                <input
                    id="email"
                    name="email"
                    type="email"
                    class=INPUT_CLASS
                    autocomplete="email"
                    readonly=true
                    disabled=true
                    prop:value=move || email.get()
                />
            </div>
            <div>
                <label class=LABEL_CLASS for="otp">"Authentication code"</label>
                <input
                    id="otp"
                    name="otp"
                    type="text"
                    inputmode="numeric"
                    class=INPUT_CLASS
                    placeholder="Enter the code"
                    autocomplete="one-time-code"
                    prop:value=move || otp.get()
                    on:input=move |ev| otp.set(event_target_value(&ev))
                    on:blur=move |_| set_touched.set(true)
                />
                {move || {
                    touched
                        .get()
                        .then(|| errors.get().otp)
                        .flatten()
                        .map(|message| view! { <p class=FIELD_ERROR_CLASS>{message}</p> })
                }}
            </div>
            <Button button_type="submit" full_width=true disabled=disabled>
                {move || if pending.get() { "Submitting..." } else { "Continue" }}
            </Button>
            {move || {
                pending
                    .get()
                    .then(|| view! { <div class="flex justify-center"><Spinner /></div> })
            }}
        </form>
    }
}
