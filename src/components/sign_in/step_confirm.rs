//! Final registration step: confirm the account with the emailed code,
//! then sign in with the password chosen on the previous step.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::sign_in::{FIELD_ERROR_CLASS, INPUT_CLASS, LABEL_CLASS, SignInScope};
use crate::components::{Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::flow::{Outcome, Step};
use crate::features::auth::validate::{FormValues, validate_step};

#[component]
pub fn StepConfirm(scope: SignInScope) -> impl IntoView {
    let email = scope.email;
    let password = scope.password;
    let otp = scope.otp;
    let (touched, set_touched) = signal(false);

    // The password is not re-entered here; it still has to satisfy the
    // schema because the sign-in that follows confirmation uses it.
    let errors = Memo::new(move |_| {
        let values = FormValues {
            email: email.get().trim().to_string(),
            password: password.get(),
            otp: otp.get().trim().to_string(),
        };
        validate_step(Step::ConfirmRegistration, &values)
    });

    let submit_scope = scope.clone();
    let submit = Action::new_local(move |_: &()| {
        let scope = submit_scope.clone();
        async move {
            let values = scope.values();
            let outcome = scope
                .flow()
                .submit_confirmation(&values.email, &values.otp, &values.password)
                .await;
            if let Outcome::SignedIn(credential) = outcome {
                client::establish_session(&credential).await;
                client::redirect_to_checkout();
                return;
            }
            scope.sync();
        }
    });
    let pending = submit.pending();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_touched.set(true);
        if errors.get_untracked().is_valid() && !pending.get_untracked() {
            submit.dispatch(());
        }
    };

    view! {
        <form class="flex w-full flex-col gap-4" novalidate=true on:submit=on_submit>
            <p class="text-gray-900">"Enter the code sent to your email to confirm your account"</p>
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
                <label class=LABEL_CLASS for="otp">"Verification code"</label>
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
            <Button button_type="submit" full_width=true disabled=pending>
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
