//! Registration step for identifiers with no account: choose a password
//! and create the account.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::sign_in::{FIELD_ERROR_CLASS, INPUT_CLASS, LABEL_CLASS, SignInScope};
use crate::components::{Button, Spinner};
use crate::features::auth::flow::Step;
use crate::features::auth::validate::{FormValues, validate_step};

#[component]
pub fn StepRegister(scope: SignInScope) -> impl IntoView {
    let email = scope.email;
    let password = scope.password;
    let (touched, set_touched) = signal(false);

    let errors = Memo::new(move |_| {
        let values = FormValues {
            email: email.get().trim().to_string(),
            password: password.get(),
            ..FormValues::default()
        };
        validate_step(Step::RegistrationRequired, &values)
    });

    let submit_scope = scope.clone();
    let submit = Action::new_local(move |_: &()| {
        let scope = submit_scope.clone();
        async move {
            let values = scope.values();
            scope
                .flow()
                .submit_registration(&values.email, &values.password)
                .await;
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
            <p class="text-gray-900">"You don't have an account yet. Create one to get started."</p>
            <div>
                <label class=LABEL_CLASS for="email">"Email"</label>
                <input
                    id="email"
                    name="email"
                    type="email"
                    class=INPUT_CLASS
                    placeholder="Enter your email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                    on:blur=move |_| set_touched.set(true)
                />
                {move || {
                    touched
                        .get()
                        .then(|| errors.get().email)
                        .flatten()
                        .map(|message| view! { <p class=FIELD_ERROR_CLASS>{message}</p> })
                }}
            </div>
            <div>
                <label class=LABEL_CLASS for="password">"Password"</label>
                <input
                    id="password"
                    name="password"
                    type="password"
                    class=INPUT_CLASS
                    placeholder="Enter your password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    on:blur=move |_| set_touched.set(true)
                />
                {move || {
                    touched
                        .get()
                        .then(|| errors.get().password)
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
