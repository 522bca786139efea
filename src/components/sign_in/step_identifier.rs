//! First step: collect the email and run the existence check.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::sign_in::{FIELD_ERROR_CLASS, INPUT_CLASS, LABEL_CLASS, SignInScope};
use crate::components::{Button, Spinner};
use crate::features::auth::flow::Step;
use crate::features::auth::validate::{FormValues, validate_step};

#[component]
pub fn StepIdentifier(scope: SignInScope) -> impl IntoView {
    let email = scope.email;
    let (touched, set_touched) = signal(false);

    let errors = Memo::new(move |_| {
        let values = FormValues {
            email: email.get().trim().to_string(),
            ..FormValues::default()
        };
        validate_step(Step::AwaitingIdentifier, &values)
    });

    let submit_scope = scope.clone();
    let submit = Action::new_local(move |_: &()| {
        let scope = submit_scope.clone();
        async move {
            let values = scope.values();
            scope.flow().submit_identifier(&values.email).await;
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
            <p class="text-gray-900">"Sign in to your account"</p>
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
            <Button button_type="submit" full_width=true disabled=pending>
                {move || if pending.get() { "Checking..." } else { "Continue" }}
            </Button>
            {move || {
                pending
                    .get()
                    .then(|| view! { <div class="flex justify-center"><Spinner /></div> })
            }}
        </form>
    }
}
