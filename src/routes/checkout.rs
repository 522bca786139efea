//! Landing page of the funnel: the shopper signs in (or signs up) before
//! being sent on to checkout.

use crate::components::layout::PageShell;
use crate::components::sign_in::SignIn;
use leptos::prelude::*;

/// Renders the checkout sign-in page shell.
#[component]
pub fn CheckoutSignInPage() -> impl IntoView {
    view! {
        <PageShell>
            <h1 class="text-2xl font-bold text-gray-900">"Checkout"</h1>
            <SignIn />
        </PageShell>
    }
}
