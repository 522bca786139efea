//! Minimal 404 page for unknown routes.

use crate::components::layout::PageShell;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <PageShell>
            <div class="flex flex-col items-center justify-center gap-4 py-16 text-center">
                <h1 class="text-6xl font-black text-gray-200 select-none">"404"</h1>
                <p class="text-gray-500">"Page not found"</p>
                <A href="/" {..} class="text-blue-700 hover:underline">
                    "Back to sign in"
                </A>
            </div>
        </PageShell>
    }
}
