//! Alert banners for the sign-in flow. Rendered assertively so screen
//! readers announce new failures immediately. Messages must be safe to
//! render and never include secrets or tokens.

use leptos::prelude::*;

#[derive(Clone, Copy)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
}

/// Renders a styled alert banner.
#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => {
            "rounded-md border border-red-300 bg-red-100 p-2 text-sm text-red-800 shadow-sm"
        }
        AlertKind::Success => {
            "rounded-md border border-emerald-300 bg-emerald-100 p-2 text-sm text-emerald-800 shadow-sm"
        }
    };

    view! {
        <div class=class role="alert" aria-live="assertive">
            {message}
        </div>
    }
}
