//! Shared page wrapper with the store header and a build footer. Routes
//! stay focused on content; the footer identifies the deployed revision
//! outside production.

use crate::app_lib::GIT_COMMIT_HASH;
use crate::app_lib::config::AppConfig;
use leptos::prelude::*;

/// Wraps a route with the header and centered content column.
#[component]
pub fn PageShell(children: Children) -> impl IntoView {
    let config = AppConfig::load();
    let show_build = config.environment != "production";
    let revision = GIT_COMMIT_HASH.get(..7).unwrap_or(GIT_COMMIT_HASH);

    view! {
        <div class="min-h-screen flex flex-col bg-gray-50">
            <header class="border-b border-gray-200 bg-white">
                <div class="mx-auto flex max-w-screen-md items-center p-4">
                    <a href="/" class="font-semibold text-gray-900">
                        "Store"
                    </a>
                </div>
            </header>
            <main class="mx-auto flex w-full max-w-md flex-1 flex-col gap-6 p-4">
                {children()}
            </main>
            <footer class="p-4 text-center text-xs text-gray-400">
                {show_build
                    .then(|| format!("{} {}", config.environment, revision))}
            </footer>
        </div>
    }
}
