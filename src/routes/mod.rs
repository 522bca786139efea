//! Route table for the checkout funnel. The sign-in flow is the landing
//! page; everything else falls through to the 404 page. The post-sign-in
//! checkout destination is served by the backend and is not a client
//! route.

mod checkout;
mod not_found;

pub(crate) use checkout::CheckoutSignInPage;
pub(crate) use not_found::NotFoundPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=CheckoutSignInPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
