//! Session establishment and post-authentication navigation. After a
//! terminal verification the issued credential is posted to the session
//! endpoint and the page navigates to checkout. The flow does not react to
//! the session call's result once dispatched; a failure only leaves a
//! console breadcrumb.

use crate::app_lib::config::AppConfig;
use crate::app_lib::post_json;
use crate::features::auth::backend::Credential;
use leptos::logging;
use serde::Serialize;

#[derive(Serialize)]
struct SessionRequest<'a> {
    token: &'a str,
}

/// Hands the issued credential to the session-establishment endpoint.
pub async fn establish_session(credential: &Credential) {
    let config = AppConfig::load();
    let request = SessionRequest {
        token: credential.as_str(),
    };
    if let Err(err) = post_json(&config.session_url, &request).await {
        logging::error!("Session establishment failed: {err}");
    }
}

/// Full-page navigation to the post-authentication destination.
pub fn redirect_to_checkout() {
    let config = AppConfig::load();
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(&config.checkout_url);
    }
}
