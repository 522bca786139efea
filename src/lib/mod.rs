//! Shared frontend utilities for API access, configuration, and errors.
//!
//! The HTTP helpers centralize request setup and timeout policy so the auth
//! feature never hand-rolls fetch calls. Configuration values are public
//! endpoints and identifiers; no secrets live here.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub(crate) mod config;
pub(crate) mod errors;

/// Commit recorded at build time, surfaced in the page footer.
pub(crate) const GIT_COMMIT_HASH: &str = env!("CHECKOUT_WEB_GIT_SHA");

#[cfg(target_arch = "wasm32")]
pub(crate) use api::{post_json, post_json_with_headers_text};
pub(crate) use errors::AppError;
