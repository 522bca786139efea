//! Build-time configuration for the identity provider and checkout endpoints
//! with an optional runtime override. The runtime config is read from
//! `window.CHECKOUT_CONFIG` (if present) so static deployments can change
//! endpoints without rebuilding. Configuration values are public; do not
//! store secrets here.

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Region hosting the identity provider's user pool.
    pub provider_region: String,
    /// App client registered with the identity provider.
    pub provider_client_id: String,
    /// Endpoint receiving the issued credential after authentication.
    pub session_url: String,
    /// Destination of the post-authentication redirect.
    pub checkout_url: String,
    pub environment: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let provider_region = option_env!("CHECKOUT_PROVIDER_REGION").unwrap_or("us-east-1");
        let provider_client_id = option_env!("CHECKOUT_PROVIDER_CLIENT_ID").unwrap_or("");
        let session_url = option_env!("CHECKOUT_SESSION_URL").unwrap_or("/api/auth");
        let checkout_url = option_env!("CHECKOUT_REDIRECT_URL").unwrap_or("/checkout");
        let environment = option_env!("CHECKOUT_ENV").unwrap_or("development");

        let mut config = Self {
            provider_region: provider_region.to_string(),
            provider_client_id: provider_client_id.to_string(),
            session_url: session_url.to_string(),
            checkout_url: checkout_url.to_string(),
            environment: environment.to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    provider_region: Option<String>,
    provider_client_id: Option<String>,
    session_url: Option<String>,
    checkout_url: Option<String>,
    environment: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.provider_region {
        config.provider_region = value;
    }
    if let Some(value) = runtime.provider_client_id {
        config.provider_client_id = value;
    }
    if let Some(value) = runtime.session_url {
        config.session_url = value;
    }
    if let Some(value) = runtime.checkout_url {
        config.checkout_url = value;
    }
    if let Some(value) = runtime.environment {
        config.environment = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("CHECKOUT_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        provider_region: read_runtime_value(&object, "provider_region"),
        provider_client_id: read_runtime_value(&object, "provider_client_id"),
        session_url: read_runtime_value(&object, "session_url"),
        checkout_url: read_runtime_value(&object, "checkout_url"),
        environment: read_runtime_value(&object, "environment"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, RuntimeConfig, apply_runtime_overrides, normalize_runtime_value};

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  us-west-2 "),
            Some("us-west-2".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = AppConfig {
            provider_region: "us-east-1".to_string(),
            provider_client_id: "default-client".to_string(),
            session_url: "/api/auth".to_string(),
            checkout_url: "/checkout".to_string(),
            environment: "development".to_string(),
        };
        let runtime = RuntimeConfig {
            provider_region: normalize_runtime_value(""),
            provider_client_id: normalize_runtime_value("  "),
            session_url: normalize_runtime_value(""),
            checkout_url: normalize_runtime_value("  "),
            environment: normalize_runtime_value(""),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.provider_region, "us-east-1");
        assert_eq!(config.provider_client_id, "default-client");
        assert_eq!(config.session_url, "/api/auth");
        assert_eq!(config.checkout_url, "/checkout");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig {
            provider_region: "us-east-1".to_string(),
            provider_client_id: "default-client".to_string(),
            session_url: "/api/auth".to_string(),
            checkout_url: "/checkout".to_string(),
            environment: "development".to_string(),
        };
        let runtime = RuntimeConfig {
            provider_region: normalize_runtime_value("eu-west-1"),
            provider_client_id: normalize_runtime_value("override-client"),
            session_url: normalize_runtime_value("https://api.override/auth"),
            checkout_url: normalize_runtime_value("/cart/checkout"),
            environment: normalize_runtime_value("production"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.provider_region, "eu-west-1");
        assert_eq!(config.provider_client_id, "override-client");
        assert_eq!(config.session_url, "https://api.override/auth");
        assert_eq!(config.checkout_url, "/cart/checkout");
        assert_eq!(config.environment, "production");
    }
}
