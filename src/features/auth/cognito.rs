//! Identity provider client speaking the Cognito user-pool JSON protocol.
//! Every operation is a POST to the regional endpoint with an `X-Amz-Target`
//! header naming the action; failures arrive as a JSON body whose `__type`
//! carries the exception name, optionally namespaced. Request and response
//! shapes plus error parsing are target-independent and unit-tested; only
//! the transport is browser-specific.
//!
//! The existence check rides on the password-reset action: any response at
//! all proves the account exists, while a user-not-found failure is the
//! negative answer rather than an error. That conversion is why the
//! user-not-found kind can never surface from the identifier step.

use crate::features::auth::backend::{AuthError, AuthErrorKind};
use serde::Deserialize;
#[cfg(target_arch = "wasm32")]
use serde::Serialize;

#[cfg(target_arch = "wasm32")]
const PROVIDER_SERVICE: &str = "AWSCognitoIdentityProviderService";
#[cfg(target_arch = "wasm32")]
const PROVIDER_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

#[cfg(target_arch = "wasm32")]
const FLOW_PASSWORDLESS: &str = "USER_AUTH";
#[cfg(target_arch = "wasm32")]
const FLOW_PASSWORD: &str = "USER_PASSWORD_AUTH";
#[cfg(target_arch = "wasm32")]
const CHALLENGE_EMAIL_OTP: &str = "EMAIL_OTP";
#[cfg(target_arch = "wasm32")]
const CHALLENGE_NEW_PASSWORD: &str = "NEW_PASSWORD_REQUIRED";
const DELIVERY_EMAIL: &str = "EMAIL";

#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpRequest {
    client_id: String,
    username: String,
    password: String,
    user_attributes: Vec<UserAttribute>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserAttribute {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpResponse {
    code_delivery_details: Option<CodeDeliveryDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CodeDeliveryDetails {
    delivery_medium: Option<String>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest {
    auth_flow: String,
    client_id: String,
    auth_parameters: std::collections::HashMap<String, String>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RespondToAuthChallengeRequest {
    challenge_name: String,
    client_id: String,
    session: Option<String>,
    challenge_responses: std::collections::HashMap<String, String>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmSignUpRequest {
    client_id: String,
    username: String,
    confirmation_code: String,
}

#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ForgotPasswordRequest {
    client_id: String,
    username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthResponse {
    challenge_name: Option<String>,
    session: Option<String>,
    authentication_result: Option<AuthenticationResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(rename = "__type")]
    type_name: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Parses a non-2xx provider response into an `AuthError`. The `__type`
/// field may be namespaced (`com.example#Name`); only the final segment is
/// the exception name.
fn error_from_response(status: u16, body: &str) -> AuthError {
    let parsed: Option<ProviderErrorBody> = serde_json::from_str(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|body| body.type_name.as_deref())
        .map(|name| name.rsplit('#').next().unwrap_or(name))
        .unwrap_or_default();
    let message = parsed
        .as_ref()
        .and_then(|body| body.message.clone())
        .unwrap_or_else(|| format!("Provider request failed with status {status}"));

    AuthError::new(AuthErrorKind::from_provider_code(code), message)
}

/// Collapses the password-reset probe's outcome into account existence: any
/// success proves the account exists, a user-not-found failure is the
/// negative answer, and every other failure propagates.
fn existence_from<T>(result: Result<T, AuthError>) -> Result<bool, AuthError> {
    match result {
        Ok(_) => Ok(true),
        Err(err) if err.kind == AuthErrorKind::UserNotFound => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use client::CognitoClient;

#[cfg(target_arch = "wasm32")]
mod client {
    use super::*;
    use crate::app_lib::config::AppConfig;
    use crate::app_lib::{AppError, post_json_with_headers_text};
    use crate::features::auth::backend::{
        AuthBackend, ChallengeSession, Credential, RegistrationReceipt,
    };
    use async_trait::async_trait;
    use serde::de::DeserializeOwned;
    use std::collections::HashMap;

    /// Client for one user-pool app client in one region.
    pub(crate) struct CognitoClient {
        endpoint: String,
        client_id: String,
    }

    impl CognitoClient {
        pub fn from_config(config: &AppConfig) -> Self {
            Self {
                endpoint: format!(
                    "https://cognito-idp.{}.amazonaws.com/",
                    config.provider_region
                ),
                client_id: config.provider_client_id.clone(),
            }
        }

        async fn call<B: Serialize, T: DeserializeOwned>(
            &self,
            action: &str,
            body: &B,
        ) -> Result<T, AuthError> {
            let headers = vec![
                ("Content-Type".to_string(), PROVIDER_CONTENT_TYPE.to_string()),
                (
                    "X-Amz-Target".to_string(),
                    format!("{PROVIDER_SERVICE}.{action}"),
                ),
            ];
            let (status, text) = post_json_with_headers_text(&self.endpoint, body, &headers)
                .await
                .map_err(transport_error)?;

            if (200..300).contains(&status) {
                serde_json::from_str(&text).map_err(|err| {
                    AuthError::unknown(format!("Failed to decode provider response: {err}"))
                })
            } else {
                Err(error_from_response(status, &text))
            }
        }

        async fn initiate_auth(
            &self,
            flow: &str,
            parameters: HashMap<String, String>,
        ) -> Result<AuthResponse, AuthError> {
            self.call(
                "InitiateAuth",
                &InitiateAuthRequest {
                    auth_flow: flow.to_string(),
                    client_id: self.client_id.clone(),
                    auth_parameters: parameters,
                },
            )
            .await
        }

        async fn respond_to_challenge(
            &self,
            challenge: &str,
            session: Option<String>,
            responses: HashMap<String, String>,
        ) -> Result<AuthResponse, AuthError> {
            self.call(
                "RespondToAuthChallenge",
                &RespondToAuthChallengeRequest {
                    challenge_name: challenge.to_string(),
                    client_id: self.client_id.clone(),
                    session,
                    challenge_responses: responses,
                },
            )
            .await
        }
    }

    #[async_trait(?Send)]
    impl AuthBackend for CognitoClient {
        async fn existence_check(&self, identifier: &str) -> Result<bool, AuthError> {
            let request = ForgotPasswordRequest {
                client_id: self.client_id.clone(),
                username: identifier.to_string(),
            };
            let result: Result<serde_json::Value, AuthError> =
                self.call("ForgotPassword", &request).await;
            existence_from(result)
        }

        async fn start_passwordless(
            &self,
            identifier: &str,
        ) -> Result<ChallengeSession, AuthError> {
            let parameters = HashMap::from([
                ("USERNAME".to_string(), identifier.to_string()),
                (
                    "PREFERRED_CHALLENGE".to_string(),
                    CHALLENGE_EMAIL_OTP.to_string(),
                ),
            ]);
            let response = self.initiate_auth(FLOW_PASSWORDLESS, parameters).await?;
            response
                .session
                .map(ChallengeSession::new)
                .ok_or_else(|| AuthError::unknown("Provider did not issue a challenge session"))
        }

        async fn verify_code(
            &self,
            identifier: &str,
            code: &str,
            session: &ChallengeSession,
        ) -> Result<Credential, AuthError> {
            let responses = HashMap::from([
                ("USERNAME".to_string(), identifier.to_string()),
                ("EMAIL_OTP_CODE".to_string(), code.to_string()),
            ]);
            let response = self
                .respond_to_challenge(
                    CHALLENGE_EMAIL_OTP,
                    Some(session.as_str().to_string()),
                    responses,
                )
                .await?;
            credential_from(response)
        }

        async fn register(
            &self,
            identifier: &str,
            secret: &str,
        ) -> Result<RegistrationReceipt, AuthError> {
            let request = SignUpRequest {
                client_id: self.client_id.clone(),
                username: identifier.to_string(),
                password: secret.to_string(),
                user_attributes: vec![
                    UserAttribute {
                        name: "email".to_string(),
                        value: identifier.to_string(),
                    },
                    UserAttribute {
                        name: "name".to_string(),
                        value: identifier.to_string(),
                    },
                ],
            };
            let response: SignUpResponse = self.call("SignUp", &request).await?;
            Ok(RegistrationReceipt {
                delivery_confirmed: response
                    .code_delivery_details
                    .and_then(|details| details.delivery_medium)
                    .as_deref()
                    == Some(DELIVERY_EMAIL),
            })
        }

        async fn confirm_registration(
            &self,
            identifier: &str,
            code: &str,
        ) -> Result<(), AuthError> {
            let request = ConfirmSignUpRequest {
                client_id: self.client_id.clone(),
                username: identifier.to_string(),
                confirmation_code: code.to_string(),
            };
            let _: serde_json::Value = self.call("ConfirmSignUp", &request).await?;
            Ok(())
        }

        async fn sign_in(&self, identifier: &str, secret: &str) -> Result<Credential, AuthError> {
            let parameters = HashMap::from([
                ("USERNAME".to_string(), identifier.to_string()),
                ("PASSWORD".to_string(), secret.to_string()),
            ]);
            let response = self.initiate_auth(FLOW_PASSWORD, parameters).await?;

            // A pool-mandated password rotation surfaces as a challenge;
            // answer it with the same password to finish the sign-in.
            if response.challenge_name.as_deref() == Some(CHALLENGE_NEW_PASSWORD) {
                let responses = HashMap::from([
                    ("USERNAME".to_string(), identifier.to_string()),
                    ("NEW_PASSWORD".to_string(), secret.to_string()),
                ]);
                let response = self
                    .respond_to_challenge(CHALLENGE_NEW_PASSWORD, response.session, responses)
                    .await?;
                return credential_from(response);
            }

            credential_from(response)
        }
    }

    fn credential_from(response: AuthResponse) -> Result<Credential, AuthError> {
        response
            .authentication_result
            .and_then(|result| result.id_token)
            .map(Credential::new)
            .ok_or_else(|| AuthError::unknown("Provider did not issue a credential"))
    }

    fn transport_error(err: AppError) -> AuthError {
        AuthError::unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_error_type_maps_to_kind() {
        let body = r#"{"__type":"com.amazonaws.cognito#UserNotFoundException","message":"User does not exist."}"#;
        let err = error_from_response(400, body);
        assert_eq!(err.kind, AuthErrorKind::UserNotFound);
        assert_eq!(err.message, "User does not exist.");
    }

    #[test]
    fn bare_error_type_maps_to_kind() {
        let body = r#"{"__type":"CodeMismatchException","message":"Invalid code."}"#;
        let err = error_from_response(400, body);
        assert_eq!(err.kind, AuthErrorKind::CodeMismatch);
    }

    #[test]
    fn unrecognized_error_type_is_unknown() {
        let body = r#"{"__type":"InternalErrorException","message":"Something broke."}"#;
        let err = error_from_response(500, body);
        assert_eq!(err.kind, AuthErrorKind::Unknown);
        assert_eq!(err.message, "Something broke.");
    }

    #[test]
    fn unparseable_body_is_unknown_with_status_message() {
        let err = error_from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.kind, AuthErrorKind::Unknown);
        assert_eq!(err.message, "Provider request failed with status 502");
    }

    #[test]
    fn capitalized_message_field_is_accepted() {
        let body = r#"{"__type":"NotAuthorizedException","Message":"Incorrect username or password."}"#;
        let err = error_from_response(400, body);
        assert_eq!(err.kind, AuthErrorKind::NotAuthorized);
        assert_eq!(err.message, "Incorrect username or password.");
    }

    #[test]
    fn user_not_found_probe_failure_means_account_absent() {
        let err = AuthError::new(AuthErrorKind::UserNotFound, "User does not exist.");
        assert!(!existence_from::<()>(Err(err)).unwrap());
        assert!(existence_from(Ok(())).unwrap());
    }

    #[test]
    fn other_probe_failures_propagate() {
        let err = AuthError::new(AuthErrorKind::RateLimited, "limit exceeded");
        let kind = existence_from::<()>(Err(err)).unwrap_err().kind;
        assert_eq!(kind, AuthErrorKind::RateLimited);
    }

    #[test]
    fn auth_response_decodes_challenge_and_result() {
        let with_challenge: AuthResponse = serde_json::from_str(
            r#"{"ChallengeName":"EMAIL_OTP","Session":"opaque-session"}"#,
        )
        .expect("Failed to decode challenge response");
        assert_eq!(with_challenge.challenge_name.as_deref(), Some("EMAIL_OTP"));
        assert_eq!(with_challenge.session.as_deref(), Some("opaque-session"));
        assert!(with_challenge.authentication_result.is_none());

        let with_result: AuthResponse = serde_json::from_str(
            r#"{"AuthenticationResult":{"IdToken":"issued-token"}}"#,
        )
        .expect("Failed to decode authentication result");
        assert_eq!(
            with_result
                .authentication_result
                .and_then(|result| result.id_token)
                .as_deref(),
            Some("issued-token")
        );
    }

    #[test]
    fn sign_up_response_reports_email_delivery() {
        let response: SignUpResponse = serde_json::from_str(
            r#"{"CodeDeliveryDetails":{"DeliveryMedium":"EMAIL","Destination":"t***@test.com"}}"#,
        )
        .expect("Failed to decode sign-up response");
        assert_eq!(
            response
                .code_delivery_details
                .and_then(|details| details.delivery_medium)
                .as_deref(),
            Some(DELIVERY_EMAIL)
        );
    }
}
