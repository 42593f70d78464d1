use serde::{Deserialize, Serialize};

use crate::error::SmokeError;

#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'body> {
    pub(super) email: &'body str,
    pub(super) password: &'body str,
}

/// Envelope returned by the login route on success.
#[derive(Debug, Deserialize)]
pub(super) struct LoginResponse {
    #[serde(default)]
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
    pub(super) data: LoginData,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginData {
    pub(super) access_token: String,
    #[serde(default)]
    pub(super) user: Option<LoginUser>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginUser {
    #[serde(default)]
    pub(super) id: Option<String>,
}

/// Error bodies only matter for their message.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
}

/// Credentials obtained from a successful login.
#[derive(Clone, PartialEq, Eq)]
pub(super) struct Session {
    pub(super) token: String,
    pub(super) user_id: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Decodes a 200 login body into a session.
///
/// # Errors
///
/// Returns `MalformedResponse` when the body is not the expected envelope
/// (for example when `data.access_token` is missing).
pub(super) fn decode_login(endpoint: &str, body: &str) -> Result<Session, SmokeError> {
    let response: LoginResponse =
        serde_json::from_str(body).map_err(|err| SmokeError::MalformedResponse {
            endpoint: endpoint.to_owned(),
            source: err,
        })?;
    if let Some(status) = response.status.as_deref() {
        tracing::debug!(
            "Login envelope status '{}': {}",
            status,
            response.message.as_deref().unwrap_or_default()
        );
    }
    Ok(Session {
        token: response.data.access_token,
        user_id: response.data.user.and_then(|user| user.id),
    })
}

/// Best-effort `message` field from an error body.
pub(super) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.message)
}
