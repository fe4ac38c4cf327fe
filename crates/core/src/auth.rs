//! Session authentication
//!
//! One POST to `/auth` trades a username and password for a bearer token.
//! The resulting [`Session`] is immutable: there is no refresh and no
//! logout; callers that need a fresh token authenticate again.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use socrates_domain::constants::AUTH_PATH;
use socrates_domain::{ConnectError, Credentials, ServiceEndpoint, Session};
use tracing::{debug, info, instrument, warn};

use crate::transport_ports::{Transport, TransportRequest};

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: Option<Value>,
}

/// Performs the authentication bootstrap over a [`Transport`].
#[derive(Clone)]
pub struct Authenticator {
    transport: Arc<dyn Transport>,
}

impl Authenticator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Authenticate against `endpoint`.
    ///
    /// # Errors
    /// - [`ConnectError::Rejected`] for any status other than 200, carrying the
    ///   raw body
    /// - [`ConnectError::Transport`] when no response was received
    /// - [`ConnectError::MissingToken`] when a 200 body has no usable `token`
    #[instrument(
        skip_all,
        fields(address = %endpoint.address, username = %credentials.username)
    )]
    pub async fn authenticate(
        &self,
        endpoint: ServiceEndpoint,
        credentials: &Credentials,
    ) -> Result<Session, ConnectError> {
        let url = endpoint.url(AUTH_PATH);
        let body = serde_json::to_vec(&AuthRequest {
            username: &credentials.username,
            password: &credentials.password,
        })
        .map_err(|e| ConnectError::Transport(format!("failed to encode credentials: {e}")))?;

        debug!(url = %url, "authenticating");

        let request = TransportRequest::post_json(url, body)
            .verify_certificate(endpoint.verify_certificate);

        let response = self
            .transport
            .post_json(request)
            .await
            .map_err(|err| {
                warn!(error = %err, "authentication request failed");
                ConnectError::Transport(err.to_string())
            })?;

        if response.status != 200 {
            warn!(status = response.status, "authentication rejected");
            return Err(ConnectError::Rejected { status: response.status, body: response.body });
        }

        let token = extract_token(&response.body)
            .ok_or_else(|| ConnectError::MissingToken(response.body.clone()))?;

        info!("authenticated");
        Ok(Session::new(endpoint, &token))
    }
}

fn extract_token(body: &str) -> Option<String> {
    let parsed: AuthResponse = serde_json::from_str(body).ok()?;
    match parsed.token? {
        Value::String(token) if !token.is_empty() => Some(token),
        Value::Number(token) => Some(token.to_string()),
        _ => None,
    }
}
