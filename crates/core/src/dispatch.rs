//! Request envelope dispatcher
//!
//! The single call primitive behind every domain operation. It never returns
//! anything but a [`CallResult`]: HTTP 200 is success, any other status or a
//! missing response is a [`CallFailure`] value.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use socrates_domain::{CallFailure, CallResult, RequestEnvelope, Session};
use tracing::{debug, instrument, warn};

use crate::transport_ports::{Transport, TransportRequest};

/// Sends envelopes for one authenticated session.
#[derive(Clone)]
pub struct Dispatcher {
    session: Arc<Session>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(session: Arc<Session>, transport: Arc<dyn Transport>) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// POST `envelope` to `path` and classify the outcome.
    #[instrument(skip_all, fields(path = %path, operation = %envelope.operation))]
    pub async fn dispatch<T: Serialize>(
        &self,
        path: &str,
        envelope: &RequestEnvelope<T>,
    ) -> CallResult {
        let body = serde_json::to_vec(envelope)
            .map_err(|e| CallFailure::Encoding { reason: e.to_string() })?;
        let url = self.session.url(path);

        debug!(url = %url, "dispatching envelope");

        let request = TransportRequest::post_json(url, body)
            .header("Authorization", self.session.authorization_header())
            .verify_certificate(self.session.verify_certificate());

        let response = match self.transport.post_json(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "no response from service");
                return Err(CallFailure::Transport { cause: err.to_string() });
            }
        };

        debug!(status = response.status, "received response");

        if response.status != 200 {
            return Err(CallFailure::Remote { status: response.status, body: response.body });
        }

        serde_json::from_str::<Value>(&response.body).map_err(|e| CallFailure::InvalidResponse {
            reason: e.to_string(),
            body: response.body,
        })
    }

    /// [`Self::dispatch`], then decode the payload into `R`.
    pub async fn dispatch_as<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        envelope: &RequestEnvelope<T>,
    ) -> CallResult<R> {
        let value = self.dispatch(path, envelope).await?;
        let raw = value.to_string();
        serde_json::from_value(value)
            .map_err(|e| CallFailure::InvalidResponse { body: raw, reason: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use socrates_domain::{Operation, ServiceEndpoint};

    use super::*;
    use crate::testing::MockTransport;
    use crate::transport_ports::TransportError;

    fn dispatcher(transport: Arc<MockTransport>) -> Dispatcher {
        let session = Session::new(ServiceEndpoint::new("socrates.test", true, true), "abc");
        Dispatcher::new(Arc::new(session), transport)
    }

    #[tokio::test]
    async fn ok_status_yields_parsed_body() {
        let transport = Arc::new(MockTransport::new().respond(200, r#"{"x":1}"#));
        let envelope = RequestEnvelope::bare(Operation::GetNodes);
        let result = dispatcher(transport.clone()).dispatch("/socrates/_cluster", &envelope).await;

        assert_eq!(result, Ok(json!({"x": 1})));

        let request = &transport.requests()[0];
        assert_eq!(request.url, "https://socrates.test/socrates/_cluster");
        assert_eq!(request.header_value("Authorization"), Some("Token abc"));
        assert_eq!(request.header_value("Content-Type"), Some("application/json"));
        assert_eq!(transport.request_json(0).unwrap(), json!({"operation": "get_nodes"}));
    }

    #[tokio::test]
    async fn session_certificate_policy_reaches_transport() {
        let transport = Arc::new(MockTransport::new().respond(200, "{}").respond(200, "{}"));
        let envelope = RequestEnvelope::bare(Operation::GetNodes);

        for verify in [true, false] {
            let session = Session::new(ServiceEndpoint::new("h", true, verify), "abc");
            let dispatcher = Dispatcher::new(Arc::new(session), transport.clone());
            dispatcher.dispatch("/x", &envelope).await.unwrap();
        }

        let requests = transport.requests();
        assert!(requests[0].verify_certificate);
        assert!(!requests[1].verify_certificate);
        assert_ne!(requests[0], requests[1]);
    }

    #[tokio::test]
    async fn server_error_yields_raw_body() {
        let transport = Arc::new(MockTransport::new().respond(500, "internal failure"));
        let result =
            dispatcher(transport).dispatch("/x", &RequestEnvelope::bare(Operation::Get)).await;

        let failure = result.unwrap_err();
        assert_eq!(failure, CallFailure::Remote { status: 500, body: "internal failure".into() });
        assert_eq!(failure.detail(), "internal failure");
    }

    #[tokio::test]
    async fn connection_refusal_is_a_value() {
        let transport =
            Arc::new(MockTransport::new().fail(TransportError::connect("connection refused")));
        let result =
            dispatcher(transport).dispatch("/x", &RequestEnvelope::bare(Operation::Get)).await;

        let failure = result.unwrap_err();
        assert!(failure.is_transport());
        assert_eq!(failure.detail(), "connection error");
    }

    #[tokio::test]
    async fn non_json_success_body_is_invalid_response() {
        let transport = Arc::new(MockTransport::new().respond(200, "<html>"));
        let result =
            dispatcher(transport).dispatch("/x", &RequestEnvelope::bare(Operation::Get)).await;

        assert!(matches!(
            result,
            Err(CallFailure::InvalidResponse { body, .. }) if body == "<html>"
        ));
    }

    #[tokio::test]
    async fn typed_decode() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Nodes {
            nodes: Vec<String>,
        }

        let transport = Arc::new(
            MockTransport::new()
                .respond(200, r#"{"nodes":["a","b"]}"#)
                .respond(200, r#"{"nodes":3}"#),
        );
        let dispatcher = dispatcher(transport);
        let envelope = RequestEnvelope::bare(Operation::GetNodes);

        let nodes: CallResult<Nodes> = dispatcher.dispatch_as("/c", &envelope).await;
        assert_eq!(nodes.unwrap().nodes, ["a", "b"]);

        let nodes: CallResult<Nodes> = dispatcher.dispatch_as("/c", &envelope).await;
        assert!(matches!(nodes, Err(CallFailure::InvalidResponse { .. })));
    }
}
