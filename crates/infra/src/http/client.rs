use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client as ReqwestClient;
use socrates_core::{
    Transport, TransportError, TransportErrorKind, TransportRequest, TransportResponse,
};
use socrates_domain::constants::DEFAULT_TIMEOUT_SECS;
use tracing::debug;

use crate::errors::IntoTransportError;

/// reqwest-backed [`Transport`]: one attempt per call, fixed timeout.
///
/// Each request picks the verifying or the permissive client from its
/// `verify_certificate` flag.
#[derive(Clone)]
pub struct HttpTransport {
    verifying: ReqwestClient,
    permissive: ReqwestClient,
}

impl HttpTransport {
    /// Start building a new transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    fn headers(request: &TransportRequest) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::new(TransportErrorKind::Other, format!("invalid header name: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::new(
                    TransportErrorKind::Other,
                    format!("invalid value for header {name}: {e}"),
                )
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn client_for(&self, request: &TransportRequest) -> &ReqwestClient {
        if request.verify_certificate {
            &self.verifying
        } else {
            &self.permissive
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let headers = Self::headers(&request)?;
        let client = self.client_for(&request);
        let url = request.url;

        debug!(
            url = %url,
            verify_certificate = request.verify_certificate,
            "sending HTTP request"
        );

        let response = client
            .post(&url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|err| {
                debug!(url = %url, error = %err, "HTTP request failed");
                err.into_transport()
            })?;

        let status = response.status().as_u16();
        debug!(url = %url, status, "received HTTP response");

        let body = response.text().await.map_err(IntoTransportError::into_transport)?;
        Ok(TransportResponse { status, body })
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS), user_agent: None }
    }
}

impl HttpTransportBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpTransport, TransportError> {
        let agent = self
            .user_agent
            .unwrap_or_else(|| concat!("socrates-client/", env!("CARGO_PKG_VERSION")).to_string());

        let base =
            || ReqwestClient::builder().timeout(self.timeout).no_proxy().user_agent(&agent);

        let verifying = base().build().map_err(IntoTransportError::into_transport)?;
        let permissive = base()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(IntoTransportError::into_transport)?;

        Ok(HttpTransport { verifying, permissive })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn transport() -> HttpTransport {
        HttpTransport::builder().timeout(Duration::from_secs(5)).build().expect("http transport")
    }

    #[tokio::test]
    async fn posts_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/archimedes/datasource"))
            .and(header("Content-Type", "application/json"))
            .and(header("Authorization", "Token abc"))
            .and(body_json(serde_json::json!({"operation": "get_nodes"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"x":1}"#))
            .expect(1)
            .mount(&server)
            .await;

        let request = TransportRequest::post_json(
            format!("{}/archimedes/datasource", server.uri()),
            br#"{"operation":"get_nodes"}"#.to_vec(),
        )
        .header("Authorization", "Token abc");

        let response = transport().post_json(request).await.expect("response");
        assert_eq!(response, TransportResponse::new(200, r#"{"x":1}"#));
    }

    #[tokio::test]
    async fn returns_error_statuses_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .expect(1)
            .mount(&server)
            .await;

        let request = TransportRequest::post_json(server.uri(), b"{}".to_vec());
        let response = transport().post_json(request).await.expect("response");

        assert_eq!(response.status, 500);
        assert_eq!(response.body, "down");
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let request = TransportRequest::post_json(format!("http://{addr}/auth"), b"{}".to_vec());
        let err = transport().post_json(request).await.unwrap_err();

        assert_eq!(err.kind, TransportErrorKind::Connect);
    }

    #[tokio::test]
    async fn invalid_header_value_fails_before_sending() {
        let request = TransportRequest::post_json("http://127.0.0.1:9/", b"{}".to_vec())
            .header("Authorization", "Token bad\nvalue");
        let err = transport().post_json(request).await.unwrap_err();

        assert_eq!(err.kind, TransportErrorKind::Other);
    }

    #[tokio::test]
    async fn both_certificate_policies_reach_the_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("User-Agent", "tests/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(2)
            .mount(&server)
            .await;

        let transport = HttpTransport::builder()
            .user_agent("tests/1.0")
            .timeout(Duration::from_secs(5))
            .build()
            .expect("http transport");

        for verify in [true, false] {
            let request = TransportRequest::post_json(server.uri(), b"{}".to_vec())
                .verify_certificate(verify);
            let response = transport.post_json(request).await.expect("response");
            assert_eq!(response.status, 200);
        }
    }
}
