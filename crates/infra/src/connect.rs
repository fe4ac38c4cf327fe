//! Client bootstrap over the HTTP transport
//!
//! Wires [`HttpTransport`], a [`StructuredLogger`] and the configured
//! endpoint into an authenticated [`SocratesClient`].

use std::sync::Arc;

use socrates_core::{LogSink, SocratesClient, StructuredLogger, Transport};
use socrates_domain::{ClientConfig, ConnectError, SocratesError};
use tracing::instrument;

use crate::config;
use crate::http::HttpTransport;
use crate::observability::StdoutSink;

/// Authenticate with `config`, logging structured records to stdout.
///
/// # Errors
/// Returns [`ConnectError::Transport`] if the HTTP client cannot be built,
/// otherwise whatever the `/auth` request produced.
pub async fn connect(config: &ClientConfig) -> Result<SocratesClient, ConnectError> {
    connect_with_sink(config, Arc::new(StdoutSink::new())).await
}

/// Authenticate with `config`, sending structured records to `sink`.
///
/// # Errors
/// See [`connect`].
#[instrument(skip_all, fields(service_address = %config.service_address))]
pub async fn connect_with_sink(
    config: &ClientConfig,
    sink: Arc<dyn LogSink>,
) -> Result<SocratesClient, ConnectError> {
    let transport = HttpTransport::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| ConnectError::Transport(e.to_string()))?;

    let transport: Arc<dyn Transport> = Arc::new(transport);
    let logger = StructuredLogger::new(sink, config.log_threshold);

    SocratesClient::connect(transport, config.endpoint(), &config.credentials(), logger).await
}

/// Load configuration with [`config::load`] and connect.
///
/// # Errors
/// `SocratesError::Config` when no configuration is found,
/// `SocratesError::Connect` when authentication fails.
pub async fn connect_from_env() -> Result<SocratesClient, SocratesError> {
    let config = config::load()?;
    Ok(connect(&config).await?)
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use socrates_core::MemorySink;
    use socrates_domain::Severity;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn plain_config(address: &str) -> ClientConfig {
        let mut config = ClientConfig::new(address, "ops", "secret");
        config.use_tls = false;
        config.timeout_secs = 5;
        config
    }

    #[tokio::test]
    async fn connect_builds_session_from_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .and(body_json(serde_json::json!({"username": "ops", "password": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"token":"abc"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let address = server.address().to_string();
        let sink = Arc::new(MemorySink::new());
        let client = connect_with_sink(&plain_config(&address), sink.clone()).await.unwrap();

        assert_eq!(client.session().authorization_header(), "Token abc");
        assert_eq!(client.session().service_address(), address);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn refused_connection_is_logged_and_returned() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sink = Arc::new(MemorySink::new());
        let err = connect_with_sink(&plain_config(&addr.to_string()), sink.clone())
            .await
            .err()
            .expect("connect should fail");

        assert!(matches!(err, ConnectError::Transport(_)));
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Error);
        assert_eq!(records[0].operation, "socrates.connect");
    }
}
