//! Conversions from external infrastructure errors into port errors.

use reqwest::Error as HttpError;
use socrates_core::TransportError;

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
pub(crate) trait IntoTransportError {
    fn into_transport(self) -> TransportError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

impl IntoTransportError for HttpError {
    fn into_transport(self) -> TransportError {
        if self.is_timeout() {
            return TransportError::timeout(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return TransportError::connect(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return TransportError::new(
                socrates_core::TransportErrorKind::Other,
                format!("invalid HTTP request: {self}"),
            );
        }

        TransportError::new(socrates_core::TransportErrorKind::Other, self.to_string())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use reqwest::Client;
    use socrates_core::TransportErrorKind;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn refused_connection_maps_to_connect() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.post(format!("http://{addr}")).send().await.unwrap_err();

        let mapped = error.into_transport();
        assert_eq!(mapped.kind, TransportErrorKind::Connect);
        assert!(mapped.message.contains("connection failure"));
    }

    #[tokio::test]
    async fn slow_response_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client =
            Client::builder().no_proxy().timeout(Duration::from_millis(50)).build().unwrap();
        let error = client.post(server.uri()).send().await.unwrap_err();

        assert_eq!(error.into_transport().kind, TransportErrorKind::Timeout);
    }

    #[tokio::test]
    async fn malformed_url_maps_to_other() {
        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.post("http://exa mple.com").send().await.unwrap_err();

        assert_eq!(error.into_transport().kind, TransportErrorKind::Other);
    }
}
