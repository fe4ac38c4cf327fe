//! Authenticated session handle

use std::fmt;

use crate::constants::AUTHORIZATION_SCHEME;

/// Credentials presented once to `/auth`
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and how to reach the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// Host (and optional port), e.g. `socrates.internal:8000`
    pub address: String,
    pub use_tls: bool,
    pub verify_certificate: bool,
}

impl ServiceEndpoint {
    pub fn new(address: impl Into<String>, use_tls: bool, verify_certificate: bool) -> Self {
        Self { address: address.into(), use_tls, verify_certificate }
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_tls {
            "https"
        } else {
            "http"
        }
    }

    /// Absolute URL for `path`, e.g. `https://host/archimedes/datasource`.
    pub fn url(&self, path: &str) -> String {
        let address = self.address.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}://{}/{}", self.scheme(), address, path)
    }
}

/// Immutable handle holding the bearer credential for one authenticated client.
///
/// The token is never refreshed; re-authenticate to obtain a new session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    endpoint: ServiceEndpoint,
    authorization: String,
}

impl Session {
    /// Build a session from the token returned by `/auth`.
    pub fn new(endpoint: ServiceEndpoint, token: &str) -> Self {
        Self { endpoint, authorization: format!("{AUTHORIZATION_SCHEME} {token}") }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    pub fn service_address(&self) -> &str {
        &self.endpoint.address
    }

    pub fn use_tls(&self) -> bool {
        self.endpoint.use_tls
    }

    pub fn verify_certificate(&self) -> bool {
        self.endpoint.verify_certificate
    }

    /// Value of the `Authorization` header, `Token <token>`.
    pub fn authorization_header(&self) -> &str {
        &self.authorization
    }

    pub fn url(&self, path: &str) -> String {
        self.endpoint.url(path)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("authorization", &"Token <redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_scheme_from_tls_flag() {
        assert_eq!(
            ServiceEndpoint::new("socrates", true, true).url("/auth"),
            "https://socrates/auth"
        );
        assert_eq!(
            ServiceEndpoint::new("socrates:8000/", false, true).url("archimedes/datasource"),
            "http://socrates:8000/archimedes/datasource"
        );
    }

    #[test]
    fn session_formats_token_header() {
        let session = Session::new(ServiceEndpoint::new("socrates", true, false), "abc");
        assert_eq!(session.authorization_header(), "Token abc");
        assert!(!session.verify_certificate());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let session = Session::new(ServiceEndpoint::new("socrates", true, true), "secret-token");
        let credentials = Credentials::new("ops", "hunter2");
        assert!(!format!("{session:?}").contains("secret-token"));
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }
}
