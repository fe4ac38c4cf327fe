//! In-memory transport for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::transport_ports::{Transport, TransportError, TransportRequest, TransportResponse};

pub type Scripted = Result<TransportResponse, TransportError>;

/// Replays scripted outcomes in order and records every request.
///
/// When the script runs out, calls fail with a connect error.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an HTTP answer.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(TransportResponse::new(status, body)));
        self
    }

    /// Queue a transport-level failure.
    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, outcome: Scripted) {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).push_back(outcome);
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Body of the `index`-th request parsed as JSON.
    pub fn request_json(&self, index: usize) -> Option<serde_json::Value> {
        let requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);
        requests.get(index).and_then(|request| serde_json::from_slice(&request.body).ok())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, request: TransportRequest) -> Scripted {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::connect("mock transport script exhausted")))
    }
}
