//! Domain operation façade
//!
//! [`SocratesClient`] fixes the endpoint path and operation discriminator for
//! each named operation, validates inputs locally, and delegates to the
//! [`Dispatcher`]. Every method returns a [`CallResult`]; failures are also
//! reported through the client's [`StructuredLogger`] at `ERROR`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use socrates_domain::constants::{CLUSTER_PATH, DATASOURCE_PATH, MODEL_PATH, SCRAPER_PATH};
use socrates_domain::{
    CallFailure, CallResult, ConfigQuery, ConnectError, Credentials, DefinitionQuery,
    DefinitionRef, DefinitionWrite, IterationSetQuery, Operation, PredictiveModelQuery,
    RawDataPush, RawDataQuery, RequestEnvelope, ServiceEndpoint, Session, UnreviewedIndexQuery,
    ValidationError,
};
use tracing::warn;

use crate::auth::Authenticator;
use crate::dispatch::Dispatcher;
use crate::logging::StructuredLogger;
use crate::transport_ports::Transport;

const LOG_PREFIX: &str = "socrates";

/// Authenticated client exposing the service's domain operations.
///
/// Cheap to clone; clones share the session and transport.
#[derive(Clone)]
pub struct SocratesClient {
    dispatcher: Dispatcher,
    logger: StructuredLogger,
}

impl SocratesClient {
    /// Authenticate and build a client.
    ///
    /// # Errors
    /// Returns the [`ConnectError`] from the bootstrap request; the failure is
    /// also logged at `ERROR`.
    pub async fn connect(
        transport: Arc<dyn Transport>,
        endpoint: ServiceEndpoint,
        credentials: &Credentials,
        logger: StructuredLogger,
    ) -> Result<Self, ConnectError> {
        let address = endpoint.address.clone();
        match Authenticator::new(transport.clone()).authenticate(endpoint, credentials).await {
            Ok(session) => Ok(Self::from_session(session, transport, logger)),
            Err(err) => {
                logger.error(
                    "socrates.connect",
                    &address,
                    "failed to authenticate",
                    Some(Value::String(err.to_string())),
                );
                Err(err)
            }
        }
    }

    /// Wrap an existing session.
    pub fn from_session(
        session: Session,
        transport: Arc<dyn Transport>,
        logger: StructuredLogger,
    ) -> Self {
        Self { dispatcher: Dispatcher::new(Arc::new(session), transport), logger }
    }

    pub fn session(&self) -> &Session {
        self.dispatcher.session()
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Get one definition, or all of them when `query.name` is `None`.
    pub async fn get_definition(&self, query: &DefinitionQuery) -> CallResult {
        let input = query.name.as_deref().unwrap_or("*");
        self.call("get_definition", input, &query.path(), Operation::Get, query).await
    }

    pub async fn add_definition(&self, write: &DefinitionWrite) -> CallResult {
        self.call("add_definition", &write.name, &write.path(), Operation::Add, write).await
    }

    pub async fn update_definition(&self, write: &DefinitionWrite) -> CallResult {
        self.call("update_definition", &write.name, &write.path(), Operation::Update, write).await
    }

    pub async fn delete_definition(&self, target: &DefinitionRef) -> CallResult {
        self.call("delete_definition", &target.name, &target.path(), Operation::Delete, target)
            .await
    }

    /// Raw time-series data for a window. Fails locally, with no request
    /// sent, unless a key or topic is given.
    pub async fn get_raw_data(&self, query: &RawDataQuery) -> CallResult {
        if let Err(err) = query.validate() {
            return self.reject("get_raw_data", &query.name, err);
        }
        self.call("get_raw_data", &query.name, DATASOURCE_PATH, Operation::GetRawData, query).await
    }

    /// Append records to a datasource. Native and pre-serialized records
    /// produce identical request bodies.
    pub async fn push_raw_data(&self, push: RawDataPush) -> CallResult {
        let name = push.name.clone();
        let body = match push.into_body() {
            Ok(body) => body,
            Err(err) => return self.reject("push_raw_data", &name, err),
        };
        self.call("push_raw_data", &name, DATASOURCE_PATH, Operation::PushRawData, &body).await
    }

    pub async fn get_iteration_set(&self, query: &IterationSetQuery) -> CallResult {
        self.call(
            "get_iteration_set",
            &query.name,
            DATASOURCE_PATH,
            Operation::GetIterationSet,
            query,
        )
        .await
    }

    pub async fn get_unreviewed_index_records(&self, query: &UnreviewedIndexQuery) -> CallResult {
        self.call(
            "get_unreviewed_index_records",
            &query.name,
            SCRAPER_PATH,
            Operation::GetUnreviewedIndexRecords,
            query,
        )
        .await
    }

    pub async fn get_config(&self, query: &ConfigQuery) -> CallResult {
        self.call("get_config", &query.key, &query.path(), Operation::Get, query).await
    }

    pub async fn get_cluster_nodes(&self) -> CallResult {
        let envelope = RequestEnvelope::bare(Operation::GetNodes);
        let address = self.session().service_address();
        self.send("get_cluster_nodes", address, CLUSTER_PATH, &envelope).await
    }

    pub async fn get_cluster_services(&self) -> CallResult {
        let envelope = RequestEnvelope::bare(Operation::GetServices);
        let address = self.session().service_address();
        self.send("get_cluster_services", address, CLUSTER_PATH, &envelope).await
    }

    /// Fails locally, with no request sent, when either field is empty.
    pub async fn get_predictive_model(&self, query: &PredictiveModelQuery) -> CallResult {
        if let Err(err) = query.validate() {
            return self.reject("get_predictive_model", &query.datasource, err);
        }
        self.call("get_predictive_model", &query.datasource, MODEL_PATH, Operation::Get, query)
            .await
    }

    async fn call<T: Serialize>(
        &self,
        method: &str,
        input: &str,
        path: &str,
        operation: Operation,
        fields: &T,
    ) -> CallResult {
        self.send(method, input, path, &RequestEnvelope::new(operation, fields)).await
    }

    async fn send<T: Serialize>(
        &self,
        method: &str,
        input: &str,
        path: &str,
        envelope: &RequestEnvelope<T>,
    ) -> CallResult {
        let result = self.dispatcher.dispatch(path, envelope).await;
        if let Err(failure) = &result {
            self.report(method, input, failure);
        }
        result
    }

    fn reject(&self, method: &str, input: &str, err: ValidationError) -> CallResult {
        let failure = CallFailure::from(err);
        self.report(method, input, &failure);
        Err(failure)
    }

    fn report(&self, method: &str, input: &str, failure: &CallFailure) {
        warn!(method, error = %failure, "call failed");
        let detail = failure.detail();
        let detail = serde_json::from_str::<Value>(&detail).unwrap_or(Value::String(detail));
        self.logger.error(
            &format!("{LOG_PREFIX}.{method}"),
            input,
            &format!("failed to {}", method.replace('_', " ")),
            Some(detail),
        );
    }
}

impl std::fmt::Debug for SocratesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocratesClient")
            .field("session", self.session())
            .field("logger", &self.logger)
            .finish()
    }
}
