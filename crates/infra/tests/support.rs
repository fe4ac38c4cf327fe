use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use serde_json::{json, Value};
use socrates_core::{MemorySink, SocratesClient};
use socrates_domain::constants::{AUTH_PATH, DATASOURCE_PATH, TIMESTAMP_FORMAT};
use socrates_domain::{ClientConfig, Severity};
use socrates_infra::connect_with_sink;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TEST_TOKEN: &str = "integration-token";

/// Plain-HTTP configuration pointing at a mock server.
pub fn config_for(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::new(server.address().to_string(), "ops", "secret");
    config.use_tls = false;
    config.timeout_secs = 5;
    config.log_threshold = Severity::Debug;
    config
}

/// Mount an `/auth` route that always hands out [`TEST_TOKEN`].
pub async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": TEST_TOKEN})))
        .mount(server)
        .await;
}

/// Start a server with `/auth` mounted and connect a client to it.
pub async fn connected_client() -> (MockServer, SocratesClient, Arc<MemorySink>) {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    let sink = Arc::new(MemorySink::new());
    let client = connect_with_sink(&config_for(&server), sink.clone())
        .await
        .expect("client should authenticate against mock server");

    (server, client, sink)
}

/// Bodies of every request the server saw on `route`, parsed as JSON.
pub async fn bodies_for(server: &MockServer, route: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path() == route)
        .map(|request| serde_json::from_slice(&request.body).expect("JSON request body"))
        .collect()
}

/// In-memory datasource: stores pushed records, answers window queries.
#[derive(Default)]
pub struct DatasourceStub {
    records: Mutex<Vec<Value>>,
}

impl DatasourceStub {
    pub async fn mount(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(DATASOURCE_PATH))
            .respond_with(Self::default())
            .mount(server)
            .await;
    }

    fn parse(value: &Value) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value.as_str()?, TIMESTAMP_FORMAT).ok()
    }

    fn window(&self, body: &Value) -> Vec<Value> {
        let (Some(start), Some(end)) = (Self::parse(&body["start"]), Self::parse(&body["end"]))
        else {
            return Vec::new();
        };
        let records = self.records.lock().unwrap();
        records
            .iter()
            .filter(|record| {
                Self::parse(&record["timestamp"]).is_some_and(|ts| ts >= start && ts <= end)
            })
            .cloned()
            .collect()
    }
}

impl Respond for DatasourceStub {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return ResponseTemplate::new(400).set_body_string("malformed body");
        };

        match body["operation"].as_str() {
            Some("push_raw_data") => {
                let pushed = body["records"].as_array().cloned().unwrap_or_default();
                let count = pushed.len();
                self.records.lock().unwrap().extend(pushed);
                ResponseTemplate::new(200).set_body_json(json!({"inserted": count}))
            }
            Some("get_raw_data") => ResponseTemplate::new(200).set_body_json(self.window(&body)),
            _ => ResponseTemplate::new(400).set_body_string("unknown operation"),
        }
    }
}
