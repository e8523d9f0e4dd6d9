//! HTTP transport for the zero-shot classifier
//!
//! POSTs `{"inputs": text, "parameters": {"candidate_labels": labels}}` with a
//! bearer token and expects `{"labels": [...], "scores": [...]}` back. The
//! blocking request runs on the tokio blocking pool.

use super::client::Classifier;
use super::result::{ClassificationError, ClassificationResult};
use crate::config::{ApiToken, Config};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{info, warn};

const USER_AGENT: &str = concat!("sarc/", env!("CARGO_PKG_VERSION"));

/// Production classifier client
#[derive(Clone)]
pub struct HttpClassifier {
    agent: ureq::Agent,
    endpoint: String,
    token: ApiToken,
    retries: u32,
}

impl HttpClassifier {
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            config.endpoint.clone(),
            config.token.clone(),
            config.timeout,
            config.retries,
        )
    }

    pub fn from_parts(endpoint: impl Into<String>, token: ApiToken, timeout: Duration, retries: u32) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
            token,
            retries,
        }
    }
}

impl std::fmt::Debug for HttpClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClassifier")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token)
            .field("retries", &self.retries)
            .finish()
    }
}

/// JSON body sent to the service
pub fn request_body(text: &str, labels: &[String]) -> Value {
    json!({
        "inputs": text,
        "parameters": { "candidate_labels": labels },
    })
}

/// Parse a response body. Anything but order-aligned `labels`/`scores` is malformed.
pub fn parse_response(body: &str) -> Result<ClassificationResult, ClassificationError> {
    serde_json::from_str(body).map_err(|e| ClassificationError::MalformedResponse(e.to_string()))
}

fn post_once(agent: &ureq::Agent, endpoint: &str, token: &ApiToken, body: &Value) -> Result<String, ClassificationError> {
    let response = agent
        .post(endpoint)
        .set("Authorization", &format!("Bearer {}", token.expose()))
        .set("Accept", "application/json")
        .send_json(body)
        .map_err(|e| match e {
            ureq::Error::Status(status, response) => ClassificationError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => ClassificationError::Transport(transport.to_string()),
        })?;
    response
        .into_string()
        .map_err(|e| ClassificationError::Transport(format!("reading response body: {}", e)))
}

fn post_with_retry(
    agent: &ureq::Agent,
    endpoint: &str,
    token: &ApiToken,
    body: &Value,
    retries: u32,
) -> Result<String, ClassificationError> {
    let mut attempt = 0;
    loop {
        match post_once(agent, endpoint, token, body) {
            Err(e) if e.is_transient() && attempt < retries => {
                attempt += 1;
                warn!(attempt, error = %e, "classifier transport failure, retrying");
            }
            other => return other,
        }
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, ClassificationError> {
        let body = request_body(text, labels);
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let token = self.token.clone();
        let retries = self.retries;

        info!(endpoint = %endpoint, labels = labels.len(), "dispatching classification request");
        let raw = tokio::task::spawn_blocking(move || post_with_retry(&agent, &endpoint, &token, &body, retries))
            .await
            .map_err(|e| ClassificationError::Transport(format!("classifier task failed: {}", e)))??;
        parse_response(&raw)
    }
}
