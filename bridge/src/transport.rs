//! Executes `todo-core` requests against the REST API.
//!
//! The client core only describes requests; a `Transport` performs the
//! round-trip. Anything that keeps the request from producing a response
//! (refused connection, DNS failure, timeout) becomes
//! `ApiError::UpstreamUnavailable`. Status codes are left for the client to
//! interpret.

use std::time::Duration;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking ureq transport with a global per-request timeout.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let url = request.url.as_str();
        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => self.agent.get(url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(url).call(),
            (method, body) => {
                let builder = match method {
                    HttpMethod::Post => self.agent.post(url),
                    _ => self.agent.put(url),
                };
                let body = body.unwrap_or_default();
                builder
                    .content_type("application/json")
                    .send(body.as_bytes())
            }
        };

        let mut response = result.map_err(unavailable)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(unavailable)?;
        tracing::debug!(status, "received response");
        Ok(HttpResponse::new(status, body))
    }
}

fn unavailable(err: ureq::Error) -> ApiError {
    tracing::warn!(error = %err, "todo API request failed");
    ApiError::UpstreamUnavailable(err.to_string())
}
