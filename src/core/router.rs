//! Request routing, independent of the HTTP transport.
//!
//! Route table:
//! - POST /receive_matrix    → submit matrix pair
//! - POST /receive_timestamp → submit timestamp
//! - GET  /health            → liveness
//! - Wrong method on a known path → 405
//! - Unknown paths → 404

use crate::core::service::IngestService;
use crate::domain::model::{IngestResponse, MatrixPairRequest, TimestampRequest};
use crate::domain::ports::LogSink;
use crate::utils::error::{IngestError, Result};
use serde_json::{json, Value};

pub const PATH_RECEIVE_MATRIX: &str = "/receive_matrix";
pub const PATH_RECEIVE_TIMESTAMP: &str = "/receive_timestamp";
pub const PATH_HEALTH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    pub fn parse(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other(m) => m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ReceiveMatrix,
    ReceiveTimestamp,
    Health,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Found(Endpoint),
    MethodNotAllowed,
    NotFound,
}

pub fn resolve(method: &Method, path: &str) -> RouteMatch {
    let (allowed, endpoint) = match path {
        PATH_RECEIVE_MATRIX => (Method::Post, Endpoint::ReceiveMatrix),
        PATH_RECEIVE_TIMESTAMP => (Method::Post, Endpoint::ReceiveTimestamp),
        PATH_HEALTH => (Method::Get, Endpoint::Health),
        _ => return RouteMatch::NotFound,
    };
    if *method == allowed {
        RouteMatch::Found(endpoint)
    } else {
        RouteMatch::MethodNotAllowed
    }
}

pub struct Router<G: LogSink, T: LogSink> {
    service: IngestService<G, T>,
}

impl<G: LogSink, T: LogSink> Router<G, T> {
    pub fn new(service: IngestService<G, T>) -> Self {
        Self { service }
    }

    pub fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> IngestResponse {
        let endpoint = match resolve(method, path) {
            RouteMatch::Found(endpoint) => endpoint,
            RouteMatch::MethodNotAllowed => {
                return IngestResponse::error(
                    405,
                    &format!("Method not allowed: {} {}", method.as_str(), path),
                )
            }
            RouteMatch::NotFound => {
                return IngestResponse::error(404, &format!("Not found: {}", path))
            }
        };

        let result = match endpoint {
            Endpoint::ReceiveMatrix => self.receive_matrix(body),
            Endpoint::ReceiveTimestamp => self.receive_timestamp(body),
            Endpoint::Health => {
                return IngestResponse {
                    status: 200,
                    body: json!({
                        "status": "healthy",
                        "version": env!("CARGO_PKG_VERSION"),
                    }),
                }
            }
        };

        match result {
            Ok(message) => IngestResponse::message(200, message),
            Err(e) => {
                if e.is_client_error() {
                    tracing::warn!(path, "Rejected request: {}", e);
                } else {
                    tracing::error!(path, "Request failed: {}", e);
                }
                IngestResponse::from_error(&e)
            }
        }
    }

    fn receive_matrix(&self, body: &[u8]) -> Result<&'static str> {
        let payload = parse_body(body)?;
        tracing::debug!(%payload, "Matrix payload received");
        let request = MatrixPairRequest::from_payload(&payload)?;
        self.service.submit_matrix_pair(&request)
    }

    fn receive_timestamp(&self, body: &[u8]) -> Result<&'static str> {
        let payload = parse_body(body)?;
        tracing::debug!(%payload, "Timestamp payload received");
        let request = TimestampRequest::from_payload(&payload)?;
        self.service.submit_timestamp(&request)
    }
}

fn parse_body(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| IngestError::MalformedBody {
        message: e.to_string(),
    })
}
