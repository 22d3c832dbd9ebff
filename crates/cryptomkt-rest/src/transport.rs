//! HTTP transport abstraction
//!
//! The transport performs exactly one HTTP exchange per call. Retrying,
//! signing and decoding live above it, so the retry loop can be tested
//! with [`MockTransport`] instead of a real network.
//!
//! Implementations must only read the body of a success (2xx) response;
//! a failed body read is reported as [`TransportError::Body`] and is never
//! retried.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::error::{BoxError, RestError, RestResult};

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// No response was received (connect failure, timeout, send failure)
    #[error("request failed: {0}")]
    Request(#[source] BoxError),

    /// A success status arrived but the body could not be read
    #[error("body read failed: {0}")]
    Body(#[source] BoxError),
}

/// One fully built HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including query string
    pub url: Url,
    /// Extra headers, in the order they were attached
    pub headers: Vec<(&'static str, String)>,
    /// URL-encoded form body (POST only)
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of one HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw body (empty for non-success statuses)
    pub body: Vec<u8>,
}

/// Trait for HTTP transport abstraction
///
/// Shared by every call a client makes, so implementations must be safe
/// for concurrent use.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one HTTP exchange
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client with the given timeout and user agent
    pub fn with_timeout(timeout: Duration, user_agent: &str) -> RestResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(RestError::HttpClient)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(Box::new(e)))?;

        let status = response.status();
        debug!(%status, "Received response");

        if !status.is_success() {
            return Ok(HttpResponse {
                status,
                body: Vec::new(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(Box::new(e)))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Scripted outcome for one [`MockTransport`] exchange
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Respond with a status and body
    Respond {
        /// HTTP status code
        status: u16,
        /// Body bytes
        body: Vec<u8>,
    },
    /// Fail before any response arrives
    FailRequest(String),
    /// Return 200 but fail reading the body
    FailBody(String),
}

/// Mock transport for testing
///
/// Replays scripted outcomes in order and records every request it
/// receives together with the instant it arrived.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: parking_lot::Mutex<std::collections::VecDeque<MockOutcome>>,
    received: parking_lot::Mutex<Vec<(std::time::Instant, HttpRequest)>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a mock with no scripted outcomes
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary outcome
    pub fn push(&self, outcome: MockOutcome) {
        self.outcomes.lock().push_back(outcome);
    }

    /// Queue a 200 response with a JSON body
    pub fn push_json(&self, body: impl Into<String>) {
        self.push(MockOutcome::Respond {
            status: 200,
            body: body.into().into_bytes(),
        });
    }

    /// Queue an empty response with the given status
    pub fn push_status(&self, status: u16) {
        self.push(MockOutcome::Respond {
            status,
            body: Vec::new(),
        });
    }

    /// Queue a failure before any response arrives
    pub fn push_request_failure(&self, message: impl Into<String>) {
        self.push(MockOutcome::FailRequest(message.into()));
    }

    /// Queue a body read failure after a 200
    pub fn push_body_failure(&self, message: impl Into<String>) {
        self.push(MockOutcome::FailBody(message.into()));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.received.lock().iter().map(|(_, r)| r.clone()).collect()
    }

    /// Arrival instant of each request
    pub fn request_times(&self) -> Vec<std::time::Instant> {
        self.received.lock().iter().map(|(t, _)| *t).collect()
    }

    /// Number of requests received so far
    pub fn attempts(&self) -> usize {
        self.received.lock().len()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.received.lock().last().map(|(_, r)| r.clone())
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.received
            .lock()
            .push((std::time::Instant::now(), request));

        let outcome = self.outcomes.lock().pop_front();
        match outcome {
            Some(MockOutcome::Respond { status, body }) => {
                let status = StatusCode::from_u16(status)
                    .map_err(|e| TransportError::Request(Box::new(e)))?;
                let body = if status.is_success() { body } else { Vec::new() };
                Ok(HttpResponse { status, body })
            }
            Some(MockOutcome::FailRequest(message)) => Err(TransportError::Request(message.into())),
            Some(MockOutcome::FailBody(message)) => Err(TransportError::Body(message.into())),
            None => Err(TransportError::Request("mock transport has no scripted outcome".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url: Url::parse("https://mock.test/v1/market").unwrap(),
            headers: vec![("X-MKT-APIKEY", "key".to_string())],
            body: None,
        }
    }

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let transport = MockTransport::new();
        transport.push_status(503);
        transport.push_json(r#"{"status":"success","data":[]}"#);

        let first = transport.execute(request()).await.unwrap();
        assert_eq!(first.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(first.body.is_empty());

        let second = transport.execute(request()).await.unwrap();
        assert!(second.status.is_success());
        assert!(String::from_utf8(second.body).unwrap().contains("success"));

        assert_eq!(transport.attempts(), 2);
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let transport = MockTransport::new();
        transport.push_request_failure("connection refused");
        transport.push_body_failure("stream reset");

        assert!(matches!(
            transport.execute(request()).await,
            Err(TransportError::Request(_))
        ));
        assert!(matches!(
            transport.execute(request()).await,
            Err(TransportError::Body(_))
        ));
        // Exhausted script
        assert!(matches!(
            transport.execute(request()).await,
            Err(TransportError::Request(_))
        ));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = request();
        assert_eq!(req.header("x-mkt-apikey"), Some("key"));
        assert_eq!(req.header("X-MKT-SIGNATURE"), None);
    }
}
