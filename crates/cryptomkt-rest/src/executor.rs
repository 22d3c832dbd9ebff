//! Request building, signing and the retrying transport loop

use cryptomkt_auth::{Credentials, RequestSigner, API_VERSION};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::retry::RetryConfig;
use crate::transport::{HttpRequest, HttpTransport, TransportError};

/// One logical API call: method, path, ordered parameters, auth flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCall {
    method: Method,
    path: &'static str,
    params: Vec<(&'static str, String)>,
    auth: bool,
}

impl EndpointCall {
    /// Unsigned GET (public market data)
    pub fn public_get(path: &'static str) -> Self {
        Self {
            method: Method::GET,
            path,
            params: Vec::new(),
            auth: false,
        }
    }

    /// Signed GET (account and order data)
    pub fn private_get(path: &'static str) -> Self {
        Self {
            auth: true,
            ..Self::public_get(path)
        }
    }

    /// Signed POST with a form body
    pub fn post(path: &'static str) -> Self {
        Self {
            method: Method::POST,
            path,
            params: Vec::new(),
            auth: true,
        }
    }

    /// Append a parameter; order is preserved on the wire and in the signature
    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    /// Append a parameter only when present
    pub fn opt_param(self, name: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Endpoint path relative to the API version
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Parameters in construction order
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Whether the call is signed
    pub fn requires_auth(&self) -> bool {
        self.auth || self.method == Method::POST
    }

    fn is_post(&self) -> bool {
        self.method == Method::POST
    }
}

/// Executes endpoint calls against the API
///
/// Holds no per-call state; clones share the same transport.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    retry: RetryConfig,
}

impl RequestExecutor {
    /// Create an executor over a transport
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>, retry: RetryConfig) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            retry,
        }
    }

    /// Configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured retry policy
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Build the absolute URL for a path, with an optional query string
    pub fn endpoint_url(&self, path: &str, query: &[(&'static str, String)]) -> RestResult<Url> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let raw = format!("{}{}/{}", base, API_VERSION, path);

        let mut url = Url::parse(&raw).map_err(|e| RestError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(RestError::InvalidUrl {
                url: raw,
                reason: "not an http(s) base URL".to_string(),
            });
        }

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Perform a call and return the raw body of the first successful attempt
    ///
    /// Transport failures and non-success statuses are retried up to the
    /// configured bound, pausing between attempts. URL, encoding and
    /// body-read failures are returned immediately.
    pub async fn execute(
        &self,
        call: &EndpointCall,
        credentials: Option<&Credentials>,
    ) -> RestResult<Vec<u8>> {
        let path = call.path();
        let credentials = if call.requires_auth() {
            Some(credentials.ok_or(RestError::AuthRequired)?)
        } else {
            None
        };

        let (url, body) = if call.is_post() {
            let form = serde_urlencoded::to_string(call.params()).map_err(|source| {
                RestError::Encode {
                    path: path.to_string(),
                    source,
                }
            })?;
            (self.endpoint_url(path, &[])?, Some(form))
        } else {
            (self.endpoint_url(path, call.params())?, None)
        };

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let request = self.build_request(call, &url, body.as_deref(), credentials);
            debug!(path, attempt, method = %call.method(), "Sending request");

            let error = match self.transport.execute(request).await {
                Ok(response) if response.status.is_success() => {
                    debug!(path, attempt, bytes = response.body.len(), "Request succeeded");
                    return Ok(response.body);
                }
                Ok(response) => RestError::Status {
                    path: path.to_string(),
                    attempts: attempt,
                    status: response.status,
                },
                Err(TransportError::Request(source)) => RestError::Transport {
                    path: path.to_string(),
                    attempts: attempt,
                    source,
                },
                Err(TransportError::Body(source)) => {
                    return Err(RestError::Body {
                        path: path.to_string(),
                        source,
                    });
                }
            };

            if !self.retry.should_retry(attempt) {
                warn!(path, attempts = attempt, error = %error, "Giving up");
                return Err(error);
            }

            let delay = self.retry.delay_with_jitter(attempt);
            warn!(
                path,
                attempt,
                max_attempts = self.retry.max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Perform a call and decode the body as JSON
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        call: &EndpointCall,
        credentials: Option<&Credentials>,
    ) -> RestResult<T> {
        let body = self.execute(call, credentials).await?;
        decode(call.path(), &body)
    }

    fn build_request(
        &self,
        call: &EndpointCall,
        url: &Url,
        body: Option<&str>,
        credentials: Option<&Credentials>,
    ) -> HttpRequest {
        let mut headers = Vec::new();

        if let Some(credentials) = credentials {
            // Stamped per attempt, at signing time
            let signer = RequestSigner::new(credentials, call.path());
            let form_values = body
                .map(|_| call.params().iter().map(|(_, v)| v.as_str()))
                .into_iter()
                .flatten();
            let signed = signer.headers(form_values);
            headers.extend(signed.iter().map(|(name, value)| (name, value.to_string())));
        }

        if let Some(body) = body {
            headers.push(("Content-Type", "application/x-www-form-urlencoded".to_string()));
            headers.push(("Content-Length", body.len().to_string()));
        }

        HttpRequest {
            method: call.method().clone(),
            url: url.clone(),
            headers,
            body: body.map(str::to_string),
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Decode a response body; shape errors are never retried
pub fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> RestResult<T> {
    serde_json::from_slice(body).map_err(|source| RestError::Decode {
        path: path.to_string(),
        source,
    })
}
