//! Authentication credentials for the CryptoMarket API
//!
//! Implements HMAC-SHA384 signing as required by the private endpoints.
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha384;
use tracing::trace;

use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

/// API version segment included in every request path and signature
pub const API_VERSION: &str = "v1";

/// Header carrying the API key
pub const HEADER_API_KEY: &str = "X-MKT-APIKEY";
/// Header carrying the hex signature
pub const HEADER_SIGNATURE: &str = "X-MKT-SIGNATURE";
/// Header carrying the signing timestamp
pub const HEADER_TIMESTAMP: &str = "X-MKT-TIMESTAMP";

/// API credentials for authenticated requests
///
/// The secret is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// Shared secret (zeroized on drop)
    secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and shared secret
    ///
    /// # Errors
    /// Returns `InvalidCredentials` if either value is empty.
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret = secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            secret: SecretBox::new(Box::new(secret.into_bytes())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `CRYPTOMKT_API_KEY` and `CRYPTOMKT_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("CRYPTOMKT_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("CRYPTOMKT_API_KEY".to_string()))?;
        let secret = std::env::var("CRYPTOMKT_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("CRYPTOMKT_API_SECRET".to_string()))?;

        Self::new(api_key, secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request
    ///
    /// The message is `"<timestamp>/<API_VERSION>/<path>"` followed by each
    /// form value in iteration order, with no names or separators. Pass no
    /// values for GET requests.
    ///
    /// # Returns
    /// Lowercase hex HMAC-SHA384 digest
    pub fn sign<'v>(
        &self,
        timestamp: i64,
        path: &str,
        form_values: impl IntoIterator<Item = &'v str>,
    ) -> String {
        let prefix = format!("{}/{}/{}", timestamp, API_VERSION, path);

        let mut mac = HmacSha384::new_from_slice(self.secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(prefix.as_bytes());
        for value in form_values {
            mac.update(value.as_bytes());
        }

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// The three authentication headers for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value for `X-MKT-APIKEY`
    pub api_key: String,
    /// Value for `X-MKT-SIGNATURE`
    pub signature: String,
    /// Value for `X-MKT-TIMESTAMP`
    pub timestamp: String,
}

impl SignedHeaders {
    /// Header name/value pairs, in the order they are attached
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
        ]
        .into_iter()
    }
}

/// Request signer bound to one path and one timestamp
///
/// The timestamp is captured when the signer is created, so create it
/// right before the request is sent.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    path: String,
    timestamp: i64,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer stamped with the current time
    pub fn new(credentials: &'a Credentials, path: impl Into<String>) -> Self {
        Self::with_timestamp(credentials, path, Utc::now().timestamp())
    }

    /// Create a signer with an explicit timestamp
    pub fn with_timestamp(credentials: &'a Credentials, path: impl Into<String>, timestamp: i64) -> Self {
        Self {
            credentials,
            path: path.into(),
            timestamp,
        }
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request with the given form values
    pub fn sign<'v>(&self, form_values: impl IntoIterator<Item = &'v str>) -> String {
        self.credentials.sign(self.timestamp, &self.path, form_values)
    }

    /// Build the authentication headers for the given form values
    pub fn headers<'v>(&self, form_values: impl IntoIterator<Item = &'v str>) -> SignedHeaders {
        let signature = self.sign(form_values);
        trace!(path = %self.path, timestamp = self.timestamp, "Signed request");

        SignedHeaders {
            api_key: self.api_key().to_string(),
            signature,
            timestamp: self.timestamp.to_string(),
        }
    }
}
