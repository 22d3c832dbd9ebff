//! Error types for REST API operations

use cryptomkt_auth::AuthError;
use reqwest::StatusCode;

/// Boxed error from a transport implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Broad category of a [`RestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Local construction failure (bad URL, bad parameter, client setup)
    Construction,
    /// Network-level failure (connect, timeout, send)
    Transport,
    /// Non-success HTTP status
    Status,
    /// Body could not be read after a successful status
    Body,
    /// Response body did not match the expected shape
    Decode,
    /// Missing or invalid credentials
    Auth,
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Base URL or request URL could not be built
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// Parser message
        reason: String,
    },

    /// Query string or form body could not be encoded
    #[error("Failed to encode parameters for {path}: {source}")]
    Encode {
        /// Endpoint path
        path: String,
        #[source]
        source: serde_urlencoded::ser::Error,
    },

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Underlying HTTP client could not be created
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Every attempt failed before a response arrived
    #[error("Request to {path} failed after {attempts} attempt(s): {source}")]
    Transport {
        /// Endpoint path
        path: String,
        /// Attempts made
        attempts: u32,
        #[source]
        source: BoxError,
    },

    /// Every attempt returned a non-success status
    #[error("Request to {path} returned {status} after {attempts} attempt(s)")]
    Status {
        /// Endpoint path
        path: String,
        /// Attempts made
        attempts: u32,
        /// Status of the last attempt
        status: StatusCode,
    },

    /// Body read failed after a successful status
    #[error("Failed to read response body from {path}: {source}")]
    Body {
        /// Endpoint path
        path: String,
        #[source]
        source: BoxError,
    },

    /// Failed to decode response
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        /// Endpoint path
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credentials could not be loaded
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl RestError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl { .. }
            | Self::Encode { .. }
            | Self::InvalidParameter(_)
            | Self::HttpClient(_) => ErrorKind::Construction,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Status { .. } => ErrorKind::Status,
            Self::Body { .. } => ErrorKind::Body,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::AuthRequired | Self::Auth(_) => ErrorKind::Auth,
        }
    }

    /// Check if this error kind is one the transport loop retries
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport | ErrorKind::Status)
    }

    /// HTTP status, for status errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Number of attempts made, for errors surfaced by the transport loop
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Transport { attempts, .. } | Self::Status { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
