//! Credentials and request signing for the CryptoMarket REST API
//!
//! Private endpoints authenticate every request with three headers:
//!
//! - `X-MKT-APIKEY` - the API key, verbatim
//! - `X-MKT-SIGNATURE` - lowercase hex HMAC-SHA384 of the signing message
//! - `X-MKT-TIMESTAMP` - the Unix timestamp (seconds) used in the message
//!
//! The signing message is `"<timestamp>/v1/<path>"` followed by the raw
//! values of the form fields, in order, for POST requests. GET requests
//! sign the timestamp and path only.
//!
//! # Example
//!
//! ```no_run
//! use cryptomkt_auth::{Credentials, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!
//!     let signer = RequestSigner::new(&creds, "orders/cancel");
//!     let headers = signer.headers(["M107441"]);
//!     for (name, value) in headers.iter() {
//!         println!("{}: {}", name, value);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;

pub use credentials::{
    Credentials, RequestSigner, SignedHeaders, API_VERSION, HEADER_API_KEY, HEADER_SIGNATURE,
    HEADER_TIMESTAMP,
};
pub use error::{AuthError, AuthResult};
