//! REST API client for the CryptoMarket exchange
//!
//! This crate provides a REST client for trading on CryptoMarket,
//! covering market data, order management and wallet balances.
//!
//! # Features
//!
//! - **Market Data**: Markets, ticker, order book, public trades
//! - **Orders**: Active/executed orders, create, cancel, status, instant orders
//! - **Account**: Wallet balances
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA384 over the timestamp, the versioned path and, for POST, the
//! form values in order.
//!
//! # Example
//!
//! ```no_run
//! use cryptomkt_rest::{CryptoMktClient, Market};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CryptoMktClient::new()?;
//!     let ticker = client.ticker(Market::EthClp).await?;
//!     println!("ETH/CLP: {:?}", ticker.data);
//!
//!     // Private endpoints (auth required)
//!     let auth_client = CryptoMktClient::from_env()?;
//!     let balance = auth_client.balance().await?;
//!     println!("Balances: {:?}", balance.data);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Retries
//!
//! Every call is attempted up to 5 times, 2 seconds apart, when the
//! request fails in transit or returns a non-success status. Decode
//! failures are never retried. See [`RetryConfig`] to change the policy.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod retry;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CryptoMktClient, DEFAULT_BASE_URL};
pub use cryptomkt_auth::Credentials;
pub use endpoints::DEFAULT_PAGE_LIMIT;
pub use error::{ErrorKind, RestError, RestResult};
pub use executor::{EndpointCall, RequestExecutor};
pub use retry::RetryConfig;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::{MockOutcome, MockTransport};

// Re-export domain types
pub use cryptomkt_types::{Cursor, Decimal, ExchangeTime, Market, OrderSide, Pagination, Wallet};

pub use types::{
    // Envelopes
    ApiResponse, PagedResponse,
    // Market data
    BookEntry, MarketResponse, OrderBookResponse, Ticker, TickerResponse, Trade, TradesResponse,
    // Orders
    InstantOrderResponse, InstantQuote, InstantQuoteResponse, Order, OrderAmount, OrderResponse,
    OrdersResponse,
    // Account
    BalanceResponse, WalletBalance,
};
