//! Main REST client implementation

use chrono::NaiveDate;
use cryptomkt_auth::Credentials;
use cryptomkt_types::{Market, OrderSide};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::endpoints::{AccountEndpoints, MarketEndpoints, OrderEndpoints};
use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::retry::RetryConfig;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{
    BalanceResponse, InstantOrderResponse, InstantQuoteResponse, MarketResponse,
    OrderBookResponse, OrderResponse, OrdersResponse, TickerResponse, TradesResponse,
};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.cryptomkt.com/";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("cryptomkt-rest/", env!("CARGO_PKG_VERSION"));

/// CryptoMarket REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap
/// and clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use cryptomkt_rest::{CryptoMktClient, Market};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CryptoMktClient::new()?;
///     let ticker = client.ticker(Market::BtcClp).await?;
///
///     // With authentication for private endpoints
///     let auth_client = CryptoMktClient::from_env()?;
///     let balance = auth_client.balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CryptoMktClient {
    executor: RequestExecutor,
    credentials: Option<Credentials>,
}

impl CryptoMktClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create an authenticated client from `CRYPTOMKT_API_KEY` and `CRYPTOMKT_API_SECRET`
    pub fn from_env() -> RestResult<Self> {
        let credentials = Credentials::from_env()?;
        Self::with_credentials(credentials)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport =
            ReqwestTransport::with_timeout(Duration::from_secs(config.timeout_secs), user_agent)?;

        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        info!(
            base_url = %config.base_url,
            authenticated = config.credentials.is_some(),
            "Created CryptoMarket REST client"
        );

        Self {
            executor: RequestExecutor::new(transport, config.base_url, config.retry),
            credentials: config.credentials,
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Configured base URL
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.executor)
    }

    /// List tradeable markets
    pub async fn markets(&self) -> RestResult<MarketResponse> {
        self.market().markets().await
    }

    /// Get the ticker of a market
    pub async fn ticker(&self, market: Market) -> RestResult<TickerResponse> {
        self.market().ticker(market).await
    }

    /// Get one page of one side of the order book
    pub async fn book(&self, market: Market, side: OrderSide, page: u32) -> RestResult<OrderBookResponse> {
        self.market().book(market, side, page).await
    }

    /// Get one page of buy orders
    pub async fn buy_book(&self, market: Market, page: u32) -> RestResult<OrderBookResponse> {
        self.market().buy_book(market, page).await
    }

    /// Get one page of sell orders
    pub async fn sell_book(&self, market: Market, page: u32) -> RestResult<OrderBookResponse> {
        self.market().sell_book(market, page).await
    }

    /// Get one page of public trades
    pub async fn trades(
        &self,
        market: Market,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        page: u32,
    ) -> RestResult<TradesResponse> {
        self.market().trades(market, start, end, page).await
    }

    // ========================================================================
    // Private Order Endpoints
    // ========================================================================

    /// Get order endpoints (requires credentials)
    pub fn orders(&self) -> RestResult<OrderEndpoints<'_>> {
        let credentials = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(OrderEndpoints::new(&self.executor, credentials))
    }

    /// Get one page of resting orders
    pub async fn active_orders(&self, market: Market, page: u32) -> RestResult<OrdersResponse> {
        self.orders()?.active_orders(market, page).await
    }

    /// Get one page of executed orders
    pub async fn executed_orders(&self, market: Market, page: u32) -> RestResult<OrdersResponse> {
        self.orders()?.executed_orders(market, page).await
    }

    /// Get the current state of an order
    pub async fn order_status(&self, id: &str) -> RestResult<OrderResponse> {
        self.orders()?.order_status(id).await
    }

    /// Place a limit order
    pub async fn create_order(
        &self,
        market: Market,
        amount: Decimal,
        price: Decimal,
        side: OrderSide,
    ) -> RestResult<OrderResponse> {
        self.orders()?.create_order(market, amount, price, side).await
    }

    /// Cancel a resting order
    pub async fn cancel_order(&self, id: &str) -> RestResult<OrderResponse> {
        self.orders()?.cancel_order(id).await
    }

    /// Quote an instant order
    pub async fn instant_quote(
        &self,
        market: Market,
        side: OrderSide,
        amount: Decimal,
    ) -> RestResult<InstantQuoteResponse> {
        self.orders()?.instant_quote(market, side, amount).await
    }

    /// Execute an instant order
    pub async fn create_instant_order(
        &self,
        market: Market,
        side: OrderSide,
        amount: Decimal,
    ) -> RestResult<InstantOrderResponse> {
        self.orders()?.create_instant_order(market, side, amount).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let credentials = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(&self.executor, credentials))
    }

    /// Get the balance of every wallet
    pub async fn balance(&self) -> RestResult<BalanceResponse> {
        self.account()?.balance().await
    }
}

impl std::fmt::Debug for CryptoMktClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoMktClient")
            .field("base_url", &self.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API host, without the version segment
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Retry policy of the transport loop
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}
