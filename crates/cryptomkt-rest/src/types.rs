//! Types for CryptoMarket REST API responses

use cryptomkt_types::{ExchangeTime, Market, OrderSide, Pagination, Wallet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status string of a successful envelope
pub const STATUS_SUCCESS: &str = "success";

// ============================================================================
// Response Envelopes
// ============================================================================

/// Standard CryptoMarket response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// "success" or "error"
    pub status: String,
    /// Error message, when the exchange sends one
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint-specific payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Take the payload
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Envelope of a paginated endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResponse<T> {
    /// "success" or "error"
    pub status: String,
    /// Error message, when the exchange sends one
    #[serde(default)]
    pub message: Option<String>,
    /// Cursor block
    pub pagination: Pagination,
    /// Items of this page
    pub data: Vec<T>,
}

impl<T> PagedResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Check if another page follows this one
    pub fn has_next(&self) -> bool {
        self.pagination.has_next()
    }

    /// Take the items of this page
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

/// `market` response
pub type MarketResponse = ApiResponse<Vec<Market>>;
/// `ticker` response
pub type TickerResponse = ApiResponse<Vec<Ticker>>;
/// `book` response
pub type OrderBookResponse = PagedResponse<BookEntry>;
/// `trades` response
pub type TradesResponse = PagedResponse<Trade>;
/// `orders/active` and `orders/executed` response
pub type OrdersResponse = PagedResponse<Order>;
/// `orders/create`, `orders/status` and `orders/cancel` response
pub type OrderResponse = ApiResponse<Order>;
/// `balance` response
pub type BalanceResponse = ApiResponse<Vec<WalletBalance>>;
/// `orders/instant/get` response
pub type InstantQuoteResponse = ApiResponse<InstantQuote>;
/// `orders/instant/create` response; the acknowledgement is kept as raw JSON
pub type InstantOrderResponse = ApiResponse<serde_json::Value>;

// ============================================================================
// Market Data Types
// ============================================================================

/// 24h snapshot of a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Highest price
    pub high: Decimal,
    /// Traded volume
    pub volume: Decimal,
    /// Lowest price
    pub low: Decimal,
    /// Best ask
    pub ask: Decimal,
    /// Snapshot time
    pub timestamp: ExchangeTime,
    /// Best bid
    pub bid: Decimal,
    /// Last traded price
    pub last_price: Decimal,
    /// Market of the snapshot
    pub market: Market,
}

impl Ticker {
    /// Average of bid and ask
    pub fn mid_price(&self) -> Decimal {
        (self.ask + self.bid) / Decimal::TWO
    }

    /// Ask minus bid
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Spread in basis points of the mid price
    pub fn spread_bps(&self) -> Option<Decimal> {
        let mid = self.mid_price();
        if mid.is_zero() {
            return None;
        }
        Some(self.spread() / mid * Decimal::from(10000))
    }
}

/// One resting order in the book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    /// Placement time
    pub timestamp: ExchangeTime,
    /// Limit price
    pub price: Decimal,
    /// Remaining amount
    pub amount: Decimal,
}

impl BookEntry {
    /// Price times amount
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}

/// Public trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Side of the taker
    pub market_taker: OrderSide,
    /// Execution time
    pub timestamp: ExchangeTime,
    /// Execution price
    pub price: Decimal,
    /// Executed amount
    pub amount: Decimal,
    /// Market traded
    pub market: Market,
}

impl Trade {
    /// Price times amount
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}

// ============================================================================
// Order Types
// ============================================================================

/// Amount breakdown of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAmount {
    /// Amount requested
    pub original: Decimal,
    /// Amount still open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
    /// Amount filled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed: Option<Decimal>,
}

/// Limit order owned by the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Exchange status ("active", "executed", "cancelled", ...)
    pub status: String,
    /// Creation time
    pub created_at: ExchangeTime,
    /// Amount breakdown
    pub amount: OrderAmount,
    /// Price of the last execution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_price: Option<Decimal>,
    /// Average execution price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_execution_price: Option<Decimal>,
    /// Limit price
    pub price: Decimal,
    /// Buy or sell
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Order ID
    pub id: String,
    /// Market of the order
    pub market: Market,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<ExchangeTime>,
}

impl Order {
    /// Check if the order is still resting in the book
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Amount still open, falling back to the original amount
    pub fn remaining(&self) -> Decimal {
        self.amount.remaining.unwrap_or(self.amount.original)
    }

    /// Amount filled so far
    pub fn executed(&self) -> Decimal {
        self.amount.executed.unwrap_or(Decimal::ZERO)
    }

    /// Limit price times original amount
    pub fn notional(&self) -> Decimal {
        self.price * self.amount.original
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Balance of one wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    /// Free to trade or withdraw
    pub available: Decimal,
    /// Wallet currency
    pub wallet: Wallet,
    /// Total balance
    pub balance: Decimal,
}

impl WalletBalance {
    /// Balance locked in open orders
    pub fn held(&self) -> Decimal {
        self.balance - self.available
    }
}

/// Quote for an instant (market price) order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantQuote {
    /// Amount received
    pub obtained: Decimal,
    /// Amount paid
    pub required: Decimal,
}

impl InstantQuote {
    /// Effective price (required per obtained)
    pub fn rate(&self) -> Option<Decimal> {
        if self.obtained.is_zero() {
            return None;
        }
        Some(self.required / self.obtained)
    }
}
