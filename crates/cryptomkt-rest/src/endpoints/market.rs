//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use chrono::NaiveDate;
use cryptomkt_types::{Market, OrderSide};
use tracing::{debug, instrument};

use super::DEFAULT_PAGE_LIMIT;
use crate::error::RestResult;
use crate::executor::{EndpointCall, RequestExecutor};
use crate::types::{MarketResponse, OrderBookResponse, TickerResponse, TradesResponse};

/// Date layout of the `start`/`end` trade filters
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// List tradeable markets
    #[instrument(skip(self))]
    pub async fn markets(&self) -> RestResult<MarketResponse> {
        debug!("Fetching markets");
        self.executor
            .fetch(&EndpointCall::public_get("market"), None)
            .await
    }

    /// Get the ticker of a market
    #[instrument(skip(self))]
    pub async fn ticker(&self, market: Market) -> RestResult<TickerResponse> {
        debug!("Fetching ticker for {}", market);
        let call = EndpointCall::public_get("ticker").param("market", market);
        self.executor.fetch(&call, None).await
    }

    /// Get one page of one side of the order book
    ///
    /// # Arguments
    /// * `market` - Market to query
    /// * `side` - Book side (buy or sell orders)
    /// * `page` - Zero-based page number
    #[instrument(skip(self))]
    pub async fn book(&self, market: Market, side: OrderSide, page: u32) -> RestResult<OrderBookResponse> {
        debug!("Fetching {} book for {} page {}", side, market, page);
        let call = EndpointCall::public_get("book")
            .param("market", market)
            .param("type", side)
            .param("page", page)
            .param("limit", DEFAULT_PAGE_LIMIT);
        self.executor.fetch(&call, None).await
    }

    /// Get one page of buy orders
    pub async fn buy_book(&self, market: Market, page: u32) -> RestResult<OrderBookResponse> {
        self.book(market, OrderSide::Buy, page).await
    }

    /// Get one page of sell orders
    pub async fn sell_book(&self, market: Market, page: u32) -> RestResult<OrderBookResponse> {
        self.book(market, OrderSide::Sell, page).await
    }

    /// Get one page of public trades
    ///
    /// # Arguments
    /// * `market` - Market to query
    /// * `start` - First day to include (optional)
    /// * `end` - Last day to include (optional)
    /// * `page` - Zero-based page number
    #[instrument(skip(self))]
    pub async fn trades(
        &self,
        market: Market,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        page: u32,
    ) -> RestResult<TradesResponse> {
        debug!("Fetching trades for {} page {}", market, page);
        let call = EndpointCall::public_get("trades")
            .param("market", market)
            .opt_param("start", start.map(|d| d.format(DATE_FORMAT)))
            .opt_param("end", end.map(|d| d.format(DATE_FORMAT)))
            .param("page", page)
            .param("limit", DEFAULT_PAGE_LIMIT);
        self.executor.fetch(&call, None).await
    }
}
