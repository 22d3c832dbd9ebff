//! Private order endpoints
//!
//! All endpoints here are signed.

use cryptomkt_auth::Credentials;
use cryptomkt_types::{Market, OrderSide};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info, instrument};

use super::DEFAULT_PAGE_LIMIT;
use crate::error::{RestError, RestResult};
use crate::executor::{EndpointCall, RequestExecutor};
use crate::types::{InstantOrderResponse, InstantQuoteResponse, OrderResponse, OrdersResponse};

/// Order endpoints (requires authentication)
pub struct OrderEndpoints<'a> {
    executor: &'a RequestExecutor,
    credentials: &'a Credentials,
}

impl<'a> OrderEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor, credentials: &'a Credentials) -> Self {
        Self {
            executor,
            credentials,
        }
    }

    /// Get one page of resting orders
    #[instrument(skip(self))]
    pub async fn active_orders(&self, market: Market, page: u32) -> RestResult<OrdersResponse> {
        debug!("Fetching active orders for {} page {}", market, page);
        let call = paged("orders/active", market, page);
        self.executor.fetch(&call, Some(self.credentials)).await
    }

    /// Get one page of executed orders
    #[instrument(skip(self))]
    pub async fn executed_orders(&self, market: Market, page: u32) -> RestResult<OrdersResponse> {
        debug!("Fetching executed orders for {} page {}", market, page);
        let call = paged("orders/executed", market, page);
        self.executor.fetch(&call, Some(self.credentials)).await
    }

    /// Get the current state of an order
    #[instrument(skip(self))]
    pub async fn order_status(&self, id: &str) -> RestResult<OrderResponse> {
        debug!("Fetching status of order {}", id);
        let call = EndpointCall::private_get("orders/status").param("id", id);
        self.executor.fetch(&call, Some(self.credentials)).await
    }

    /// Place a limit order
    ///
    /// # Arguments
    /// * `market` - Market to trade
    /// * `amount` - Amount of the asset, sent with 4 decimals
    /// * `price` - Limit price, sent with 4 decimals
    /// * `side` - Buy or sell
    #[instrument(skip(self))]
    pub async fn create_order(
        &self,
        market: Market,
        amount: Decimal,
        price: Decimal,
        side: OrderSide,
    ) -> RestResult<OrderResponse> {
        let amount = wire_amount("amount", amount)?;
        let price = wire_amount("price", price)?;

        info!("Placing {} order on {}: {} @ {}", side, market, amount, price);
        let call = EndpointCall::post("orders/create")
            .param("amount", amount)
            .param("market", market)
            .param("price", price)
            .param("type", side);
        self.executor.fetch(&call, Some(self.credentials)).await
    }

    /// Cancel a resting order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> RestResult<OrderResponse> {
        info!("Cancelling order {}", id);
        let call = EndpointCall::post("orders/cancel").param("id", id);
        self.executor.fetch(&call, Some(self.credentials)).await
    }

    /// Quote an instant order at the prevailing price
    #[instrument(skip(self))]
    pub async fn instant_quote(
        &self,
        market: Market,
        side: OrderSide,
        amount: Decimal,
    ) -> RestResult<InstantQuoteResponse> {
        let amount = wire_amount("amount", amount)?;

        debug!("Quoting instant {} of {} on {}", side, amount, market);
        let call = EndpointCall::private_get("orders/instant/get")
            .param("market", market)
            .param("type", side)
            .param("amount", amount);
        self.executor.fetch(&call, Some(self.credentials)).await
    }

    /// Execute an instant order at the prevailing price
    #[instrument(skip(self))]
    pub async fn create_instant_order(
        &self,
        market: Market,
        side: OrderSide,
        amount: Decimal,
    ) -> RestResult<InstantOrderResponse> {
        let amount = wire_amount("amount", amount)?;

        info!("Placing instant {} of {} on {}", side, amount, market);
        let call = EndpointCall::post("orders/instant/create")
            .param("market", market)
            .param("type", side)
            .param("amount", amount);
        self.executor.fetch(&call, Some(self.credentials)).await
    }
}

fn paged(path: &'static str, market: Market, page: u32) -> EndpointCall {
    EndpointCall::private_get(path)
        .param("market", market)
        .param("page", page)
        .param("limit", DEFAULT_PAGE_LIMIT)
}

/// Fractional digits sent for amounts and prices
const WIRE_DECIMALS: u32 = 4;

/// Round half away from zero and format with exactly 4 fractional digits
fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(WIRE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.4}", rounded)
}

/// Wire form of an amount or price; must stay positive after rounding
fn wire_amount(name: &str, value: Decimal) -> RestResult<String> {
    let rounded = value.round_dp_with_strategy(WIRE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return Err(RestError::InvalidParameter(format!(
            "{} must be positive at {} decimals, got {}",
            name, WIRE_DECIMALS, value
        )));
    }
    Ok(format_amount(rounded))
}
