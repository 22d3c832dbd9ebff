//! Integration tests for the CryptoMarket REST client
//!
//! Drives every endpoint through the mock transport and checks the request
//! that went out as well as the decoded response.

mod common;

use chrono::NaiveDate;
use common::*;
use cryptomkt_auth::{HEADER_API_KEY, HEADER_SIGNATURE, HEADER_TIMESTAMP};
use cryptomkt_rest::{ErrorKind, HttpRequest, Market, OrderSide, RestError, Wallet};
use reqwest::Method;
use rust_decimal_macros::dec;

fn query(request: &HttpRequest) -> Vec<(String, String)> {
    request.url.query_pairs().into_owned().collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Recompute the signature from the headers that were sent
fn assert_signed(request: &HttpRequest, path: &str, form_values: &[&str]) {
    let timestamp: i64 = request
        .header(HEADER_TIMESTAMP)
        .expect("timestamp header")
        .parse()
        .expect("decimal timestamp");

    assert_eq!(request.header(HEADER_API_KEY), Some(TEST_API_KEY));
    assert_eq!(
        request.header(HEADER_SIGNATURE),
        Some(
            test_credentials()
                .sign(timestamp, path, form_values.iter().copied())
                .as_str()
        )
    );
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_markets() {
    let (client, mock) = mock_client(None);
    mock.push_json(MARKETS_RESPONSE);

    let response = client.markets().await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.data.len(), 6);
    assert_eq!(response.data[0], Market::EthClp);
    assert_eq!(response.data[4], Market::BtcClp);

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url.as_str(), "https://api.cryptomkt.com/v1/market");
    assert!(request.headers.is_empty());
}

#[tokio::test]
async fn test_ticker() {
    let (client, mock) = mock_client(None);
    mock.push_json(TICKER_RESPONSE);

    let response = client.ticker(Market::EthClp).await.unwrap();
    let ticker = &response.data[0];

    assert_eq!(ticker.market, Market::EthClp);
    assert_eq!(ticker.ask, dec!(214000));
    assert_eq!(ticker.bid, dec!(212000));
    assert_eq!(ticker.last_price, dec!(212000));
    assert_eq!(ticker.volume, dec!(0.7));

    let request = mock.last_request().unwrap();
    assert_eq!(query(&request), pairs(&[("market", "ETHCLP")]));
}

#[tokio::test]
async fn test_book_query_and_cursors() {
    let (client, mock) = mock_client(None);
    mock.push_json(BOOK_RESPONSE);

    let response = client.sell_book(Market::BtcClp, 0).await.unwrap();

    assert_eq!(response.pagination.previous.get(), 0);
    assert_eq!(response.pagination.next.get(), 1);
    assert_eq!(response.pagination.limit, 100);
    assert!(response.has_next());
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[1].price, dec!(58500));

    let request = mock.last_request().unwrap();
    assert_eq!(request.url.path(), "/v1/book");
    assert_eq!(
        query(&request),
        pairs(&[
            ("market", "BTCCLP"),
            ("type", "sell"),
            ("page", "0"),
            ("limit", "100"),
        ])
    );
}

#[tokio::test]
async fn test_buy_book_side() {
    let (client, mock) = mock_client(None);
    mock.push_json(BOOK_RESPONSE);

    client.market().buy_book(Market::EthArs, 3).await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(
        query(&request),
        pairs(&[
            ("market", "ETHARS"),
            ("type", "buy"),
            ("page", "3"),
            ("limit", "100"),
        ])
    );
}

#[tokio::test]
async fn test_trades_with_dates() {
    let (client, mock) = mock_client(None);
    mock.push_json(TRADES_RESPONSE);

    let start = NaiveDate::from_ymd_opt(2017, 8, 1);
    let end = NaiveDate::from_ymd_opt(2017, 8, 31);
    let response = client.trades(Market::EthClp, start, end, 1).await.unwrap();

    let trade = &response.data[0];
    assert_eq!(trade.market_taker, OrderSide::Sell);
    assert_eq!(trade.notional(), dec!(10600));
    assert!(!response.has_next());

    let request = mock.last_request().unwrap();
    assert_eq!(
        query(&request),
        pairs(&[
            ("market", "ETHCLP"),
            ("start", "2017-08-01"),
            ("end", "2017-08-31"),
            ("page", "1"),
            ("limit", "100"),
        ])
    );
}

#[tokio::test]
async fn test_trades_without_dates() {
    let (client, mock) = mock_client(None);
    mock.push_json(TRADES_RESPONSE);

    client.trades(Market::EthClp, None, None, 0).await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(
        query(&request),
        pairs(&[("market", "ETHCLP"), ("page", "0"), ("limit", "100")])
    );
}

// =============================================================================
// Private Endpoints
// =============================================================================

#[tokio::test]
async fn test_active_orders_signed_get() {
    let (client, mock) = authed_client();
    mock.push_json(ACTIVE_ORDERS_RESPONSE);

    let response = client.active_orders(Market::EthClp, 0).await.unwrap();
    let order = &response.data[0];

    assert_eq!(order.id, "M103975");
    assert_eq!(order.side, OrderSide::Buy);
    assert!(order.is_active());
    assert!(order.updated_at.is_some());

    let request = mock.last_request().unwrap();
    assert_eq!(request.url.path(), "/v1/orders/active");
    assert_eq!(
        query(&request),
        pairs(&[("market", "ETHCLP"), ("page", "0"), ("limit", "100")])
    );
    assert!(request.body.is_none());
    assert_signed(&request, "orders/active", &[]);
}

#[tokio::test]
async fn test_executed_orders_path() {
    let (client, mock) = authed_client();
    mock.push_json(ACTIVE_ORDERS_RESPONSE);

    client.executed_orders(Market::XlmClp, 2).await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.url.path(), "/v1/orders/executed");
    assert_signed(&request, "orders/executed", &[]);
}

#[tokio::test]
async fn test_create_order_form_and_signature() {
    let (client, mock) = authed_client();
    mock.push_json(CREATE_ORDER_RESPONSE);

    let response = client
        .create_order(Market::EthClp, dec!(0.5), dec!(210000), OrderSide::Buy)
        .await
        .unwrap();

    assert_eq!(response.data.id, "M107441");
    assert_eq!(response.data.amount.original, dec!(0.5));

    let request = mock.last_request().unwrap();
    let body = "amount=0.5000&market=ETHCLP&price=210000.0000&type=buy";
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url.as_str(), "https://api.cryptomkt.com/v1/orders/create");
    assert_eq!(request.body.as_deref(), Some(body));
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.header("Content-Length"), Some("54"));
    assert_signed(
        &request,
        "orders/create",
        &["0.5000", "ETHCLP", "210000.0000", "buy"],
    );
}

#[tokio::test]
async fn test_create_order_rejects_non_positive_amount() {
    let (client, mock) = authed_client();

    let err = client
        .create_order(Market::EthClp, dec!(0), dec!(210000), OrderSide::Sell)
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert_eq!(mock.attempts(), 0);
}

#[tokio::test]
async fn test_create_order_rounds_to_four_decimals() {
    let (client, mock) = authed_client();
    mock.push_json(CREATE_ORDER_RESPONSE);

    client
        .create_order(Market::EthClp, dec!(0.12345), dec!(0.99999), OrderSide::Buy)
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(
        request.body.as_deref(),
        Some("amount=0.1235&market=ETHCLP&price=1.0000&type=buy")
    );
    assert_signed(&request, "orders/create", &["0.1235", "ETHCLP", "1.0000", "buy"]);
}

#[tokio::test]
async fn test_amount_rounding_to_zero_is_rejected() {
    let (client, mock) = authed_client();

    let err = client
        .create_instant_order(Market::EthClp, OrderSide::Buy, dec!(0.00004))
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert_eq!(mock.attempts(), 0);
}

#[tokio::test]
async fn test_order_status() {
    let (client, mock) = authed_client();
    mock.push_json(EXECUTED_ORDER_RESPONSE);

    let response = client.order_status("M107441").await.unwrap();
    let order = response.data;

    assert!(!order.is_active());
    assert_eq!(order.executed(), dec!(0.5));
    assert_eq!(order.remaining(), dec!(0));
    assert_eq!(order.avg_execution_price, Some(dec!(209500)));

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, Method::GET);
    assert_eq!(query(&request), pairs(&[("id", "M107441")]));
    assert_signed(&request, "orders/status", &[]);
}

#[tokio::test]
async fn test_cancel_order() {
    let (client, mock) = authed_client();
    mock.push_json(CREATE_ORDER_RESPONSE);

    client.orders().unwrap().cancel_order("M107441").await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.body.as_deref(), Some("id=M107441"));
    assert_signed(&request, "orders/cancel", &["M107441"]);
}

#[tokio::test]
async fn test_balance_unknown_wallet_falls_back() {
    let (client, mock) = authed_client();
    mock.push_json(BALANCE_RESPONSE);

    let response = client.account().unwrap().balance().await.unwrap();

    assert_eq!(response.data.len(), 3);
    assert_eq!(response.data[0].wallet, Wallet::Clp);
    assert_eq!(response.data[1].held(), dec!(1));
    // Unknown wire string decodes to the zero value
    assert_eq!(response.data[2].wallet, Wallet::default());

    assert_signed(&mock.last_request().unwrap(), "balance", &[]);
}

#[tokio::test]
async fn test_instant_quote() {
    let (client, mock) = authed_client();
    mock.push_json(INSTANT_QUOTE_RESPONSE);

    let response = client
        .instant_quote(Market::EthClp, OrderSide::Buy, dec!(4200))
        .await
        .unwrap();
    assert_eq!(response.data.obtained, dec!(0.0199));

    let request = mock.last_request().unwrap();
    assert_eq!(request.url.path(), "/v1/orders/instant/get");
    assert_eq!(
        query(&request),
        pairs(&[("market", "ETHCLP"), ("type", "buy"), ("amount", "4200.0000")])
    );
    assert_signed(&request, "orders/instant/get", &[]);
}

#[tokio::test]
async fn test_create_instant_order() {
    let (client, mock) = authed_client();
    mock.push_json(INSTANT_CREATE_RESPONSE);

    let response = client
        .create_instant_order(Market::EthClp, OrderSide::Sell, dec!(0.02))
        .await
        .unwrap();
    assert_eq!(response.data, serde_json::json!("orden creada"));

    let request = mock.last_request().unwrap();
    assert_eq!(request.body.as_deref(), Some("market=ETHCLP&type=sell&amount=0.0200"));
    assert_signed(&request, "orders/instant/create", &["ETHCLP", "sell", "0.0200"]);
}

// =============================================================================
// Transport Loop
// =============================================================================

#[tokio::test]
async fn test_recovers_after_two_failures() {
    let (client, mock) = mock_client(None);
    mock.push_status(500);
    mock.push_request_failure("connection reset by peer");
    mock.push_json(MARKETS_RESPONSE);

    let response = client.markets().await.unwrap();
    assert!(response.is_success());
    assert_eq!(mock.attempts(), 3);

    let times = mock.request_times();
    assert!(times[1] - times[0] >= TEST_RETRY_DELAY);
    assert!(times[2] - times[1] >= TEST_RETRY_DELAY);
}

#[tokio::test]
async fn test_always_failing_endpoint() {
    let (client, mock) = authed_client();
    for _ in 0..8 {
        mock.push_status(502);
    }

    let err = client.balance().await.unwrap_err();

    assert_eq!(mock.attempts(), 5);
    assert_eq!(err.kind(), ErrorKind::Status);
    assert!(err.is_retryable());
    assert_eq!(err.attempts(), Some(5));
}

#[tokio::test]
async fn test_malformed_payload_not_retried() {
    let (client, mock) = mock_client(None);
    mock.push_json(r#"{"status": "success", "data": [{"high": "x"}]}"#);
    mock.push_json(TICKER_RESPONSE);

    let err = client.ticker(Market::EthClp).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(!err.is_retryable());
    assert_eq!(mock.attempts(), 1);
}

#[tokio::test]
async fn test_private_endpoints_need_credentials() {
    let (client, mock) = mock_client(None);

    assert!(matches!(client.balance().await, Err(RestError::AuthRequired)));
    assert!(matches!(
        client.active_orders(Market::EthClp, 0).await,
        Err(RestError::AuthRequired)
    ));
    assert_eq!(mock.attempts(), 0);
}
