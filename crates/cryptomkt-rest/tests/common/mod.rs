//! Common test utilities and fixtures for integration tests
//!
//! Contains sample JSON responses in the shapes served by CryptoMarket API v1

#![allow(dead_code)]

use cryptomkt_rest::{ClientConfig, Credentials, CryptoMktClient, MockTransport, RetryConfig};
use std::sync::{Arc, Once};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Pause used instead of the 2 s production delay
pub const TEST_RETRY_DELAY: Duration = Duration::from_millis(10);

pub const TEST_API_KEY: &str = "FeGgHqHvsnFpqKxk";
pub const TEST_SECRET: &str = "test_secret";

/// Sample `market` response
pub const MARKETS_RESPONSE: &str = r#"{
    "status": "success",
    "data": ["ETHCLP", "ETHARS", "ETHEUR", "ETHBRL", "BTCCLP", "XLMCLP"]
}"#;

/// Sample `ticker` response
pub const TICKER_RESPONSE: &str = r#"{
    "status": "success",
    "data": [{
        "high": "214000",
        "volume": "0.7",
        "low": "210000",
        "ask": "214000",
        "timestamp": "2017-08-29T13:12:08.102223",
        "bid": "212000",
        "last_price": "212000",
        "market": "ETHCLP"
    }]
}"#;

/// Sample `book` response; the previous cursor uses the "null" string sentinel
pub const BOOK_RESPONSE: &str = r#"{
    "status": "success",
    "pagination": {"previous": "null", "limit": 100, "page": 0, "next": "1"},
    "data": [
        {"timestamp": "2017-08-29T13:12:08.102223", "price": "59000", "amount": "3.2"},
        {"timestamp": "Aug 29 13:12:09.000000", "price": "58500", "amount": "0.15"}
    ]
}"#;

/// Sample `trades` response
pub const TRADES_RESPONSE: &str = r#"{
    "status": "success",
    "pagination": {"previous": 0, "limit": 100, "page": 1, "next": "null"},
    "data": [{
        "market_taker": "sell",
        "timestamp": "2017-08-31T14:28:54.914",
        "price": "212000",
        "amount": "0.05",
        "market": "ETHCLP"
    }]
}"#;

/// Sample `orders/active` response
pub const ACTIVE_ORDERS_RESPONSE: &str = r#"{
    "status": "success",
    "pagination": {"previous": "null", "limit": 100, "page": 0, "next": "null"},
    "data": [{
        "status": "active",
        "created_at": "2017-09-01T14:01:35.834",
        "amount": {"original": "1.5", "remaining": "1.5"},
        "price": "2000",
        "type": "buy",
        "id": "M103975",
        "market": "ETHCLP",
        "updated_at": "2017-09-01T14:01:35.834"
    }]
}"#;

/// Sample `orders/create` response
pub const CREATE_ORDER_RESPONSE: &str = r#"{
    "status": "success",
    "data": {
        "status": "active",
        "created_at": "2017-09-01T19:35:26.641",
        "amount": {"original": "0.5", "remaining": "0.5", "executed": "0"},
        "price": "210000",
        "type": "buy",
        "id": "M107441",
        "market": "ETHCLP"
    }
}"#;

/// Sample `orders/status` response for a filled order
pub const EXECUTED_ORDER_RESPONSE: &str = r#"{
    "status": "success",
    "data": {
        "status": "executed",
        "created_at": "2017-09-01T19:35:26.641",
        "amount": {"original": "0.5", "remaining": "0", "executed": "0.5"},
        "execution_price": "209000",
        "avg_execution_price": "209500",
        "price": "210000",
        "type": "buy",
        "id": "M107441",
        "market": "ETHCLP",
        "updated_at": "2017-09-01T19:40:02.117"
    }
}"#;

/// Sample `balance` response; "USD" is not a known wallet
pub const BALANCE_RESPONSE: &str = r#"{
    "status": "success",
    "data": [
        {"available": "120347", "wallet": "CLP", "balance": "120347"},
        {"available": "10.3399", "wallet": "ETH", "balance": "11.3399"},
        {"available": "5", "wallet": "USD", "balance": "5"}
    ]
}"#;

/// Sample `orders/instant/get` response
pub const INSTANT_QUOTE_RESPONSE: &str = r#"{
    "status": "success",
    "data": {"obtained": "0.0199", "required": "4200"}
}"#;

/// Sample `orders/instant/create` response
pub const INSTANT_CREATE_RESPONSE: &str = r#"{
    "status": "success",
    "data": "orden creada"
}"#;

static TRACING: Once = Once::new();

/// Route client logs to the test harness; filter with `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET).unwrap()
}

/// Client over a fresh mock transport, with a short retry pause
pub fn mock_client(credentials: Option<Credentials>) -> (CryptoMktClient, Arc<MockTransport>) {
    init_tracing();
    let mock = Arc::new(MockTransport::new());
    let mut config = ClientConfig::new().with_retry(RetryConfig::new().with_delay(TEST_RETRY_DELAY));
    config.credentials = credentials;

    let client = CryptoMktClient::with_transport(config, mock.clone());
    (client, mock)
}

/// Authenticated client over a fresh mock transport
pub fn authed_client() -> (CryptoMktClient, Arc<MockTransport>) {
    mock_client(Some(test_credentials()))
}
