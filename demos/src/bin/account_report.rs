//! Demo 2: Account Report
//!
//! Showcases: signed requests, balances, active orders, instant quotes
//!
//! Requires CRYPTOMKT_API_KEY and CRYPTOMKT_API_SECRET.
//!
//! Run: cargo run --bin account_report

use colored::*;
use cryptomkt_rest::{CryptoMktClient, Market, OrderSide};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT REPORT".cyan().bold());
    println!("{}", "  CryptoMarket REST - private endpoints".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CryptoMktClient::from_env()?;
    println!("{} Loaded credentials from environment", "✓".green());

    let balance = client.balance().await?;
    println!();
    println!("  {}", "WALLETS".yellow().bold());
    for wallet in &balance.data {
        println!(
            "    {:<4} {:>18} available  {:>18} held",
            wallet.wallet,
            wallet.available,
            wallet.held()
        );
    }

    println!();
    println!("  {}", "ACTIVE ORDERS".yellow().bold());
    let mut total = 0usize;
    for market in Market::all() {
        let mut page = 0;
        loop {
            let orders = client.active_orders(*market, page).await?;
            for order in &orders.data {
                total += 1;
                println!(
                    "    {} {:<6} {:<4} {:>12} @ {:<12} remaining {}",
                    order.id,
                    order.market,
                    order.side,
                    order.amount.original,
                    order.price,
                    order.remaining()
                );
            }
            if !orders.has_next() {
                break;
            }
            page += 1;
        }
    }
    if total == 0 {
        println!("    {}", "none".dimmed());
    }

    let amount = Decimal::new(10000, 0);
    let quote = client.instant_quote(Market::EthClp, OrderSide::Buy, amount).await?;
    println!();
    println!("  {}", "INSTANT QUOTE".yellow().bold());
    println!(
        "    {} CLP buys {} ETH (rate {})",
        quote.data.required,
        quote.data.obtained,
        quote
            .data
            .rate()
            .map(|r| r.round_dp(2).to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );

    Ok(())
}
