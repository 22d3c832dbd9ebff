//! Demo 1: Market Snapshot
//!
//! Showcases: public endpoints, lenient decoding, pagination cursors
//!
//! Run: cargo run --bin market_snapshot [MARKET]

use chrono::{Duration as ChronoDuration, Utc};
use colored::*;
use cryptomkt_rest::{CryptoMktClient, Market, OrderSide};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market: Market = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => Market::EthClp,
    };

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MARKET SNAPSHOT".cyan().bold());
    println!("{}", format!("  CryptoMarket REST - {}", market).cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CryptoMktClient::new()?;

    let markets = client.markets().await?;
    let listed: Vec<String> = markets.data.iter().map(|m| m.to_string()).collect();
    println!("{} {} markets: {}", "✓".green(), listed.len(), listed.join(", "));

    let ticker = client.ticker(market).await?;
    for t in &ticker.data {
        println!();
        println!("  {} {}", "TICKER".yellow().bold(), t.market);
        println!("  {} {}  {} {}", "BID:".yellow(), t.bid, "ASK:".yellow(), t.ask);
        println!("  {} {}  {} {}", "LOW:".dimmed(), t.low, "HIGH:".dimmed(), t.high);
        println!("  {} {}  {} {}", "LAST:".green(), t.last_price, "VOLUME:".dimmed(), t.volume);
        if let Some(bps) = t.spread_bps() {
            println!("  {} {:.2} bps", "SPREAD:".green(), bps);
        }
    }

    for side in [OrderSide::Buy, OrderSide::Sell] {
        let book = client.book(market, side, 0).await?;
        println!();
        println!(
            "  {} {} ({} entries, next page {})",
            "BOOK".yellow().bold(),
            side,
            book.data.len(),
            book.pagination.next
        );
        for entry in book.data.iter().take(5) {
            println!("    {:>16} x {:<12} {}", entry.price, entry.amount, entry.timestamp);
        }
    }

    let today = Utc::now().date_naive();
    let trades = client
        .trades(market, Some(today - ChronoDuration::days(1)), Some(today), 0)
        .await?;
    println!();
    println!("  {} last 24h: {}", "TRADES".yellow().bold(), trades.data.len());
    for trade in trades.data.iter().take(5) {
        let side = match trade.market_taker {
            OrderSide::Buy => "buy ".green(),
            OrderSide::Sell => "sell".red(),
        };
        println!("    {} {:>16} x {:<12} {}", side, trade.price, trade.amount, trade.timestamp);
    }

    Ok(())
}
