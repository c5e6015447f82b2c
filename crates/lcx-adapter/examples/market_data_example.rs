/*
[INPUT]:  Pair identifier (e.g., "LCX/USDC")
[OUTPUT]: Market data (ticker, order book, recent trades)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use lcx_adapter::*;

/// Example: Query market data (no authentication required)
#[tokio::main]
async fn main() {
    println!("=== LCX Market Data Example ===\n");

    let client = match LcxClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no auth required for public endpoints)\n");

    let pair = "LCX/USDC".to_string();

    println!("Querying ticker for {}...", pair);
    match client
        .market_ticker(&MarketTickerPayload { pair: pair.clone() })
        .await
    {
        Ok(ticker) => println!("✓ Ticker: {}", ticker),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying order book for {}...", pair);
    match client.order_book(&OrderBookPayload { pair: pair.clone() }).await {
        Ok(book) => println!("✓ Order book: {}", book),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying recent trades for {}...", pair);
    match client.market_trades(&TradesPayload { pair, offset: 1 }).await {
        Ok(trades) => println!("✓ Trades: {}", trades),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
