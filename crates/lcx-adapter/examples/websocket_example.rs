/*
[INPUT]:  Pair identifier
[OUTPUT]: Real-time order book updates printed to stdout
[POS]:    Examples - WebSocket stream handling
[UPDATE]: When WebSocket API changes
*/

use lcx_adapter::*;
use tokio::time::{Duration, sleep};

/// Example: stream the order book for 30 seconds
#[tokio::main]
async fn main() {
    println!("=== LCX WebSocket Example ===\n");

    let mut ws = match LcxWebSocket::new() {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("Failed to create websocket client: {}", e);
            return;
        }
    };

    let result = ws
        .subscribe_orderbook("LCX/USDC", |message| match message {
            InboundMessage::Data(payload) => println!("data: {}", payload),
            InboundMessage::Status(text) => println!("status: {}", text),
            InboundMessage::Error { message, cause } => println!("error: {} ({})", message, cause),
            InboundMessage::Closed { code, reason } => {
                println!("closed: {:?} {}", code, reason)
            }
        })
        .await;

    if let Err(e) = result {
        eprintln!("✗ Subscribe failed: {}", e);
        return;
    }
    println!("✓ Subscribed ({})\n", ws.state());

    sleep(Duration::from_secs(30)).await;
    println!("\n✓ WebSocket example complete");
}
