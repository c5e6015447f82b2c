/*
[INPUT]:  LCX_API_KEY / LCX_SECRET_KEY environment variables
[OUTPUT]: Balances and open orders of the account
[POS]:    Examples - authenticated account queries
[UPDATE]: When trading or account endpoints change
*/

use lcx_adapter::*;

/// Example: authenticated calls
///
/// Without credentials every call below fails fast with an authentication
/// error and never reaches the network.
#[tokio::main]
async fn main() {
    println!("=== LCX Trading Example ===\n");

    let credentials = Credentials::from_env();
    if !credentials.is_complete() {
        println!("LCX_API_KEY / LCX_SECRET_KEY not set; calls will be rejected locally\n");
    }

    let config = ClientConfig::default().with_credentials(credentials);
    let client = match LcxClient::with_config(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.balances().await {
        Ok(balances) => println!("✓ Balances: {}", balances),
        Err(e) => println!("✗ Error: {}", e),
    }

    let open = OpenOrdersPayload {
        offset: 1,
        ..Default::default()
    };
    match client.open_orders(&open).await {
        Ok(orders) => println!("✓ Open orders: {}", orders),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
