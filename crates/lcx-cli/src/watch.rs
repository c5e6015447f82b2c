/*
[INPUT]:  Topic selection, WebSocket client and shutdown token
[OUTPUT]: One JSON line per inbound message written to the output
[POS]:    Streaming layer - `lcx watch` subcommand
[UPDATE]: When adding topics or changing the output format
*/

use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use lcx_adapter::{InboundMessage, LcxWebSocket, Topic};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Topic names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WatchTopic {
    Ticker,
    Orderbook,
    Trade,
    Wallets,
    Orders,
    Trades,
}

impl WatchTopic {
    /// Resolve to an adapter topic; book and trade topics need a pair
    pub fn into_topic(self, pair: Option<&str>) -> Result<Topic> {
        let pair_for = |name: &str| -> Result<String> {
            match pair {
                Some(pair) if !pair.is_empty() => Ok(pair.to_string()),
                _ => bail!("--pair is required for the {name} topic"),
            }
        };

        Ok(match self {
            WatchTopic::Ticker => Topic::Ticker,
            WatchTopic::Orderbook => Topic::OrderBook {
                pair: pair_for("orderbook")?,
            },
            WatchTopic::Trade => Topic::Trade {
                pair: pair_for("trade")?,
            },
            WatchTopic::Wallets => Topic::UserWallets,
            WatchTopic::Orders => Topic::UserOrders,
            WatchTopic::Trades => Topic::UserTrades,
        })
    }
}

/// Subscribe to `topic` and print messages until the socket ends or `shutdown` fires
pub async fn watch_topic<W: Write>(
    ws: &mut LcxWebSocket,
    topic: Topic,
    shutdown: &CancellationToken,
    out: &mut W,
) -> Result<usize> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    ws.subscribe(topic.clone(), move |message| {
        let _ = tx.send(message);
    })
    .await
    .with_context(|| format!("subscribe to {topic}"))?;
    info!(topic = %topic, "subscribed");

    forward_messages(&mut rx, shutdown, out).await
}

/// Write each received message as a JSON line; returns how many were written.
///
/// Stops after a terminal message, when the channel closes, or on shutdown.
pub async fn forward_messages<W: Write>(
    rx: &mut mpsc::UnboundedReceiver<InboundMessage>,
    shutdown: &CancellationToken,
    out: &mut W,
) -> Result<usize> {
    let mut written = 0;
    loop {
        let message = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("watch cancelled");
                break;
            }
            message = rx.recv() => match message {
                Some(message) => message,
                None => break,
            },
        };

        writeln!(out, "{}", message.to_json()).context("write message")?;
        out.flush().context("flush output")?;
        written += 1;

        if message.is_terminal() {
            info!("connection ended");
            break;
        }
    }
    Ok(written)
}
