/*
[INPUT]:  Socket base URL, credentials, topic and message callback
[OUTPUT]: One live subscription whose frames are forwarded to the callback
[POS]:    WebSocket layer - realtime connection manager
[UPDATE]: When adding new topics or changing connection logic
*/

use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use reqwest::Method;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::{Credentials, EMPTY_BODY};
use crate::config::{ClientConfig, endpoint_url};
use crate::http::{LcxError, Result, SignedRequest};

use super::message::{InboundMessage, decode_frame};
use super::state::{ConnectionState, StateCell};
use super::topic::Topic;

/// Path of the public socket
pub const PUBLIC_WS_PATH: &str = "/ws";
/// Path of the authenticated socket; also the path signed for its query string
pub const AUTH_WS_PATH: &str = "/api/auth/ws";

const OUTBOUND_CHANNEL_CAPACITY: usize = 16;
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// The socket currently owned by a [`LcxWebSocket`]
#[derive(Debug)]
struct ActiveConnection {
    topic: Topic,
    outbound_tx: mpsc::Sender<WsMessage>,
    task: JoinHandle<()>,
}

/// Realtime client holding at most one subscription.
///
/// Each `subscribe_*` call opens a fresh connection dedicated to a single
/// topic. A previous connection is closed before the new one is opened.
/// Dropping the client closes its connection.
#[derive(Debug)]
pub struct LcxWebSocket {
    ws_base_url: Url,
    credentials: Credentials,
    state: StateCell,
    connection: Option<ActiveConnection>,
}

impl LcxWebSocket {
    /// Public-only client for the production endpoint
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            ws_base_url: Url::parse(&config.base_urls.ws)?,
            credentials: config.credentials.clone(),
            state: StateCell::new(),
            connection: None,
        })
    }

    /// State of the current (or most recent) connection
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Receiver following the state of whichever connection the client holds.
    ///
    /// Stays valid across subscribe calls; each new connection restarts at
    /// `Idle` before moving on.
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state.watch()
    }

    /// Topic of the connection currently held, if any
    pub fn topic(&self) -> Option<&Topic> {
        self.connection.as_ref().map(|connection| &connection.topic)
    }

    pub async fn subscribe_ticker<F>(&mut self, on_message: F) -> Result<()>
    where
        F: FnMut(InboundMessage) + Send + 'static,
    {
        self.subscribe(Topic::Ticker, on_message).await
    }

    pub async fn subscribe_orderbook<F>(&mut self, pair: &str, on_message: F) -> Result<()>
    where
        F: FnMut(InboundMessage) + Send + 'static,
    {
        let topic = Topic::OrderBook {
            pair: pair.to_string(),
        };
        self.subscribe(topic, on_message).await
    }

    pub async fn subscribe_trade<F>(&mut self, pair: &str, on_message: F) -> Result<()>
    where
        F: FnMut(InboundMessage) + Send + 'static,
    {
        let topic = Topic::Trade {
            pair: pair.to_string(),
        };
        self.subscribe(topic, on_message).await
    }

    /// Wallet events of the account (requires credentials)
    pub async fn subscribe_wallets<F>(&mut self, on_message: F) -> Result<()>
    where
        F: FnMut(InboundMessage) + Send + 'static,
    {
        self.subscribe(Topic::UserWallets, on_message).await
    }

    /// Order events of the account (requires credentials)
    pub async fn subscribe_orders<F>(&mut self, on_message: F) -> Result<()>
    where
        F: FnMut(InboundMessage) + Send + 'static,
    {
        self.subscribe(Topic::UserOrders, on_message).await
    }

    /// Trade events of the account (requires credentials)
    pub async fn subscribe_trades<F>(&mut self, on_message: F) -> Result<()>
    where
        F: FnMut(InboundMessage) + Send + 'static,
    {
        self.subscribe(Topic::UserTrades, on_message).await
    }

    /// Open a connection for `topic` and send its subscribe message once open.
    ///
    /// Returns after the subscribe message has been queued. Every later frame,
    /// remote close and transport error is reported through `on_message`.
    pub async fn subscribe<F>(&mut self, topic: Topic, on_message: F) -> Result<()>
    where
        F: FnMut(InboundMessage) + Send + 'static,
    {
        let url = self.connection_url(&topic)?;

        self.close_active().await;

        let state = self.state.next_connection();
        state.advance(ConnectionState::Connecting);
        debug!(topic = %topic, private = topic.requires_auth(), "ws connecting");

        let ws_stream = match connect_async(url.as_str()).await {
            Ok((ws_stream, _response)) => ws_stream,
            Err(err) => {
                state.advance(ConnectionState::Errored);
                warn!(topic = %topic, error = %err, "ws connect failed");
                return Err(LcxError::WebSocket(err.to_string()));
            }
        };
        state.advance(ConnectionState::Open);

        let (write, read) = ws_stream.split();
        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_CHANNEL_CAPACITY);
        let task = tokio::spawn(run_connection(
            write,
            read,
            outbound_rx,
            state.clone(),
            on_message,
        ));

        let connection = ActiveConnection {
            topic,
            outbound_tx,
            task,
        };
        let sent = send_subscribe(&state, &connection).await;
        self.connection = Some(connection);
        sent?;

        state.advance(ConnectionState::Subscribed);
        Ok(())
    }

    /// Socket URL for `topic`; private topics carry signed query parameters
    fn connection_url(&self, topic: &Topic) -> Result<Url> {
        if !topic.requires_auth() {
            return endpoint_url(&self.ws_base_url, PUBLIC_WS_PATH);
        }

        let signed =
            SignedRequest::build(Method::GET, AUTH_WS_PATH, EMPTY_BODY, &self.credentials)?;
        let mut url = endpoint_url(&self.ws_base_url, AUTH_WS_PATH)?;
        url.query_pairs_mut().extend_pairs(signed.query_pairs());
        Ok(url)
    }

    /// Close the held connection, if any, without notifying its callback
    async fn close_active(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };
        debug!(topic = %connection.topic, "ws closing replaced connection");

        let ActiveConnection {
            outbound_tx, task, ..
        } = connection;
        drop(outbound_tx);

        let abort = task.abort_handle();
        if tokio::time::timeout(CLOSE_TIMEOUT, task).await.is_err() {
            warn!("ws close timed out; aborting connection task");
            abort.abort();
        }
    }
}

/// Queue the subscribe message; only valid while the connection is open
async fn send_subscribe(state: &StateCell, connection: &ActiveConnection) -> Result<()> {
    let topic = &connection.topic;
    if state.get() != ConnectionState::Open {
        return Err(LcxError::NotConnected {
            topic: topic.to_string(),
        });
    }

    let message = serde_json::to_string(&topic.subscribe_message())?;
    connection
        .outbound_tx
        .send(WsMessage::Text(message.into()))
        .await
        .map_err(|_| LcxError::NotConnected {
            topic: topic.to_string(),
        })?;

    match topic.pair() {
        Some(pair) => info!(topic = %topic, pair, "ws subscription sent"),
        None => info!(topic = %topic, "ws subscription sent"),
    }
    Ok(())
}

/// Pump one connection until it ends.
///
/// Outbound messages come from the owner; closing the owner's sender closes
/// the socket silently. Inbound frames, remote closes and transport errors go
/// to `on_message`, serially.
async fn run_connection<F>(
    mut write: SplitSink<WsStream, WsMessage>,
    mut read: SplitStream<WsStream>,
    mut outbound_rx: mpsc::Receiver<WsMessage>,
    state: StateCell,
    mut on_message: F,
) where
    F: FnMut(InboundMessage) + Send + 'static,
{
    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(message) => {
                        if let Err(err) = write.send(message).await {
                            state.advance(ConnectionState::Errored);
                            on_message(transport_error(err));
                            break;
                        }
                    }
                    None => {
                        let _ = write.send(WsMessage::Close(None)).await;
                        state.advance(ConnectionState::Closed);
                        break;
                    }
                }
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(WsMessage::Text(text))) => on_message(decode_frame(text.as_str())),
                    Some(Ok(WsMessage::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                        Ok(text) => on_message(decode_frame(text)),
                        Err(err) => on_message(InboundMessage::Error {
                            message: "Binary frame is not valid UTF-8".to_string(),
                            cause: LcxError::WebSocket(err.to_string()),
                        }),
                    },
                    Some(Ok(WsMessage::Close(frame))) => {
                        let (code, reason) = match frame {
                            Some(frame) => {
                                (Some(u16::from(frame.code)), frame.reason.as_str().to_string())
                            }
                            None => (None, String::new()),
                        };
                        let _ = write.close().await;
                        state.advance(ConnectionState::Closed);
                        debug!(?code, %reason, "ws closed by remote");
                        on_message(InboundMessage::Closed { code, reason });
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        state.advance(ConnectionState::Errored);
                        on_message(transport_error(err));
                        break;
                    }
                    None => {
                        state.advance(ConnectionState::Closed);
                        on_message(InboundMessage::Closed {
                            code: None,
                            reason: "connection ended".to_string(),
                        });
                        break;
                    }
                }
            }
        }
    }
}

fn transport_error(err: impl std::fmt::Display) -> InboundMessage {
    warn!(error = %err, "ws transport error");
    InboundMessage::Error {
        message: "WebSocket error".to_string(),
        cause: LcxError::WebSocket(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sign;
    use crate::config::BaseUrls;

    fn config(credentials: Credentials) -> ClientConfig {
        ClientConfig::default()
            .with_base_urls(BaseUrls {
                ws: "ws://127.0.0.1:9".to_string(),
                ..BaseUrls::default()
            })
            .with_credentials(credentials)
    }

    #[test]
    fn test_public_url() {
        let ws = LcxWebSocket::with_config(&config(Credentials::anonymous())).unwrap();
        let url = ws.connection_url(&Topic::Ticker).unwrap();
        assert_eq!(url.as_str(), "ws://127.0.0.1:9/ws");
    }

    #[test]
    fn test_private_url_carries_signed_query() {
        let ws = LcxWebSocket::with_config(&config(Credentials::new("key", "secret"))).unwrap();
        let url = ws.connection_url(&Topic::UserOrders).unwrap();

        assert_eq!(url.path(), AUTH_WS_PATH);
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["x-access-key"], "key");
        assert_eq!(pairs["x-access-sign"], sign("GET", AUTH_WS_PATH, "{}", "secret").unwrap());
        assert!(pairs["x-access-timestamp"].parse::<i64>().is_ok());
    }

    #[test]
    fn test_urls_keep_base_path_prefix() {
        let config = ClientConfig::default()
            .with_base_urls(BaseUrls {
                ws: "wss://stream.example.com/prefix".to_string(),
                ..BaseUrls::default()
            })
            .with_credentials(Credentials::new("key", "secret"));
        let ws = LcxWebSocket::with_config(&config).unwrap();

        let public = ws.connection_url(&Topic::Ticker).unwrap();
        assert_eq!(public.as_str(), "wss://stream.example.com/prefix/ws");

        let private = ws.connection_url(&Topic::UserTrades).unwrap();
        assert_eq!(private.path(), "/prefix/api/auth/ws");
        let pairs: std::collections::HashMap<_, _> = private.query_pairs().into_owned().collect();
        assert_eq!(pairs["x-access-sign"], sign("GET", AUTH_WS_PATH, "{}", "secret").unwrap());
    }

    #[test]
    fn test_private_url_requires_credentials() {
        let ws = LcxWebSocket::with_config(&config(Credentials::anonymous())).unwrap();
        let err = ws.connection_url(&Topic::UserWallets).unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_new_client_is_idle() {
        let ws = LcxWebSocket::new().unwrap();
        assert_eq!(ws.state(), ConnectionState::Idle);
        assert!(ws.topic().is_none());
    }
}
