/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for lcx-adapter tests

#![allow(dead_code)]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use lcx_adapter::{BaseUrls, ClientConfig, Credentials, LcxClient};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_SECRET_KEY: &str = "test-secret-key";

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET_KEY)
}

/// Client configuration pointing every base URL at local test servers
pub fn test_config(http_uri: &str, ws_uri: &str, credentials: Credentials) -> ClientConfig {
    ClientConfig::default()
        .with_base_urls(BaseUrls {
            exchange: http_uri.to_string(),
            kline: http_uri.to_string(),
            ws: ws_uri.to_string(),
        })
        .with_credentials(credentials)
}

pub fn client_for(server: &MockServer, credentials: Credentials) -> LcxClient {
    LcxClient::with_config(test_config(&server.uri(), "ws://127.0.0.1:9", credentials))
        .expect("client init")
}

/// What the scripted socket server observed, tagged with the connection index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Connected { conn: usize, uri: String },
    Received { conn: usize, text: String },
    ClosedByClient { conn: usize },
}

pub struct WsTestServer {
    pub url: String,
    pub events: mpsc::UnboundedReceiver<ServerEvent>,
}

impl WsTestServer {
    pub async fn next_event(&mut self) -> ServerEvent {
        tokio::time::timeout(EVENT_TIMEOUT, self.events.recv())
            .await
            .expect("timed out waiting for server event")
            .expect("server event channel closed")
    }
}

/// Socket server that, on every connection, waits for the first client
/// message and then replays `script`.
pub async fn spawn_ws_server(script: Vec<Message>) -> WsTestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (events_tx, events) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut conn = 0;
        while let Ok((stream, _peer)) = listener.accept().await {
            let events_tx = events_tx.clone();
            let script = script.clone();
            let handshake_tx = events_tx.clone();
            tokio::spawn(async move {
                let callback =
                    move |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
                    let _ = handshake_tx.send(ServerEvent::Connected {
                        conn,
                        uri: request.uri().to_string(),
                    });
                    Ok(response)
                };
                let Ok(ws) = tokio_tungstenite::accept_hdr_async(stream, callback).await else {
                    return;
                };
                let (mut write, mut read) = ws.split();
                let mut replayed = false;

                loop {
                    match read.next().await {
                        Some(Ok(Message::Text(text))) => {
                            let _ = events_tx.send(ServerEvent::Received {
                                conn,
                                text: text.as_str().to_string(),
                            });
                            if !replayed {
                                replayed = true;
                                for message in script.iter().cloned() {
                                    if write.send(message).await.is_err() {
                                        break;
                                    }
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {
                            let _ = events_tx.send(ServerEvent::ClosedByClient { conn });
                            break;
                        }
                        Some(Ok(_)) => {}
                    }
                }
            });
            conn += 1;
        }
    });

    WsTestServer {
        url: format!("ws://{addr}"),
        events,
    }
}

/// A `ws://` URL on which nothing is listening
pub async fn unused_ws_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("ws://{addr}")
}
