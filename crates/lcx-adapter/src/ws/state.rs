/*
[INPUT]:  Transport events (connect, open, close, error) and subscribe sends
[OUTPUT]: Validated connection state transitions
[POS]:    WebSocket layer - connection state machine
[UPDATE]: When adding connection states or transitions
*/

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

/// Lifecycle of a single socket connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Open,
    Subscribed,
    Closed,
    Errored,
}

impl ConnectionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Closed | ConnectionState::Errored)
    }

    /// Allowed edges of the state machine
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;

        matches!(
            (self, next),
            (Idle, Connecting)
                | (Connecting, Open | Closed | Errored)
                | (Open, Subscribed | Closed | Errored)
                | (Subscribed, Closed | Errored)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Subscribed => "subscribed",
            ConnectionState::Closed => "closed",
            ConnectionState::Errored => "errored",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State shared between the connection owner and its I/O task.
///
/// All handles publish into one channel. Each connection gets its own
/// generation; a handle whose generation is no longer current cannot change
/// the state, so a replaced connection's task stays silent.
#[derive(Debug, Clone)]
pub(crate) struct StateCell {
    inner: Arc<watch::Sender<ConnectionState>>,
    current: Arc<AtomicU64>,
    generation: u64,
}

impl StateCell {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(ConnectionState::Idle);
        Self {
            inner: Arc::new(tx),
            current: Arc::new(AtomicU64::new(0)),
            generation: 0,
        }
    }

    /// Handle for a new connection; retires every earlier handle and resets to `Idle`
    pub(crate) fn next_connection(&self) -> StateCell {
        let mut generation = 0;
        self.inner.send_modify(|state| {
            generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ConnectionState::Idle;
        });
        StateCell {
            inner: Arc::clone(&self.inner),
            current: Arc::clone(&self.current),
            generation,
        }
    }

    fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    pub(crate) fn get(&self) -> ConnectionState {
        *self.inner.borrow()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<ConnectionState> {
        self.inner.subscribe()
    }

    /// Move to `next` if the edge exists; returns whether the state changed
    pub(crate) fn advance(&self, next: ConnectionState) -> bool {
        let mut from = None;
        let changed = self.inner.send_if_modified(|state| {
            if !self.is_current() {
                return false;
            }
            if state.can_transition_to(next) {
                from = Some(*state);
                *state = next;
                true
            } else {
                false
            }
        });

        match from {
            Some(from) => debug!(%from, to = %next, "ws state transition"),
            None if !self.is_current() => {
                debug!(to = %next, "ws state update from replaced connection dropped")
            }
            None if !self.get().is_terminal() => {
                warn!(from = %self.get(), to = %next, "ws state transition rejected")
            }
            None => {}
        }
        changed
    }
}
