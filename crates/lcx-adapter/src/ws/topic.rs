/*
[INPUT]:  Topic selection and optional trading pair
[OUTPUT]: Outbound subscribe messages
[POS]:    WebSocket layer - subscribe message protocol
[UPDATE]: When the exchange adds or renames realtime topics
*/

use std::fmt;

use serde::{Deserialize, Serialize};

const SUBSCRIBE_ACTION: &str = "subscribe";

/// Realtime data stream offered by the exchange
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    Ticker,
    OrderBook { pair: String },
    Trade { pair: String },
    UserWallets,
    UserOrders,
    UserTrades,
}

impl Topic {
    /// Wire name used in the `Type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Topic::Ticker => "ticker",
            Topic::OrderBook { .. } => "orderbook",
            Topic::Trade { .. } => "trade",
            Topic::UserWallets => "user_wallets",
            Topic::UserOrders => "user_orders",
            Topic::UserTrades => "user_trades",
        }
    }

    pub fn pair(&self) -> Option<&str> {
        match self {
            Topic::OrderBook { pair } | Topic::Trade { pair } => Some(pair),
            _ => None,
        }
    }

    /// User-scoped topics need credentials to open the connection
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Topic::UserWallets | Topic::UserOrders | Topic::UserTrades
        )
    }

    pub fn subscribe_message(&self) -> SubscribeMessage {
        SubscribeMessage {
            topic: SUBSCRIBE_ACTION.to_string(),
            kind: self.kind().to_string(),
            pair: self.pair().map(str::to_string),
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// `{"Topic":"subscribe","Type":...,"Pair":...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeMessage {
    #[serde(rename = "Topic")]
    pub topic: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Pair", skip_serializing_if = "Option::is_none", default)]
    pub pair: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_message() {
        let json = serde_json::to_string(&Topic::Ticker.subscribe_message()).unwrap();
        assert_eq!(json, r#"{"Topic":"subscribe","Type":"ticker"}"#);
    }

    #[test]
    fn test_pair_scoped_messages() {
        let book = Topic::OrderBook {
            pair: "LCX/USDC".to_string(),
        };
        let trade = Topic::Trade {
            pair: "ETH/EUR".to_string(),
        };

        assert_eq!(
            serde_json::to_string(&book.subscribe_message()).unwrap(),
            r#"{"Topic":"subscribe","Type":"orderbook","Pair":"LCX/USDC"}"#
        );
        assert_eq!(
            serde_json::to_string(&trade.subscribe_message()).unwrap(),
            r#"{"Topic":"subscribe","Type":"trade","Pair":"ETH/EUR"}"#
        );
    }

    #[test]
    fn test_user_messages() {
        for (topic, kind) in [
            (Topic::UserWallets, "user_wallets"),
            (Topic::UserOrders, "user_orders"),
            (Topic::UserTrades, "user_trades"),
        ] {
            assert!(topic.requires_auth());
            let json = serde_json::to_string(&topic.subscribe_message()).unwrap();
            assert_eq!(json, format!(r#"{{"Topic":"subscribe","Type":"{kind}"}}"#));
        }
    }

    #[test]
    fn test_public_topics_need_no_auth() {
        assert!(!Topic::Ticker.requires_auth());
        assert!(
            !Topic::Trade {
                pair: "LCX/USDC".to_string()
            }
            .requires_auth()
        );
    }
}
