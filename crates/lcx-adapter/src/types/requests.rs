/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request payloads and their query-string form
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderSide, OrderStatus, OrderType};

/// Query-string parameters in transmission order
pub type QueryParams = Vec<(&'static str, String)>;

// ### Market payloads

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookPayload {
    pub pair: String,
}

/// Candle request; sent as the JSON body with its field names unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketKlinePayload {
    pub pair: String,
    pub resolution: String,
    pub from: u64,
    pub to: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradesPayload {
    pub pair: String,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPairPayload {
    pub pair: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTickerPayload {
    pub pair: String,
}

// ### Trading payloads

/// New order. Serialized with `PascalCase` keys, which is what the exchange
/// expects and what gets signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderCreatePayload {
    pub pair: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<Decimal>,
    pub order_type: OrderType,
    pub side: OrderSide,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub client_order_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderModifyPayload {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelPayload {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelAllPayload {
    pub order_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrdersPayload {
    pub pair: Option<String>,
    pub offset: u32,
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailsPayload {
    pub order_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistoryPayload {
    pub pair: Option<String>,
    pub offset: u32,
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
    pub side: Option<OrderSide>,
    pub order_status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeHistoryPayload {
    pub pair: Option<String>,
    pub offset: u32,
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
}

// ### Account payloads

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBalancePayload {
    pub coin: String,
}

// ### Query strings

impl TradesPayload {
    pub fn query(&self) -> QueryParams {
        vec![("pair", self.pair.clone()), ("offset", self.offset.to_string())]
    }
}

impl OrderCancelAllPayload {
    /// One `orderIds` entry per id
    pub fn query(&self) -> QueryParams {
        self.order_ids
            .iter()
            .map(|order_id| ("orderIds", order_id.clone()))
            .collect()
    }
}

fn paging_query(
    offset: u32,
    pair: Option<&String>,
    from_date: Option<i64>,
    to_date: Option<i64>,
) -> QueryParams {
    let mut params = vec![("offset", offset.to_string())];
    if let Some(pair) = pair {
        params.push(("pair", pair.clone()));
    }
    if let Some(from_date) = from_date {
        params.push(("fromDate", from_date.to_string()));
    }
    if let Some(to_date) = to_date {
        params.push(("toDate", to_date.to_string()));
    }
    params
}

impl OpenOrdersPayload {
    pub fn query(&self) -> QueryParams {
        paging_query(self.offset, self.pair.as_ref(), self.from_date, self.to_date)
    }
}

impl OrderHistoryPayload {
    pub fn query(&self) -> QueryParams {
        let mut params =
            paging_query(self.offset, self.pair.as_ref(), self.from_date, self.to_date);
        if let Some(side) = self.side {
            params.push(("side", side.as_str().to_string()));
        }
        if let Some(status) = self.order_status {
            params.push(("orderStatus", status.as_str().to_string()));
        }
        if let Some(order_type) = self.order_type {
            params.push(("orderType", order_type.as_str().to_string()));
        }
        params
    }
}

impl TradeHistoryPayload {
    pub fn query(&self) -> QueryParams {
        paging_query(self.offset, self.pair.as_ref(), self.from_date, self.to_date)
    }
}
