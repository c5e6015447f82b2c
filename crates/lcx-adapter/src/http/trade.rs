/*
[INPUT]:  Order payloads and client credentials
[OUTPUT]: Raw order and history responses
[POS]:    HTTP layer - trading endpoints (require signed headers)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

// Every call checks credentials before validating its payload, so a
// public-only client always gets the authentication error first.

use reqwest::Method;
use serde_json::Value;

use crate::auth::EMPTY_BODY;
use crate::http::{LcxClient, Result};
use crate::types::{
    OpenOrdersPayload, OrderCancelAllPayload, OrderCancelPayload, OrderCreatePayload,
    OrderDetailsPayload, OrderHistoryPayload, OrderModifyPayload, TradeHistoryPayload, Validate,
};

pub const ORDER_CREATE_PATH: &str = "/api/create";
pub const ORDER_MODIFY_PATH: &str = "/api/modify";
pub const ORDER_CANCEL_PATH: &str = "/api/cancel";
pub const ORDER_CANCEL_ALL_PATH: &str = "/order/cancel-all";
pub const OPEN_ORDERS_PATH: &str = "/api/open";
pub const ORDER_DETAILS_PATH: &str = "/api/order";
pub const ORDER_HISTORY_PATH: &str = "/api/orderHistory";
pub const TRADE_HISTORY_PATH: &str = "/api/uHistory";

impl LcxClient {
    /// Place a new order
    ///
    /// POST /api/create
    pub async fn order_create(&self, payload: &OrderCreatePayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let body = serde_json::to_string(payload)?;
        let signed = self.authorize(Method::POST, ORDER_CREATE_PATH, body)?;
        let builder = self.signed_request(signed, &Vec::new())?;
        self.send_json(builder, "creating order").await
    }

    /// Change amount and price of an open order
    ///
    /// PUT /api/modify
    pub async fn order_modify(&self, payload: &OrderModifyPayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let body = serde_json::to_string(payload)?;
        let signed = self.authorize(Method::PUT, ORDER_MODIFY_PATH, body)?;
        let builder = self.signed_request(signed, &Vec::new())?;
        self.send_json(builder, "modifying order").await
    }

    /// Cancel one order
    ///
    /// DELETE /api/cancel?orderId={order_id}
    pub async fn order_cancel(&self, payload: &OrderCancelPayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let signed = self.authorize(Method::DELETE, ORDER_CANCEL_PATH, EMPTY_BODY)?;
        let query = vec![("orderId", payload.order_id.clone())];
        let builder = self.signed_request(signed, &query)?;
        self.send_json(builder, "canceling order").await
    }

    /// Cancel up to 25 orders at once
    ///
    /// DELETE /order/cancel-all?orderIds={id}&orderIds={id}...
    pub async fn order_cancel_all(&self, payload: &OrderCancelAllPayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let signed = self.authorize(Method::DELETE, ORDER_CANCEL_ALL_PATH, EMPTY_BODY)?;
        let builder = self.signed_request(signed, &payload.query())?;
        self.send_json(builder, "canceling orders").await
    }

    /// Open orders, optionally filtered by pair and date range
    ///
    /// GET /api/open?offset={offset}&pair={pair}&fromDate={from}&toDate={to}
    pub async fn open_orders(&self, payload: &OpenOrdersPayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let signed = self.authorize(Method::GET, OPEN_ORDERS_PATH, EMPTY_BODY)?;
        let builder = self.signed_request(signed, &payload.query())?;
        self.send_json(builder, "fetching open orders").await
    }

    /// Details of one order
    ///
    /// GET /api/order?OrderId={order_id}
    pub async fn order_details(&self, payload: &OrderDetailsPayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let signed = self.authorize(Method::GET, ORDER_DETAILS_PATH, EMPTY_BODY)?;
        let query = vec![("OrderId", payload.order_id.clone())];
        let builder = self.signed_request(signed, &query)?;
        self.send_json(builder, "fetching order details").await
    }

    /// Closed and cancelled orders
    ///
    /// GET /api/orderHistory?offset={offset}&...
    pub async fn order_history(&self, payload: &OrderHistoryPayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let signed = self.authorize(Method::GET, ORDER_HISTORY_PATH, EMPTY_BODY)?;
        let builder = self.signed_request(signed, &payload.query())?;
        self.send_json(builder, "fetching order history").await
    }

    /// Executed trades of the account
    ///
    /// GET /api/uHistory?offset={offset}&...
    pub async fn trade_history(&self, payload: &TradeHistoryPayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let signed = self.authorize(Method::GET, TRADE_HISTORY_PATH, EMPTY_BODY)?;
        let builder = self.signed_request(signed, &payload.query())?;
        self.send_json(builder, "fetching trade history").await
    }
}
