/*
[INPUT]:  Pair identifiers and query parameters
[OUTPUT]: Raw market data responses (book, trades, pairs, tickers, klines)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing query parameters
*/

use reqwest::Method;
use serde_json::Value;

use crate::http::{LcxClient, Result};
use crate::types::{
    MarketKlinePayload, MarketPairPayload, MarketTickerPayload, OrderBookPayload, TradesPayload,
    Validate,
};

pub const ORDER_BOOK_PATH: &str = "/api/book";
pub const KLINE_PATH: &str = "/v2/market/kline";
pub const TRADES_PATH: &str = "/api/trades";
pub const PAIRS_PATH: &str = "/api/pairs";
pub const PAIR_PATH: &str = "/api/pair";
pub const TICKERS_PATH: &str = "/api/tickers";
pub const TICKER_PATH: &str = "/api/ticker";

impl LcxClient {
    /// Full order book for a pair
    ///
    /// GET /api/book?pair={pair}
    pub async fn order_book(&self, payload: &OrderBookPayload) -> Result<Value> {
        payload.validate()?;
        let query = vec![("pair", payload.pair.clone())];
        let builder = self.public_request(Method::GET, ORDER_BOOK_PATH, &query)?;
        self.send_json(builder, "fetching order book").await
    }

    /// Candles for a pair between two unix timestamps
    ///
    /// POST {kline}/v2/market/kline
    pub async fn market_kline(&self, payload: &MarketKlinePayload) -> Result<Value> {
        payload.validate()?;
        let builder = self.kline_request(Method::POST, KLINE_PATH)?.json(payload);
        self.send_json(builder, "fetching market kline").await
    }

    /// Recent trades for a pair
    ///
    /// GET /api/trades?pair={pair}&offset={offset}
    pub async fn market_trades(&self, payload: &TradesPayload) -> Result<Value> {
        payload.validate()?;
        let builder = self.public_request(Method::GET, TRADES_PATH, &payload.query())?;
        self.send_json(builder, "fetching market trades").await
    }

    /// All tradable pairs
    ///
    /// GET /api/pairs
    pub async fn market_pairs(&self) -> Result<Value> {
        let builder = self.public_request(Method::GET, PAIRS_PATH, &Vec::new())?;
        self.send_json(builder, "fetching market pairs").await
    }

    /// Details of a single pair
    ///
    /// GET /api/pair?pair={pair}
    pub async fn market_pair(&self, payload: &MarketPairPayload) -> Result<Value> {
        payload.validate()?;
        let query = vec![("pair", payload.pair.clone())];
        let builder = self.public_request(Method::GET, PAIR_PATH, &query)?;
        self.send_json(builder, "fetching market pair details").await
    }

    /// Tickers for every pair
    ///
    /// GET /api/tickers
    pub async fn market_tickers(&self) -> Result<Value> {
        let builder = self.public_request(Method::GET, TICKERS_PATH, &Vec::new())?;
        self.send_json(builder, "fetching market tickers").await
    }

    /// Ticker for a single pair
    ///
    /// GET /api/ticker?pair={pair}
    pub async fn market_ticker(&self, payload: &MarketTickerPayload) -> Result<Value> {
        payload.validate()?;
        let query = vec![("pair", payload.pair.clone())];
        let builder = self.public_request(Method::GET, TICKER_PATH, &query)?;
        self.send_json(builder, "fetching market ticker").await
    }
}
