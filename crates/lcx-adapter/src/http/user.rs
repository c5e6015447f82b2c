/*
[INPUT]:  Coin identifiers and client credentials
[OUTPUT]: Raw account balance responses
[POS]:    HTTP layer - account endpoints (require signed headers)
[UPDATE]: When adding new account endpoints
*/

// ### Account Endpoints

use reqwest::Method;
use serde_json::Value;

use crate::auth::EMPTY_BODY;
use crate::http::{LcxClient, Result};
use crate::types::{CoinBalancePayload, Validate};

pub const BALANCES_PATH: &str = "/api/balances";
pub const BALANCE_PATH: &str = "/api/balance";

impl LcxClient {
    /// Balances of every coin held by the account
    ///
    /// GET /api/balances
    pub async fn balances(&self) -> Result<Value> {
        let signed = self.authorize(Method::GET, BALANCES_PATH, EMPTY_BODY)?;
        let builder = self.signed_request(signed, &Vec::new())?;
        self.send_json(builder, "fetching balances").await
    }

    /// Balance of a single coin
    ///
    /// GET /api/balance?coin={coin}
    pub async fn balance(&self, payload: &CoinBalancePayload) -> Result<Value> {
        self.credentials().require()?;
        payload.validate()?;
        let signed = self.authorize(Method::GET, BALANCE_PATH, EMPTY_BODY)?;
        let query = vec![("coin", payload.coin.clone())];
        let builder = self.signed_request(signed, &query)?;
        self.send_json(builder, "fetching balance").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AUTH_REQUIRED_MESSAGE, Credentials, sign};
    use crate::config::{BaseUrls, ClientConfig};
    use serde_json::json;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, credentials: Credentials) -> LcxClient {
        let config = ClientConfig::default()
            .with_base_urls(BaseUrls {
                exchange: server.uri(),
                kline: server.uri(),
                ws: server.uri().replace("http", "ws"),
            })
            .with_credentials(credentials);
        LcxClient::with_config(config).expect("client init")
    }

    #[tokio::test]
    async fn test_balances_signed_headers() {
        let server = MockServer::start().await;
        let signature = sign("GET", "/api/balances", "{}", "test-secret-key").unwrap();

        let _mock = Mock::given(method("GET"))
            .and(path("/api/balances"))
            .and(header("x-access-key", "test-api-key"))
            .and(header("x-access-sign", signature.as_str()))
            .and(header_exists("x-access-timestamp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server, Credentials::new("test-api-key", "test-secret-key"))
            .balances()
            .await
            .expect("balances failed");
        assert_eq!(response, json!({ "data": [] }));
    }

    #[tokio::test]
    async fn test_balances_without_credentials_skips_network() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server, Credentials::anonymous())
            .balances()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), AUTH_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_balance_query() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/balance"))
            .and(query_param("coin", "LCX"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server, Credentials::new("test-api-key", "test-secret-key"))
            .balance(&CoinBalancePayload {
                coin: "LCX".to_string(),
            })
            .await
            .expect("balance failed");
    }
}
