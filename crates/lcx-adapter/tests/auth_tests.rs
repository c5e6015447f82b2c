/*
[INPUT]:  Credential pairs and request material
[OUTPUT]: Test results for credential handling and request signing
[POS]:    Integration tests - authentication
[UPDATE]: When signing or credential handling changes
*/

mod common;

use common::{TEST_SECRET_KEY, test_credentials};
use lcx_adapter::auth::EMPTY_BODY;
use lcx_adapter::*;
use reqwest::Method;
use rstest::rstest;

#[rstest]
#[case("GET", "/api/balances", EMPTY_BODY)]
#[case("POST", "/api/create", r#"{"Pair":"LCX/ETH"}"#)]
#[case("DELETE", "/order/cancel-all", EMPTY_BODY)]
fn test_sign_is_deterministic(#[case] method: &str, #[case] path: &str, #[case] body: &str) {
    let first = sign(method, path, body, TEST_SECRET_KEY).unwrap();
    let second = sign(method, path, body, TEST_SECRET_KEY).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_adjacent_inputs_do_not_collide() {
    let get = sign("GET", "/api/open", EMPTY_BODY, TEST_SECRET_KEY).unwrap();
    let post = sign("POST", "/api/open", EMPTY_BODY, TEST_SECRET_KEY).unwrap();
    assert_ne!(get, post);
}

#[test]
fn test_signed_request_matches_sign() {
    let request =
        SignedRequest::build(Method::GET, "/api/auth/ws", EMPTY_BODY, &test_credentials()).unwrap();
    assert_eq!(
        request.signature,
        sign("GET", "/api/auth/ws", EMPTY_BODY, TEST_SECRET_KEY).unwrap()
    );
    assert_eq!(request.api_key, "test-api-key");
}

#[test]
fn test_sign_payload_returns_transmitted_text() {
    let payload = OrderCancelAllPayload {
        order_ids: vec!["a".to_string()],
    };
    let (body, signature) =
        sign_payload("DELETE", "/order/cancel-all", &payload, TEST_SECRET_KEY).unwrap();
    assert_eq!(body, r#"{"order_ids":["a"]}"#);
    assert_eq!(
        signature,
        sign("DELETE", "/order/cancel-all", &body, TEST_SECRET_KEY).unwrap()
    );
}

#[test]
fn test_anonymous_build_fails() {
    let err = SignedRequest::build_json(
        Method::POST,
        "/api/create",
        &serde_json::json!({}),
        &Credentials::anonymous(),
    )
    .unwrap_err();
    assert!(err.is_auth_error());
    assert!(err.is_precondition());
}
