// Integration tests for `ApiClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockdeck_api::types::{MovementCreateRequest, MovementUpdateRequest, StockInput};
use stockdeck_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "message": "ok", "data": data })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_stocks() {
    let (server, client) = setup().await;

    let body = ok_envelope(json!([
        { "id": "s1", "name": "Pen", "quantity": 10, "price": 2000.0 },
        { "id": "s2", "name": "Notebook", "quantity": 4, "price": 15000.0 },
    ]));

    Mock::given(method("GET"))
        .and(path("/stocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let stocks = client.list_stocks().await.unwrap();

    assert_eq!(stocks.len(), 2);
    assert_eq!(stocks[0].name, "Pen");
    assert_eq!(stocks[0].quantity, 10);
    assert_eq!(stocks[1].id, "s2");
}

#[tokio::test]
async fn test_create_stock() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/stocks"))
        .and(body_json(json!({
            "name": "Stapler", "quantity": 3, "price": 25000.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok_envelope(json!({
            "id": "s9", "name": "Stapler", "quantity": 3, "price": 25000.0
        }))))
        .mount(&server)
        .await;

    let input = StockInput {
        name: "Stapler".into(),
        quantity: 3,
        price: 25000.0,
    };
    let created = client.create_stock(&input).await.unwrap();

    assert_eq!(created.id, "s9");
    assert_eq!(created.name, "Stapler");
}

#[tokio::test]
async fn test_create_movement_camel_case_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/stocks/movement"))
        .and(body_json(json!({
            "productId": "s1", "in": 20, "out": 0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok_envelope(json!({
            "id": "m1",
            "productId": "s1",
            "in": 20,
            "out": 0,
            "createdAt": "2025-11-03T08:30:00Z"
        }))))
        .mount(&server)
        .await;

    let input = MovementCreateRequest {
        product_id: "s1".into(),
        inbound: 20,
        outbound: 0,
    };
    let movement = client.create_movement(&input).await.unwrap();

    assert_eq!(movement.id, "m1");
    assert_eq!(movement.product_id, "s1");
    assert_eq!(movement.inbound, 20);
    assert_eq!(movement.outbound, 0);
    assert!(movement.created_at.is_some());
}

#[tokio::test]
async fn test_update_movement_amounts_only() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/stocks/movement/m1"))
        .and(body_json(json!({ "in": 5, "out": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "id": "m1", "productId": "s1", "in": 5, "out": 2
        }))))
        .mount(&server)
        .await;

    let input = MovementUpdateRequest {
        inbound: 5,
        outbound: 2,
    };
    let movement = client.update_movement("m1", &input).await.unwrap();

    assert_eq!(movement.inbound, 5);
    assert_eq!(movement.outbound, 2);
}

#[tokio::test]
async fn test_delete_stock_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/stocks/s1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.delete_stock("s1").await.unwrap();
}

#[tokio::test]
async fn test_sign_in_returns_token_and_user() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/sign-in"))
        .and(body_json(json!({
            "email": "ana@example.com", "password": "hunter22"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "token": "tok-123",
            "user": { "id": "u1", "name": "Ana", "email": "ana@example.com", "role": "admin" }
        }))))
        .mount(&server)
        .await;

    let payload = client
        .sign_in("ana@example.com", &SecretString::from("hunter22"))
        .await
        .unwrap();

    assert_eq!(payload.token, "tok-123");
    assert_eq!(payload.user.name, "Ana");
    assert_eq!(payload.user.role.as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_bearer_attached_when_set() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/check"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "id": "u1", "name": "Ana", "email": "ana@example.com"
        }))))
        .mount(&server)
        .await;

    client.set_bearer(SecretString::from("tok-123"));
    let user = client.check().await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.role, None);
}

#[tokio::test]
async fn test_no_bearer_header_when_cleared() {
    let (server, client) = setup().await;

    // The mock matches any GET /stocks; the assertion is on what the
    // client actually sent.
    Mock::given(method("GET"))
        .and(path("/stocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
        .mount(&server)
        .await;

    client.set_bearer(SecretString::from("tok-123"));
    client.clear_bearer();
    assert!(!client.has_bearer());

    client.list_stocks().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_false_success_flag_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/stocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false, "message": "name already taken", "data": null
        })))
        .mount(&server)
        .await;

    let input = StockInput {
        name: "Pen".into(),
        quantity: 1,
        price: 1000.0,
    };
    let result = client.create_stock(&input).await;

    match result {
        Err(Error::ValidationFailed { ref message }) => {
            assert_eq!(message, "name already taken");
        }
        other => panic!("expected ValidationFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_401_authentication_required() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false, "message": "token expired", "data": null
        })))
        .mount(&server)
        .await;

    let result = client.list_stocks().await;

    match result {
        Err(Error::AuthenticationRequired { ref message }) => {
            assert_eq!(message, "token expired");
        }
        other => panic!("expected AuthenticationRequired, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_404_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/stocks/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false, "message": "no such product", "data": null
        })))
        .mount(&server)
        .await;

    let result = client.get_stock("missing").await;
    assert!(matches!(result, Err(ref e) if e.is_not_found()), "got: {result:?}");
}

#[tokio::test]
async fn test_error_422_validation() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/stocks/s1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false, "message": "quantity must be non-negative", "data": null
        })))
        .mount(&server)
        .await;

    let input = StockInput {
        name: "Pen".into(),
        quantity: 0,
        price: 2000.0,
    };
    let result = client.update_stock("s1", &input).await;

    match result {
        Err(Error::ValidationFailed { ref message }) => {
            assert_eq!(message, "quantity must be non-negative");
        }
        other => panic!("expected ValidationFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.list_stocks().await;

    match result {
        Err(Error::Server { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/stocks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_stocks().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization, got: {other:?}"),
    }
}
