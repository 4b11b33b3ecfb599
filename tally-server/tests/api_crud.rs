//! Full-router integration tests
//!
//! Each test gets its own temp work dir and a fully initialized app
//! (seeded store, middleware stack), driven with tower oneshot requests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use tally_server::{Config, ServerState, routes};

fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).unwrap();
    (routes::build_app(&state), dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_store_ok() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "ok");
}

#[tokio::test]
async fn seeded_reference_data_is_listed() {
    let (app, _dir) = test_app();

    let (status, body) = send(&app, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["items"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, "GET", "/api/transaction-categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["type"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"income"));
    assert!(kinds.contains(&"expense"));
}

#[tokio::test]
async fn product_crud_round_trip() {
    let (app, _dir) = test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Stapler",
            "sku": "ST-100",
            "price": 4.5,
            "stock": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["createdBy"], "user-1");
    assert_eq!(created["minStock"], 0);

    let (status, fetched) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Stapler");
    assert_eq!(fetched["createdAt"], created["createdAt"]);

    // Merge-update touches only the supplied fields
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/products/{id}"),
        Some(json!({ "price": 3.9 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 3.9);
    assert_eq!(updated["sku"], "ST-100");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);

    let (status, deleted) = send(&app, "DELETE", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], true);

    let (status, body) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn delete_missing_id_reports_false() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, "DELETE", "/api/products/absent", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], false);
}

#[tokio::test]
async fn list_respects_cursor_and_limit() {
    let (app, _dir) = test_app();
    for i in 0..5 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/clients",
            Some(json!({ "name": format!("Client {i}") })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, first) = send(&app, "GET", "/api/clients?limit=3", None).await;
    assert_eq!(first["items"].as_array().unwrap().len(), 3);
    let next = first["next"].as_str().unwrap().to_string();

    let (_, second) = send(&app, "GET", &format!("/api/clients?limit=10&cursor={next}"), None).await;
    let ids: Vec<&str> = second["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert!(!ids.contains(&next.as_str()));
    assert!(second["next"].is_null());
}

#[tokio::test]
async fn client_lifecycle_scenario() {
    let (app, _dir) = test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/clients",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/clients/{id}"),
        Some(json!({ "name": "Acme Corp" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Acme Corp");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);

    let (status, deleted) = send(&app, "DELETE", &format!("/api/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], true);

    let (status, _) = send(&app, "GET", &format!("/api/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sale_aggregate_create_and_items_listing() {
    let (app, _dir) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/sales",
        Some(json!({
            "saleData": {
                "saleDate": "2026-08-30T10:00:00Z",
                "totalAmount": 30.0,
                "paymentMethod": "cash",
                "status": "completed"
            },
            "itemsData": [
                { "productId": "p1", "quantity": 1, "unitPrice": 10.0 },
                { "productId": "p2", "quantity": 1, "unitPrice": 10.0 },
                { "productId": "p3", "quantity": 1, "unitPrice": 10.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let sale_id = body["sale"]["id"].as_str().unwrap().to_string();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i["saleId"] == sale_id.as_str()));

    let (status, listed) = send(&app, "GET", &format!("/api/sales/{sale_id}/items"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["items"].as_array().unwrap().len(), 3);
    assert!(listed["next"].is_null());
}

#[tokio::test]
async fn sale_update_replaces_items_with_fresh_ids() {
    let (app, _dir) = test_app();

    let (_, created) = send(
        &app,
        "POST",
        "/api/sales",
        Some(json!({
            "saleData": {
                "saleDate": "2026-08-30T10:00:00Z",
                "totalAmount": 30.0,
                "paymentMethod": "card",
                "status": "pending"
            },
            "itemsData": [
                { "productId": "p1", "quantity": 1, "unitPrice": 10.0 },
                { "productId": "p2", "quantity": 1, "unitPrice": 10.0 },
                { "productId": "p3", "quantity": 1, "unitPrice": 10.0 }
            ]
        })),
    )
    .await;
    let sale_id = created["sale"]["id"].as_str().unwrap().to_string();
    let old_ids: Vec<String> = created["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/sales/{sale_id}"),
        Some(json!({
            "saleData": { "status": "completed", "totalAmount": 12.0 },
            "itemsData": [
                { "productId": "p9", "quantity": 2, "unitPrice": 6.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["sale"]["status"], "completed");
    assert_eq!(updated["sale"]["totalAmount"], 12.0);

    let new_items = updated["items"].as_array().unwrap();
    assert_eq!(new_items.len(), 1);
    let new_id = new_items[0]["id"].as_str().unwrap();
    assert!(!old_ids.iter().any(|old| old == new_id));

    let (_, listed) = send(&app, "GET", &format!("/api/sales/{sale_id}/items"), None).await;
    assert_eq!(listed["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sale_update_missing_id_is_not_found() {
    let (app, _dir) = test_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/sales/absent",
        Some(json!({ "saleData": {}, "itemsData": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn sale_delete_removes_items_too() {
    let (app, _dir) = test_app();

    let (_, created) = send(
        &app,
        "POST",
        "/api/sales",
        Some(json!({
            "saleData": {
                "saleDate": "2026-08-30T10:00:00Z",
                "totalAmount": 20.0,
                "paymentMethod": "transfer",
                "status": "completed"
            },
            "itemsData": [
                { "productId": "p1", "quantity": 2, "unitPrice": 10.0 }
            ]
        })),
    )
    .await;
    let sale_id = created["sale"]["id"].as_str().unwrap().to_string();

    let (status, deleted) = send(&app, "DELETE", &format!("/api/sales/{sale_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], true);

    let (status, _) = send(&app, "GET", &format!("/api/sales/{sale_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(&app, "GET", &format!("/api/sales/{sale_id}/items"), None).await;
    assert!(listed["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn supplier_order_aggregate_create() {
    let (app, _dir) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/supplier-orders",
        Some(json!({
            "orderData": {
                "supplierId": "sup-acme-wholesale",
                "orderDate": "2026-08-30T08:00:00Z",
                "status": "pending",
                "totalAmount": 250.0
            },
            "itemsData": [
                { "productId": "prod-coffee-beans-1kg", "quantity": 10, "unitCost": 12.5 },
                { "productId": "prod-espresso-machine", "quantity": 1, "unitCost": 125.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let order_id = body["order"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let (status, listed) = send(
        &app,
        "GET",
        &format!("/api/supplier-orders/{order_id}/items"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = listed["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["supplierOrderId"] == order_id.as_str()));
}

#[tokio::test]
async fn transaction_crud_and_type_wire_name() {
    let (app, _dir) = test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/transactions",
        Some(json!({
            "type": "expense",
            "amount": 80.0,
            "description": "Office rent",
            "categoryId": "txc-rent",
            "transactionDate": "2026-08-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["type"], "expense");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/transactions/{id}"),
        Some(json!({ "amount": 85.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"], 85.0);
    assert_eq!(updated["description"], "Office rent");
}

#[tokio::test]
async fn malformed_payload_is_rejected() {
    let (app, _dir) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
