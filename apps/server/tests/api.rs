//! Integration tests for the HTTP API.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use bingo_core::{ProductInput, Role};
use bingo_db::{Database, DbConfig, NewCashier};
use bingo_server::auth::JwtManager;
use bingo_server::{create_app, AppState};

const SECRET: &str = "integration-test-secret";

struct TestApp {
    app: Router,
    state: Arc<AppState>,
    empanada_id: i64,
    cafe_id: i64,
}

async fn setup() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    for (username, role) in [("administrador", Role::Admin), ("cajero1", Role::Cashier)] {
        db.cashiers()
            .insert(&NewCashier {
                username: username.to_string(),
                full_name: format!("{username} full name"),
                password: "secreto123".to_string(),
                role,
            })
            .await
            .unwrap();
    }

    let inactive = db
        .cashiers()
        .insert(&NewCashier {
            username: "cajero2".to_string(),
            full_name: "Cajero Dos".to_string(),
            password: "secreto123".to_string(),
            role: Role::Cashier,
        })
        .await
        .unwrap();
    db.cashiers().set_active(inactive.id, false).await.unwrap();

    let products = db.products();
    let empanada = products
        .insert(&ProductInput {
            name: "Empanada".to_string(),
            price: 2500,
            image_url: None,
            active: true,
        })
        .await
        .unwrap();
    let cafe = products
        .insert(&ProductInput {
            name: "Cafe".to_string(),
            price: 1500,
            image_url: None,
            active: true,
        })
        .await
        .unwrap();
    products
        .insert(&ProductInput {
            name: "Tamal".to_string(),
            price: 4000,
            image_url: None,
            active: false,
        })
        .await
        .unwrap();

    let state = Arc::new(AppState::new(db, JwtManager::new(SECRET, 3600)));
    TestApp {
        app: create_app(Arc::clone(&state)),
        state,
        empanada_id: empanada.id,
        cafe_id: cafe.id,
    }
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn login(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": "secreto123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

async fn sale_count(state: &AppState) -> i64 {
    state.db.sales().count().await.unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let t = setup().await;

    let (status, body) = send(&t.app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_login_returns_token_and_cashier() {
    let t = setup().await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "cajero1", "password": "secreto123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["cashier"]["username"], "cajero1");
    assert_eq!(body["cashier"]["role"], "cashier");
    assert!(body["cashier"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let t = setup().await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "cajero1", "password": "incorrecto" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Invalid username or password");

    let (status, _) = send(
        &t.app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "nadie", "password": "secreto123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_inactive_cashier_is_forbidden() {
    let t = setup().await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "cajero2", "password": "secreto123" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Cashier account is inactive");
}

#[tokio::test]
async fn test_login_blank_username_is_rejected() {
    let t = setup().await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "   ", "password": "secreto123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_me_requires_token() {
    let t = setup().await;

    let (status, body) = send(&t.app, "GET", "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Login required");

    let (status, _) = send(&t.app, "GET", "/auth/me", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&t.app, "cajero1").await;
    let (status, body) = send(&t.app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "cajero1");
}

#[tokio::test]
async fn test_products_ordered_by_name_with_active_filter() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    let (status, body) = send(&t.app, "GET", "/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cafe", "Empanada", "Tamal"]);

    let (status, body) = send(&t.app, "GET", "/products?active=true", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_products_require_login() {
    let t = setup().await;

    let (status, _) = send(&t.app, "GET", "/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cashier_cannot_create_product() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/products",
        Some(&token),
        Some(json!({ "name": "Chicha", "price": 1000 })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_creates_and_updates_product() {
    let t = setup().await;
    let token = login(&t.app, "administrador").await;

    let (status, created) = send(
        &t.app,
        "POST",
        "/products",
        Some(&token),
        Some(json!({
            "name": "  Chicha  ",
            "price": 1000,
            "image_url": ""
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Chicha");
    assert_eq!(created["active"], true);
    assert!(created["image_url"].is_null());

    let id = created["id"].as_i64().unwrap();
    let (status, updated) = send(
        &t.app,
        "PUT",
        &format!("/products/{id}"),
        Some(&token),
        Some(json!({ "name": "Chicha Morada", "price": 1200, "active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["price"], 1200);
    assert_eq!(updated["active"], false);
}

#[tokio::test]
async fn test_create_product_invalid_input() {
    let t = setup().await;
    let token = login(&t.app, "administrador").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/products",
        Some(&token),
        Some(json!({ "name": "ab", "price": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &t.app,
        "POST",
        "/products",
        Some(&token),
        Some(json!({ "name": "Chicha", "price": 1000, "image_url": "ftp://x/y.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let t = setup().await;
    let token = login(&t.app, "administrador").await;

    let (status, body) = send(
        &t.app,
        "PUT",
        "/products/9999",
        Some(&token),
        Some(json!({ "name": "Nada", "price": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_record_sale_and_fetch_receipt() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/sales",
        Some(&token),
        Some(json!({
            "lines": [
                { "product_id": t.empanada_id, "quantity": 2, "unit_price": 2500 },
                { "product_id": t.cafe_id, "quantity": 1, "unit_price": 1500 }
            ],
            "cash_received": 10000
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let sale_id = body["sale_id"].as_i64().unwrap();

    let (status, receipt) = send(
        &t.app,
        "GET",
        &format!("/sales/{sale_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["id"], sale_id);
    assert_eq!(receipt["subtotal"], 6500);
    assert_eq!(receipt["cash_received"], 10000);
    assert_eq!(receipt["change"], 3500);
    assert_eq!(receipt["cashier_name"], "cajero1 full name");

    let details = receipt["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["product_name"], "Empanada");
    assert_eq!(details[0]["subtotal"], 5000);
    assert_eq!(details[1]["product_name"], "Cafe");
}

#[tokio::test]
async fn test_sale_with_insufficient_cash_is_refused() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/sales",
        Some(&token),
        Some(json!({
            "lines": [{ "product_id": t.empanada_id, "quantity": 2, "unit_price": 2500 }],
            "cash_received": 4000
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("less than the subtotal"));
    assert!(body.get("sale_id").is_none());
    assert_eq!(sale_count(&t.state).await, 0);
}

#[tokio::test]
async fn test_sale_with_empty_cart_is_refused() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/sales",
        Some(&token),
        Some(json!({ "lines": [], "cash_received": 1000 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_sale_with_unknown_product_leaves_nothing_behind() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/sales",
        Some(&token),
        Some(json!({
            "lines": [{ "product_id": 9999, "quantity": 1, "unit_price": 2500 }],
            "cash_received": 5000
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "The sale items could not be recorded. Please try again."
    );
    assert_eq!(sale_count(&t.state).await, 0);
}

#[tokio::test]
async fn test_receipt_for_missing_sale_is_not_found() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    let (status, _) = send(&t.app, "GET", "/sales/4242", Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_is_admin_only() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    for uri in ["/dashboard/summary", "/dashboard/products", "/dashboard/sales"] {
        let (status, _) = send(&t.app, "GET", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn test_dashboard_reports_recorded_sales() {
    let t = setup().await;
    let cashier = login(&t.app, "cajero1").await;
    let admin = login(&t.app, "administrador").await;

    for (product_id, quantity, unit_price) in
        [(t.empanada_id, 1, 2500), (t.cafe_id, 3, 1500), (t.empanada_id, 2, 2500)]
    {
        let (status, _) = send(
            &t.app,
            "POST",
            "/sales",
            Some(&cashier),
            Some(json!({
                "lines": [{ "product_id": product_id, "quantity": quantity, "unit_price": unit_price }],
                "cash_received": 10000
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, summary) = send(&t.app, "GET", "/dashboard/summary", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_sales"], 3);
    assert_eq!(summary["total_revenue"], 2500 + 4500 + 5000);

    let (status, products) = send(&t.app, "GET", "/dashboard/products", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 2);
    // Equal units, so ordered by name.
    assert_eq!(products[0]["name"], "Cafe");
    assert_eq!(products[0]["units_sold"], 3);
    assert_eq!(products[0]["revenue"], 4500);
    assert_eq!(products[1]["name"], "Empanada");
    assert_eq!(products[1]["units_sold"], 3);
    assert_eq!(products[1]["revenue"], 7500);

    let (status, sales) = send(&t.app, "GET", "/dashboard/sales", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let sales = sales.as_array().unwrap();
    assert_eq!(sales.len(), 3);
    assert_eq!(sales[0]["subtotal"], 5000);
    assert_eq!(sales[0]["details"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sale_with_malformed_body_keeps_response_shape() {
    let t = setup().await;
    let token = login(&t.app, "cajero1").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/sales",
        Some(&token),
        Some(json!({
            "lines": [{ "product_id": t.empanada_id, "quantity": "two", "unit_price": 2500 }],
            "cash_received": 5000
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("quantity"));
    assert!(body.get("code").is_none());
    assert_eq!(sale_count(&t.state).await, 0);
}

#[tokio::test]
async fn test_sale_without_token_keeps_response_shape() {
    let t = setup().await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/sales",
        None,
        Some(json!({
            "lines": [{ "product_id": t.empanada_id, "quantity": 1, "unit_price": 2500 }],
            "cash_received": 5000
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Login required");
    assert_eq!(sale_count(&t.state).await, 0);
}

#[tokio::test]
async fn test_deactivated_cashier_token_stops_working() {
    let t = setup().await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "cajero1", "password": "secreto123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    let cashier_id = body["cashier"]["id"].as_i64().unwrap();

    t.state
        .db
        .cashiers()
        .set_active(cashier_id, false)
        .await
        .unwrap();

    let (status, body) = send(
        &t.app,
        "POST",
        "/sales",
        Some(&token),
        Some(json!({
            "lines": [{ "product_id": t.empanada_id, "quantity": 1, "unit_price": 2500 }],
            "cash_received": 5000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Session is no longer valid");
    assert_eq!(sale_count(&t.state).await, 0);

    let (status, _) = send(&t.app, "GET", "/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
