//! Login, logout and the admin guard.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use foodverse_integration_tests::test_server;
use serde_json::{Value, json};

async fn login_admin(server: &TestServer) {
    server
        .post("/auth/admin/login")
        .json(&json!({ "username": "admin", "password": "admin123" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_starts_anonymous() {
    let server = test_server();
    let body: Value = server.get("/auth/status").await.json();
    assert_eq!(body["role"], "anonymous");
    assert_eq!(body["is_authenticated"], false);
}

#[tokio::test]
async fn test_customer_login_and_logout() {
    let server = test_server();
    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "customer", "password": "cust123" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["role"], "customer");

    let status: Value = server.get("/auth/status").await.json();
    assert_eq!(status["is_customer"], true);
    assert_eq!(status["is_admin"], false);

    let body: Value = server.post("/auth/logout").await.json();
    assert_eq!(body["role"], "anonymous");
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let server = test_server();
    let response = server
        .post("/auth/admin/login")
        .json(&json!({ "username": "admin", "password": "wrongpass" }))
        .await;
    response.assert_status_unauthorized();

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid credentials");
    assert_eq!(body["retryable"], false);

    let status: Value = server.get("/auth/status").await.json();
    assert_eq!(status["role"], "anonymous");
}

#[tokio::test]
async fn test_customer_pair_does_not_grant_admin() {
    let server = test_server();
    server
        .post("/auth/admin/login")
        .json(&json!({ "username": "customer", "password": "cust123" }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_admin_routes_redirect_browsers() {
    let server = test_server();
    let response = server.get("/admin").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/login"
    );
}

#[tokio::test]
async fn test_admin_routes_reject_json_clients() {
    let server = test_server();
    let response = server
        .get("/admin/orders")
        .add_header(header::ACCEPT, HeaderValue::from_static("application/json"))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_customer_cannot_reach_admin() {
    let server = test_server();
    server
        .post("/auth/login")
        .json(&json!({ "username": "customer", "password": "cust123" }))
        .await;
    server.get("/admin/menu").await.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_admin_dashboard() {
    let server = test_server();
    login_admin(&server).await;

    let response = server.get("/admin").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_orders"], 4);
    assert_eq!(body["pending_orders"], 1);
    assert!((body["revenue"]["amount"].as_f64().unwrap() - 606.44).abs() < 1e-9);
}

#[tokio::test]
async fn test_admin_orders_filter() {
    let server = test_server();
    login_admin(&server).await;

    let body: Value = server.get("/admin/orders?status=shipped").await.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["orders"][0]["id"], 1002);

    let body: Value = server.get("/admin/orders?q=emily").await.json();
    assert_eq!(body["orders"][0]["customer"], "Emily Davis");

    let body: Value = server.get("/admin/orders?status=all").await.json();
    assert_eq!(body["count"], 4);

    server
        .get("/admin/orders?status=lost")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_admin_menu_is_source_order() {
    let server = test_server();
    login_admin(&server).await;

    let body: Value = server.get("/admin/menu").await.json();
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![16, 17, 18, 19, 20]);
}

#[tokio::test]
async fn test_logout_closes_admin() {
    let server = test_server();
    login_admin(&server).await;
    server.get("/admin").await.assert_status_ok();

    server.post("/auth/logout").await.assert_status_ok();
    server.get("/admin").await.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_redirect_target_answers_get() {
    let server = test_server();
    let response = server.get("/admin").await;
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();

    let response = server.get(&location).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["role"], "anonymous");
    assert_eq!(body["admin_login_url"], "/auth/admin/login");
}
