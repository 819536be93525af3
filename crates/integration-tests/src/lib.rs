//! Integration tests for FoodVerse.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p foodverse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Listing, filtering, sorting and product detail
//! - `cart` - Cart mutations over HTTP
//! - `auth` - Login, logout and the admin guard
//!
//! Servers are built with [`axum_test::TestServer`] over a fixed product
//! list, so no network access is needed.

// Helpers panic on setup failure, like the tests that use them
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum_test::TestServer;
use foodverse_core::{Product, ProductId};
use foodverse_storefront::config::StorefrontConfig;
use foodverse_storefront::products::ProductSource;
use foodverse_storefront::{AppState, app};
use rust_decimal::Decimal;

/// Build a product with the fields the tests care about.
#[must_use]
pub fn product(id: i32, title: &str, category: &str, price: &str, rating: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: price.parse::<Decimal>().unwrap(),
        category: category.to_string(),
        rating: rating.parse::<Decimal>().unwrap(),
        description: format!("Fresh {}", title.to_lowercase()),
        stock: 10,
        thumbnail: Some(format!("https://cdn.example/{id}.webp")),
        images: Vec::new(),
        discount_percentage: None,
    }
}

/// The menu used by most tests, in source order.
///
/// Rice and Milk share a price, Apple and Honey share a rating.
#[must_use]
pub fn menu() -> Vec<Product> {
    vec![
        product(16, "Apple", "groceries", "1.99", "4.5"),
        product(17, "Basmati Rice", "groceries", "3.49", "4.1"),
        product(18, "Milk", "groceries", "3.49", "3.9"),
        product(19, "Honey Jar", "groceries", "6.99", "4.5"),
        product(20, "Lipstick", "beauty", "12.99", "4.8"),
    ]
}

fn config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|_| None).unwrap()
}

/// A server over `products`.
#[must_use]
pub fn server_with(products: Vec<Product>) -> TestServer {
    let state = AppState::with_source(config(), ProductSource::fixture(products));
    TestServer::new(app(state)).unwrap()
}

/// A server over [`menu`].
#[must_use]
pub fn test_server() -> TestServer {
    server_with(menu())
}

/// A server whose product API fails category listings but still answers
/// single-product lookups from [`menu`].
pub async fn listing_outage_server() -> TestServer {
    let upstream = axum::Router::new()
        .route(
            "/products/category/{name}",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route(
            "/products/{id}",
            get(|Path(id): Path<i32>| async move {
                menu()
                    .into_iter()
                    .find(|p| p.id.as_i32() == id)
                    .map(Json)
                    .ok_or(StatusCode::NOT_FOUND)
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });

    let base_url = format!("http://{addr}");
    let config = StorefrontConfig::from_lookup(|key| match key {
        "PRODUCT_API_URL" => Some(base_url.clone()),
        "PRODUCT_API_TIMEOUT_SECS" => Some("2".to_string()),
        _ => None,
    })
    .unwrap();
    TestServer::new(app(AppState::new(config))).unwrap()
}

/// A server whose product API is unreachable.
#[must_use]
pub fn offline_server() -> TestServer {
    let config = StorefrontConfig::from_lookup(|key| match key {
        "PRODUCT_API_URL" => Some("http://127.0.0.1:9".to_string()),
        "PRODUCT_API_TIMEOUT_SECS" => Some("1".to_string()),
        _ => None,
    })
    .unwrap();
    TestServer::new(app(AppState::new(config))).unwrap()
}
