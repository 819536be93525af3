//! HTTP route handlers for the storefront.
//!
//! Every handler answers with JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Featured products and categories
//!
//! # Products
//! GET  /products?q=&category=&sort= - Filtered, sorted catalog view
//! GET  /products/categories       - Known categories
//! GET  /products/{id}             - Product detail (menu items only)
//!
//! # Cart
//! GET  /cart                      - Cart lines and summary
//! GET  /cart/count                - Distinct line count
//! POST /cart/add                  - Add a product
//! POST /cart/update               - Set a line's quantity
//! POST /cart/remove               - Remove a line
//! POST /cart/clear                - Empty the cart
//!
//! # Auth
//! GET  /auth/status               - Current role
//! GET  /auth/login                - Login prompt (admin guard redirect target)
//! POST /auth/login                - Customer login
//! POST /auth/admin/login          - Admin login
//! POST /auth/logout               - Logout
//!
//! # Admin (requires admin role)
//! GET  /admin                     - Dashboard stats
//! GET  /admin/orders?status=&q=   - Filtered order log
//! GET  /admin/menu                - Full catalog in source order
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(auth::status))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/admin/login", post(auth::admin_login))
        .route("/logout", post(auth::logout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/orders", get(admin::orders))
        .route("/menu", get(admin::menu))
}

/// Create the full router with every route group mounted.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}
