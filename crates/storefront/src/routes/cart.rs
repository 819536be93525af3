//! Cart route handlers.
//!
//! The cart lives in process memory behind a single mutex; each handler
//! holds the lock for the whole mutation and snapshot, so responses always
//! reflect a consistent cart.

use axum::{Json, extract::State};
use foodverse_core::{CartLine, CartStore, CartSummary, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub summary: CartSummary,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            summary: cart.summary(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: usize,
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<i64>,
}

/// Update quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove line request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart().lock().await;
    Json(CartResponse::from(&*cart))
}

/// Get the number of distinct lines (for the header badge).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCountResponse> {
    let cart = state.cart().lock().await;
    Json(CartCountResponse {
        count: cart.item_count(),
    })
}

/// Requested quantities below 1 become 1; values past `u32::MAX` saturate.
fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

/// Look a product up in the loaded catalog, then directly by id.
async fn find_product(state: &AppState, id: ProductId) -> Result<Product> {
    match state.catalog().await {
        Ok(catalog) => {
            if let Some(product) = catalog.iter().find(|p| p.id == id) {
                return Ok(product.clone());
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Catalog unavailable, looking product up directly");
        }
    }
    Ok(state.source().get_product(id).await?)
}

/// Add a product to the cart.
///
/// A missing quantity means 1. Adding a product already in the cart
/// increases that line's quantity.
///
/// # Errors
///
/// Returns `NotFound` if the product does not exist, or an upstream error.
#[instrument(skip(state), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    let product = find_product(&state, form.product_id).await?;
    let quantity = form.quantity.map_or(1, clamp_quantity);

    let mut cart = state.cart().lock().await;
    cart.add_to_cart(&product, quantity);

    let id = form.product_id.to_string();
    let added = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", id.as_str()), ("quantity", added.as_str())]),
    );
    tracing::info!(quantity, lines = cart.item_count(), "Added to cart");

    Ok(Json(CartResponse::from(&*cart)))
}

/// Set a line's quantity.
///
/// Quantities below 1 are stored as 1. Unknown products are ignored.
#[instrument(skip(state), fields(product_id = %form.product_id))]
pub async fn update(
    State(state): State<AppState>,
    Json(form): Json<UpdateCartRequest>,
) -> Json<CartResponse> {
    let mut cart = state.cart().lock().await;
    if cart.update_quantity(form.product_id, clamp_quantity(form.quantity)) {
        add_breadcrumb(
            "cart",
            "Updated quantity",
            Some(&[("product_id", form.product_id.to_string().as_str())]),
        );
    } else {
        tracing::debug!("Update for product not in cart ignored");
    }

    Json(CartResponse::from(&*cart))
}

/// Remove a line. Unknown products are ignored.
#[instrument(skip(state), fields(product_id = %form.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<RemoveFromCartRequest>,
) -> Json<CartResponse> {
    let mut cart = state.cart().lock().await;
    if cart.remove_from_cart(form.product_id) {
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", form.product_id.to_string().as_str())]),
        );
    }

    Json(CartResponse::from(&*cart))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartResponse> {
    let mut cart = state.cart().lock().await;
    cart.clear_cart();
    add_breadcrumb("cart", "Cleared cart", None);

    Json(CartResponse::from(&*cart))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(-5), 1);
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(7), 7);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
    }
}
