//! Admin route handlers.
//!
//! Every handler takes [`RequireAdmin`], so non-admin sessions never reach
//! the body.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use foodverse_core::{DashboardStats, Order, OrderStatus};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Query parameters for the order table.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Status filter; `all` or absent means every status.
    pub status: Option<String>,
    /// Search term matched against order number and customer.
    pub q: Option<String>,
}

impl OrdersQuery {
    fn status_filter(&self) -> Result<Option<OrderStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => s.parse().map(Some).map_err(AppError::BadRequest),
        }
    }
}

/// Order table data.
#[derive(Debug, Serialize)]
pub struct OrdersResponse<'a> {
    pub orders: Vec<&'a Order>,
    pub count: usize,
}

/// Admin dashboard.
#[instrument(skip(state))]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.orders().stats())
}

/// Filtered order table.
///
/// # Errors
///
/// Returns `BadRequest` for an unknown status.
#[instrument(skip(state))]
pub async fn orders(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OrdersQuery>,
) -> Result<Response> {
    let status = params.status_filter()?;
    let orders = state
        .orders()
        .filter(status, params.q.as_deref().unwrap_or_default());

    Ok(Json(OrdersResponse {
        count: orders.len(),
        orders,
    })
    .into_response())
}

/// Full menu in source order.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[instrument(skip(state))]
pub async fn menu(_admin: RequireAdmin, State(state): State<AppState>) -> Result<Response> {
    let catalog = state.catalog().await?;
    Ok(Json(catalog.as_slice()).into_response())
}
