//! Home page handler.

use axum::{Json, extract::State};
use foodverse_core::{CategoryInfo, KNOWN_CATEGORIES, Product};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Number of products shown on the home page.
const FEATURED_COUNT: usize = 4;

/// Home page data.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured: Vec<Product>,
    pub categories: &'static [CategoryInfo],
}

/// Display the home page.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let catalog = state.catalog().await?;

    Ok(Json(HomeResponse {
        featured: catalog.iter().take(FEATURED_COUNT).cloned().collect(),
        categories: KNOWN_CATEGORIES,
    }))
}
