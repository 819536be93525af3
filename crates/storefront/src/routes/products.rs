//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use foodverse_core::{
    CatalogQuery, CatalogView, Category, CategoryInfo, KNOWN_CATEGORIES, Product, ProductId,
    SortKey, is_menu_item,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Free-text term matched against title and description.
    pub q: Option<String>,
    /// Category filter; `all` or absent means no filter.
    pub category: Option<String>,
    /// Sort key; unknown values fall back to featured.
    pub sort: Option<String>,
}

impl ProductsQuery {
    fn to_catalog_query(&self) -> CatalogQuery {
        CatalogQuery::new(
            self.q.as_deref().unwrap_or_default().trim(),
            Category::parse(self.category.as_deref().unwrap_or_default()),
            SortKey::parse(self.sort.as_deref().unwrap_or_default()),
        )
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse<'a> {
    #[serde(flatten)]
    pub view: CatalogView<'a>,
    pub query: &'a CatalogQuery,
    pub category_name: &'a str,
}

/// Display the product listing.
///
/// An empty `products` array is a normal result, not an error.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductsQuery>,
) -> Result<Response> {
    let catalog = state.catalog().await?;
    let query = params.to_catalog_query();
    let view = CatalogView::build(&catalog, &query);

    tracing::debug!(count = view.count, "Derived catalog view");

    Ok(Json(ProductListResponse {
        view,
        query: &query,
        category_name: query.category.display_name(),
    })
    .into_response())
}

/// List the known categories.
pub async fn categories() -> Json<&'static [CategoryInfo]> {
    Json(KNOWN_CATEGORIES)
}

/// Display a product detail.
///
/// Products outside the menu categories are reported as not found.
///
/// # Errors
///
/// Returns `BadRequest` for a non-numeric id, `NotFound` for an unknown or
/// non-menu product, or an upstream error.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid product id: {id}")))?;

    let product = state.source().get_product(id).await?;
    if !is_menu_item(&product) {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_are_defaults() {
        let query = ProductsQuery::default().to_catalog_query();
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn test_params_parse() {
        let params = ProductsQuery {
            q: Some("  rice ".to_string()),
            category: Some("Fruits".to_string()),
            sort: Some("price-high".to_string()),
        };
        let query = params.to_catalog_query();
        assert_eq!(query.term, "rice");
        assert_eq!(query.category, Category::parse("fruits"));
        assert_eq!(query.sort, SortKey::PriceHigh);
    }

    #[test]
    fn test_unknown_sort_falls_back() {
        let params = ProductsQuery {
            sort: Some("cheapest".to_string()),
            ..ProductsQuery::default()
        };
        assert_eq!(params.to_catalog_query().sort, SortKey::Featured);
    }
}
