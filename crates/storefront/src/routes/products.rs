//! Catalog routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use vizifit_core::{Category, ProductId};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    category: Option<String>,
}

/// `GET /api/products`
///
/// Full catalog, or one category when `?category=` is given. An unknown
/// category is a 400, not an empty list.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let products = match params.category.as_deref() {
        None => state.catalog().all().iter().collect::<Vec<_>>(),
        Some(raw) => {
            let category = raw
                .parse::<Category>()
                .map_err(AppError::BadRequest)?;
            state.catalog().by_category(category)
        }
    };
    Ok(Json(json!({ "products": products })))
}

/// `GET /api/products/{id}`
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("no product with id {id}")))?;
    Ok(Json(json!({ "product": product })))
}
