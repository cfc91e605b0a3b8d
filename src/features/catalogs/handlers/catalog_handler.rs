use std::sync::Arc;

use axum::{extract::State, Json};

use crate::features::catalogs::dtos::CatalogFiltersDto;
use crate::features::catalogs::services::CatalogService;
use crate::shared::types::ApiResponse;

/// Values offered by the upload form and the resource filters
#[utoipa::path(
    get,
    path = "/api/catalogs",
    responses(
        (status = 200, description = "Catalog values", body = ApiResponse<CatalogFiltersDto>),
    ),
    tag = "catalogs"
)]
pub async fn get_filters(
    State(service): State<Arc<CatalogService>>,
) -> Json<ApiResponse<CatalogFiltersDto>> {
    let filters = service.filters().await;
    Json(ApiResponse::success(Some(filters), None, None))
}
