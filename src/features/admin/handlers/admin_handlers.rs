use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

fn catalog_response(
    (value, added): (String, bool),
) -> (StatusCode, Json<ApiResponse<CatalogAddResultDto>>) {
    let (status, message) = if added {
        (StatusCode::CREATED, "Added to catalog")
    } else {
        (StatusCode::OK, "Already in catalog")
    };

    (
        status,
        Json(ApiResponse::success(
            Some(CatalogAddResultDto { value, added }),
            Some(message.to_string()),
            None,
        )),
    )
}

/// Every resource, pending first
#[utoipa::path(
    get,
    path = "/api/admin/resources",
    responses(
        (status = 200, description = "All resources", body = ApiResponse<Vec<AdminResourceDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_resources(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Json<ApiResponse<Vec<AdminResourceDto>>> {
    let items = service
        .list_resources()
        .await
        .into_iter()
        .map(AdminResourceDto::from)
        .collect();

    Json(ApiResponse::list(items))
}

/// Approve or reject a pending resource
#[utoipa::path(
    patch,
    path = "/api/admin/resources/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    request_body = ReviewResourceDto,
    responses(
        (status = 200, description = "Review applied", body = ApiResponse<AdminResourceDto>),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Resource not found"),
        (status = 409, description = "Decision conflicts with the current status")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn review_resource(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ReviewResourceDto>,
) -> Result<Json<ApiResponse<AdminResourceDto>>> {
    let resource = service.review_resource(id, dto.status, &admin).await?;
    let message = format!("Resource is {}", resource.status);

    Ok(Json(ApiResponse::success(
        Some(resource.into()),
        Some(message),
        None,
    )))
}

/// Start a new enrichment attempt
#[utoipa::path(
    post,
    path = "/api/admin/resources/{id}/enrichment",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    responses(
        (status = 202, description = "Enrichment restarted", body = ApiResponse<AdminResourceDto>),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Resource not found"),
        (status = 409, description = "Not approved or enrichment still running")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn retry_enrichment(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<AdminResourceDto>>)> {
    let resource = service.retry_enrichment(id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(
            Some(resource.into()),
            Some("Enrichment restarted".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{uid}/role",
    params(
        ("uid" = String, Path, description = "User ID (token subject)")
    ),
    request_body = SetRoleDto,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "User not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_user_role(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(uid): Path<String>,
    AppJson(dto): AppJson<SetRoleDto>,
) -> Result<Json<ApiResponse<UserDto>>> {
    let user = service.set_role(&uid, dto.role).await?;
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/catalogs/universities",
    request_body = AddCatalogValueDto,
    responses(
        (status = 201, description = "University added", body = ApiResponse<CatalogAddResultDto>),
        (status = 200, description = "University already present", body = ApiResponse<CatalogAddResultDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_university(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<AddCatalogValueDto>,
) -> Result<(StatusCode, Json<ApiResponse<CatalogAddResultDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(catalog_response(service.add_university(&dto.name).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/catalogs/departments",
    request_body = AddCatalogValueDto,
    responses(
        (status = 201, description = "Department added", body = ApiResponse<CatalogAddResultDto>),
        (status = 200, description = "Department already present", body = ApiResponse<CatalogAddResultDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_department(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<AddCatalogValueDto>,
) -> Result<(StatusCode, Json<ApiResponse<CatalogAddResultDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(catalog_response(service.add_department(&dto.name).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/catalogs/subjects",
    request_body = AddSubjectDto,
    responses(
        (status = 201, description = "Subject added", body = ApiResponse<CatalogAddResultDto>),
        (status = 200, description = "Subject already present", body = ApiResponse<CatalogAddResultDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_subject(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<AddSubjectDto>,
) -> Result<(StatusCode, Json<ApiResponse<CatalogAddResultDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(catalog_response(
        service.add_subject(&dto.department, &dto.subject).await?,
    ))
}
