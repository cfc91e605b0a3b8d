use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::resources::dtos::{
    AnswerDto, AskQuestionDto, ResourceDraftDto, ResourceDto, UploadResourceDto,
};
use crate::features::resources::models::{Resource, ResourceFilter, UploadedFile};
use crate::features::resources::routes::ResourceState;
use crate::features::users::models::{User, UserRole};
use crate::shared::types::ApiResponse;

fn to_dtos(resources: Vec<Resource>) -> Vec<ResourceDto> {
    resources.into_iter().map(ResourceDto::from).collect()
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

/// List approved resources
#[utoipa::path(
    get,
    path = "/api/resources",
    params(ResourceFilter),
    responses(
        (status = 200, description = "Approved resources", body = ApiResponse<Vec<ResourceDto>>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "resources"
)]
pub async fn list_resources(
    State(state): State<ResourceState>,
    AppQuery(filter): AppQuery<ResourceFilter>,
) -> Json<ApiResponse<Vec<ResourceDto>>> {
    let resources = state
        .queries
        .list_visible(UserRole::Student, &filter)
        .await;
    Json(ApiResponse::list(to_dtos(resources)))
}

/// Upload a resource for review
///
/// Accepts multipart/form-data with a `file` part plus the descriptive
/// fields. The resource starts out pending.
#[utoipa::path(
    post,
    path = "/api/resources",
    tag = "resources",
    request_body(
        content = UploadResourceDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Resource uploaded", body = ApiResponse<ResourceDto>),
        (status = 400, description = "Invalid file or validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Storage permission denied")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_resource(
    user: User,
    State(state): State<ResourceState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ResourceDto>>)> {
    let mut draft = ResourceDraftDto::default();
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file = Some(UploadedFile {
                    name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "title" => draft.title = read_text(field, "title").await?,
            "description" => draft.description = read_text(field, "description").await?,
            "university" => draft.university = read_text(field, "university").await?,
            "department" => draft.department = read_text(field, "department").await?,
            "semester" => draft.semester = read_text(field, "semester").await?,
            "subject" => draft.subject = read_text(field, "subject").await?,
            "file_type" | "fileType" => {
                let text = read_text(field, "file type").await?;
                if !text.trim().is_empty() {
                    draft.file_type = Some(text.parse().map_err(AppError::Validation)?);
                }
            }
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    let draft = draft.trimmed();
    draft
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let file = file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let resource = state
        .lifecycle
        .create(draft.into_details(), file, &user.uid)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(resource.into()),
            Some("Resource submitted for review".to_string()),
            None,
        )),
    ))
}

/// Resources uploaded by the current user, any status
#[utoipa::path(
    get,
    path = "/api/resources/mine",
    responses(
        (status = 200, description = "Own uploads", body = ApiResponse<Vec<ResourceDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "resources",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_resources(
    user: User,
    State(state): State<ResourceState>,
) -> Json<ApiResponse<Vec<ResourceDto>>> {
    let resources = state.queries.list_by_uploader(&user.uid).await;
    Json(ApiResponse::list(to_dtos(resources)))
}

/// Role-aware browse: admins see everything, students approved resources
#[utoipa::path(
    get,
    path = "/api/resources/browse",
    params(ResourceFilter),
    responses(
        (status = 200, description = "Visible resources", body = ApiResponse<Vec<ResourceDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "resources",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn browse_resources(
    user: User,
    State(state): State<ResourceState>,
    AppQuery(filter): AppQuery<ResourceFilter>,
) -> Json<ApiResponse<Vec<ResourceDto>>> {
    let resources = state.queries.list_visible(user.role, &filter).await;
    Json(ApiResponse::list(to_dtos(resources)))
}

#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource found", body = ApiResponse<ResourceDto>),
        (status = 404, description = "Resource not found")
    ),
    tag = "resources",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_resource(
    user: User,
    State(state): State<ResourceState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ResourceDto>>> {
    let resource = state.queries.get_visible(id, Some(&user)).await?;
    Ok(Json(ApiResponse::success(Some(resource.into()), None, None)))
}

/// Ask the assistant a question about an approved resource
#[utoipa::path(
    post,
    path = "/api/resources/{id}/ask",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    request_body = AskQuestionDto,
    responses(
        (status = 200, description = "Answer", body = ApiResponse<AnswerDto>),
        (status = 400, description = "Invalid question or resource not approved"),
        (status = 404, description = "Resource not found"),
        (status = 502, description = "Assistant unavailable")
    ),
    tag = "resources",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn ask_question(
    user: User,
    State(state): State<ResourceState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AskQuestionDto>,
) -> Result<Json<ApiResponse<AnswerDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let answer = state.assistant.ask(id, &dto.question, &user).await?;
    Ok(Json(ApiResponse::success(Some(AnswerDto { answer }), None, None)))
}
