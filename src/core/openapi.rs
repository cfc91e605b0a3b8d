use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::catalogs::{dtos as catalogs_dtos, handlers as catalogs_handlers};
use crate::features::resources::{
    dtos as resources_dtos, handlers::resource_handler, models as resources_models,
};
use crate::features::users::{dtos as users_dtos, handlers::profile_handler, models as users_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Resources
        resource_handler::list_resources,
        resource_handler::upload_resource,
        resource_handler::list_my_resources,
        resource_handler::browse_resources,
        resource_handler::get_resource,
        resource_handler::ask_question,
        // Catalogs (public)
        catalogs_handlers::get_filters,
        // Users
        profile_handler::get_profile,
        profile_handler::update_profile,
        // Admin
        admin_handlers::list_resources,
        admin_handlers::review_resource,
        admin_handlers::retry_enrichment,
        admin_handlers::set_user_role,
        admin_handlers::add_university,
        admin_handlers::add_department,
        admin_handlers::add_subject,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Resources
            resources_models::ResourceStatus,
            resources_models::ReviewDecision,
            resources_models::FileType,
            resources_models::EnrichmentStatus,
            resources_dtos::UploadResourceDto,
            resources_dtos::ResourceDto,
            resources_dtos::AdminResourceDto,
            resources_dtos::ReviewResourceDto,
            resources_dtos::AskQuestionDto,
            resources_dtos::AnswerDto,
            ApiResponse<resources_dtos::ResourceDto>,
            ApiResponse<Vec<resources_dtos::ResourceDto>>,
            ApiResponse<resources_dtos::AnswerDto>,
            // Catalogs
            catalogs_dtos::CatalogFiltersDto,
            catalogs_dtos::AddCatalogValueDto,
            catalogs_dtos::AddSubjectDto,
            catalogs_dtos::CatalogAddResultDto,
            ApiResponse<catalogs_dtos::CatalogFiltersDto>,
            ApiResponse<catalogs_dtos::CatalogAddResultDto>,
            // Users
            users_models::UserRole,
            users_dtos::UserDto,
            users_dtos::UpdateProfileDto,
            ApiResponse<users_dtos::UserDto>,
            // Admin
            admin_dtos::SetRoleDto,
            ApiResponse<resources_dtos::AdminResourceDto>,
            ApiResponse<Vec<resources_dtos::AdminResourceDto>>,
        )
    ),
    tags(
        (name = "resources", description = "Shared academic resources"),
        (name = "catalogs", description = "Universities, departments, subjects and semesters (public)"),
        (name = "users", description = "User directory"),
        (name = "admin", description = "Review, enrichment, role and catalog management (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "ScholarSage API",
        version = "0.1.0",
        description = "API documentation for ScholarSage",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
