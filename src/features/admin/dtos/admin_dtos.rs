use serde::Deserialize;
use utoipa::ToSchema;

use crate::features::users::models::UserRole;

pub use crate::features::catalogs::dtos::{AddCatalogValueDto, AddSubjectDto, CatalogAddResultDto};
pub use crate::features::resources::dtos::{AdminResourceDto, ReviewResourceDto};
pub use crate::features::users::dtos::UserDto;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetRoleDto {
    pub role: UserRole,
}
