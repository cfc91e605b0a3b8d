use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::{ProfileUpdate, User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub uid: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            name: user.name,
            email: user.email,
            role: user.role,
            university: user.university,
            department: user.department,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request DTO for self-service profile changes
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 120, message = "University must be 1-120 characters"),
        regex(
            path = "*crate::shared::validation::CATALOG_VALUE_REGEX",
            message = "University must start with a letter or digit and contain no special characters"
        )
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,

    #[validate(
        length(min = 1, max = 120, message = "Department must be 1-120 characters"),
        regex(
            path = "*crate::shared::validation::CATALOG_VALUE_REGEX",
            message = "Department must start with a letter or digit and contain no special characters"
        )
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl From<UpdateProfileDto> for ProfileUpdate {
    fn from(dto: UpdateProfileDto) -> Self {
        Self {
            name: dto.name,
            university: dto.university,
            department: dto.department,
        }
    }
}
