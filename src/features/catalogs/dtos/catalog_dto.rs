use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

/// Every value the upload and filter forms offer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFiltersDto {
    pub universities: Vec<String>,
    pub departments: Vec<String>,
    pub semesters: Vec<String>,
    /// Subjects keyed by department
    pub subjects: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddCatalogValueDto {
    #[validate(
        length(min = 1, max = 120, message = "Name must be 1-120 characters"),
        regex(
            path = "*crate::shared::validation::CATALOG_VALUE_REGEX",
            message = "Name must start with a letter or digit and contain no special characters"
        )
    )]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddSubjectDto {
    #[validate(
        length(min = 1, max = 120, message = "Department must be 1-120 characters"),
        regex(
            path = "*crate::shared::validation::CATALOG_VALUE_REGEX",
            message = "Department must start with a letter or digit and contain no special characters"
        )
    )]
    pub department: String,

    #[validate(
        length(min = 1, max = 120, message = "Subject must be 1-120 characters"),
        regex(
            path = "*crate::shared::validation::CATALOG_VALUE_REGEX",
            message = "Subject must start with a letter or digit and contain no special characters"
        )
    )]
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogAddResultDto {
    pub value: String,
    /// False when the value already existed
    pub added: bool,
}
