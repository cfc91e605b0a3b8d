use serde::Deserialize;
use utoipa::IntoParams;

use super::Resource;

/// Browse filters. Absent, blank and `"all"` values do not filter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResourceFilter {
    pub university: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    /// `Note`, `Past Paper` or `Lab Manual`
    pub file_type: Option<String>,
    /// Case-insensitive match against title, description and tags
    pub search: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
    active(wanted).is_none_or(|w| w.eq_ignore_ascii_case(actual.trim()))
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        field_matches(&self.university, &resource.university)
            && field_matches(&self.department, &resource.department)
            && field_matches(&self.semester, &resource.semester)
            && field_matches(&self.subject, &resource.subject)
            && field_matches(&self.file_type, resource.file_type.as_str())
            && self.matches_search(resource)
    }

    fn matches_search(&self, resource: &Resource) -> bool {
        let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            return true;
        };

        let term = term.to_lowercase();
        resource.title.to_lowercase().contains(&term)
            || resource.description.to_lowercase().contains(&term)
            || resource.tags.iter().any(|tag| tag.contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::resources::models::FileType;
    use crate::shared::test_helpers::pending_resource;

    fn resource() -> Resource {
        let mut r = pending_resource("u1", "Digital Logic Cheatsheet");
        r.university = "City College".to_string();
        r.department = "Electrical Engineering".to_string();
        r.semester = "3rd".to_string();
        r.subject = "Digital Logic Design".to_string();
        r.file_type = FileType::LabManual;
        r.description = "Karnaugh maps and flip-flops".to_string();
        r
    }

    #[test]
    fn test_empty_filter_matches() {
        assert!(ResourceFilter::default().matches(&resource()));
    }

    #[test]
    fn test_all_means_unfiltered() {
        let filter = ResourceFilter {
            university: Some("all".to_string()),
            semester: Some("All".to_string()),
            file_type: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&resource()));
    }

    #[test]
    fn test_field_filters() {
        let matching = ResourceFilter {
            department: Some("electrical engineering".to_string()),
            file_type: Some("Lab Manual".to_string()),
            ..Default::default()
        };
        assert!(matching.matches(&resource()));

        let other_semester = ResourceFilter {
            semester: Some("4th".to_string()),
            ..Default::default()
        };
        assert!(!other_semester.matches(&resource()));
    }

    #[test]
    fn test_search_covers_title_description_and_tags() {
        for term in ["cheatsheet", "KARNAUGH", "digital"] {
            let filter = ResourceFilter {
                search: Some(term.to_string()),
                ..Default::default()
            };
            assert!(filter.matches(&resource()), "term {}", term);
        }

        let miss = ResourceFilter {
            search: Some("thermodynamics".to_string()),
            ..Default::default()
        };
        assert!(!miss.matches(&resource()));
    }
}
