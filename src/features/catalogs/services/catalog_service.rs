use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::catalogs::dtos::CatalogFiltersDto;
use crate::features::catalogs::models::{CatalogEntry, CatalogKind};
use crate::features::catalogs::stores::CatalogStore;
use crate::shared::constants::{
    DEFAULT_DEPARTMENTS, DEFAULT_SUBJECTS, DEFAULT_UNIVERSITIES, SEMESTERS,
};
use crate::shared::validation::normalize_catalog_value;

/// Metadata catalogs for universities, departments and subjects.
///
/// Built-in defaults are always offered; stored values extend them.
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

fn required(label: &str, value: &str) -> Result<String> {
    let normalized = normalize_catalog_value(value);
    if normalized.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", label)));
    }
    Ok(normalized)
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    async fn stored(&self, kind: CatalogKind) -> Vec<CatalogEntry> {
        self.store.list(kind).await.unwrap_or_else(|e| {
            tracing::warn!("Falling back to default {} catalog: {}", kind, e);
            Vec::new()
        })
    }

    pub async fn filters(&self) -> CatalogFiltersDto {
        let (universities, departments, subjects) = futures::join!(
            self.stored(CatalogKind::University),
            self.stored(CatalogKind::Department),
            self.stored(CatalogKind::Subject),
        );

        let mut university_names: Vec<String> =
            DEFAULT_UNIVERSITIES.iter().map(|s| s.to_string()).collect();
        for entry in &universities {
            push_unique(&mut university_names, &entry.value);
        }

        let mut department_names: Vec<String> =
            DEFAULT_DEPARTMENTS.iter().map(|s| s.to_string()).collect();
        for entry in &departments {
            push_unique(&mut department_names, &entry.value);
        }

        let mut subject_map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (department, names) in DEFAULT_SUBJECTS {
            let list = subject_map.entry(department.to_string()).or_default();
            for name in names {
                push_unique(list, name);
            }
        }
        for entry in &subjects {
            push_unique(
                subject_map.entry(entry.parent.clone()).or_default(),
                &entry.value,
            );
        }

        CatalogFiltersDto {
            universities: university_names,
            departments: department_names,
            semesters: SEMESTERS.iter().map(|s| s.to_string()).collect(),
            subjects: subject_map,
        }
    }

    /// Returns the stored name and whether it was new
    pub async fn add_university(&self, name: &str) -> Result<(String, bool)> {
        let name = required("University", name)?;
        let added = self.store.add(CatalogKind::University, &name, "").await?;
        if added {
            tracing::info!("University added to catalog: {}", name);
        }
        Ok((name, added))
    }

    pub async fn add_department(&self, name: &str) -> Result<(String, bool)> {
        let name = required("Department", name)?;
        let added = self.store.add(CatalogKind::Department, &name, "").await?;
        if added {
            tracing::info!("Department added to catalog: {}", name);
        }
        Ok((name, added))
    }

    pub async fn add_subject(&self, department: &str, subject: &str) -> Result<(String, bool)> {
        let department = required("Department", department)?;
        let subject = required("Subject", subject)?;
        let added = self
            .store
            .add(CatalogKind::Subject, &subject, &department)
            .await?;
        if added {
            tracing::info!("Subject added to catalog: {} / {}", department, subject);
        }
        Ok((subject, added))
    }

    /// Registers affiliation values seen in user input. Failures are logged
    /// and never surface.
    pub async fn register(
        &self,
        university: Option<&str>,
        department: Option<&str>,
        subject: Option<&str>,
    ) {
        let university_add = async {
            match university {
                Some(name) => self.add_university(name).await.map(|_| ()),
                None => Ok(()),
            }
        };
        let department_add = async {
            match department {
                Some(name) => self.add_department(name).await.map(|_| ()),
                None => Ok(()),
            }
        };
        let subject_add = async {
            match (department, subject) {
                (Some(dept), Some(name)) => self.add_subject(dept, name).await.map(|_| ()),
                _ => Ok(()),
            }
        };

        let (u, d, s) = futures::join!(university_add, department_add, subject_add);
        for result in [u, d, s] {
            if let Err(e) = result {
                tracing::warn!("Catalog registration skipped: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalogs::stores::MemoryCatalogStore;

    fn service() -> (Arc<MemoryCatalogStore>, CatalogService) {
        let store = Arc::new(MemoryCatalogStore::new());
        (store.clone(), CatalogService::new(store))
    }

    #[tokio::test]
    async fn test_filters_include_defaults() {
        let (_, service) = service();
        let filters = service.filters().await;

        assert_eq!(filters.universities, vec!["University of Technology", "City College"]);
        assert_eq!(filters.semesters, vec!["1st", "2nd", "3rd", "4th"]);
        assert_eq!(filters.semesters[0], "1st");
        assert_eq!(
            filters.subjects["Computer Science"],
            vec!["Introduction to Programming", "Data Structures", "Algorithms"]
        );
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let (_, service) = service();

        let (name, added) = service.add_university("  State   University ").await.unwrap();
        assert_eq!(name, "State University");
        assert!(added);

        let (_, added_again) = service.add_university("State University").await.unwrap();
        assert!(!added_again);

        let filters = service.filters().await;
        assert_eq!(
            filters
                .universities
                .iter()
                .filter(|u| *u == "State University")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_default_value_is_not_duplicated() {
        let (_, service) = service();
        service.add_department("Computer Science").await.unwrap();

        let filters = service.filters().await;
        assert_eq!(filters.departments, vec!["Computer Science", "Electrical Engineering"]);
    }

    #[tokio::test]
    async fn test_subjects_are_keyed_by_department() {
        let (_, service) = service();
        service.add_subject("Mathematics", "Linear Algebra").await.unwrap();
        service.add_subject("Computer Science", "Compilers").await.unwrap();

        let filters = service.filters().await;
        assert_eq!(filters.subjects["Mathematics"], vec!["Linear Algebra"]);
        assert_eq!(filters.subjects["Computer Science"].last().unwrap(), "Compilers");
    }

    #[tokio::test]
    async fn test_blank_values_are_rejected() {
        let (_, service) = service();
        assert!(matches!(
            service.add_university("   ").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.add_subject("Physics", "").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_register_is_best_effort() {
        let (store, service) = service();
        store.make_unavailable();

        service
            .register(Some("Night School"), Some("History"), Some("Ancient Rome"))
            .await;

        let filters = service.filters().await;
        assert!(!filters.universities.contains(&"Night School".to_string()));
        assert_eq!(filters.universities.len(), DEFAULT_UNIVERSITIES.len());
    }
}
