//! Pre-flight config validation: collects every problem instead of stopping at the first.

use crate::config::{ApiConfig, ApiKind};
use crate::error::ConfigError;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// `Ok(())` when valid, otherwise one aggregated [`ConfigError::Validation`].
    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ConfigError::Validation(self.errors))
        }
    }
}

pub fn validate_config(config: &ApiConfig) -> ValidationReport {
    let mut errors = Vec::new();

    if config.name.is_empty() {
        errors.push("API name is required".to_string());
    }
    if config.kind.is_none() {
        errors.push("API type is required".to_string());
    }
    if config.main_table.is_empty() {
        errors.push("Main table is required".to_string());
    }
    if config.fields.is_empty() {
        errors.push("At least one field must be selected".to_string());
    }

    for join in &config.joins {
        if join.target_table.is_empty() {
            errors.push("Join target table is required".to_string());
        }
        if join.conditions.is_empty() {
            errors.push(format!("Join conditions are required for join with {}", join.target_table));
        }
    }

    if config.kind == Some(ApiKind::Insert) {
        if config.pagination_enabled() {
            errors.push("Pagination is not supported for insert APIs".to_string());
        }
        if config.sorting_enabled() {
            errors.push("Sorting is not supported for insert APIs".to_string());
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldRef, JoinKind, JoinSpec, Pagination, Sorting};

    fn users_query() -> ApiConfig {
        ApiConfig {
            name: "list_users".into(),
            kind: Some(ApiKind::Query),
            main_table: "users".into(),
            fields: vec![FieldRef::new("id")],
            ..Default::default()
        }
    }

    #[test]
    fn valid_config_has_no_errors() {
        let report = validate_config(&users_query());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn whitespace_name_and_table_count_as_present() {
        let cfg = ApiConfig {
            name: " ".into(),
            main_table: " ".into(),
            ..users_query()
        };
        assert!(validate_config(&cfg).is_valid);
    }

    #[test]
    fn collects_all_errors_in_order() {
        let cfg = ApiConfig {
            joins: vec![JoinSpec {
                target_table: "orders".into(),
                join_kind: JoinKind::Left,
                conditions: vec![],
            }],
            ..Default::default()
        };
        let report = validate_config(&cfg);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "API name is required",
                "API type is required",
                "Main table is required",
                "At least one field must be selected",
                "Join conditions are required for join with orders",
            ]
        );
    }

    #[test]
    fn insert_rejects_pagination_and_sorting() {
        let mut cfg = users_query();
        cfg.kind = Some(ApiKind::Insert);
        cfg.pagination = Some(Pagination {
            enabled: true,
            page_size: 10,
        });
        cfg.sorting = Some(Sorting {
            enabled: true,
            default_field: Some("id".into()),
            direction: "asc".into(),
        });
        let report = validate_config(&cfg);
        assert_eq!(
            report.errors,
            vec![
                "Pagination is not supported for insert APIs",
                "Sorting is not supported for insert APIs",
            ]
        );
    }

    #[test]
    fn insert_with_disabled_pagination_is_valid() {
        let mut cfg = users_query();
        cfg.kind = Some(ApiKind::Insert);
        cfg.pagination = Some(Pagination {
            enabled: false,
            page_size: 10,
        });
        assert!(validate_config(&cfg).is_valid);
    }

    #[test]
    fn missing_join_target_is_reported() {
        let mut cfg = users_query();
        cfg.joins.push(JoinSpec::default());
        let report = validate_config(&cfg);
        assert_eq!(
            report.errors,
            vec!["Join target table is required", "Join conditions are required for join with "]
        );
    }
}
