//! Fluent builder producing an immutable [`ApiConfig`].

use crate::config::{
    ApiConfig, ApiKind, FieldRef, FilterCondition, JoinCondition, JoinGraph, JoinKind, JoinSpec, Pagination, Sorting,
};
use crate::error::ConfigError;

/// Accumulates one build session. Each call site creates its own builder.
#[derive(Clone, Debug)]
pub struct ApiConfigBuilder {
    config: ApiConfig,
}

impl ApiConfigBuilder {
    pub fn new(
        name: impl Into<String>,
        kind: ApiKind,
        description: impl Into<String>,
        main_table: impl Into<String>,
    ) -> Self {
        ApiConfigBuilder {
            config: ApiConfig {
                name: name.into(),
                kind: Some(kind),
                description: description.into(),
                main_table: main_table.into(),
                ..Default::default()
            },
        }
    }

    /// Start from an existing config (e.g. one loaded from JSON).
    pub fn from_config(config: ApiConfig) -> Self {
        ApiConfigBuilder { config }
    }

    pub fn add_fields(mut self, fields: impl IntoIterator<Item = FieldRef>) -> Self {
        self.config.fields.extend(fields);
        self
    }

    pub fn add_join(
        mut self,
        target_table: impl Into<String>,
        join_kind: JoinKind,
        conditions: impl IntoIterator<Item = JoinCondition>,
    ) -> Self {
        self.config.joins.push(JoinSpec {
            target_table: target_table.into(),
            join_kind,
            conditions: conditions.into_iter().collect(),
        });
        self
    }

    /// Append the joins of a dashboard node/edge graph.
    pub fn add_graph(mut self, graph: &JoinGraph) -> Self {
        self.config.joins.extend(graph.to_joins());
        self
    }

    pub fn add_conditions(mut self, conditions: impl IntoIterator<Item = FilterCondition>) -> Self {
        self.config.conditions.extend(conditions);
        self
    }

    /// Only query endpoints paginate.
    pub fn enable_pagination(mut self, page_size: u32) -> Result<Self, ConfigError> {
        self.require_query("pagination")?;
        self.config.pagination = Some(Pagination {
            enabled: true,
            page_size,
        });
        Ok(self)
    }

    /// Only query endpoints sort.
    pub fn set_default_sorting(
        mut self,
        field: impl Into<String>,
        direction: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.require_query("sorting")?;
        self.config.sorting = Some(Sorting {
            enabled: true,
            default_field: Some(field.into()),
            direction: direction.into(),
        });
        Ok(self)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn build(self) -> ApiConfig {
        self.config
    }

    fn require_query(&self, feature: &str) -> Result<(), ConfigError> {
        match self.config.kind {
            Some(ApiKind::Query) => Ok(()),
            Some(kind) => Err(ConfigError::UnsupportedKind(format!("{} is only supported for query APIs, not {}", feature, kind))),
            None => Err(ConfigError::UnsupportedKind(format!("{} requires an API kind", feature))),
        }
    }
}
