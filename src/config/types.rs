//! Raw API builder config types matching the dashboard's JSON (camelCase keys).

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// What the compiled endpoint does. Unknown kinds deserialize to `Unsupported` and fail at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    Query,
    Insert,
    #[serde(other)]
    Unsupported,
}

impl ApiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKind::Query => "query",
            ApiKind::Insert => "insert",
            ApiKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL join kind. Declaration order is also the emission priority within one normalization pass.
/// Deserializes through [`JoinKind::parse`], so "LEFT" and "left join" load the same as "left".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// Kind to use when source and target swap sides. LEFT and RIGHT trade places; INNER and FULL are symmetric.
    pub fn inverted(self) -> Self {
        match self {
            JoinKind::Left => JoinKind::Right,
            JoinKind::Right => JoinKind::Left,
            other => other,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
        }
    }

    /// Parses "left", "LEFT", "left join", "full outer" and the like.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let head = lower.split_whitespace().next().unwrap_or("");
        match head {
            "inner" => Some(JoinKind::Inner),
            "left" => Some(JoinKind::Left),
            "right" => Some(JoinKind::Right),
            "full" => Some(JoinKind::Full),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for JoinKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        JoinKind::parse(&raw).ok_or_else(|| de::Error::custom(format!("unknown join kind `{}`", raw)))
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRef {
    /// Owning table; main table when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Parameter type exposed by insert endpoints.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        FieldRef {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn on_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// One equality between a column on the source side and a column on the target side.
/// Missing string fields deserialize as empty and are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_table: Option<String>,
    #[serde(default)]
    pub source_field: String,
    #[serde(default)]
    pub target_table: String,
    #[serde(default)]
    pub target_field: String,
}

impl JoinCondition {
    pub fn new(
        source_table: impl Into<String>,
        source_field: impl Into<String>,
        target_table: impl Into<String>,
        target_field: impl Into<String>,
    ) -> Self {
        JoinCondition {
            source_table: Some(source_table.into()),
            source_field: source_field.into(),
            target_table: target_table.into(),
            target_field: target_field.into(),
        }
    }

    /// Source table after defaulting to the main table.
    pub fn source_table_or<'a>(&'a self, main_table: &'a str) -> &'a str {
        match self.source_table.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => main_table,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSpec {
    #[serde(default)]
    pub target_table: String,
    #[serde(default, alias = "joinType")]
    pub join_kind: JoinKind,
    #[serde(default)]
    pub conditions: Vec<JoinCondition>,
}

fn default_operator() -> String {
    "=".into()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default)]
    pub field: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub parameterized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for FilterCondition {
    fn default() -> Self {
        FilterCondition {
            table: None,
            field: String::new(),
            operator: default_operator(),
            value: Value::Null,
            parameterized: false,
            param_name: None,
            param_type: None,
            required: None,
            default_value: None,
            description: None,
        }
    }
}

impl FilterCondition {
    /// Literal condition: `field <operator> value`.
    pub fn literal(field: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        FilterCondition {
            field: field.into(),
            operator: operator.into(),
            value,
            ..Default::default()
        }
    }

    /// Parameterized condition bound at execution time as `:param_name`.
    pub fn param(field: impl Into<String>, operator: impl Into<String>, param_name: impl Into<String>) -> Self {
        FilterCondition {
            field: field.into(),
            operator: operator.into(),
            parameterized: true,
            param_name: Some(param_name.into()),
            ..Default::default()
        }
    }

    pub fn on_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Placeholder name; the field name when no explicit name was given.
    pub fn param_name_or_field(&self) -> &str {
        match self.param_name.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => &self.field,
        }
    }
}

fn default_page_size() -> u32 {
    10
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_direction() -> String {
    "asc".into()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sorting {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub default_field: Option<String>,
    #[serde(default = "default_direction")]
    pub direction: String,
}

/// Complete description of one endpoint. Built with [`crate::config::ApiConfigBuilder`] or loaded from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "type")]
    pub kind: Option<ApiKind>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub main_table: String,
    #[serde(default)]
    pub fields: Vec<FieldRef>,
    #[serde(default)]
    pub joins: Vec<JoinSpec>,
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub sorting: Option<Sorting>,
}

impl ApiConfig {
    pub fn pagination_enabled(&self) -> bool {
        self.pagination.as_ref().map(|p| p.enabled).unwrap_or(false)
    }

    pub fn sorting_enabled(&self) -> bool {
        self.sorting.as_ref().map(|s| s.enabled).unwrap_or(false)
    }
}
