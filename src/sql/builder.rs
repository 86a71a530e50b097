//! Builds SELECT and INSERT statements from an [`ApiConfig`]. Values never appear in the text
//! except through [`embed_literal`]; everything else is a `:name` placeholder bound by the caller.

use crate::config::{ApiConfig, ApiKind, FieldRef, Sorting};
use crate::error::ConfigError;
use crate::sql::{compile_conditions, normalize_joins, DroppedCondition, DroppedJoin, LiteralMode, NormalizedJoin};
use serde::{Deserialize, Serialize};

/// What to do with joins and conditions that cannot be compiled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipPolicy {
    /// Leave them out and report them on [`CompiledSql`].
    #[default]
    Lenient,
    /// Fail with [`ConfigError::Dropped`].
    Strict,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOptions {
    #[serde(default)]
    pub literal_mode: LiteralMode,
    #[serde(default)]
    pub skip_policy: SkipPolicy,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledSql {
    pub sql: String,
    /// Placeholder names (without the colon) in order of first appearance.
    pub placeholders: Vec<String>,
    pub dropped_joins: Vec<DroppedJoin>,
    pub dropped_conditions: Vec<DroppedCondition>,
}

impl CompiledSql {
    fn push_placeholder(&mut self, name: &str) -> String {
        if !self.placeholders.iter().any(|p| p == name) {
            self.placeholders.push(name.to_string());
        }
        format!(":{}", name)
    }
}

fn field_table<'a>(field: &'a FieldRef, main_table: &'a str) -> &'a str {
    match field.table.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => main_table,
    }
}

fn select_column(field: &FieldRef, main_table: &str) -> String {
    let col = format!("{}.{}", field_table(field, main_table), field.name);
    match field.alias.as_deref() {
        Some(alias) if !alias.is_empty() => format!("{} AS {}", col, alias),
        _ => col,
    }
}

fn join_clause(join: &NormalizedJoin) -> String {
    let on = join
        .conditions
        .iter()
        .map(|c| format!("{}.{} = {}.{}", c.source_table, c.source_field, c.target_table, c.target_field))
        .collect::<Vec<_>>()
        .join(" AND ");
    format!("{} JOIN {} ON {}", join.join_kind.keyword(), join.target_table, on)
}

/// `ORDER BY` body, or `None` when sorting is off or has no field. Unqualified fields belong to the main table.
fn order_by(sorting: &Sorting, main_table: &str) -> Option<String> {
    if !sorting.enabled {
        return None;
    }
    let field = sorting.default_field.as_deref().filter(|f| !f.is_empty())?;
    let column = if field.contains('.') {
        field.to_string()
    } else {
        format!("{}.{}", main_table, field)
    };
    let direction = match sorting.direction.trim().to_uppercase().as_str() {
        "DESC" => "DESC",
        _ => "ASC",
    };
    Some(format!("{} {}", column, direction))
}

fn compile_query(config: &ApiConfig, options: &CompileOptions) -> CompiledSql {
    let mut out = CompiledSql::default();
    let main = config.main_table.as_str();

    let select_list = if config.fields.is_empty() {
        "*".to_string()
    } else {
        config
            .fields
            .iter()
            .map(|f| select_column(f, main))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut sql = format!("SELECT {} FROM {}", select_list, main);

    let plan = normalize_joins(main, &config.joins);
    for join in &plan.joins {
        sql.push(' ');
        sql.push_str(&join_clause(join));
    }
    out.dropped_joins = plan.dropped;

    let where_clause = compile_conditions(&config.conditions, main, options.literal_mode);
    for c in config.conditions.iter().filter(|c| c.parameterized && !c.field.is_empty()) {
        out.push_placeholder(c.param_name_or_field());
    }
    if let Some(body) = where_clause.render() {
        sql.push_str(" WHERE ");
        sql.push_str(&body);
    }
    out.dropped_conditions = where_clause.dropped;

    if let Some(order) = config.sorting.as_ref().and_then(|s| order_by(s, main)) {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order);
    }
    if config.pagination_enabled() {
        let limit = out.push_placeholder("limit");
        let offset = out.push_placeholder("offset");
        sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
    }

    out.sql = sql;
    out
}

/// Joins, conditions, sorting, and pagination are never consulted for inserts.
fn compile_insert(config: &ApiConfig) -> CompiledSql {
    let mut out = CompiledSql::default();
    let cols: Vec<&str> = config.fields.iter().map(|f| f.name.as_str()).collect();
    let placeholders: Vec<String> = cols.iter().map(|c| out.push_placeholder(c)).collect();
    out.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        config.main_table,
        cols.join(", "),
        placeholders.join(", ")
    );
    out
}

pub fn compile_sql(config: &ApiConfig, options: &CompileOptions) -> Result<CompiledSql, ConfigError> {
    let compiled = match config.kind {
        Some(ApiKind::Query) => compile_query(config, options),
        Some(ApiKind::Insert) => compile_insert(config),
        Some(kind) => return Err(ConfigError::UnsupportedKind(kind.to_string())),
        None => return Err(ConfigError::UnsupportedKind("none".into())),
    };

    for d in &compiled.dropped_joins {
        tracing::warn!(api = %config.name, index = d.index, target = %d.target_table, reason = ?d.reason, "join dropped");
    }
    for d in &compiled.dropped_conditions {
        tracing::warn!(api = %config.name, index = d.index, "condition without field dropped");
    }
    if options.skip_policy == SkipPolicy::Strict
        && (!compiled.dropped_joins.is_empty() || !compiled.dropped_conditions.is_empty())
    {
        return Err(ConfigError::Dropped {
            joins: compiled.dropped_joins.len(),
            conditions: compiled.dropped_conditions.len(),
        });
    }

    tracing::debug!(api = %config.name, sql = %compiled.sql, "compiled");
    Ok(compiled)
}

/// SQL text with default options.
pub fn generate_sql(config: &ApiConfig) -> Result<String, ConfigError> {
    compile_sql(config, &CompileOptions::default()).map(|c| c.sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfigBuilder, FilterCondition, JoinCondition, JoinKind, JoinSpec};
    use serde_json::{json, Value};

    fn users_query() -> ApiConfigBuilder {
        ApiConfigBuilder::new("list_users", ApiKind::Query, "", "users")
            .add_fields([FieldRef::new("id"), FieldRef::new("name")])
    }

    #[test]
    fn plain_select() {
        let sql = generate_sql(&users_query().build()).unwrap();
        assert_eq!(sql, "SELECT users.id, users.name FROM users");
    }

    #[test]
    fn aliases_and_foreign_tables_in_select_list() {
        let cfg = ApiConfigBuilder::new("q", ApiKind::Query, "", "users")
            .add_fields([
                FieldRef::new("id").with_alias("user_id"),
                FieldRef::new("total").on_table("orders"),
            ])
            .build();
        assert_eq!(
            generate_sql(&cfg).unwrap(),
            "SELECT users.id AS user_id, orders.total FROM users"
        );
    }

    #[test]
    fn left_join_clause() {
        let cfg = users_query()
            .add_join(
                "orders",
                JoinKind::Left,
                [JoinCondition::new("users", "id", "orders", "user_id")],
            )
            .build();
        let sql = generate_sql(&cfg).unwrap();
        assert_eq!(
            sql,
            "SELECT users.id, users.name FROM users LEFT JOIN orders ON users.id = orders.user_id"
        );
    }

    #[test]
    fn multi_condition_join_uses_and() {
        let cfg = users_query()
            .add_join(
                "memberships",
                JoinKind::Inner,
                [
                    JoinCondition::new("users", "id", "memberships", "user_id"),
                    JoinCondition::new("users", "org_id", "memberships", "org_id"),
                ],
            )
            .build();
        assert!(generate_sql(&cfg).unwrap().ends_with(
            "INNER JOIN memberships ON users.id = memberships.user_id AND users.org_id = memberships.org_id"
        ));
    }

    #[test]
    fn reversed_left_join_emits_right_join() {
        let cfg = users_query()
            .add_join(
                "users",
                JoinKind::Left,
                [JoinCondition::new("orders", "user_id", "users", "id")],
            )
            .build();
        assert!(generate_sql(&cfg)
            .unwrap()
            .ends_with("FROM users RIGHT JOIN orders ON users.id = orders.user_id"));
    }

    #[test]
    fn where_order_limit_in_sequence() {
        let cfg = users_query()
            .add_conditions([
                FilterCondition::literal("status", "=", Value::Null),
                FilterCondition::param("email", "=", "email"),
            ])
            .enable_pagination(20)
            .and_then(|b| b.set_default_sorting("created_at", "desc"))
            .unwrap()
            .build();
        let compiled = compile_sql(&cfg, &CompileOptions::default()).unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT users.id, users.name FROM users WHERE users.status IS NULL AND users.email = :email \
             ORDER BY users.created_at DESC LIMIT :limit OFFSET :offset"
        );
        assert_eq!(compiled.placeholders, vec!["email", "limit", "offset"]);
    }

    #[test]
    fn invalid_direction_defaults_to_asc() {
        let cfg = users_query()
            .set_default_sorting("orders.total", "sideways")
            .unwrap()
            .build();
        assert!(generate_sql(&cfg).unwrap().ends_with("ORDER BY orders.total ASC"));
    }

    #[test]
    fn sorting_without_field_is_skipped() {
        let mut cfg = users_query().build();
        cfg.sorting = Some(Sorting {
            enabled: true,
            default_field: None,
            direction: "desc".into(),
        });
        assert!(!generate_sql(&cfg).unwrap().contains("ORDER BY"));
    }

    #[test]
    fn insert_statement() {
        let cfg = ApiConfigBuilder::new("create_user", ApiKind::Insert, "", "users")
            .add_fields([FieldRef::new("email"), FieldRef::new("name").with_alias("full_name")])
            .add_conditions([FilterCondition::literal("status", "=", json!("x"))])
            .build();
        let compiled = compile_sql(&cfg, &CompileOptions::default()).unwrap();
        assert_eq!(compiled.sql, "INSERT INTO users (email, name) VALUES (:email, :name)");
        assert_eq!(compiled.placeholders, vec!["email", "name"]);
    }

    #[test]
    fn insert_ignores_joins() {
        let mut cfg = ApiConfigBuilder::new("create_user", ApiKind::Insert, "", "users")
            .add_fields([FieldRef::new("email")])
            .build();
        cfg.joins.push(JoinSpec {
            target_table: "orders".into(),
            join_kind: JoinKind::Inner,
            conditions: vec![JoinCondition::new("users", "id", "orders", "user_id")],
        });
        assert_eq!(generate_sql(&cfg).unwrap(), "INSERT INTO users (email) VALUES (:email)");
    }

    #[test]
    fn unsupported_kind_fails() {
        let mut cfg = users_query().build();
        cfg.kind = Some(ApiKind::Unsupported);
        assert!(matches!(generate_sql(&cfg), Err(ConfigError::UnsupportedKind(_))));
        cfg.kind = None;
        assert!(matches!(generate_sql(&cfg), Err(ConfigError::UnsupportedKind(_))));
    }

    #[test]
    fn lenient_reports_dropped_items() {
        let cfg = users_query()
            .add_join(
                "warehouses",
                JoinKind::Inner,
                [JoinCondition::new("products", "wh_id", "warehouses", "id")],
            )
            .add_conditions([FilterCondition::literal("", "=", json!(1))])
            .build();
        let compiled = compile_sql(&cfg, &CompileOptions::default()).unwrap();
        assert_eq!(compiled.sql, "SELECT users.id, users.name FROM users");
        assert_eq!(compiled.dropped_joins.len(), 1);
        assert_eq!(compiled.dropped_conditions.len(), 1);
    }

    #[test]
    fn strict_rejects_dropped_items() {
        let cfg = users_query()
            .add_conditions([FilterCondition::literal("", "=", json!(1))])
            .build();
        let options = CompileOptions {
            skip_policy: SkipPolicy::Strict,
            ..Default::default()
        };
        let err = compile_sql(&cfg, &options).unwrap_err();
        assert!(matches!(err, ConfigError::Dropped { joins: 0, conditions: 1 }));
    }

    #[test]
    fn compilation_is_deterministic() {
        let cfg = users_query()
            .add_join("a", JoinKind::Full, [JoinCondition::new("users", "id", "a", "uid")])
            .add_join("b", JoinKind::Inner, [JoinCondition::new("users", "id", "b", "uid")])
            .build();
        assert_eq!(generate_sql(&cfg).unwrap(), generate_sql(&cfg.clone()).unwrap());
    }

    #[test]
    fn query_never_emits_insert() {
        let sql = generate_sql(&users_query().build()).unwrap();
        assert!(!sql.contains("INSERT"));
    }
}
