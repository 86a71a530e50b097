//! WHERE predicates from filter conditions.

use crate::config::FilterCondition;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How string literals are embedded into SQL text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralMode {
    /// Embed as-is between single quotes. Matches existing callers' output; never pass untrusted input.
    #[default]
    Raw,
    /// Double embedded single quotes.
    Escaped,
}

/// A condition left out of the WHERE clause, with its position in `ApiConfig::conditions`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedCondition {
    pub index: usize,
    pub condition: FilterCondition,
}

/// The only place a literal string enters SQL text.
pub fn embed_literal(s: &str, mode: LiteralMode) -> String {
    match mode {
        LiteralMode::Raw => format!("'{}'", s),
        LiteralMode::Escaped => format!("'{}'", s.replace('\'', "''")),
    }
}

fn null_predicate(operator: &str) -> Option<&'static str> {
    match operator.trim().to_lowercase().as_str() {
        "=" | "is" => Some("IS NULL"),
        "!=" | "is not" => Some("IS NOT NULL"),
        _ => None,
    }
}

fn unquoted(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One predicate, or `None` when the condition names no field.
pub fn compile_condition(condition: &FilterCondition, main_table: &str, mode: LiteralMode) -> Option<String> {
    if condition.field.is_empty() {
        return None;
    }
    let table = match condition.table.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => main_table,
    };
    let column = format!("{}.{}", table, condition.field);
    let op = condition.operator.as_str();

    if condition.parameterized {
        return Some(format!("{} {} :{}", column, op, condition.param_name_or_field()));
    }
    let predicate = match &condition.value {
        Value::String(s) => format!("{} {} {}", column, op, embed_literal(s, mode)),
        Value::Null => match null_predicate(op) {
            Some(p) => format!("{} {}", column, p),
            None => format!("{} {} {}", column, op, unquoted(&condition.value)),
        },
        other => format!("{} {} {}", column, op, unquoted(other)),
    };
    Some(predicate)
}

/// Compiled WHERE body (without the keyword) plus the conditions that were skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WhereClause {
    pub predicates: Vec<String>,
    pub dropped: Vec<DroppedCondition>,
}

impl WhereClause {
    /// `None` when there is nothing to filter on.
    pub fn render(&self) -> Option<String> {
        if self.predicates.is_empty() {
            None
        } else {
            Some(self.predicates.join(" AND "))
        }
    }
}

pub fn compile_conditions(conditions: &[FilterCondition], main_table: &str, mode: LiteralMode) -> WhereClause {
    let mut clause = WhereClause::default();
    for (index, condition) in conditions.iter().enumerate() {
        match compile_condition(condition, main_table, mode) {
            Some(p) => clause.predicates.push(p),
            None => clause.dropped.push(DroppedCondition {
                index,
                condition: condition.clone(),
            }),
        }
    }
    clause
}
