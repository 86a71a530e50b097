//! Recovers the main table and JOIN clauses from generated SQL, for redrawing a saved query as a graph.

use crate::config::{JoinCondition, JoinKind};
use regex::Regex;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedJoin {
    pub join_kind: JoinKind,
    pub target_table: String,
    pub conditions: Vec<JoinCondition>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinInfo {
    pub main_table: String,
    pub joins: Vec<ExtractedJoin>,
}

/// `None` when the text has no `FROM <table>`.
pub fn extract_join_info_from_sql(sql: &str) -> Option<JoinInfo> {
    let from_re = Regex::new(r"(?i)\bFROM\s+([A-Za-z_][\w.]*)").ok()?;
    let join_re = Regex::new(r"(?i)\b(INNER|LEFT|RIGHT|FULL)(?:\s+OUTER)?\s+JOIN\s+([A-Za-z_][\w.]*)\s+ON\s+").ok()?;
    let end_re = Regex::new(r"(?i)\s+(?:WHERE|GROUP\s+BY|ORDER\s+BY|LIMIT)\b").ok()?;
    let cond_re = Regex::new(r"([A-Za-z_]\w*)\.([A-Za-z_]\w*)\s*=\s*([A-Za-z_]\w*)\.([A-Za-z_]\w*)").ok()?;

    let main_table = from_re.captures(sql)?.get(1)?.as_str().to_string();

    let matches: Vec<_> = join_re.captures_iter(sql).collect();
    let mut joins = Vec::with_capacity(matches.len());
    for (i, caps) in matches.iter().enumerate() {
        let (Some(whole), Some(kind), Some(target)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let Some(join_kind) = JoinKind::parse(kind.as_str()) else {
            continue;
        };
        let on_start = whole.end();
        let next_join = matches
            .get(i + 1)
            .and_then(|c| c.get(0))
            .map(|m| m.start())
            .unwrap_or(sql.len());
        let on_end = end_re
            .find_at(sql, on_start)
            .map(|m| m.start().min(next_join))
            .unwrap_or(next_join);
        let on_clause = &sql[on_start..on_end];
        let conditions = cond_re
            .captures_iter(on_clause)
            .map(|c| JoinCondition::new(&c[1], &c[2], &c[3], &c[4]))
            .collect();
        joins.push(ExtractedJoin {
            join_kind,
            target_table: target.as_str().to_string(),
            conditions,
        });
    }

    Some(JoinInfo { main_table, joins })
}
