//! Dashboard join graph (nodes keyed by id, edges between them) flattened into [`JoinSpec`]s.

use crate::config::{JoinCondition, JoinKind, JoinSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphTable {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdgeCondition {
    pub main_field: String,
    pub join_field: String,
}

/// Edge as drawn: `main_table_id` is the side the user dragged from, not necessarily the connected one.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub main_table_id: String,
    pub join_table_id: String,
    #[serde(default, alias = "joinType")]
    pub join_kind: JoinKind,
    #[serde(default)]
    pub conditions: Vec<GraphEdgeCondition>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGraph {
    #[serde(default)]
    pub tables: Vec<GraphTable>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl JoinGraph {
    /// Joins in edge order. Edges referencing an unknown table id are skipped.
    pub fn to_joins(&self) -> Vec<JoinSpec> {
        let names: HashMap<&str, &str> = self.tables.iter().map(|t| (t.id.as_str(), t.name.as_str())).collect();
        let mut joins = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            let (Some(source), Some(target)) = (
                names.get(edge.main_table_id.as_str()),
                names.get(edge.join_table_id.as_str()),
            ) else {
                tracing::warn!(
                    main_table_id = %edge.main_table_id,
                    join_table_id = %edge.join_table_id,
                    "skipping graph edge with unknown table"
                );
                continue;
            };
            let conditions = edge
                .conditions
                .iter()
                .map(|c| JoinCondition::new(*source, c.main_field.clone(), *target, c.join_field.clone()))
                .collect();
            joins.push(JoinSpec {
                target_table: target.to_string(),
                join_kind: edge.join_kind,
                conditions,
            });
        }
        joins
    }
}
