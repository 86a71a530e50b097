//! Orders user-drawn join edges into a connected JOIN sequence rooted at the main table.
//!
//! Edges may be declared in either direction and in any order. Each pass emits every
//! pending join touching an already-connected table, oriented so its source side is the
//! connected one, until a pass emits nothing. Whatever remains cannot reach the main
//! table and is dropped.

use crate::config::{JoinKind, JoinSpec};
use serde::Serialize;
use std::collections::HashSet;

/// Join condition with the source table resolved (never defaulted again downstream).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinColumns {
    pub source_table: String,
    pub source_field: String,
    pub target_table: String,
    pub target_field: String,
}

impl JoinColumns {
    fn swapped(self) -> Self {
        JoinColumns {
            source_table: self.target_table,
            source_field: self.target_field,
            target_table: self.source_table,
            target_field: self.source_field,
        }
    }
}

/// One oriented join ready for emission: `source_table` is already reachable from the main table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedJoin {
    pub source_table: String,
    pub target_table: String,
    pub join_kind: JoinKind,
    pub conditions: Vec<JoinColumns>,
}

impl NormalizedJoin {
    fn reversed(self) -> Self {
        NormalizedJoin {
            source_table: self.target_table,
            target_table: self.source_table,
            join_kind: self.join_kind.inverted(),
            conditions: self.conditions.into_iter().map(JoinColumns::swapped).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "reason")]
pub enum DropReason {
    MissingTarget,
    MissingConditions,
    IncompleteCondition { condition_index: usize },
    Unreachable,
}

/// A declared join that did not make it into the SQL, with its position in `ApiConfig::joins`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedJoin {
    pub index: usize,
    pub target_table: String,
    #[serde(flatten)]
    pub reason: DropReason,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPlan {
    pub joins: Vec<NormalizedJoin>,
    pub dropped: Vec<DroppedJoin>,
}

fn check_join(main_table: &str, join: &JoinSpec) -> Result<NormalizedJoin, DropReason> {
    if join.target_table.is_empty() {
        return Err(DropReason::MissingTarget);
    }
    if join.conditions.is_empty() {
        return Err(DropReason::MissingConditions);
    }
    let mut conditions = Vec::with_capacity(join.conditions.len());
    for (condition_index, c) in join.conditions.iter().enumerate() {
        if c.source_field.is_empty() || c.target_table.is_empty() || c.target_field.is_empty() {
            return Err(DropReason::IncompleteCondition { condition_index });
        }
        conditions.push(JoinColumns {
            source_table: c.source_table_or(main_table).to_string(),
            source_field: c.source_field.clone(),
            target_table: c.target_table.clone(),
            target_field: c.target_field.clone(),
        });
    }
    Ok(NormalizedJoin {
        source_table: conditions[0].source_table.clone(),
        target_table: join.target_table.clone(),
        join_kind: join.join_kind,
        conditions,
    })
}

pub fn normalize_joins(main_table: &str, joins: &[JoinSpec]) -> JoinPlan {
    let mut plan = JoinPlan::default();
    let mut pending: Vec<(usize, NormalizedJoin)> = Vec::with_capacity(joins.len());
    for (index, join) in joins.iter().enumerate() {
        match check_join(main_table, join) {
            Ok(edge) => pending.push((index, edge)),
            Err(reason) => plan.dropped.push(DroppedJoin {
                index,
                target_table: join.target_table.clone(),
                reason,
            }),
        }
    }

    let mut connected: HashSet<String> = HashSet::from([main_table.to_string()]);
    loop {
        let (ready, rest): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|(_, e)| connected.contains(&e.source_table) || connected.contains(&e.target_table));
        pending = rest;
        if ready.is_empty() {
            break;
        }
        let mut oriented: Vec<NormalizedJoin> = ready
            .into_iter()
            .map(|(_, e)| {
                if connected.contains(&e.source_table) {
                    e
                } else {
                    e.reversed()
                }
            })
            .collect();
        oriented.sort_by_key(|j| j.join_kind);
        for j in oriented {
            connected.insert(j.source_table.clone());
            connected.insert(j.target_table.clone());
            plan.joins.push(j);
        }
    }

    for (index, e) in pending {
        plan.dropped.push(DroppedJoin {
            index,
            target_table: e.target_table,
            reason: DropReason::Unreachable,
        });
    }
    plan.dropped.sort_by_key(|d| d.index);
    plan
}
