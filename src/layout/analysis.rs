//! Table role classification and connection counting.

use std::collections::HashMap;

use serde::Serialize;

use crate::graph::{Edge, Node};
use crate::schema::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    Core,
    Junction,
    Lookup,
    Log,
}

/// Degree and role of every node.
pub struct TableAnalysis<'a> {
    /// Node ID -> edge endpoints touching it
    pub degree: HashMap<&'a str, usize>,
    pub types: HashMap<&'a str, TableType>,
}

impl TableAnalysis<'_> {
    pub fn degree_of(&self, id: &str) -> usize {
        self.degree.get(id).copied().unwrap_or(0)
    }

    pub fn type_of(&self, id: &str) -> TableType {
        self.types.get(id).copied().unwrap_or(TableType::Core)
    }
}

const LOG_KEYWORDS: [&str; 3] = ["log", "history", "audit"];

/// Classify a table by the first matching rule, checked in this order:
/// junction, log, lookup, core.
///
/// A table that fits both the junction and the log rule (say `user_log`
/// with three foreign keys) is a junction because junction is checked first.
pub fn classify_table(table: &Table) -> TableType {
    let name = table.name.to_lowercase();
    let column_count = table.columns.len();

    if name.contains('_') && column_count <= 4 && table.foreign_key_count() > 2 {
        return TableType::Junction;
    }

    if LOG_KEYWORDS.iter().any(|k| name.contains(k)) {
        return TableType::Log;
    }

    let has_timestamps = table
        .columns
        .iter()
        .any(|c| c.name.contains("created_at") || c.name.contains("updated_at"));
    if column_count <= 5 && !has_timestamps {
        return TableType::Lookup;
    }

    TableType::Core
}

/// Count edge endpoints per node and classify every table.
pub fn analyze_tables<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> TableAnalysis<'a> {
    let mut degree: HashMap<&str, usize> = HashMap::new();
    let mut types: HashMap<&str, TableType> = HashMap::new();

    for node in nodes {
        degree.insert(node.id.as_str(), 0);
        types.insert(node.id.as_str(), classify_table(&node.table));
    }

    for edge in edges {
        *degree.entry(edge.source.as_str()).or_insert(0) += 1;
        *degree.entry(edge.target.as_str()).or_insert(0) += 1;
    }

    TableAnalysis { degree, types }
}
