use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::highlight::{EdgeStyle, HighlightState};
use crate::layout::{Point, Size};
use crate::measure::TextMetrics;
use crate::schema::{Relation, Schema, Table};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphModel {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// One table box. `id` is the table name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub table: Table,
    pub position: Point,
    pub size: Size,
    pub highlight: HighlightState,
}

/// A foreign key drawn from the referencing column to the referenced column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
    pub highlighted: bool,
    pub style: EdgeStyle,
}

impl Edge {
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

pub fn edge_id(relation: &Relation) -> String {
    format!(
        "{}_{}_{}_{}",
        relation.referencing_table,
        relation.referencing_column,
        relation.referenced_table,
        relation.referenced_column
    )
}

impl GraphModel {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Build nodes (input order) and edges from a schema.
    ///
    /// Relations whose referencing or referenced table is not a node are
    /// dropped. A repeated table name keeps its first occurrence.
    pub fn build(schema: &Schema, metrics: &TextMetrics) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut nodes = Vec::with_capacity(schema.tables.len());

        for table in &schema.tables {
            if !seen.insert(table.name.as_str()) {
                warn!(table = %table.name, "duplicate table name, keeping first occurrence");
                continue;
            }
            nodes.push(Node {
                id: table.name.clone(),
                table: table.clone(),
                position: Point::default(),
                size: metrics.node_size(table.columns.len()),
                highlight: HighlightState::None,
            });
        }

        let edges = schema
            .relations
            .iter()
            .filter(|r| {
                let present = seen.contains(r.referencing_table.as_str())
                    && seen.contains(r.referenced_table.as_str());
                if !present {
                    warn!(
                        from = %r.referencing_table,
                        to = %r.referenced_table,
                        "dropping relation with a missing table"
                    );
                }
                present
            })
            .map(|r| Edge {
                id: edge_id(r),
                source: r.referencing_table.clone(),
                target: r.referenced_table.clone(),
                source_handle: r.referencing_column.clone(),
                target_handle: r.referenced_column.clone(),
                highlighted: false,
                style: EdgeStyle::default(),
            })
            .collect();

        GraphModel { nodes, edges }
    }
}
