//! Hover/selection emphasis over the current node and edge arrays.
//!
//! [`highlight`] is a pure function of its inputs: the adjacency map is
//! rebuilt on every call and nothing from a previous trigger survives.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HighlightState {
    #[default]
    None,
    Hovered,
    Active,
}

/// What triggered the recomputation. Ids that match no node match nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trigger {
    pub active: Option<String>,
    pub hover: Option<String>,
}

impl Trigger {
    pub fn hover(id: impl Into<String>) -> Self {
        Self {
            active: None,
            hover: Some(id.into()),
        }
    }

    pub fn active(id: impl Into<String>) -> Self {
        Self {
            active: Some(id.into()),
            hover: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub z_index: i32,
    pub animated: bool,
    pub selectable: bool,
}

impl EdgeStyle {
    pub const HIGHLIGHTED: EdgeStyle = EdgeStyle {
        stroke: "hsl(var(--primary))",
        stroke_width: 2.0,
        z_index: 1000,
        animated: false,
        selectable: false,
    };

    pub const NORMAL: EdgeStyle = EdgeStyle {
        stroke: "var(--foreground)",
        stroke_width: 1.0,
        z_index: 1,
        animated: true,
        selectable: false,
    };
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self::NORMAL
    }
}

type Adjacency<'a> = HashMap<&'a str, HashSet<&'a str>>;

fn build_adjacency(edges: &[Edge]) -> Adjacency<'_> {
    let mut adjacency: Adjacency = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .insert(edge.target.as_str());
        adjacency
            .entry(edge.target.as_str())
            .or_default()
            .insert(edge.source.as_str());
    }
    adjacency
}

fn is_neighbor(adjacency: &Adjacency, center: Option<&str>, id: &str) -> bool {
    center
        .and_then(|c| adjacency.get(c))
        .is_some_and(|neighbors| neighbors.contains(id))
}

fn node_state(adjacency: &Adjacency, trigger: &Trigger, id: &str) -> HighlightState {
    let active = trigger.active.as_deref();
    let hover = trigger.hover.as_deref();

    if active == Some(id) {
        HighlightState::Active
    } else if is_neighbor(adjacency, active, id)
        || hover == Some(id)
        || is_neighbor(adjacency, hover, id)
    {
        HighlightState::Hovered
    } else {
        HighlightState::None
    }
}

fn edge_highlighted(edge: &Edge, trigger: &Trigger) -> bool {
    [trigger.active.as_deref(), trigger.hover.as_deref()]
        .into_iter()
        .flatten()
        .any(|id| edge.touches(id))
}

/// Recompute every node state and edge style from `trigger`.
pub fn highlight(nodes: &[Node], edges: &[Edge], trigger: &Trigger) -> (Vec<Node>, Vec<Edge>) {
    let adjacency = build_adjacency(edges);

    let nodes = nodes
        .iter()
        .map(|node| Node {
            highlight: node_state(&adjacency, trigger, &node.id),
            ..node.clone()
        })
        .collect();

    let edges = edges
        .iter()
        .map(|edge| {
            let highlighted = edge_highlighted(edge, trigger);
            Edge {
                highlighted,
                style: if highlighted {
                    EdgeStyle::HIGHLIGHTED
                } else {
                    EdgeStyle::NORMAL
                },
                ..edge.clone()
            }
        })
        .collect();

    (nodes, edges)
}
