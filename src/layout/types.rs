//! Data structures for layout computation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::config::LayoutConfig;
use crate::graph::Node;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned box in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Smallest box around the given nodes; all zero when empty.
    pub fn around<'a>(nodes: impl IntoIterator<Item = &'a LayoutNode>) -> Self {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for node in nodes {
            min_x = min_x.min(node.x);
            min_y = min_y.min(node.y);
            max_x = max_x.max(node.x + node.width);
            max_y = max_y.max(node.y + node.height);
        }

        if min_x > max_x {
            return Self::default();
        }

        Self {
            min_x,
            min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// True when the interiors overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x()
            && other.min_x < self.max_x()
            && self.min_y < other.max_y()
            && other.min_y < self.max_y()
    }
}

/// A positioned table box. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Index into `Layout::components`
    pub component: usize,
}

/// One connected component after packing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentLayout {
    pub node_ids: Vec<String>,
    pub config: LayoutConfig,
    /// Bounds on the shared canvas
    pub bounds: Bounds,
}

/// The complete layout result.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub components: Vec<ComponentLayout>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Copy positions onto graph nodes with matching ids.
    pub fn apply(&self, nodes: &mut [Node]) {
        let positions: HashMap<&str, Point> = self
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), Point { x: n.x, y: n.y }))
            .collect();

        for node in nodes {
            if let Some(&position) = positions.get(node.id.as_str()) {
                node.position = position;
            }
        }
    }
}
