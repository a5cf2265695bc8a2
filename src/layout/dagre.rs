//! Layered placement of one connected component, delegated to `dugong`
//! (a port of dagre).
//!
//! The adapter only translates: nodes and edges go into a
//! `graphlib::Graph`, [`LayoutConfig`] becomes the dagre graph label, and
//! the node centres come back shifted so the top-left corner of the
//! drawing sits at the configured margins.

use std::collections::{HashMap, HashSet};

use dugong::graphlib::{Graph, GraphOptions};
use dugong::{EdgeLabel, GraphLabel, NodeLabel, RankDir as DagreRankDir};

use super::config::{Align, LayoutConfig, RankDir};
use super::types::Point;

/// A node to place, in the order that breaks ties.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayeredGraph {
    pub nodes: Vec<LayeredNode>,
    /// Directed `(source, target)` pairs
    pub edges: Vec<(String, String)>,
}

/// Layered graph drawing. Returns the centre of every node keyed by id.
pub trait LayeredLayout {
    fn layout(&self, graph: &LayeredGraph, config: &LayoutConfig) -> HashMap<String, Point>;
}

/// Default [`LayeredLayout`], backed by `dugong::layout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dagre;

fn rank_dir(dir: RankDir) -> DagreRankDir {
    match dir {
        RankDir::TB => DagreRankDir::TB,
        RankDir::BT => DagreRankDir::BT,
        RankDir::LR => DagreRankDir::LR,
        RankDir::RL => DagreRankDir::RL,
    }
}

fn align_name(align: Align) -> &'static str {
    match align {
        Align::UL => "UL",
        Align::UR => "UR",
        Align::DL => "DL",
        Align::DR => "DR",
    }
}

fn graph_label(config: &LayoutConfig) -> GraphLabel {
    GraphLabel {
        rankdir: rank_dir(config.rank_dir),
        ranksep: config.rank_sep,
        nodesep: config.node_sep,
        edgesep: config.edge_sep,
        align: Some(align_name(config.align).to_string()),
        ..Default::default()
    }
}

impl Dagre {
    fn build(graph: &LayeredGraph, config: &LayoutConfig) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
        let mut g = Graph::<NodeLabel, EdgeLabel, GraphLabel>::new(GraphOptions {
            directed: true,
            multigraph: true,
            compound: false,
        });
        g.set_graph(graph_label(config));

        for node in &graph.nodes {
            g.set_node(
                node.id.clone(),
                NodeLabel {
                    width: node.width,
                    height: node.height,
                    ..Default::default()
                },
            );
        }

        // Self-loops carry no rank information; dangling endpoints would
        // otherwise be created as zero-sized nodes.
        let known: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for (i, (source, target)) in graph.edges.iter().enumerate() {
            if source == target || !known.contains(source.as_str()) || !known.contains(target.as_str()) {
                continue;
            }
            g.set_edge_named(
                source.clone(),
                target.clone(),
                Some(format!("e{}", i)),
                Some(EdgeLabel {
                    minlen: 1,
                    weight: 1.0,
                    ..Default::default()
                }),
            );
        }

        g
    }
}

impl LayeredLayout for Dagre {
    fn layout(&self, graph: &LayeredGraph, config: &LayoutConfig) -> HashMap<String, Point> {
        if graph.nodes.is_empty() {
            return HashMap::new();
        }

        let mut g = Self::build(graph, config);
        dugong::layout(&mut g);

        let centres: Vec<(&LayeredNode, Point)> = graph
            .nodes
            .iter()
            .map(|node| {
                let point = g
                    .node(&node.id)
                    .map(|n| Point {
                        x: n.x.unwrap_or(0.0),
                        y: n.y.unwrap_or(0.0),
                    })
                    .unwrap_or_default();
                (node, point)
            })
            .collect();

        let min_x = centres
            .iter()
            .map(|(n, p)| p.x - n.width / 2.0)
            .fold(f64::INFINITY, f64::min);
        let min_y = centres
            .iter()
            .map(|(n, p)| p.y - n.height / 2.0)
            .fold(f64::INFINITY, f64::min);
        let dx = config.margin_x - min_x;
        let dy = config.margin_y - min_y;

        centres
            .into_iter()
            .map(|(node, p)| {
                (
                    node.id.clone(),
                    Point {
                        x: p.x + dx,
                        y: p.y + dy,
                    },
                )
            })
            .collect()
    }
}
