//! Layout engine core implementation.

use std::collections::HashSet;

use tracing::debug;

use crate::graph::{Edge, GraphModel, Node};

use super::analysis::analyze_tables;
use super::components::group_components;
use super::config::{LayoutSettings, final_config};
use super::ordering::order_component;
use super::packing::ComponentPacker;
use super::dagre::{Dagre, LayeredGraph, LayeredLayout, LayeredNode};
use super::types::{Bounds, ComponentLayout, Layout, LayoutNode};

/// Layout engine configuration and computation.
pub struct LayoutEngine {
    pub(crate) settings: LayoutSettings,
    pub(crate) delegate: Box<dyn LayeredLayout>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}

impl LayoutEngine {
    pub fn new(settings: LayoutSettings) -> Self {
        Self::with_delegate(settings, Box::new(Dagre))
    }

    /// Use another layered layout implementation for per-component placement.
    pub fn with_delegate(settings: LayoutSettings, delegate: Box<dyn LayeredLayout>) -> Self {
        Self { settings, delegate }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Compute layout for the given graph.
    pub fn layout(&self, graph: &GraphModel) -> Layout {
        if graph.nodes.is_empty() {
            return Layout::default();
        }

        // Phase 1: Table roles and degree
        let analysis = analyze_tables(&graph.nodes, &graph.edges);

        // Phase 2: Connected components, largest first
        let components = group_components(&graph.nodes, &graph.edges);

        let mut packer = ComponentPacker::new(&self.settings.thresholds);
        let mut layout = Layout::default();

        for (index, member_ids) in components.iter().enumerate() {
            let members: HashSet<&str> = member_ids.iter().map(String::as_str).collect();
            let component_nodes: Vec<&Node> = graph
                .nodes
                .iter()
                .filter(|n| members.contains(n.id.as_str()))
                .collect();
            let component_edges: Vec<&Edge> = graph
                .edges
                .iter()
                .filter(|e| members.contains(e.source.as_str()) && members.contains(e.target.as_str()))
                .collect();

            // Phase 3: Role-layer ordering
            let ordered = order_component(&component_nodes, &analysis);

            // Phase 4: Density-adaptive parameters
            let config = final_config(
                &self.settings,
                graph.nodes.len(),
                graph.edges.len(),
                &ordered,
                component_edges.len(),
            );

            // Phase 5: Layered placement (centres -> top-left corners)
            let input = LayeredGraph {
                nodes: ordered
                    .iter()
                    .map(|n| LayeredNode {
                        id: n.id.clone(),
                        width: n.size.width,
                        height: n.size.height,
                    })
                    .collect(),
                edges: component_edges
                    .iter()
                    .map(|e| (e.source.clone(), e.target.clone()))
                    .collect(),
            };
            let centres = self.delegate.layout(&input, &config);

            let mut nodes: Vec<LayoutNode> = ordered
                .iter()
                .map(|n| {
                    let centre = centres.get(&n.id).copied().unwrap_or_default();
                    LayoutNode {
                        id: n.id.clone(),
                        x: centre.x - n.size.width / 2.0,
                        y: centre.y - n.size.height / 2.0,
                        width: n.size.width,
                        height: n.size.height,
                        component: index,
                    }
                })
                .collect();

            // Phase 6: Pack onto the shared canvas
            let local = Bounds::around(&nodes);
            let shift = packer.place(&local);
            for node in &mut nodes {
                node.x += shift.x;
                node.y += shift.y;
            }

            debug!(
                component = index,
                nodes = nodes.len(),
                edges = component_edges.len(),
                rank_dir = ?config.rank_dir,
                rank_sep = config.rank_sep,
                node_sep = config.node_sep,
                "placed component"
            );

            layout.components.push(ComponentLayout {
                node_ids: ordered.iter().map(|n| n.id.clone()).collect(),
                config,
                bounds: Bounds {
                    min_x: local.min_x + shift.x,
                    min_y: local.min_y + shift.y,
                    ..local
                },
            });
            layout.nodes.extend(nodes);
        }

        layout.width = layout
            .components
            .iter()
            .map(|c| c.bounds.max_x())
            .fold(0.0, f64::max);
        layout.height = layout
            .components
            .iter()
            .map(|c| c.bounds.max_y())
            .fold(0.0, f64::max);

        layout
    }
}
