//! Owner of the node and edge arrays a rendering surface draws.
//!
//! Pointer events update the [`Trigger`] and rerun [`highlight`] over the
//! whole graph. Layout results are accepted only for the most recent
//! request; anything older is rejected instead of merged.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{Edge, GraphModel, Node};
use crate::highlight::{Trigger, highlight};
use crate::layout::{Layout, LayoutEngine};
use crate::measure::TextMetrics;
use crate::schema::Schema;

/// Identifies one layout request. Only the newest ticket can be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutTicket {
    generation: u64,
}

impl LayoutTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Positioned graph as handed to a rendering surface.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
    pub width: f64,
    pub height: f64,
}

pub struct DiagramSession {
    engine: LayoutEngine,
    metrics: TextMetrics,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    layout: Layout,
    trigger: Trigger,
    generation: u64,
}

impl Default for DiagramSession {
    fn default() -> Self {
        Self::new(LayoutEngine::default(), TextMetrics::default())
    }
}

impl DiagramSession {
    pub fn new(engine: LayoutEngine, metrics: TextMetrics) -> Self {
        Self {
            engine,
            metrics,
            nodes: Vec::new(),
            edges: Vec::new(),
            layout: Layout::default(),
            trigger: Trigger::default(),
            generation: 0,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            nodes: &self.nodes,
            edges: &self.edges,
            width: self.layout.width,
            height: self.layout.height,
        }
    }

    pub fn pointer_enter(&mut self, id: &str) {
        self.trigger.hover = Some(id.to_string());
        self.refresh();
    }

    pub fn pointer_leave(&mut self) {
        self.trigger.hover = None;
        self.refresh();
    }

    pub fn select(&mut self, id: &str) {
        self.trigger.active = Some(id.to_string());
        self.refresh();
    }

    /// Drop the selection. A hovered node stays hovered.
    pub fn clear(&mut self) {
        self.trigger.active = None;
        self.refresh();
    }

    pub fn set_trigger(&mut self, trigger: Trigger) {
        self.trigger = trigger;
        self.refresh();
    }

    /// Start a layout request, superseding every earlier one.
    pub fn submit(&mut self) -> LayoutTicket {
        self.generation += 1;
        debug!(generation = self.generation, "layout requested");
        LayoutTicket {
            generation: self.generation,
        }
    }

    /// Build the graph for `schema` and lay it out. Does not touch the
    /// session state.
    pub fn compute(&self, schema: &Schema) -> (GraphModel, Layout) {
        let graph = GraphModel::build(schema, &self.metrics);
        let layout = self.engine.layout(&graph);
        (graph, layout)
    }

    /// Replace the graph with a finished layout result.
    ///
    /// Fails with [`Error::StaleLayout`] when a newer request was submitted
    /// after `ticket`. On success the trigger is reset.
    pub fn apply(&mut self, ticket: LayoutTicket, graph: GraphModel, layout: Layout) -> Result<()> {
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale layout"
            );
            return Err(Error::StaleLayout {
                ticket: ticket.generation,
                current: self.generation,
            });
        }

        let GraphModel { mut nodes, edges } = graph;
        layout.apply(&mut nodes);
        self.nodes = nodes;
        self.edges = edges;
        self.layout = layout;
        self.trigger = Trigger::default();
        self.refresh();
        Ok(())
    }

    /// Submit, compute and apply in one step.
    pub fn load(&mut self, schema: &Schema) {
        let ticket = self.submit();
        let (graph, layout) = self.compute(schema);
        // the ticket was just issued, so it is current
        if let Err(err) = self.apply(ticket, graph, layout) {
            warn!(%err, "layout not applied");
        }
    }

    fn refresh(&mut self) {
        let (nodes, edges) = highlight(&self.nodes, &self.edges, &self.trigger);
        self.nodes = nodes;
        self.edges = edges;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::HighlightState;
    use crate::layout::Point;
    use crate::schema::{Column, Relation, Table};

    fn schema(tables: &[&str], relations: &[(&str, &str)]) -> Schema {
        Schema::new(
            tables
                .iter()
                .map(|t| Table {
                    name: t.to_string(),
                    columns: vec![Column {
                        name: "id".to_string(),
                        is_primary_key: true,
                        ..Default::default()
                    }],
                })
                .collect(),
            relations
                .iter()
                .map(|(from, to)| Relation {
                    referencing_table: from.to_string(),
                    referencing_column: format!("{}_id", to),
                    referenced_table: to.to_string(),
                    referenced_column: "id".to_string(),
                })
                .collect(),
        )
    }

    fn state(session: &DiagramSession, id: &str) -> HighlightState {
        session
            .nodes()
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.highlight)
            .unwrap_or_default()
    }

    #[test]
    fn test_load_positions_nodes() {
        let mut session = DiagramSession::default();
        session.load(&schema(&["orders", "customers"], &[("orders", "customers")]));

        assert_eq!(session.nodes().len(), 2);
        assert_eq!(session.edges().len(), 1);
        for node in session.nodes() {
            let placed = session.layout().node(&node.id).unwrap();
            assert_eq!(node.position, Point { x: placed.x, y: placed.y });
        }
    }

    #[test]
    fn test_pointer_events() {
        let mut session = DiagramSession::default();
        session.load(&schema(
            &["orders", "customers", "products"],
            &[("orders", "customers")],
        ));

        session.pointer_enter("customers");
        assert_eq!(state(&session, "customers"), HighlightState::Hovered);
        assert_eq!(state(&session, "orders"), HighlightState::Hovered);
        assert_eq!(state(&session, "products"), HighlightState::None);
        assert!(session.edges()[0].highlighted);

        session.pointer_leave();
        assert!(session.nodes().iter().all(|n| n.highlight == HighlightState::None));
        assert!(!session.edges()[0].highlighted);
    }

    #[test]
    fn test_select_then_clear_keeps_hover() {
        let mut session = DiagramSession::default();
        session.load(&schema(&["a", "b", "c"], &[("a", "b")]));

        session.pointer_enter("c");
        session.select("a");
        assert_eq!(state(&session, "a"), HighlightState::Active);
        assert_eq!(state(&session, "b"), HighlightState::Hovered);
        assert_eq!(state(&session, "c"), HighlightState::Hovered);

        session.clear();
        assert_eq!(state(&session, "a"), HighlightState::None);
        assert_eq!(state(&session, "c"), HighlightState::Hovered);
    }

    #[test]
    fn test_newest_layout_wins() {
        let mut session = DiagramSession::default();
        let first = session.submit();
        let old = session.compute(&schema(&["old"], &[]));
        let second = session.submit();
        let new = session.compute(&schema(&["new_a", "new_b"], &[]));
        assert_eq!((first.generation(), second.generation()), (1, 2));

        match session.apply(first, old.0, old.1) {
            Err(Error::StaleLayout { ticket, current }) => {
                assert_eq!(ticket, first.generation());
                assert_eq!(current, second.generation());
            }
            other => panic!("expected a stale layout, got {:?}", other),
        }
        assert!(session.nodes().is_empty());

        session.apply(second, new.0, new.1).unwrap();
        let ids: Vec<&str> = session.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["new_a", "new_b"]);
    }

    #[test]
    fn test_snapshot_serializes_positions() {
        let mut session = DiagramSession::default();
        session.load(&schema(&["a", "b"], &[("a", "b")]));
        session.pointer_enter("b");

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["nodes"][0]["id"], "a");
        assert_eq!(json["nodes"][1]["highlight"], "HOVERED");
        assert_eq!(json["edges"][0]["highlighted"], true);
        assert_eq!(json["width"], session.layout().width);
    }

    #[test]
    fn test_new_graph_resets_trigger() {
        let mut session = DiagramSession::default();
        session.load(&schema(&["a", "b"], &[("a", "b")]));
        session.select("a");

        session.load(&schema(&["a", "b"], &[("a", "b")]));
        assert_eq!(session.trigger(), &Trigger::default());
        assert_eq!(state(&session, "a"), HighlightState::None);
    }
}
