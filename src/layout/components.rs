//! Connected component grouping.

use std::collections::{HashMap, HashSet};

use crate::graph::{Edge, Node};

/// Undirected adjacency: each edge is listed from both endpoints.
fn build_adjacency<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> HashMap<&'a str, Vec<&'a str>> {
    let mut adjacency: HashMap<&str, Vec<&str>> = nodes
        .iter()
        .map(|n| (n.id.as_str(), Vec::new()))
        .collect();

    for edge in edges {
        if let Some(neighbors) = adjacency.get_mut(edge.source.as_str()) {
            neighbors.push(edge.target.as_str());
        }
        if let Some(neighbors) = adjacency.get_mut(edge.target.as_str()) {
            neighbors.push(edge.source.as_str());
        }
    }

    adjacency
}

/// Partition node ids into connected components, largest first.
///
/// Members are listed in depth-first discovery order starting from the
/// earliest node in input order. Equal-sized components keep input order.
pub fn group_components(nodes: &[Node], edges: &[Edge]) -> Vec<Vec<String>> {
    let adjacency = build_adjacency(nodes, edges);
    let mut visited: HashSet<&str> = HashSet::with_capacity(nodes.len());
    let mut components: Vec<Vec<String>> = Vec::new();
    let mut stack: Vec<&str> = Vec::new();

    for node in nodes {
        if visited.contains(node.id.as_str()) {
            continue;
        }

        let mut component = Vec::new();
        stack.push(node.id.as_str());

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            component.push(id.to_string());

            if let Some(neighbors) = adjacency.get(id) {
                // Reversed so the first neighbor is explored first
                for &next in neighbors.iter().rev() {
                    if !visited.contains(next) {
                        stack.push(next);
                    }
                }
            }
        }

        components.push(component);
    }

    components.sort_by(|a, b| b.len().cmp(&a.len()));
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphModel;
    use crate::measure::TextMetrics;
    use crate::schema::{Relation, Schema, Table};

    fn model(tables: &[&str], relations: &[(&str, &str)]) -> GraphModel {
        let schema = Schema::new(
            tables
                .iter()
                .map(|t| Table {
                    name: t.to_string(),
                    columns: vec![],
                })
                .collect(),
            relations
                .iter()
                .map(|(from, to)| Relation {
                    referencing_table: from.to_string(),
                    referencing_column: "fk".to_string(),
                    referenced_table: to.to_string(),
                    referenced_column: "id".to_string(),
                })
                .collect(),
        );
        GraphModel::build(&schema, &TextMetrics::default())
    }

    #[test]
    fn test_components_sorted_by_size() {
        let g = model(
            &["a", "b", "c", "d", "e", "f"],
            &[("a", "b"), ("c", "d"), ("d", "e"), ("e", "c")],
        );
        let components = group_components(&g.nodes, &g.edges);

        assert_eq!(
            components,
            vec![
                vec!["c".to_string(), "d".to_string(), "e".to_string()],
                vec!["a".to_string(), "b".to_string()],
                vec!["f".to_string()],
            ]
        );
    }

    #[test]
    fn test_edge_direction_is_ignored() {
        let g = model(&["a", "b", "c"], &[("b", "a"), ("c", "b")]);
        let components = group_components(&g.nodes, &g.edges);

        assert_eq!(components.len(), 1);
        assert_eq!(components[0], vec!["a", "b", "c"]);
    }

    #[test]
    fn test_discovery_order_is_depth_first() {
        // a -> b -> d, a -> c
        let g = model(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("b", "d")]);
        let components = group_components(&g.nodes, &g.edges);

        assert_eq!(components[0], vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_components(&[], &[]).is_empty());
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let names: Vec<String> = (0..20_000).map(|i| format!("t{}", i)).collect();
        let tables: Vec<&str> = names.iter().map(String::as_str).collect();
        let relations: Vec<(&str, &str)> = tables.windows(2).map(|w| (w[0], w[1])).collect();
        let g = model(&tables, &relations);

        let components = group_components(&g.nodes, &g.edges);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 20_000);
    }
}
