//! Node order inside a component.

use std::cmp::Reverse;

use super::analysis::{TableAnalysis, TableType};
use crate::graph::Node;

/// Core tables first, then junction, lookup and log tables.
///
/// Core and junction tables are sorted by descending degree (stable);
/// lookup and log tables keep their input order.
pub fn order_component<'a>(nodes: &[&'a Node], analysis: &TableAnalysis) -> Vec<&'a Node> {
    let mut core = Vec::new();
    let mut junction = Vec::new();
    let mut lookup = Vec::new();
    let mut log = Vec::new();

    for &node in nodes {
        match analysis.type_of(&node.id) {
            TableType::Core => core.push(node),
            TableType::Junction => junction.push(node),
            TableType::Lookup => lookup.push(node),
            TableType::Log => log.push(node),
        }
    }

    core.sort_by_key(|n| Reverse(analysis.degree_of(&n.id)));
    junction.sort_by_key(|n| Reverse(analysis.degree_of(&n.id)));

    core.into_iter()
        .chain(junction)
        .chain(lookup)
        .chain(log)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphModel;
    use crate::layout::analysis::analyze_tables;
    use crate::measure::TextMetrics;
    use crate::schema::{Column, Relation, Schema, Table};

    fn table(name: &str, columns: usize, foreign_keys: usize) -> Table {
        Table {
            name: name.to_string(),
            columns: (0..columns)
                .map(|i| Column {
                    name: if columns > 5 && i == 0 {
                        "created_at".to_string()
                    } else {
                        format!("c{}", i)
                    },
                    is_foreign_key: i < foreign_keys,
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn relation(from: &str, to: &str) -> Relation {
        Relation {
            referencing_table: from.to_string(),
            referencing_column: format!("{}_id", to),
            referenced_table: to.to_string(),
            referenced_column: "id".to_string(),
        }
    }

    #[test]
    fn test_layers_then_degree() {
        let schema = Schema::new(
            vec![
                table("event_log", 3, 0),
                table("countries", 2, 0),
                table("users", 8, 0),
                table("orders", 8, 1),
                table("order_items", 3, 3),
                table("products", 8, 0),
                table("currencies", 2, 0),
            ],
            vec![
                relation("orders", "users"),
                relation("order_items", "orders"),
                relation("order_items", "products"),
                relation("users", "countries"),
                relation("event_log", "users"),
                relation("orders", "currencies"),
            ],
        );
        let g = GraphModel::build(&schema, &TextMetrics::default());
        let analysis = analyze_tables(&g.nodes, &g.edges);
        let refs: Vec<&Node> = g.nodes.iter().collect();

        let order: Vec<&str> = order_component(&refs, &analysis)
            .iter()
            .map(|n| n.id.as_str())
            .collect();

        // users(3) and orders(3) tie and keep input order, products(1) after
        assert_eq!(
            order,
            vec![
                "users",
                "orders",
                "products",
                "order_items",
                "countries",
                "currencies",
                "event_log"
            ]
        );
    }

    #[test]
    fn test_empty() {
        let g = GraphModel::empty();
        let analysis = analyze_tables(&g.nodes, &g.edges);
        assert!(order_component(&[], &analysis).is_empty());
    }
}
