//! Layout parameters derived from graph density and component size.
//!
//! Every threshold lives in [`LayoutSettings`], which is passed in rather
//! than read from globals so tests can inject their own values.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::Node;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutThresholds {
    pub large_component: usize,
    pub very_large_component: usize,
    pub moderate_component: usize,
    /// Graph-wide node count above which the moderate preset applies
    pub many_nodes: usize,
    pub high_density: f64,
    pub moderate_density: f64,
    /// Density that selects the large preset regardless of component size
    pub very_high_density: f64,
    pub max_row_width: f64,
    pub component_spacing: f64,
    pub row_spacing: f64,
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self {
            large_component: 8,
            very_large_component: 12,
            moderate_component: 6,
            many_nodes: 15,
            high_density: 1.5,
            moderate_density: 1.2,
            very_high_density: 2.0,
            max_row_width: 2400.0,
            component_spacing: 180.0,
            row_spacing: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseSpacing {
    pub rank_sep: f64,
    pub node_sep: f64,
    pub edge_sep: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Default for BaseSpacing {
    fn default() -> Self {
        Self {
            rank_sep: 80.0,
            node_sep: 50.0,
            edge_sep: 20.0,
            margin_x: 25.0,
            margin_y: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub thresholds: LayoutThresholds,
    pub base_spacing: BaseSpacing,
}

impl LayoutSettings {
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(Error::Settings)
    }
}

/// Primary axis of the layered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDir {
    TB,
    BT,
    LR,
    RL,
}

/// Brandes-Köpf alignment used when placing nodes inside their rank:
/// U/D is the vertical sweep the blocks are aligned along, L/R the
/// horizontal one. Passed to dagre as its `align` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    UL,
    UR,
    DL,
    DR,
}

/// Parameters handed to the layered layout for one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutConfig {
    pub rank_dir: RankDir,
    pub rank_sep: f64,
    pub node_sep: f64,
    pub edge_sep: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub align: Align,
}

impl LayoutConfig {
    fn preset(rank_dir: RankDir, rank_sep: f64, node_sep: f64, margin: f64, align: Align) -> Self {
        Self {
            rank_dir,
            rank_sep,
            node_sep,
            edge_sep: BaseSpacing::default().edge_sep,
            margin_x: margin,
            margin_y: margin,
            align,
        }
    }

    pub fn large_high_density() -> Self {
        Self::preset(RankDir::TB, 140.0, 90.0, 50.0, Align::DL)
    }

    pub fn large_component() -> Self {
        Self::preset(RankDir::LR, 120.0, 80.0, 40.0, Align::UR)
    }

    pub fn moderate() -> Self {
        Self::preset(RankDir::LR, 100.0, 70.0, 35.0, Align::UL)
    }

    pub fn compact() -> Self {
        Self::preset(RankDir::LR, 80.0, 50.0, 25.0, Align::UR)
    }
}

pub fn edge_density(edge_count: usize, node_count: usize) -> f64 {
    edge_count as f64 / node_count.max(1) as f64
}

/// Pick a preset from graph-wide counts and the component's size.
pub fn discrete_config(
    thresholds: &LayoutThresholds,
    node_count: usize,
    edge_count: usize,
    component_size: usize,
) -> LayoutConfig {
    let density = edge_density(edge_count, node_count);
    let is_large = component_size > thresholds.large_component;
    let is_high_density = density > thresholds.high_density;

    if is_large && is_high_density {
        return LayoutConfig::large_high_density();
    }

    if is_large || density > thresholds.very_high_density {
        return LayoutConfig::large_component();
    }

    if node_count > thresholds.many_nodes || density > thresholds.moderate_density {
        return LayoutConfig::moderate();
    }

    LayoutConfig::compact()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub rank_sep: f64,
    pub node_sep: f64,
}

/// Scale base separations by column count and edge density, clamped to
/// `0.8..=2.0`.
pub fn adaptive_spacing(
    base: &BaseSpacing,
    total_columns: usize,
    node_count: usize,
    edge_count: usize,
) -> Spacing {
    let avg_columns = total_columns as f64 / node_count.max(1) as f64;
    let density = edge_density(edge_count, node_count);
    let multiplier = ((avg_columns / 5.0) * (1.0 + density)).clamp(0.8, 2.0);

    Spacing {
        rank_sep: (base.rank_sep * multiplier).round(),
        node_sep: (base.node_sep * multiplier).round(),
    }
}

/// Configuration for one component: the preset, widened by the adaptive
/// spacing, then re-oriented for big components.
pub fn final_config(
    settings: &LayoutSettings,
    graph_node_count: usize,
    graph_edge_count: usize,
    component_nodes: &[&Node],
    component_edge_count: usize,
) -> LayoutConfig {
    let thresholds = &settings.thresholds;
    let size = component_nodes.len();
    let total_columns: usize = component_nodes.iter().map(|n| n.table.columns.len()).sum();

    let spacing = adaptive_spacing(
        &settings.base_spacing,
        total_columns,
        size,
        component_edge_count,
    );
    let mut config = discrete_config(thresholds, graph_node_count, graph_edge_count, size);

    config.rank_sep = config.rank_sep.max(spacing.rank_sep);
    config.node_sep = config.node_sep.max(spacing.node_sep);
    config.edge_sep = settings.base_spacing.edge_sep;

    if size > thresholds.very_large_component {
        config.rank_dir = RankDir::TB;
        config.align = Align::DL;
    } else if size > thresholds.moderate_component {
        config.align = Align::UL;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphModel;
    use crate::measure::TextMetrics;
    use crate::schema::{Column, Schema, Table};

    fn nodes(count: usize, columns: usize) -> Vec<Node> {
        let tables = (0..count)
            .map(|i| Table {
                name: format!("t{}", i),
                columns: (0..columns)
                    .map(|c| Column {
                        name: format!("c{}", c),
                        ..Default::default()
                    })
                    .collect(),
            })
            .collect();
        GraphModel::build(&Schema::new(tables, vec![]), &TextMetrics::default()).nodes
    }

    #[test]
    fn test_discrete_presets() {
        let t = LayoutThresholds::default();

        // large + dense
        assert_eq!(discrete_config(&t, 10, 20, 9), LayoutConfig::large_high_density());
        // large only
        assert_eq!(discrete_config(&t, 10, 10, 9), LayoutConfig::large_component());
        // very dense small component
        assert_eq!(discrete_config(&t, 4, 9, 4), LayoutConfig::large_component());
        // many nodes
        assert_eq!(discrete_config(&t, 16, 0, 2), LayoutConfig::moderate());
        // moderate density
        assert_eq!(discrete_config(&t, 10, 13, 3), LayoutConfig::moderate());
        assert_eq!(discrete_config(&t, 10, 12, 3), LayoutConfig::compact());
        assert_eq!(discrete_config(&t, 0, 0, 0), LayoutConfig::compact());
    }

    #[test]
    fn test_injected_thresholds() {
        let t = LayoutThresholds {
            large_component: 2,
            ..Default::default()
        };
        assert_eq!(discrete_config(&t, 3, 0, 3), LayoutConfig::large_component());
    }

    #[test]
    fn test_adaptive_spacing_clamps() {
        let base = BaseSpacing::default();

        // sparse, narrow tables: floor at 0.8
        let s = adaptive_spacing(&base, 2, 2, 0);
        assert_eq!(s, Spacing { rank_sep: 64.0, node_sep: 40.0 });

        // wide, dense tables: ceiling at 2.0
        let s = adaptive_spacing(&base, 40, 2, 4);
        assert_eq!(s, Spacing { rank_sep: 160.0, node_sep: 100.0 });

        // 6 columns avg, density 0.5: 1.2 * 1.5 = 1.8
        let s = adaptive_spacing(&base, 12, 2, 1);
        assert_eq!(s, Spacing { rank_sep: 144.0, node_sep: 90.0 });
    }

    #[test]
    fn test_final_config_takes_max_of_preset_and_adaptive() {
        let settings = LayoutSettings::default();

        let narrow = nodes(2, 1);
        let refs: Vec<&Node> = narrow.iter().collect();
        let config = final_config(&settings, 2, 1, &refs, 1);
        assert_eq!(config.rank_sep, 80.0);
        assert_eq!(config.node_sep, 50.0);
        assert_eq!(config.rank_dir, RankDir::LR);

        let wide = nodes(2, 12);
        let refs: Vec<&Node> = wide.iter().collect();
        let config = final_config(&settings, 2, 1, &refs, 1);
        assert_eq!(config.rank_sep, 160.0);
        assert_eq!(config.node_sep, 100.0);
    }

    #[test]
    fn test_final_config_orients_big_components() {
        let settings = LayoutSettings::default();

        let many = nodes(13, 1);
        let refs: Vec<&Node> = many.iter().collect();
        let config = final_config(&settings, 13, 12, &refs, 12);
        assert_eq!(config.rank_dir, RankDir::TB);
        assert_eq!(config.align, Align::DL);

        let seven = nodes(7, 1);
        let refs: Vec<&Node> = seven.iter().collect();
        let config = final_config(&settings, 7, 0, &refs, 0);
        assert_eq!(config.rank_dir, RankDir::LR);
        assert_eq!(config.align, Align::UL);
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings =
            LayoutSettings::from_json(r#"{"thresholds": {"max_row_width": 1200}}"#).unwrap();
        assert_eq!(settings.thresholds.max_row_width, 1200.0);
        assert_eq!(settings.thresholds.row_spacing, 200.0);
        assert_eq!(settings.base_spacing, BaseSpacing::default());

        let bad = LayoutSettings::from_json(r#"{"thresholds": {"max_row_width": "wide"}}"#);
        assert!(matches!(bad, Err(Error::Settings(_))));
    }
}
