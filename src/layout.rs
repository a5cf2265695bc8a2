//! Density-adaptive layered layout of ER graphs.
//!
//! The graph is split into connected components, each component is ordered
//! by table role and laid out by a [`LayeredLayout`], and the results are
//! packed into rows on a shared canvas.

mod analysis;
mod components;
mod config;
mod dagre;
mod engine;
mod ordering;
mod packing;
mod types;

pub use analysis::{TableAnalysis, TableType, analyze_tables, classify_table};
pub use components::group_components;
pub use config::{
    Align, BaseSpacing, LayoutConfig, LayoutSettings, LayoutThresholds, RankDir, Spacing,
    adaptive_spacing, discrete_config, edge_density, final_config,
};
pub use dagre::{Dagre, LayeredGraph, LayeredLayout, LayeredNode};
pub use engine::LayoutEngine;
pub use ordering::order_component;
pub use packing::ComponentPacker;
pub use types::{Bounds, ComponentLayout, Layout, LayoutNode, Point, Size};
