use std::collections::HashMap;
use std::fmt::{self, Write};

use crate::graph::{Edge, Node};
use crate::highlight::HighlightState;
use crate::measure::TextMetrics;

const CANVAS_PADDING: f64 = 20.0;
const MIN_CURVE: f64 = 40.0;

pub struct SvgRenderer {
    metrics: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

impl SvgRenderer {
    pub fn new(metrics: TextMetrics) -> Self {
        Self { metrics }
    }

    /// Render positioned nodes and edges. Edges are drawn first, lowest
    /// `z_index` first, so highlighted edges end up on top.
    pub fn render(&self, nodes: &[Node], edges: &[Edge]) -> String {
        let mut svg = String::new();
        // writing into a String cannot fail
        let _ = self.write_document(&mut svg, nodes, edges);
        svg
    }

    fn write_document(&self, svg: &mut String, nodes: &[Node], edges: &[Edge]) -> fmt::Result {
        let width = nodes
            .iter()
            .map(|n| n.position.x + n.size.width)
            .fold(0.0, f64::max)
            + CANVAS_PADDING * 2.0;
        let height = nodes
            .iter()
            .map(|n| n.position.y + n.size.height)
            .fold(0.0, f64::max)
            + CANVAS_PADDING * 2.0;

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            width, height, -CANVAS_PADDING, -CANVAS_PADDING, width, height
        )?;

        writeln!(
            svg,
            r#"<style>
  .entity-bg {{ fill: #fff; }}
  .entity-header {{ fill: #e0e0e0; }}
  .entity-border {{ fill: none; stroke: #333; stroke-width: 1.5; }}
  .hovered .entity-border {{ stroke: #2563eb; stroke-width: 2; }}
  .active .entity-border {{ stroke: #2563eb; stroke-width: 3; }}
  .active .entity-header {{ fill: #dbeafe; }}
  .entity-name {{ font-family: monospace; font-size: 14px; font-weight: bold; }}
  .column-text {{ font-family: monospace; font-size: 12px; }}
  .column-type {{ font-family: monospace; font-size: 12px; fill: #666; }}
  .pk {{ font-weight: bold; }}
  .fk {{ font-style: italic; }}
  .edge {{ fill: none; }}
  .edge.animated {{ stroke-dasharray: 5; }}
</style>"#
        )?;

        let node_map: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let mut ordered: Vec<&Edge> = edges.iter().collect();
        ordered.sort_by_key(|e| e.style.z_index);
        for edge in ordered {
            if let (Some(source), Some(target)) = (
                node_map.get(edge.source.as_str()),
                node_map.get(edge.target.as_str()),
            ) {
                self.render_edge(svg, edge, source, target)?;
            }
        }

        for node in nodes {
            self.render_node(svg, node)?;
        }

        writeln!(svg, "</svg>")
    }

    /// Vertical centre of the row showing `column`, or of the header when
    /// the column is unknown.
    fn handle_y(&self, node: &Node, column: &str) -> f64 {
        let header_centre = node.position.y + self.metrics.header_height / 2.0;
        node.table
            .columns
            .iter()
            .position(|c| c.name == column)
            .map(|row| {
                node.position.y
                    + self.metrics.header_height
                    + self.metrics.row_height * (row as f64 + 0.5)
            })
            .unwrap_or(header_centre)
    }

    fn render_node(&self, svg: &mut String, node: &Node) -> fmt::Result {
        let x = node.position.x;
        let y = node.position.y;
        let w = node.size.width;
        let h = node.size.height;
        let header_h = self.metrics.header_height;
        let text_width = w - self.metrics.padding_x * 2.0;

        let state = match node.highlight {
            HighlightState::None => "",
            HighlightState::Hovered => " hovered",
            HighlightState::Active => " active",
        };
        writeln!(
            svg,
            r#"<g class="entity{}" data-id="{}">"#,
            state,
            escape_xml(&node.id)
        )?;

        writeln!(
            svg,
            r#"<rect class="entity-bg" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            x, y, w, h
        )?;
        writeln!(
            svg,
            r#"<rect class="entity-header" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            x, y, w, header_h
        )?;

        writeln!(
            svg,
            r#"<text class="entity-name" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            x + w / 2.0,
            y + header_h / 2.0 + 5.0,
            escape_xml(&self.metrics.truncate(&node.table.name, text_width))
        )?;

        if !node.table.columns.is_empty() {
            writeln!(
                svg,
                r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#333" stroke-width="1" />"##,
                x,
                y + header_h,
                x + w,
                y + header_h
            )?;
        }

        for (row, col) in node.table.columns.iter().enumerate() {
            let mut class = "column-text".to_string();
            if col.is_primary_key {
                class.push_str(" pk");
            }
            if col.is_foreign_key {
                class.push_str(" fk");
            }

            let prefix = match (col.is_primary_key, col.is_foreign_key) {
                (true, _) => "◆ ",
                (false, true) => "◇ ",
                _ => "  ",
            };
            let typ = col.display_type();
            let row_y = y + header_h + self.metrics.row_height * (row as f64 + 0.5) + 4.0;

            // name gets whatever the type label leaves over
            let type_width = self.metrics.text_width(&typ);
            let name_width = (text_width - type_width - self.metrics.char_width).max(0.0);
            let name = self
                .metrics
                .truncate(&format!("{}{}", prefix, col.name), name_width);

            writeln!(
                svg,
                r#"<text class="{}" x="{}" y="{}">{}</text>"#,
                class,
                x + self.metrics.padding_x,
                row_y,
                escape_xml(&name)
            )?;
            writeln!(
                svg,
                r#"<text class="column-type" x="{}" y="{}" text-anchor="end">{}</text>"#,
                x + w - self.metrics.padding_x,
                row_y,
                escape_xml(&typ)
            )?;
        }

        writeln!(
            svg,
            r#"<rect class="entity-border" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            x, y, w, h
        )?;
        writeln!(svg, "</g>")
    }

    fn render_edge(&self, svg: &mut String, edge: &Edge, source: &Node, target: &Node) -> fmt::Result {
        // source handle on the right side, target handle on the left side
        let x1 = source.position.x + source.size.width;
        let y1 = self.handle_y(source, &edge.source_handle);
        let x2 = target.position.x;
        let y2 = self.handle_y(target, &edge.target_handle);
        let dx = ((x2 - x1).abs() / 2.0).max(MIN_CURVE);

        let mut class = "edge".to_string();
        if edge.highlighted {
            class.push_str(" highlighted");
        }
        if edge.style.animated {
            class.push_str(" animated");
        }

        writeln!(
            svg,
            r#"<path class="{}" data-id="{}" d="M {} {} C {} {}, {} {}, {} {}" stroke="{}" stroke-width="{}" />"#,
            class,
            escape_xml(&edge.id),
            x1,
            y1,
            x1 + dx,
            y1,
            x2 - dx,
            y2,
            x2,
            y2,
            edge.style.stroke,
            edge.style.stroke_width
        )
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
