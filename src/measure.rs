use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layout::Size;

pub struct TextMetrics {
    pub char_width: f64,
    pub node_width: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub padding_x: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            node_width: 300.0,
            header_height: 30.0,
            row_height: 30.0,
            padding_x: 12.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Table box size. Width is fixed; height grows one row per column.
    pub fn node_size(&self, column_count: usize) -> Size {
        Size {
            width: self.node_width,
            height: self.header_height + self.row_height * column_count as f64,
        }
    }

    /// Cut `text` so it fits in `max_width`, ending with `…` when shortened.
    pub fn truncate(&self, text: &str, max_width: f64) -> String {
        if self.text_width(text) <= max_width {
            return text.to_string();
        }

        let budget = ((max_width / self.char_width).floor() as usize).saturating_sub(1);
        let mut used = 0;
        let mut out = String::new();
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            out.push(ch);
        }
        out.push('…');
        out
    }
}
