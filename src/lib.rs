pub mod error;
pub mod graph;
pub mod highlight;
pub mod layout;
pub mod measure;
pub mod schema;
pub mod session;
pub mod svg;

pub use error::{Error, Result};

use wasm_bindgen::prelude::*;

use highlight::Trigger;
use schema::Schema;
use session::DiagramSession;
use svg::SvgRenderer;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn load(source: &str) -> std::result::Result<DiagramSession, String> {
    let schema = Schema::from_json(source).map_err(|e| e.to_string())?;
    let mut session = DiagramSession::default();
    session.load(&schema);
    Ok(session)
}

/// Render schema JSON to SVG, optionally with a selected and a hovered table
#[wasm_bindgen(js_name = "schemaToSvg")]
pub fn schema_to_svg(
    source: &str,
    active: Option<String>,
    hover: Option<String>,
) -> std::result::Result<String, String> {
    let mut session = load(source)?;
    session.set_trigger(Trigger { active, hover });

    Ok(SvgRenderer::default().render(session.nodes(), session.edges()))
}

/// Lay out schema JSON and return the positioned nodes and edges as a JS object
#[wasm_bindgen(js_name = "layoutSchema")]
pub fn layout_schema(source: &str) -> std::result::Result<JsValue, JsValue> {
    let session = load(source).map_err(|e| JsValue::from_str(&e))?;
    let json =
        serde_json::to_string(&session.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
