//! Exports a FigJam board selection as presentation-ready documents.
//!
//! The pipeline: the plugin bridge posts the raw selection payload as JSON,
//! [`extract_selection`] normalizes it into a node tree, and the converters
//! render that tree as an indented JSON document, an XML document or a
//! markdown outline. Both document envelopes are stable contracts for
//! downstream paste targets: fields may be added, never renamed or removed.

pub mod converters;
pub mod errors;
pub mod extract;
pub mod models;

pub use converters::{serialize_document, serialize_xml, to_markdown};
pub use errors::{ExportError, Result};
pub use extract::{extract_node, extract_selection, ExtractedNode, NodeType, PageInfo};
pub use models::page::SelectionPayload;

use wasm_bindgen::prelude::*;

/// Runs once when the wasm module loads: panics and log lines both end up in
/// the browser console of the plugin host.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn parse_payload(payload: &str) -> Result<SelectionPayload> {
    serde_json::from_str(payload).map_err(ExportError::Payload)
}

/// Renders the bridge payload as the JSON export document.
#[wasm_bindgen(js_name = exportJson)]
pub fn export_json(payload: &str) -> std::result::Result<String, JsError> {
    let payload = parse_payload(payload)?;
    let (nodes, page) = extract_selection(&payload)?;
    Ok(converters::serialize_document(&nodes, &page)?)
}

/// Renders the bridge payload as the XML export document.
#[wasm_bindgen(js_name = exportXml)]
pub fn export_xml(payload: &str) -> std::result::Result<String, JsError> {
    let payload = parse_payload(payload)?;
    let (nodes, page) = extract_selection(&payload)?;
    Ok(converters::serialize_xml(&nodes, &page)?)
}

/// Renders the bridge payload as a markdown text outline.
#[wasm_bindgen(js_name = exportOutline)]
pub fn export_outline(payload: &str) -> std::result::Result<String, JsError> {
    let payload = parse_payload(payload)?;
    let (nodes, page) = extract_selection(&payload)?;
    Ok(converters::to_markdown(&nodes, &page))
}
