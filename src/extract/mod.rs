//! Extraction pipeline: host selection payload in, normalized node tree out.
//!
//! The pipeline is a pure transform. [`extract_selection`] walks the selected
//! top-level nodes in order, [`extract_node`] normalizes each node (recursing
//! into containers) and [`normalize_paints`] resolves paint stacks. The
//! resulting [`ExtractedNode`] tree is serializer-agnostic; the converters in
//! [`crate::converters`] each render it independently.

pub mod node;
pub mod paint;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{ExportError, Result};
use crate::models::page::SelectionPayload;

pub use node::{extract_node, ConnectorEndpoint, ExtractedNode, NodeType, MAX_DEPTH};
pub use paint::{normalize_paints, Color, GradientKind, GradientStop, Paint, StopColor};

/// Slide canvas width used when the host page carries no dimensions.
pub const DEFAULT_PAGE_WIDTH: f64 = 1920.0;
/// Slide canvas height used when the host page carries no dimensions.
pub const DEFAULT_PAGE_HEIGHT: f64 = 1080.0;

/// Page metadata snapshot taken once per export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

/// Walks the selection and produces the normalized node sequence plus the
/// page snapshot.
///
/// An empty selection is a user-facing condition, not a silent empty export:
/// it aborts here with [`ExportError::EmptySelection`] before any extraction
/// happens. Otherwise every selected node is extracted in selection order.
pub fn extract_selection(payload: &SelectionPayload) -> Result<(Vec<ExtractedNode>, PageInfo)> {
    if payload.selection.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    let nodes: Vec<ExtractedNode> = payload.selection.iter().map(extract_node).collect();
    let page = PageInfo {
        name: payload.page.name.clone(),
        width: payload.page.width.unwrap_or(DEFAULT_PAGE_WIDTH),
        height: payload.page.height.unwrap_or(DEFAULT_PAGE_HEIGHT),
    };
    debug!(
        "Extracted {} top-level node(s) from page {:?}",
        nodes.len(),
        page.name
    );
    Ok((nodes, page))
}
