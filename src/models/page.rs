// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::node::CanvasNode;

/// Metadata of the board page the selection lives on, as the bridge reads it
/// at export time.
/// Derived from: https://www.figma.com/plugin-docs/api/PageNode/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasPage {
    /// The page name.
    #[serde(default)]
    pub name: String,

    /// Canvas width the bridge reports for the export target. Board pages
    /// have no intrinsic size, so bridges that don't compute one omit it.
    pub width: Option<f64>,

    /// Canvas height; same caveat as `width`.
    pub height: Option<f64>,
}

/// The message payload the host-side bridge posts across the plugin's
/// execution-context boundary: the current page plus the user's selection,
/// in selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPayload {
    /// Snapshot of the page the selection was taken from.
    pub page: CanvasPage,

    /// The selected top-level nodes, in the order the host reports them.
    #[serde(default)]
    pub selection: Vec<CanvasNode>,
}
