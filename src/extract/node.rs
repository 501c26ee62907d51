//! The normalized node tree and the per-node extractor.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::extract::paint::{normalize_paints, Paint};
use crate::models::node::{
    CanvasNode, ConnectorEndpoint as RawEndpoint, NodeKind,
};

/// Hard ceiling on container nesting. The host imposes no documented bound,
/// so extraction stops descending here instead of risking a stack overflow on
/// a pathological board.
pub const MAX_DEPTH: usize = 100;

/// The normalized node type. One variant per supported host kind plus the
/// catch-all, so dispatch over it is always exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Rectangle,
    Ellipse,
    Polygon,
    ShapeWithText,
    Sticky,
    Text,
    Connector,
    Group,
    Frame,
    Other,
}

impl From<NodeKind> for NodeType {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Rectangle => NodeType::Rectangle,
            NodeKind::Ellipse => NodeType::Ellipse,
            NodeKind::Polygon => NodeType::Polygon,
            NodeKind::ShapeWithText => NodeType::ShapeWithText,
            NodeKind::Sticky => NodeType::Sticky,
            NodeKind::Text => NodeType::Text,
            NodeKind::Connector => NodeType::Connector,
            NodeKind::Group => NodeType::Group,
            NodeKind::Frame => NodeType::Frame,
            NodeKind::Other => NodeType::Other,
        }
    }
}

impl NodeType {
    /// The presentation-side label for this node type.
    ///
    /// Stickies become text boxes and connectors become lines in the target
    /// vocabulary; anything unrecognized ships as a generic shape rather than
    /// being dropped.
    pub fn export_label(self) -> &'static str {
        match self {
            NodeType::Rectangle => "rectangle",
            NodeType::Ellipse => "ellipse",
            NodeType::Polygon => "polygon",
            NodeType::ShapeWithText => "shape",
            NodeType::Sticky => "textbox",
            NodeType::Text => "text",
            NodeType::Connector => "line",
            NodeType::Group => "group",
            NodeType::Frame => "frame",
            NodeType::Other => "shape",
        }
    }
}

/// A resolved connector endpoint. Free-floating ends keep their board
/// position; attached ends carry the target node id, which is a plain
/// reference and is never checked against the exported set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorEndpoint {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_node_id: Option<String>,
}

/// One extracted node: identity, geometry and the variant fields that apply
/// to its type, with children for containers.
///
/// This representation is what both serializers consume and what crosses the
/// plugin execution-context boundary, so it is fully serde-capable and
/// carries no host handles. Values are built fresh per export and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    /// Resolved text content. May be empty; serializers skip empty text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    /// Shape style tag: the host's own tag for shapes-with-text, or the
    /// synthesized `polygon-<N>` side-count form for polygons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_start: Option<ConnectorEndpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_end: Option<ConnectorEndpoint>,
    /// Present exactly for groups and frames, preserving host child order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ExtractedNode>>,
}

/// Extracts one host node into its normalized form.
///
/// Total over every structurally valid host node: an unrecognized type tag
/// degrades to the base record (identity, geometry, visibility) with a
/// diagnostic log instead of failing, so one exotic node never sinks the
/// export. Containers recurse over their children up to [`MAX_DEPTH`].
pub fn extract_node(node: &CanvasNode) -> ExtractedNode {
    extract_at(node, 0)
}

fn extract_at(node: &CanvasNode, depth: usize) -> ExtractedNode {
    let base = base_record(node);
    match node.kind {
        NodeKind::Rectangle => ExtractedNode {
            fills: Some(normalize_paints(node.fills.as_ref())),
            strokes: Some(normalize_paints(node.strokes.as_ref())),
            stroke_weight: node.stroke_weight.map(|w| w.max(0.0)),
            corner_radius: node.corner_radius.map(|r| r.max(0.0)),
            ..base
        },
        NodeKind::Ellipse => ExtractedNode {
            fills: Some(normalize_paints(node.fills.as_ref())),
            strokes: Some(normalize_paints(node.strokes.as_ref())),
            stroke_weight: node.stroke_weight.map(|w| w.max(0.0)),
            ..base
        },
        NodeKind::Polygon => ExtractedNode {
            fills: Some(normalize_paints(node.fills.as_ref())),
            strokes: Some(normalize_paints(node.strokes.as_ref())),
            stroke_weight: node.stroke_weight.map(|w| w.max(0.0)),
            // Host default is a triangle when the side count is missing.
            shape_type: Some(format!("polygon-{}", node.point_count.unwrap_or(3))),
            ..base
        },
        NodeKind::ShapeWithText => ExtractedNode {
            fills: Some(normalize_paints(node.fills.as_ref())),
            strokes: Some(normalize_paints(node.strokes.as_ref())),
            shape_type: node.shape_type.clone(),
            text: Some(resolve_text(node)),
            ..base
        },
        // Sticky notes carry no stroke in the host model.
        NodeKind::Sticky => ExtractedNode {
            fills: Some(normalize_paints(node.fills.as_ref())),
            text: Some(resolve_text(node)),
            ..base
        },
        NodeKind::Text => ExtractedNode {
            fills: Some(normalize_paints(node.fills.as_ref())),
            text: Some(resolve_text(node)),
            ..base
        },
        NodeKind::Connector => ExtractedNode {
            strokes: Some(normalize_paints(node.strokes.as_ref())),
            stroke_weight: node.stroke_weight.map(|w| w.max(0.0)),
            connector_start: Some(resolve_endpoint(node.connector_start.as_ref())),
            connector_end: Some(resolve_endpoint(node.connector_end.as_ref())),
            ..base
        },
        NodeKind::Group | NodeKind::Frame => ExtractedNode {
            children: Some(extract_children(node, depth)),
            ..base
        },
        NodeKind::Other => {
            debug!(
                "Node {} has an unsupported type; exporting base record only",
                node.id
            );
            base
        }
    }
}

/// Identity, geometry and visibility shared by every variant. Geometry is
/// read defensively: not every host node kind has these fields, and absent
/// values read as 0.
fn base_record(node: &CanvasNode) -> ExtractedNode {
    ExtractedNode {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: NodeType::from(node.kind),
        x: node.x.unwrap_or(0.0),
        y: node.y.unwrap_or(0.0),
        width: node.width.unwrap_or(0.0),
        height: node.height.unwrap_or(0.0),
        rotation: node.rotation.unwrap_or(0.0),
        visible: node.visible.unwrap_or(true),
        fills: None,
        strokes: None,
        stroke_weight: None,
        text: None,
        corner_radius: None,
        shape_type: None,
        connector_start: None,
        connector_end: None,
        children: None,
    }
}

fn extract_children(node: &CanvasNode, depth: usize) -> Vec<ExtractedNode> {
    if depth >= MAX_DEPTH {
        warn!(
            "Node {} exceeds the nesting limit of {MAX_DEPTH}; its children are not exported",
            node.id
        );
        return Vec::new();
    }
    node.children
        .iter()
        .flatten()
        .map(|child| extract_at(child, depth + 1))
        .collect()
}

/// Resolves a node's text to a single string, reading the direct character
/// content first and the embedded text sublayer second. Empty when neither
/// is present.
fn resolve_text(node: &CanvasNode) -> String {
    if let Some(characters) = &node.characters {
        return characters.clone();
    }
    node.text
        .as_ref()
        .and_then(|sublayer| sublayer.characters.clone())
        .unwrap_or_default()
}

fn resolve_endpoint(endpoint: Option<&RawEndpoint>) -> ConnectorEndpoint {
    let position = endpoint.and_then(|e| e.position);
    ConnectorEndpoint {
        x: position.map(|p| p.x).unwrap_or(0.0),
        y: position.map(|p| p.y).unwrap_or(0.0),
        endpoint_node_id: endpoint.and_then(|e| e.endpoint_node_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::node::TextSublayer;

    fn host_node(id: &str, kind: &str) -> CanvasNode {
        serde_json::from_str(&format!(r#"{{"id":"{id}","name":"{id}","type":"{kind}"}}"#))
            .unwrap()
    }

    #[test]
    fn unknown_kind_degrades_to_base_record() {
        let node = extract_node(&host_node("9:1", "WIDGET"));
        assert_eq!(node.node_type, NodeType::Other);
        assert_eq!(node.x, 0.0);
        assert_eq!(node.width, 0.0);
        assert!(node.visible);
        assert!(node.fills.is_none());
        assert!(node.strokes.is_none());
        assert!(node.text.is_none());
        assert!(node.children.is_none());
    }

    #[test]
    fn export_labels_cover_the_whole_type_table() {
        assert_eq!(NodeType::Rectangle.export_label(), "rectangle");
        assert_eq!(NodeType::Ellipse.export_label(), "ellipse");
        assert_eq!(NodeType::Polygon.export_label(), "polygon");
        assert_eq!(NodeType::ShapeWithText.export_label(), "shape");
        assert_eq!(NodeType::Sticky.export_label(), "textbox");
        assert_eq!(NodeType::Text.export_label(), "text");
        assert_eq!(NodeType::Connector.export_label(), "line");
        assert_eq!(NodeType::Group.export_label(), "group");
        assert_eq!(NodeType::Frame.export_label(), "frame");
        assert_eq!(NodeType::Other.export_label(), "shape");
    }

    #[test]
    fn polygon_encodes_side_count_with_triangle_default() {
        let mut node = host_node("9:2", "POLYGON");
        node.point_count = Some(6);
        assert_eq!(extract_node(&node).shape_type.as_deref(), Some("polygon-6"));

        node.point_count = None;
        assert_eq!(extract_node(&node).shape_type.as_deref(), Some("polygon-3"));
    }

    #[test]
    fn rectangle_clamps_negative_radius_and_weight() {
        let mut node = host_node("9:3", "RECTANGLE");
        node.corner_radius = Some(-4.0);
        node.stroke_weight = Some(-1.0);
        let extracted = extract_node(&node);
        assert_eq!(extracted.corner_radius, Some(0.0));
        assert_eq!(extracted.stroke_weight, Some(0.0));
        assert_eq!(extracted.fills.as_deref(), Some(&[][..]));
    }

    #[test]
    fn sticky_resolves_sublayer_text_and_has_no_strokes() {
        let mut node = host_node("9:4", "STICKY");
        node.text = Some(TextSublayer {
            characters: Some("Ship it".to_string()),
        });
        let extracted = extract_node(&node);
        assert_eq!(extracted.text.as_deref(), Some("Ship it"));
        assert!(extracted.strokes.is_none());
        assert!(extracted.fills.is_some());
    }

    #[test]
    fn text_node_resolves_direct_characters() {
        let mut node = host_node("9:5", "TEXT");
        node.characters = Some("Headline".to_string());
        let extracted = extract_node(&node);
        assert_eq!(extracted.text.as_deref(), Some("Headline"));
        assert!(extracted.strokes.is_none());
    }

    #[test]
    fn text_resolution_defaults_to_empty() {
        let extracted = extract_node(&host_node("9:6", "STICKY"));
        assert_eq!(extracted.text.as_deref(), Some(""));
    }

    #[test]
    fn connector_resolves_both_endpoints() {
        let node: CanvasNode = serde_json::from_str(
            r#"{
                "id": "9:7",
                "name": "Arrow",
                "type": "CONNECTOR",
                "connectorStart": {"endpointNodeId": "9:1", "magnet": "AUTO"},
                "connectorEnd": {"position": {"x": 420.5, "y": 77}}
            }"#,
        )
        .unwrap();
        let extracted = extract_node(&node);

        let start = extracted.connector_start.unwrap();
        assert_eq!(start.x, 0.0);
        assert_eq!(start.endpoint_node_id.as_deref(), Some("9:1"));

        let end = extracted.connector_end.unwrap();
        assert_eq!(end.x, 420.5);
        assert_eq!(end.y, 77.0);
        assert!(end.endpoint_node_id.is_none());
    }

    #[test]
    fn connector_with_missing_endpoints_still_extracts() {
        let extracted = extract_node(&host_node("9:8", "CONNECTOR"));
        let start = extracted.connector_start.unwrap();
        assert_eq!((start.x, start.y), (0.0, 0.0));
        assert!(start.endpoint_node_id.is_none());
    }

    #[test]
    fn containers_keep_child_order() {
        let node: CanvasNode = serde_json::from_str(
            r#"{
                "id": "9:9",
                "name": "Frame",
                "type": "FRAME",
                "children": [
                    {"id": "9:10", "name": "a", "type": "RECTANGLE"},
                    {"id": "9:11", "name": "b", "type": "ELLIPSE"},
                    {"id": "9:12", "name": "c", "type": "STAMP"}
                ]
            }"#,
        )
        .unwrap();
        let extracted = extract_node(&node);
        let children = extracted.children.unwrap();
        let ids: Vec<&str> = children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["9:10", "9:11", "9:12"]);
        assert_eq!(children[2].node_type, NodeType::Other);
    }

    #[test]
    fn nesting_past_the_depth_limit_drops_children_without_overflowing() {
        // 102 nested groups, two past the limit.
        let mut node = host_node("0", "RECTANGLE");
        for level in 1..=(MAX_DEPTH + 2) {
            let mut group = host_node(&level.to_string(), "GROUP");
            group.children = Some(vec![node]);
            node = group;
        }

        let extracted = extract_node(&node);
        let mut levels = 1;
        let mut cursor = &extracted;
        while let Some(children) = cursor.children.as_ref().filter(|c| !c.is_empty()) {
            levels += 1;
            cursor = &children[0];
        }
        // The walk stops at a group whose children were dropped by the guard.
        assert_eq!(cursor.children.as_deref(), Some(&[][..]));
        assert_eq!(levels, MAX_DEPTH + 1);
    }
}
