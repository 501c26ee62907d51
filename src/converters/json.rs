//! Structured-document export: the flat shape records and the JSON envelope.
//!
//! The mapper renames node types into presentation vocabulary and collapses
//! the multi-paint stacks to a single fill and stroke. The XML export does
//! not go through this mapper; keep the two serializers independent.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ExportError, Result};
use crate::extract::{ConnectorEndpoint, ExtractedNode, PageInfo, Paint};

/// Format tag of the JSON envelope. Downstream consumers dispatch on it.
pub const FORMAT_NAME: &str = "fig2deck";
/// Envelope version. Adding fields is compatible; renaming or removing one
/// is a breaking change and must bump this.
pub const FORMAT_VERSION: &str = "1.0";

/// The JSON document envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub format: String,
    pub version: String,
    /// ISO-8601 UTC instant, generated at serialization time.
    pub export_date: String,
    pub page: PageInfo,
    pub shapes: Vec<ShapeRecord>,
}

/// One exported shape in presentation terms.
///
/// A flatter view of [`ExtractedNode`]: the type tag is the presentation
/// label, only the first fill and stroke survive (the collapse is a
/// documented simplification of this format, not of the XML one) and the
/// rarely-used fields move into [`ShapeProperties`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub shape_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_start: Option<ConnectorEndpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_end: Option<ConnectorEndpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ShapeProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ShapeRecord>>,
}

/// Grab bag for the type-specific extras. Present on a record only when at
/// least one field is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
}

/// Maps one extracted node to its export record, recursing over children.
pub fn to_shape_record(node: &ExtractedNode) -> ShapeRecord {
    let properties = if node.corner_radius.is_some() || node.shape_type.is_some() {
        Some(ShapeProperties {
            corner_radius: node.corner_radius,
            shape_type: node.shape_type.clone(),
        })
    } else {
        None
    };

    ShapeRecord {
        id: node.id.clone(),
        name: node.name.clone(),
        shape_type: node.node_type.export_label().to_string(),
        x: node.x,
        y: node.y,
        width: node.width,
        height: node.height,
        rotation: node.rotation,
        visible: node.visible,
        fill: node.fills.as_ref().and_then(|fills| fills.first().cloned()),
        stroke: node
            .strokes
            .as_ref()
            .and_then(|strokes| strokes.first().cloned()),
        stroke_weight: node.stroke_weight,
        text: node.text.clone().filter(|text| !text.is_empty()),
        connector_start: node.connector_start.clone(),
        connector_end: node.connector_end.clone(),
        properties,
        children: node
            .children
            .as_ref()
            .map(|children| children.iter().map(to_shape_record).collect()),
    }
}

/// Builds the document envelope for a given instant. The instant is a
/// parameter so the boundary layer and the tests can pin it.
pub fn build_document(
    nodes: &[ExtractedNode],
    page: &PageInfo,
    exported_at: DateTime<Utc>,
) -> ExportDocument {
    ExportDocument {
        format: FORMAT_NAME.to_string(),
        version: FORMAT_VERSION.to_string(),
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        page: page.clone(),
        shapes: nodes.iter().map(to_shape_record).collect(),
    }
}

/// Renders the selection as the indented JSON document, stamped with the
/// current instant.
pub fn serialize_document(nodes: &[ExtractedNode], page: &PageInfo) -> Result<String> {
    let document = build_document(nodes, page, Utc::now());
    serde_json::to_string_pretty(&document).map_err(ExportError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_selection;
    use crate::models::page::SelectionPayload;
    use chrono::TimeZone;

    fn extract(payload: &str) -> (Vec<ExtractedNode>, PageInfo) {
        let payload: SelectionPayload = serde_json::from_str(payload).unwrap();
        extract_selection(&payload).unwrap()
    }

    #[test]
    fn rectangle_record_matches_the_export_contract() {
        // Channel 100/255 exercises the round-half-away-from-zero scaling.
        let green = 100.0_f64 / 255.0;
        let (nodes, _) = extract(&format!(
            r#"{{
                "page": {{"name": "Board"}},
                "selection": [{{
                    "id": "1:1",
                    "name": "Card",
                    "type": "RECTANGLE",
                    "x": 100, "y": 200, "width": 300, "height": 150,
                    "rotation": 0,
                    "cornerRadius": 8,
                    "fills": [{{"type": "SOLID", "color": {{"r": 1, "g": {green}, "b": 0.2}}, "opacity": 1}}]
                }}]
            }}"#
        ));

        let record = to_shape_record(&nodes[0]);
        assert_eq!(record.shape_type, "rectangle");
        assert_eq!((record.x, record.y), (100.0, 200.0));
        assert_eq!((record.width, record.height), (300.0, 150.0));
        match record.fill.as_ref().unwrap() {
            Paint::Solid { color, opacity } => {
                assert_eq!((color.r, color.g, color.b), (255, 100, 51));
                assert_eq!(*opacity, 1.0);
            }
            other => panic!("expected solid fill, got {other:?}"),
        }
        let properties = record.properties.unwrap();
        assert_eq!(properties.corner_radius, Some(8.0));
        assert!(properties.shape_type.is_none());
    }

    #[test]
    fn multi_paint_stacks_collapse_to_the_first_entry() {
        let (nodes, _) = extract(
            r#"{
                "page": {"name": "Board"},
                "selection": [{
                    "id": "1:1", "name": "Layered", "type": "ELLIPSE",
                    "fills": [
                        {"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}},
                        {"type": "SOLID", "color": {"r": 0, "g": 1, "b": 0}}
                    ]
                }]
            }"#,
        );

        let record = to_shape_record(&nodes[0]);
        match record.fill.unwrap() {
            Paint::Solid { color, .. } => assert_eq!(color.r, 255),
            other => panic!("expected the top fill, got {other:?}"),
        }
    }

    #[test]
    fn properties_are_absent_when_both_fields_are() {
        let (nodes, _) = extract(
            r#"{
                "page": {"name": "Board"},
                "selection": [{"id": "1:1", "name": "Plain", "type": "ELLIPSE"}]
            }"#,
        );
        assert!(to_shape_record(&nodes[0]).properties.is_none());
    }

    #[test]
    fn empty_text_is_not_exported() {
        let (nodes, _) = extract(
            r#"{
                "page": {"name": "Board"},
                "selection": [{"id": "1:1", "name": "Blank sticky", "type": "STICKY"}]
            }"#,
        );
        assert!(to_shape_record(&nodes[0]).text.is_none());
    }

    #[test]
    fn container_children_map_recursively_in_order() {
        let (nodes, _) = extract(
            r#"{
                "page": {"name": "Board"},
                "selection": [{
                    "id": "2:0", "name": "Frame", "type": "FRAME",
                    "children": [
                        {"id": "2:1", "name": "a", "type": "STICKY"},
                        {"id": "2:2", "name": "b", "type": "CONNECTOR"}
                    ]
                }]
            }"#,
        );

        let record = to_shape_record(&nodes[0]);
        assert_eq!(record.shape_type, "frame");
        let children = record.children.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].shape_type, "textbox");
        assert_eq!(children[1].shape_type, "line");
    }

    #[test]
    fn document_round_trips_at_a_pinned_instant() {
        let (nodes, page) = extract(
            r#"{
                "page": {"name": "Board", "width": 1280, "height": 720},
                "selection": [
                    {"id": "1:1", "name": "a", "type": "RECTANGLE", "cornerRadius": 4},
                    {"id": "1:2", "name": "b", "type": "TEXT", "characters": "hey"},
                    {"id": "1:3", "name": "c", "type": "STAMP"}
                ]
            }"#,
        );
        let pinned = Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap();

        let document = build_document(&nodes, &page, pinned);
        assert_eq!(document.format, FORMAT_NAME);
        assert_eq!(document.version, FORMAT_VERSION);
        assert_eq!(document.export_date, "2024-05-04T12:00:00.000Z");

        let text = serde_json::to_string_pretty(&document).unwrap();
        let reparsed: ExportDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, document);

        let labels: Vec<&str> = reparsed
            .shapes
            .iter()
            .map(|shape| shape.shape_type.as_str())
            .collect();
        assert_eq!(labels, ["rectangle", "text", "shape"]);
    }

    #[test]
    fn serialized_document_is_indented_and_carries_the_envelope() {
        let (nodes, page) = extract(
            r#"{
                "page": {"name": "Board"},
                "selection": [{"id": "1:1", "name": "a", "type": "RECTANGLE"}]
            }"#,
        );

        let text = serialize_document(&nodes, &page).unwrap();
        assert!(text.contains("\n  \"format\": \"fig2deck\""));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], "1.0");
        assert!(value["exportDate"].is_string());
        assert_eq!(value["page"]["width"], 1920.0);
        assert_eq!(value["shapes"].as_array().unwrap().len(), 1);
    }
}
