use serde::{Deserialize, Serialize};

use crate::models::common::Vector;
use crate::models::paint::PaintList;

/// The type tag of a board node.
///
/// Only the kinds this exporter understands are enumerated; every other tag
/// (sections, stamps, widgets, component instances, ...) collapses into
/// [`NodeKind::Other`] so the payload always deserializes and extraction can
/// degrade per node instead of failing the export.
/// Derived from: https://www.figma.com/plugin-docs/api/nodes/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Rectangle shape.
    Rectangle,
    /// Ellipse shape.
    Ellipse,
    /// Regular polygon shape.
    Polygon,
    /// A FigJam shape with an embedded text sublayer.
    ShapeWithText,
    /// A FigJam sticky note.
    Sticky,
    /// A standalone text node.
    Text,
    /// A FigJam connector between two points or nodes.
    Connector,
    /// A collection of nodes grouped as a single unit.
    Group,
    /// A frame; behaves like a group with an own coordinate space.
    Frame,
    /// Any node type not handled above.
    #[serde(other)]
    Other,
}

/// One end of a connector: either attached to another node (by id, with a
/// magnet side) or floating at a fixed board position. The host serializes
/// whichever fields apply, so both halves are optional here.
/// Derived from: https://www.figma.com/plugin-docs/api/ConnectorEndpoint/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorEndpoint {
    /// The id of the node this end is attached to, if any.
    pub endpoint_node_id: Option<String>,
    /// Which side of the attached node the connector snaps to
    /// (`AUTO`, `TOP`, `BOTTOM`, `LEFT`, `RIGHT`, `CENTER`).
    pub magnet: Option<String>,
    /// The fixed board position of a free-floating end.
    pub position: Option<Vector>,
}

/// The embedded text sublayer of stickies and shapes-with-text. Only the fully
/// resolved character content is modelled; per-run formatting is not consumed.
/// Derived from: https://www.figma.com/plugin-docs/api/TextSublayerNode/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSublayer {
    /// The concatenated characters of the sublayer.
    pub characters: Option<String>,
}

/// One board node as the host-side bridge serializes it.
///
/// This is a flattened view over the host's node classes: every field that
/// exists on only some node kinds is optional, and consumers dispatch on
/// [`CanvasNode::kind`] to decide which fields to read. Fields the bridge
/// sends but this exporter never reads are ignored by serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNode {
    /// The node id, unique within the board.
    pub id: String,

    /// The user-visible layer name.
    #[serde(default)]
    pub name: String,

    /// The node's type tag.
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Position of the node's top-left corner, in board coordinates.
    pub x: Option<f64>,
    pub y: Option<f64>,

    /// Intrinsic size. Not every node kind has one (e.g. some connectors);
    /// absent sizes are read as 0 downstream.
    pub width: Option<f64>,
    pub height: Option<f64>,

    /// Rotation in degrees.
    pub rotation: Option<f64>,

    /// Whether the layer is visible on the board.
    pub visible: Option<bool>,

    /// The fill paint stack, or the mixed sentinel.
    pub fills: Option<PaintList>,

    /// The stroke paint stack, or the mixed sentinel.
    pub strokes: Option<PaintList>,

    /// Stroke thickness in board units.
    pub stroke_weight: Option<f64>,

    /// Rectangles: the uniform corner radius.
    pub corner_radius: Option<f64>,

    /// Shapes-with-text: the host's shape style tag (`SQUARE`,
    /// `ROUNDED_RECTANGLE`, `DIAMOND`, ...). Carried verbatim.
    pub shape_type: Option<String>,

    /// Polygons: the number of sides.
    pub point_count: Option<u32>,

    /// Text nodes: the resolved character content.
    pub characters: Option<String>,

    /// Stickies and shapes-with-text: the embedded text sublayer.
    pub text: Option<TextSublayer>,

    /// Connectors: the two endpoints.
    pub connector_start: Option<ConnectorEndpoint>,
    pub connector_end: Option<ConnectorEndpoint>,

    /// Groups and frames: the child nodes in paint order.
    pub children: Option<Vec<CanvasNode>>,
}
