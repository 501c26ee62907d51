//! XML export: renders the extracted node tree directly, without the shape
//! mapper's field collapse.
//!
//! The element layout is a stable contract (see the crate docs): a
//! `figma-export` root wrapping `metadata` and one `slide`, shapes nested
//! recursively with their children in a `<children>` group element. Attribute
//! values and element bodies go through [`escape_xml`]; text content is
//! CDATA-wrapped verbatim.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;

use crate::errors::Result;
use crate::extract::{ConnectorEndpoint, ExtractedNode, PageInfo, Paint};

/// Renders the selection as the XML document, stamped with the current
/// instant.
pub fn serialize_xml(nodes: &[ExtractedNode], page: &PageInfo) -> Result<String> {
    write_xml(nodes, page, Utc::now())
}

/// Renders the XML document for a given instant. Deterministic: identical
/// inputs at an identical instant produce byte-identical output.
pub fn write_xml(
    nodes: &[ExtractedNode],
    page: &PageInfo,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, "<figma-export>")?;
    writeln!(out, "  <metadata>")?;
    writeln!(
        out,
        "    <exportDate>{}</exportDate>",
        exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )?;
    writeln!(out, "    <sourcePage>{}</sourcePage>", escape_xml(&page.name))?;
    writeln!(out, "    <objectCount>{}</objectCount>", nodes.len())?;
    writeln!(out, "  </metadata>")?;
    writeln!(
        out,
        r#"  <slide width="{}" height="{}">"#,
        page.width, page.height
    )?;
    for node in nodes {
        write_shape(&mut out, node, 2)?;
    }
    writeln!(out, "  </slide>")?;
    writeln!(out, "</figma-export>")?;
    debug!("Rendered XML document of {} byte(s)", out.len());
    Ok(out)
}

fn write_shape(out: &mut String, node: &ExtractedNode, depth: usize) -> Result<()> {
    let pad = "  ".repeat(depth);
    writeln!(
        out,
        r#"{pad}<shape id="{}" name="{}" type="{}" visible="{}">"#,
        escape_xml(&node.id),
        escape_xml(&node.name),
        node.node_type.export_label(),
        node.visible
    )?;
    writeln!(out, r#"{pad}  <position x="{}" y="{}"/>"#, node.x, node.y)?;
    writeln!(
        out,
        r#"{pad}  <size width="{}" height="{}"/>"#,
        node.width, node.height
    )?;
    writeln!(out, r#"{pad}  <rotation degrees="{}"/>"#, node.rotation)?;

    if let Some(fill) = node.fills.as_ref().and_then(|fills| fills.first()) {
        write_paint(out, fill, "fill", None, depth + 1)?;
    }
    if let Some(stroke) = node.strokes.as_ref().and_then(|strokes| strokes.first()) {
        // The weight rides on the stroke element and defaults to a hairline.
        let weight = node.stroke_weight.unwrap_or(1.0);
        write_paint(out, stroke, "stroke", Some(weight), depth + 1)?;
    }
    if let Some(text) = node.text.as_deref().filter(|text| !text.is_empty()) {
        writeln!(out, "{pad}  <text><![CDATA[{}]]></text>", cdata_body(text))?;
    }
    if node.corner_radius.is_some() || node.shape_type.is_some() {
        write!(out, "{pad}  <properties")?;
        if let Some(radius) = node.corner_radius {
            write!(out, r#" cornerRadius="{radius}""#)?;
        }
        if let Some(shape_type) = &node.shape_type {
            write!(out, r#" shapeType="{}""#, escape_xml(shape_type))?;
        }
        writeln!(out, "/>")?;
    }
    if let Some(start) = &node.connector_start {
        write_endpoint(out, "start", start, depth + 1)?;
    }
    if let Some(end) = &node.connector_end {
        write_endpoint(out, "end", end, depth + 1)?;
    }
    if let Some(children) = node.children.as_ref().filter(|children| !children.is_empty()) {
        writeln!(out, "{pad}  <children>")?;
        for child in children {
            write_shape(out, child, depth + 2)?;
        }
        writeln!(out, "{pad}  </children>")?;
    }

    writeln!(out, "{pad}</shape>")?;
    Ok(())
}

fn write_paint(
    out: &mut String,
    paint: &Paint,
    element: &str,
    weight: Option<f64>,
    depth: usize,
) -> Result<()> {
    let pad = "  ".repeat(depth);
    let mut weight_attr = String::new();
    if let Some(weight) = weight {
        write!(weight_attr, r#" weight="{weight}""#)?;
    }

    match paint {
        Paint::Solid { color, opacity } => writeln!(
            out,
            r#"{pad}<{element} type="solid" color="{}" opacity="{opacity}"{weight_attr}/>"#,
            color.to_hex()
        )?,
        Paint::Image {
            image_hash,
            scale_mode,
            opacity,
        } => {
            write!(out, r#"{pad}<{element} type="image""#)?;
            if let Some(hash) = image_hash {
                write!(out, r#" imageHash="{}""#, escape_xml(hash))?;
            }
            if let Some(mode) = scale_mode {
                write!(out, r#" scaleMode="{}""#, escape_xml(mode))?;
            }
            writeln!(out, r#" opacity="{opacity}"{weight_attr}/>"#)?;
        }
        Paint::Gradient {
            gradient_type,
            gradient_stops,
            opacity,
        } => {
            writeln!(
                out,
                r#"{pad}<{element} type="gradient" gradientType="{}" opacity="{opacity}"{weight_attr}>"#,
                gradient_type.as_str()
            )?;
            for stop in gradient_stops {
                writeln!(
                    out,
                    r#"{pad}  <stop position="{}" color="{}" alpha="{}"/>"#,
                    stop.position,
                    stop.color.to_hex(),
                    stop.color.a
                )?;
            }
            writeln!(out, "{pad}</{element}>")?;
        }
        Paint::Unknown => writeln!(out, r#"{pad}<{element} type="unknown"{weight_attr}/>"#)?,
    }
    Ok(())
}

fn write_endpoint(
    out: &mut String,
    element: &str,
    endpoint: &ConnectorEndpoint,
    depth: usize,
) -> Result<()> {
    let pad = "  ".repeat(depth);
    write!(out, r#"{pad}<{element} x="{}" y="{}""#, endpoint.x, endpoint.y)?;
    if let Some(node_id) = &endpoint.endpoint_node_id {
        write!(out, r#" node="{}""#, escape_xml(node_id))?;
    }
    writeln!(out, "/>")?;
    Ok(())
}

/// Escapes text for attribute values and element bodies. The ampersand goes
/// first so already-escaped entities are not escaped twice.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Prepares text for a CDATA block. CDATA is emitted verbatim, except that a
/// literal `]]>` would terminate the block early and has to be split across
/// two sections.
fn cdata_body(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}
