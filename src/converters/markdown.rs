use crate::extract::{ExtractedNode, PageInfo};
use std::fmt::Write; // Import Write trait for formatting

/// The outline title of a node: its layer name, or its type label when the
/// layer was never named.
fn outline_title(node: &ExtractedNode) -> &str {
    if node.name.is_empty() {
        node.node_type.export_label()
    } else {
        &node.name
    }
}

/// The bullet text of a text-bearing node. Multi-line content flattens to a
/// single line so it stays one list item; nodes without text yield None and
/// are skipped.
fn outline_text(node: &ExtractedNode) -> Option<String> {
    let text = node.text.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.replace('\n', " "))
}

/// Whether the node or any of its descendants would contribute a bullet.
/// Containers with nothing to say are skipped entirely.
fn has_outline_content(node: &ExtractedNode) -> bool {
    if outline_text(node).is_some() {
        return true;
    }
    node.children
        .as_ref()
        .map_or(false, |children| children.iter().any(has_outline_content))
}

/// Writes one node as a list item, recursing into container children with
/// one extra indent level.
fn write_outline_item(outline: &mut String, node: &ExtractedNode, indent: usize) {
    if !has_outline_content(node) {
        return;
    }
    let pad = "  ".repeat(indent);
    match node.children.as_deref() {
        Some(children) => {
            writeln!(outline, "{}- {}", pad, outline_title(node))
                .expect("Writing to String failed");
            for child in children {
                write_outline_item(outline, child, indent + 1);
            }
        }
        None => {
            if let Some(text) = outline_text(node) {
                writeln!(outline, "{}- {}", pad, text).expect("Writing to String failed");
            }
        }
    }
}

// --- Public API Function ---

/// Renders the extracted selection as a markdown text outline: the page name
/// as the document header, each selected container as a section listing its
/// children, and every text-bearing node as a bullet with its resolved text.
///
/// # Arguments
///
/// * `nodes` - The extracted top-level nodes, in selection order.
/// * `page` - The page snapshot taken with them.
///
/// # Returns
///
/// A `String` containing the outline in Markdown structure. Nodes without
/// any text content (and containers holding only such nodes) are omitted.
pub fn to_markdown(nodes: &[ExtractedNode], page: &PageInfo) -> String {
    let mut outline = String::new();

    writeln!(outline, "# {}\n", page.name).expect("Writing to String failed");

    for node in nodes {
        if !has_outline_content(node) {
            continue;
        }
        match node.children.as_deref() {
            Some(children) => {
                writeln!(outline, "## {}\n", outline_title(node))
                    .expect("Writing to String failed");
                for child in children {
                    write_outline_item(&mut outline, child, 0);
                }
                outline.push('\n');
            }
            None => {
                if let Some(text) = outline_text(node) {
                    writeln!(outline, "- {}", text).expect("Writing to String failed");
                }
            }
        }
    }

    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_selection;
    use crate::models::page::SelectionPayload;

    fn outline(payload: &str) -> String {
        let payload: SelectionPayload = serde_json::from_str(payload).unwrap();
        let (nodes, page) = extract_selection(&payload).unwrap();
        to_markdown(&nodes, &page)
    }

    #[test]
    fn outline_nests_sections_and_bullets() {
        let text = outline(
            r#"{
                "page": {"name": "Sprint Review"},
                "selection": [
                    {
                        "id": "1:1", "name": "Agenda", "type": "FRAME",
                        "children": [
                            {"id": "1:2", "name": "n1", "type": "STICKY",
                             "text": {"characters": "Demo the exporter"}},
                            {
                                "id": "1:3", "name": "Later", "type": "GROUP",
                                "children": [
                                    {"id": "1:4", "name": "n2", "type": "TEXT",
                                     "characters": "Retro notes"}
                                ]
                            }
                        ]
                    },
                    {"id": "1:5", "name": "n3", "type": "STICKY",
                     "text": {"characters": "Parking lot"}}
                ]
            }"#,
        );

        assert!(text.starts_with("# Sprint Review\n"));
        assert!(text.contains("## Agenda\n"));
        assert!(text.contains("- Demo the exporter\n"));
        assert!(text.contains("- Later\n"));
        assert!(text.contains("  - Retro notes\n"));
        assert!(text.contains("- Parking lot\n"));
    }

    #[test]
    fn nodes_without_text_are_omitted() {
        let text = outline(
            r#"{
                "page": {"name": "Board"},
                "selection": [
                    {"id": "1:1", "name": "Decoration", "type": "RECTANGLE"},
                    {"id": "1:2", "name": "Empty frame", "type": "FRAME",
                     "children": [{"id": "1:3", "name": "r", "type": "ELLIPSE"}]},
                    {"id": "1:4", "name": "n", "type": "STICKY",
                     "text": {"characters": "Only me"}}
                ]
            }"#,
        );

        assert!(!text.contains("Decoration"));
        assert!(!text.contains("Empty frame"));
        assert!(text.contains("- Only me\n"));
    }

    #[test]
    fn multi_line_text_flattens_to_one_bullet() {
        let text = outline(
            r#"{
                "page": {"name": "Board"},
                "selection": [{"id": "1:1", "name": "n", "type": "STICKY",
                               "text": {"characters": "line one\nline two"}}]
            }"#,
        );
        assert!(text.contains("- line one line two\n"));
    }
}
