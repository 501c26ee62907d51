//! Serializers over the extracted node tree.
//!
//! Every converter consumes [`crate::extract`]'s representation on its own.
//! The JSON document goes through the shape mapper's flat records; the XML
//! and markdown outputs read the tree directly. New export formats are added
//! here as new modules, never as special cases inside extraction.

pub mod json;
pub mod markdown;
pub mod xml;

pub use json::{
    build_document, serialize_document, to_shape_record, ExportDocument, ShapeProperties,
    ShapeRecord, FORMAT_NAME, FORMAT_VERSION,
};
pub use markdown::to_markdown;
pub use xml::{serialize_xml, write_xml};
