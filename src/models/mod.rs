//! Data model of the host canvas payload.
//!
//! These types mirror, field for field, the JSON the host-side bridge
//! serializes from the board's plugin API: fractional color channels,
//! visibility flags, the `"mixed"` paint sentinel, connector endpoint unions
//! and recursive child lists. The exporter only ever reads this model; the
//! normalized intermediate representation lives in [`crate::extract`].

pub mod common;
pub mod node;
pub mod page;
pub mod paint;

pub use common::{Rgb, Rgba, Vector};
pub use node::{CanvasNode, ConnectorEndpoint, NodeKind, TextSublayer};
pub use page::{CanvasPage, SelectionPayload};
pub use paint::{ColorStop, Paint, PaintKind, PaintList};
