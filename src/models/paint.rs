use serde::{Deserialize, Serialize};

use crate::models::common::{Rgb, Rgba};

/// The kind of a paint, as tagged by the host.
/// Derived from: https://www.figma.com/plugin-docs/api/Paint/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    /// A single solid color.
    Solid,
    /// An image fill referencing an uploaded image by hash.
    Image,
    /// A linear gradient.
    GradientLinear,
    /// A radial gradient.
    GradientRadial,
    /// An angular (sweep) gradient.
    GradientAngular,
    /// A diamond gradient.
    GradientDiamond,
    /// Any paint kind this crate does not recognize. Hosts grow new paint
    /// kinds over time; one unrecognized paint must not abort an export.
    #[serde(other)]
    Unknown,
}

/// One color stop of a gradient paint.
/// Derived from: https://www.figma.com/plugin-docs/api/ColorStop/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position of the stop along the gradient axis, from 0.0 to 1.0.
    pub position: Option<f32>,
    /// The color at this stop, including alpha.
    pub color: Rgba,
}

/// A single fill or stroke paint exactly as the host serializes it.
///
/// All variant-specific fields are optional: the host only populates the ones
/// that apply to the paint's kind, and this model reads the rest defensively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    /// The kind tag driving which of the optional fields below are meaningful.
    #[serde(rename = "type")]
    pub kind: PaintKind,

    /// Whether the paint is rendered. Defaults to visible when absent; an
    /// explicit `false` removes the paint from the export entirely.
    pub visible: Option<bool>,

    /// Overall paint opacity from 0.0 to 1.0. Absent means fully opaque.
    pub opacity: Option<f32>,

    /// Solid paints: the fill color with fractional channels.
    pub color: Option<Rgb>,

    /// Image paints: content hash of the backing image, if it resolved.
    pub image_hash: Option<String>,

    /// Image paints: how the image is fitted into the node (`FILL`, `FIT`,
    /// `CROP`, `TILE`). Carried verbatim; this crate never interprets it.
    pub scale_mode: Option<String>,

    /// Gradient paints: the ordered stop list.
    pub gradient_stops: Option<Vec<ColorStop>>,
}

/// A node's paint stack, or the host's sentinel for a stack that cannot be
/// resolved to a single value (e.g. a shape-with-text whose sublayers carry
/// different fills).
///
/// The host bridge writes the literal string `"mixed"` where the plugin API
/// returns its `mixed` symbol; anything that is not a paint array is treated
/// as that sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaintList {
    /// A concrete paint stack, top paint first.
    Paints(Vec<Paint>),
    /// The mixed/unresolvable sentinel.
    Mixed(String),
}

impl PaintList {
    /// Returns the concrete paints, or `None` for the mixed sentinel.
    pub fn as_paints(&self) -> Option<&[Paint]> {
        match self {
            PaintList::Paints(paints) => Some(paints),
            PaintList::Mixed(_) => None,
        }
    }
}
