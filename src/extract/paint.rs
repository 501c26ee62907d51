//! Normalized paint values and the paint normalizer.
//!
//! Host paints arrive with fractional 0–1 color channels, per-paint
//! visibility flags and an occasional `"mixed"` sentinel in place of the
//! whole stack. Normalization resolves all of that into plain data both
//! serializers can render without further host knowledge.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::common::{Rgb, Rgba};
use crate::models::paint::{
    ColorStop as RawColorStop, Paint as RawPaint, PaintKind, PaintList,
};

/// An opaque RGB color with integer channels in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    fn from_host(color: &Rgb) -> Self {
        Color {
            r: channel_to_byte(color.r),
            g: channel_to_byte(color.g),
            b: channel_to_byte(color.b),
        }
    }

    /// Formats the color as a `#rrggbb` hex string for XML attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A gradient stop color: integer RGB channels plus the unscaled 0–1 alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl StopColor {
    fn from_host(color: &Rgba) -> Self {
        StopColor {
            r: channel_to_byte(color.r),
            g: channel_to_byte(color.g),
            b: channel_to_byte(color.b),
            a: color.a.unwrap_or(1.0),
        }
    }

    /// Hex form of the RGB part; alpha is carried separately.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One normalized gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis, 0.0–1.0.
    pub position: f32,
    pub color: StopColor,
}

/// The gradient sub-kind, carried verbatim from the host tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GradientKind {
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
}

impl GradientKind {
    /// The host-format tag, used verbatim in XML attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            GradientKind::GradientLinear => "GRADIENT_LINEAR",
            GradientKind::GradientRadial => "GRADIENT_RADIAL",
            GradientKind::GradientAngular => "GRADIENT_ANGULAR",
            GradientKind::GradientDiamond => "GRADIENT_DIAMOND",
        }
    }
}

/// A normalized paint, ready for serialization.
///
/// Invisible paints never reach this representation; the normalizer filters
/// them before dispatching on kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Paint {
    /// A solid color with integer channels.
    #[serde(rename_all = "camelCase")]
    Solid { color: Color, opacity: f32 },

    /// An image reference. The hash stays `null` when the host never
    /// resolved the backing image; the scale mode is carried verbatim.
    #[serde(rename_all = "camelCase")]
    Image {
        image_hash: Option<String>,
        scale_mode: Option<String>,
        opacity: f32,
    },

    /// A gradient of any of the four host sub-kinds, stops in host order.
    #[serde(rename_all = "camelCase")]
    Gradient {
        gradient_type: GradientKind,
        gradient_stops: Vec<GradientStop>,
        opacity: f32,
    },

    /// Placeholder for a paint kind this crate does not recognize. Exported
    /// as-is so one exotic paint does not abort the whole run.
    Unknown,
}

/// Scales a fractional 0–1 channel to an integer 0–255 channel,
/// rounding half away from zero. Missing channels read as 0.
fn channel_to_byte(channel: Option<f32>) -> u8 {
    (channel.unwrap_or(0.0) * 255.0).round() as u8
}

/// Converts a host paint stack into normalized paints.
///
/// The mixed sentinel (and an entirely absent stack) yields an empty
/// sequence: a stack the host could not resolve to concrete paints is
/// treated as having none, not as an error. Paints whose visibility flag is
/// explicitly `false` are dropped before kind dispatch, whatever their kind.
pub fn normalize_paints(list: Option<&PaintList>) -> Vec<Paint> {
    let raw = match list.and_then(PaintList::as_paints) {
        Some(paints) => paints,
        None => return Vec::new(),
    };

    raw.iter()
        .filter(|paint| paint.visible != Some(false))
        .map(normalize_paint)
        .collect()
}

fn normalize_paint(paint: &RawPaint) -> Paint {
    let opacity = paint.opacity.unwrap_or(1.0);
    match paint.kind {
        PaintKind::Solid => Paint::Solid {
            color: paint.color.as_ref().map(Color::from_host).unwrap_or_default(),
            opacity,
        },
        PaintKind::Image => Paint::Image {
            image_hash: paint.image_hash.clone(),
            scale_mode: paint.scale_mode.clone(),
            opacity,
        },
        PaintKind::GradientLinear => gradient_paint(paint, GradientKind::GradientLinear, opacity),
        PaintKind::GradientRadial => gradient_paint(paint, GradientKind::GradientRadial, opacity),
        PaintKind::GradientAngular => gradient_paint(paint, GradientKind::GradientAngular, opacity),
        PaintKind::GradientDiamond => gradient_paint(paint, GradientKind::GradientDiamond, opacity),
        PaintKind::Unknown => {
            warn!("Unrecognized paint kind; exporting placeholder");
            Paint::Unknown
        }
    }
}

fn gradient_paint(paint: &RawPaint, kind: GradientKind, opacity: f32) -> Paint {
    let stops = paint
        .gradient_stops
        .iter()
        .flatten()
        .map(|stop: &RawColorStop| GradientStop {
            position: stop.position.unwrap_or(0.0),
            color: StopColor::from_host(&stop.color),
        })
        .collect();
    Paint::Gradient {
        gradient_type: kind,
        gradient_stops: stops,
        opacity,
    }
}
