use serde::{Deserialize, Serialize};

/// An RGB color as the host reports it: each channel a fraction from 0.0 to 1.0.
/// Derived from: https://www.figma.com/plugin-docs/api/RGB/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// The red component of the color, from 0.0 to 1.0.
    pub r: Option<f32>,
    /// The green component of the color, from 0.0 to 1.0.
    pub g: Option<f32>,
    /// The blue component of the color, from 0.0 to 1.0.
    pub b: Option<f32>,
}

/// An RGBA color. Channels are fractional like [`Rgb`]; alpha is 0.0–1.0.
/// Derived from: https://www.figma.com/plugin-docs/api/RGBA/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: Option<f32>,
    pub g: Option<f32>,
    pub b: Option<f32>,
    /// The alpha component, from 0.0 to 1.0. Unlike the color channels this is
    /// never rescaled downstream.
    pub a: Option<f32>,
}

/// A 2D point in board coordinates.
/// Derived from: https://www.figma.com/plugin-docs/api/Vector/
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}
