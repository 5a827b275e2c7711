//! Surface extent and color types

use serde::{Deserialize, Serialize};

/// The drawable extent particles live in, in surface units (pixels).
///
/// Extents are not validated: a non-positive axis is a degenerate but legal
/// surface that collapses coordinates on that axis to zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either axis is zero, negative or not finite
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn center(&self) -> [f32; 2] {
        [self.width.max(0.0) * 0.5, self.height.max(0.0) * 0.5]
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert hue (degrees), saturation, lightness (0..1) and alpha to RGBA
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma * 0.5;

        Self {
            r: r + m,
            g: g + m,
            b: b + m,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_degenerate() {
        assert!(!Surface::new(800.0, 600.0).is_degenerate());
        assert!(Surface::new(0.0, 600.0).is_degenerate());
        assert!(Surface::new(800.0, -1.0).is_degenerate());
        assert!(Surface::new(f32::NAN, 600.0).is_degenerate());
    }

    #[test]
    fn test_surface_center() {
        assert_eq!(Surface::new(800.0, 600.0).center(), [400.0, 300.0]);
        assert_eq!(Surface::new(-10.0, 0.0).center(), [0.0, 0.0]);
    }

    #[test]
    fn test_color_from_hsla_primaries() {
        let red = Color::from_hsla(0.0, 1.0, 0.5, 1.0);
        assert!((red.r - 1.0).abs() < 1e-5 && red.g.abs() < 1e-5 && red.b.abs() < 1e-5);

        let green = Color::from_hsla(120.0, 1.0, 0.5, 0.8);
        assert!(green.r.abs() < 1e-5 && (green.g - 1.0).abs() < 1e-5);
        assert!((green.a - 0.8).abs() < 1e-6);

        let wrapped = Color::from_hsla(360.0, 1.0, 0.5, 1.0);
        assert!((wrapped.r - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_color_gray_without_saturation() {
        let gray = Color::from_hsla(200.0, 0.0, 0.25, 1.0);
        assert!((gray.r - 0.25).abs() < 1e-5);
        assert!((gray.g - 0.25).abs() < 1e-5);
        assert!((gray.b - 0.25).abs() < 1e-5);
    }
}
