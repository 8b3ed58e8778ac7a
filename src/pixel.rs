//! RGB(A) color values and their arithmetic.
//!
//! Shading math runs on unclamped `f32` channels so that ambient, diffuse,
//! and specular terms can be summed freely; values are clamped to [0, 1]
//! only when packed into the ARGB `u32` the frame buffer stores.

use std::ops::{Add, Mul};

/// An RGB color with alpha, channels in nominal [0, 1] range.
///
/// Arithmetic never clamps; out-of-range results are legal intermediates
/// and get clamped by [`Pixel::pack`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Pixel {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Pack into ARGB8888, clamping each channel to [0, 1] first.
    pub fn pack(&self) -> u32 {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (to_byte(self.a) << 24) | (to_byte(self.r) << 16) | (to_byte(self.g) << 8) | to_byte(self.b)
    }

    /// Unpack from ARGB8888 into [0, 1] channels.
    pub fn unpack(argb: u32) -> Self {
        Self::new(
            ((argb >> 16) & 0xFF) as f32 / 255.0,
            ((argb >> 8) & 0xFF) as f32 / 255.0,
            (argb & 0xFF) as f32 / 255.0,
            ((argb >> 24) & 0xFF) as f32 / 255.0,
        )
    }

    /// Combines three colors with barycentric weights. Alpha is interpolated
    /// along with the color channels.
    pub fn barycentric_combine(weights: [f32; 3], c: [Self; 3]) -> Self {
        Self::new(
            weights[0] * c[0].r + weights[1] * c[1].r + weights[2] * c[2].r,
            weights[0] * c[0].g + weights[1] * c[1].g + weights[2] * c[2].g,
            weights[0] * c[0].b + weights[1] * c[1].b + weights[2] * c[2].b,
            weights[0] * c[0].a + weights[1] * c[1].a + weights[2] * c[2].a,
        )
    }
}

/// Component-wise color addition. Alpha saturates at the larger operand.
impl Add<Pixel> for Pixel {
    type Output = Pixel;

    fn add(self, rhs: Pixel) -> Self::Output {
        Self::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a.max(rhs.a),
        )
    }
}

/// Scale the color channels by a scalar, leaving alpha alone.
impl Mul<f32> for Pixel {
    type Output = Pixel;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a)
    }
}

/// Component-wise color modulation, e.g. reflectance times light color.
impl Mul<Pixel> for Pixel {
    type Output = Pixel;

    fn mul(self, rhs: Pixel) -> Self::Output {
        Self::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }
}
