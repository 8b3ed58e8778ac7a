use std::path::Path;

use crate::pixel::Pixel;

/// A 2D color texture, stored as a flat grid of ARGB pixels.
///
/// The rasterizer only fetches pixels from it; decoding image files into
/// the grid is delegated to the `image` crate.
pub struct Texture {
    data: Vec<u32>, // ARGB8888, row-major, top-left origin
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a texture from pixel colors already in memory.
    ///
    /// Returns `None` if the data length does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Pixel]) -> Option<Self> {
        if pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            data: pixels.iter().map(Pixel::pack).collect(),
            width,
            height,
        })
    }

    /// Point-sample the texture at UV coordinates in [0, 1].
    ///
    /// Reads exactly one texel at `(floor(u * width), floor(v * height))`,
    /// no filtering. Indices are clamped to the texture's own bounds, which
    /// is the only guarantee the storage makes for in-range coordinates.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Pixel {
        let x = ((u * self.width as f32).floor() as i64).clamp(0, self.width as i64 - 1) as u32;
        let y = ((v * self.height as f32).floor() as i64).clamp(0, self.height as i64 - 1) as u32;
        Pixel::unpack(self.data[(y * self.width + x) as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 checkerboard: white top-left and bottom-right, black elsewhere.
    fn checkerboard() -> Texture {
        Texture::from_pixels(
            2,
            2,
            &[Pixel::WHITE, Pixel::BLACK, Pixel::BLACK, Pixel::WHITE],
        )
        .unwrap()
    }

    #[test]
    fn point_sampling_selects_distinct_texels() {
        let tex = checkerboard();
        let near_origin = tex.sample(0.1, 0.1);
        let far_corner = tex.sample(0.9, 0.9);
        // (0.1, 0.1) floors to texel (0,0), (0.9, 0.9) to (1,1); both are
        // white here, while the off-diagonal texels are black.
        assert_eq!(near_origin.pack(), Pixel::WHITE.pack());
        assert_eq!(far_corner.pack(), Pixel::WHITE.pack());
        assert_eq!(tex.sample(0.9, 0.1).pack(), Pixel::BLACK.pack());
        assert_ne!(tex.sample(0.1, 0.1).pack(), tex.sample(0.9, 0.1).pack());
    }

    #[test]
    fn sample_clamps_to_texture_bounds() {
        let tex = checkerboard();
        // u = 1.0 floors to index 2, which must clamp to the last texel.
        assert_eq!(tex.sample(1.0, 0.0).pack(), Pixel::BLACK.pack());
        assert_eq!(tex.sample(1.0, 1.0).pack(), Pixel::WHITE.pack());
    }

    #[test]
    fn from_pixels_rejects_mismatched_dimensions() {
        assert!(Texture::from_pixels(2, 2, &[Pixel::BLACK]).is_none());
    }
}
