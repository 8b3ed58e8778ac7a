//! Surface materials and their per-pixel resolution.
//!
//! A material channel is either a constant color or a 2D texture; before a
//! color reaches the illumination model it is resolved to a concrete
//! [`Pixel`] so the lighting math stays type-uniform.

use crate::math::vec2::Vec2;
use crate::pixel::Pixel;
use crate::texture::Texture;

/// Default ambient reflectance used for unset channels.
pub const DEFAULT_AMBIENT: Pixel = Pixel::rgb(0.0, 0.0, 0.0);
/// Default diffuse reflectance used for unset channels.
pub const DEFAULT_DIFFUSE: Pixel = Pixel::rgb(1.0, 1.0, 1.0);
/// Default specular reflectance used for unset channels.
pub const DEFAULT_SPECULAR: Pixel = Pixel::rgb(1.0, 1.0, 1.0);
/// Default shininess exponent.
pub const DEFAULT_SHININESS: f32 = 20.0;

/// One reflectance slot of a material: unset, a constant color, or a texture.
pub enum MaterialChannel {
    /// Fall back to the channel's global default reflectance.
    Default,
    /// A single constant color, independent of texture coordinates.
    Color(Pixel),
    /// A 2D color texture, point-sampled at the surface UV.
    Texture(Texture),
}

impl MaterialChannel {
    /// Resolve the channel to a concrete color.
    ///
    /// An unset channel, or a textured channel with no UV available,
    /// resolves to `default`. A constant color ignores the UV entirely.
    pub fn resolve(&self, uv: Option<Vec2>, default: Pixel) -> Pixel {
        match self {
            MaterialChannel::Default => default,
            MaterialChannel::Color(color) => *color,
            MaterialChannel::Texture(texture) => match uv {
                Some(uv) => texture.sample(uv.x, uv.y),
                None => default,
            },
        }
    }
}

/// Reflectance description shared by every triangle of a mesh instance.
///
/// Immutable for the duration of a draw call.
pub struct Material {
    pub ambient: MaterialChannel,
    pub diffuse: MaterialChannel,
    pub specular: MaterialChannel,
    pub shininess: f32,
    /// Tangent-space normal texture; channels encode a [-1, 1] vector
    /// as `(n + 1) / 2`.
    pub normal_map: Option<Texture>,
}

impl Material {
    /// Resolve all three channels at one texture coordinate.
    pub fn resolve(&self, uv: Option<Vec2>) -> ResolvedMaterial {
        ResolvedMaterial {
            ambient: self.ambient.resolve(uv, DEFAULT_AMBIENT),
            diffuse: self.diffuse.resolve(uv, DEFAULT_DIFFUSE),
            specular: self.specular.resolve(uv, DEFAULT_SPECULAR),
            shininess: self.shininess,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: MaterialChannel::Default,
            diffuse: MaterialChannel::Default,
            specular: MaterialChannel::Default,
            shininess: DEFAULT_SHININESS,
            normal_map: None,
        }
    }
}

/// A material with every channel resolved to a constant color, ready for
/// the illumination model.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedMaterial {
    pub ambient: Pixel,
    pub diffuse: Pixel,
    pub specular: Pixel,
    pub shininess: f32,
}
