//! Per-pixel color computation for the filled shading modes.
//!
//! The rasterizer core owns the iteration (bounding box, inside test, depth);
//! a [`PixelShader`] decides the color of each covered pixel from its
//! barycentric weights. Flat, Gouraud, and Phong differ only in what they
//! interpolate and when the illumination model runs, so they share the one
//! fill loop in [`super::rasterizer::fill_triangle`] instead of three copies
//! of it.

use crate::lighting;
use crate::material::Material;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::pixel::Pixel;

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` for each covered, depth-winning pixel,
/// providing the barycentric weights for attribute interpolation. Weight
/// `i` corresponds to triangle vertex `i` and the weights sum to 1.
pub trait PixelShader {
    /// Compute the color for a pixel given its barycentric weights.
    fn shade(&self, weights: [f32; 3]) -> Pixel;
}

/// Flat shader - one color for every pixel of the triangle.
///
/// The color is computed once per triangle, from the face normal and the
/// world-space centroid, before rasterization starts.
pub struct FlatShader {
    color: Pixel,
}

impl FlatShader {
    pub fn new(color: Pixel) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _weights: [f32; 3]) -> Pixel {
        self.color
    }
}

/// Gouraud shader - interpolates per-vertex colors.
///
/// The illumination model runs once per vertex (with that vertex's own
/// position and normal); covered pixels linearly blend the three results.
pub struct GouraudShader {
    vertex_colors: [Pixel; 3],
}

impl GouraudShader {
    pub fn new(vertex_colors: [Pixel; 3]) -> Self {
        Self { vertex_colors }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, weights: [f32; 3]) -> Pixel {
        Pixel::barycentric_combine(weights, self.vertex_colors)
    }
}

/// Phong shader - runs the illumination model once per pixel.
///
/// Interpolates the world-space position and the normal (not the color),
/// renormalizes the interpolated normal, resolves the material at the
/// interpolated texture coordinate, and optionally replaces the normal with
/// one decoded from a tangent-space normal texture. The most expensive path
/// and the only one sampling textures per pixel.
pub struct PhongShader<'a> {
    verts: [Vec3; 3],
    normals: [Vec3; 3],
    uvs: Option<[Vec2; 3]>,
    material: &'a Material,
    light_pos: Vec3,
    eye_pos: Vec3,
}

impl<'a> PhongShader<'a> {
    pub fn new(
        verts: [Vec3; 3],
        normals: [Vec3; 3],
        uvs: Option<[Vec2; 3]>,
        material: &'a Material,
        light_pos: Vec3,
        eye_pos: Vec3,
    ) -> Self {
        Self {
            verts,
            normals,
            uvs,
            material,
            light_pos,
            eye_pos,
        }
    }

    #[inline]
    fn interpolate_uv(&self, weights: [f32; 3]) -> Option<Vec2> {
        self.uvs.map(|uvs| {
            Vec2::new(
                weights[0] * uvs[0].x + weights[1] * uvs[1].x + weights[2] * uvs[2].x,
                weights[0] * uvs[0].y + weights[1] * uvs[1].y + weights[2] * uvs[2].y,
            )
        })
    }
}

impl PixelShader for PhongShader<'_> {
    fn shade(&self, weights: [f32; 3]) -> Pixel {
        let point = Vec3::barycentric_combine(weights, self.verts);
        let mut normal = Vec3::barycentric_combine(weights, self.normals).normalize();

        let uv = self.interpolate_uv(weights);

        // A tangent-space normal texture overrides the interpolated normal:
        // [0,1] channels decode to a [-1,1] vector via 2c - 1.
        if let (Some(map), Some(uv)) = (self.material.normal_map.as_ref(), uv) {
            let texel = map.sample(uv.x, uv.y);
            normal = Vec3::new(
                2.0 * texel.r - 1.0,
                2.0 * texel.g - 1.0,
                2.0 * texel.b - 1.0,
            )
            .normalize();
        }

        let resolved = self.material.resolve(uv);
        lighting::shade(point, normal, self.light_pos, self.eye_pos, &resolved)
    }
}
