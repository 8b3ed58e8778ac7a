//! World space to screen space projection.
//!
//! A triangle's vertices are pushed through the combined view-projection
//! matrix to clip coordinates, perspective-divided to NDC, and remapped to
//! pixel coordinates. The pre-division `w` rides along on each vertex
//! because the depth buffer interpolates `1/w` in screen space.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Clip-space w below this is treated as degenerate (on or behind the
/// camera plane).
const W_EPSILON: f32 = 1e-6;

/// Scale used by the orthographic fallback projection.
const ORTHOGRAPHIC_SCALE: f32 = 5.0;

/// A vertex projected into screen space.
///
/// `x`/`y` are pixel coordinates, `z` is the normalized device depth in
/// [-1, 1], and `w` is the pre-division homogeneous weight. Invariant for
/// anything that reaches the rasterizer: `w > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl ScreenVertex {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Project three world-space vertices through a view-projection matrix.
///
/// Returns `None` when the triangle cannot be rasterized by this simple
/// pipeline (no near-plane clipping is implemented):
/// - any vertex lands on or behind the camera plane (`w <= 0`), which also
///   covers the sign-straddling case, or
/// - all three vertices fall beyond the far plane or before the near plane.
pub fn project(
    verts: &[Vec3; 3],
    view_projection: &Mat4,
    width: u32,
    height: u32,
) -> Option<[ScreenVertex; 3]> {
    let mut projected = [ScreenVertex::new(0.0, 0.0, 0.0, 0.0); 3];

    for (i, vertex) in verts.iter().enumerate() {
        let clip = *view_projection * Vec4::from(*vertex);
        if clip.w <= W_EPSILON {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let ndc_z = clip.z / clip.w;

        projected[i] = ScreenVertex::new(
            ndc_x * width as f32 / 2.0 + width as f32 / 2.0,
            ndc_y * height as f32 / 2.0 + height as f32 / 2.0,
            ndc_z,
            clip.w,
        );
    }

    // Basic near/far rejection: drop the triangle only when it lies wholly
    // outside the depth range.
    if projected.iter().all(|v| v.z > 1.0) || projected.iter().all(|v| v.z < -1.0) {
        return None;
    }

    Some(projected)
}

/// Naive orthographic projection that ignores camera pose entirely.
///
/// Degenerate fallback path for rendering without a camera transform; never
/// used for normal camera-driven drawing. `w` is 1 for every vertex, so
/// depth interpolation degrades to a constant.
pub fn project_naive(verts: &[Vec3; 3], width: u32, height: u32) -> [ScreenVertex; 3] {
    let aspect = height as f32 / width as f32;
    verts.map(|v| {
        let x = v.x / ORTHOGRAPHIC_SCALE;
        let y = v.y / (ORTHOGRAPHIC_SCALE * aspect);
        ScreenVertex::new(
            x * width as f32 / 2.0 + width as f32 / 2.0,
            y * height as f32 / 2.0 + height as f32 / 2.0,
            v.z,
            1.0,
        )
    })
}
