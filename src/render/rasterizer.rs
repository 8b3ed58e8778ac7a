//! Rasterizer core: bounding box, inside test, and the shared fill loop.
//!
//! Uses the edge function (signed area) formulation for the point-in-triangle
//! test. For each pixel in the triangle's screen-space bounding box, three
//! edge functions are evaluated and normalized by the triangle's total signed
//! area, yielding barycentric weights directly. This degrades gracefully:
//! a degenerate (zero-area) triangle classifies every point as outside
//! instead of leaking NaN into the depth test.

use super::framebuffer::FrameBuffer;
use super::project::ScreenVertex;
use super::shader::PixelShader;

/// Signed areas below this are treated as degenerate.
const AREA_EPSILON: f32 = 1e-8;

/// Screen-space bounding box of a triangle, clamped to buffer bounds.
///
/// Derived and transient; `max` bounds are inclusive. When the clamp leaves
/// an inverted range the box is empty and iteration visits nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// Compute the clamped screen-space bounding box of a projected triangle.
pub fn bounding_box(verts: &[ScreenVertex; 3], width: u32, height: u32) -> BoundingBox {
    let min_x = verts[0].x.min(verts[1].x).min(verts[2].x).floor() as i32;
    let max_x = verts[0].x.max(verts[1].x).max(verts[2].x).ceil() as i32;
    let min_y = verts[0].y.min(verts[1].y).min(verts[2].y).floor() as i32;
    let max_y = verts[0].y.max(verts[1].y).max(verts[2].y).ceil() as i32;

    BoundingBox {
        min_x: min_x.max(0),
        max_x: max_x.min(width as i32 - 1),
        min_y: min_y.max(0),
        max_y: max_y.min(height as i32 - 1),
    }
}

/// Compute the edge function value for point (px, py) relative to edge (a -> b).
///
/// This is the 2D cross product `(b - a) × (p - a)`: positive when p is to
/// the left of the edge, negative to the right, zero exactly on it.
#[inline]
fn edge_function(a: ScreenVertex, b: ScreenVertex, px: f32, py: f32) -> f32 {
    (px - a.x) * (b.y - a.y) - (py - a.y) * (b.x - a.x)
}

/// Barycentric weights of point (x, y) with respect to a projected triangle.
///
/// Returns `None` when the point is outside the triangle or the triangle is
/// degenerate. Otherwise the three weights are each in [0, 1] and sum to 1;
/// weight `i` belongs to vertex `i`.
pub fn barycentric(verts: &[ScreenVertex; 3], x: f32, y: f32) -> Option<[f32; 3]> {
    let [v0, v1, v2] = *verts;

    // Total signed area; the orientation sign cancels when normalizing, so
    // both windings are accepted.
    let area = edge_function(v0, v1, v2.x, v2.y);
    if area.abs() < AREA_EPSILON {
        return None;
    }

    let w0 = edge_function(v1, v2, x, y) / area;
    let w1 = edge_function(v2, v0, x, y) / area;
    let w2 = edge_function(v0, v1, x, y) / area;

    // The weights sum to 1 by construction; inside or on the boundary iff
    // none is negative (and hence none exceeds 1 beyond rounding).
    if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
        return None;
    }
    if w0 > 1.0 || w1 > 1.0 || w2 > 1.0 {
        return None;
    }

    Some([w0, w1, w2])
}

/// Interpolated 1/w depth at the given barycentric weights.
///
/// 1/w is linear in screen space, so a plain weighted sum suffices. Larger
/// values are nearer to the camera. Every filled shading mode and the depth
/// buffer use this same convention.
#[inline]
pub fn interpolate_depth(verts: &[ScreenVertex; 3], weights: [f32; 3]) -> f32 {
    weights[0] / verts[0].w + weights[1] / verts[1].w + weights[2] / verts[2].w
}

/// Fill a projected triangle into the frame buffer.
///
/// The shared iteration contract for the filled shading modes: walk the
/// clamped bounding box, skip pixels outside the triangle, interpolate
/// depth, and for depth-winning pixels ask the shader for a color. The
/// color and depth writes are a single paired operation inside
/// [`FrameBuffer::set_pixel_with_depth`].
///
/// Pixels are sampled at their centers (x + 0.5, y + 0.5).
pub fn fill_triangle<S: PixelShader>(
    verts: &[ScreenVertex; 3],
    buffer: &mut FrameBuffer,
    shader: &S,
) {
    let bbox = bounding_box(verts, buffer.width(), buffer.height());
    if bbox.is_empty() {
        return;
    }

    for y in bbox.min_y..=bbox.max_y {
        for x in bbox.min_x..=bbox.max_x {
            let Some(weights) = barycentric(verts, x as f32 + 0.5, y as f32 + 0.5) else {
                continue;
            };
            let depth = interpolate_depth(verts, weights);
            let color = shader.shade(weights);
            buffer.set_pixel_with_depth(x, y, depth, color.pack());
        }
    }
}
