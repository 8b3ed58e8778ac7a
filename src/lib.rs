//! A CPU software triangle rasterizer with a pluggable shading pipeline.
//!
//! Given a triangle's world-space vertices, vertex normals, optional UVs, a
//! material, a light position, and a camera's combined view-projection
//! transform, the renderer determines which pixels the triangle covers,
//! resolves visibility through a depth buffer, and computes each covered
//! pixel's color under one of several illumination modes (wireframe, flat,
//! Gouraud, Phong). All rendering is done on the CPU; presenting the frame
//! is left to the caller.
//!
//! # Quick Start
//!
//! ```ignore
//! use softshade::prelude::*;
//!
//! let mut renderer = Renderer::new(800, 600);
//! renderer.set_shading_mode(ShadingMode::Phong);
//! renderer.set_light_position(Vec3::new(10.0, 10.0, -10.0));
//! renderer.set_eye_position(eye);
//!
//! let vp = Projection::from_degrees(45.0, 800.0 / 600.0, 0.3, 1000.0)
//!     .view_projection(eye, target, up);
//! renderer.clear();
//! for tri in &scene {
//!     renderer.draw_triangle(&tri.verts, &tri.normals, tri.uvs, &tri.material, &vp);
//! }
//! present(renderer.as_bytes());
//! ```

pub mod lighting;
pub mod material;
pub mod math;
pub mod pixel;
pub mod projection;
pub mod render;
pub mod texture;

// Re-export commonly needed types at crate root for convenience
pub use material::{Material, MaterialChannel, ResolvedMaterial};
pub use pixel::Pixel;
pub use projection::Projection;
pub use render::{Renderer, ShadingMode};
pub use texture::Texture;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softshade::prelude::*;
/// ```
pub mod prelude {
    // Renderer
    pub use crate::render::{Renderer, ShadingMode};

    // Materials & textures
    pub use crate::material::{Material, MaterialChannel};
    pub use crate::pixel::Pixel;
    pub use crate::texture::Texture;

    // Camera
    pub use crate::projection::Projection;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        fill_triangle, FlatShader, FrameBuffer, GouraudShader, PhongShader, ScreenVertex,
        FAR_DEPTH,
    };
}
