//! Minimal linear algebra for the rasterizer.
//!
//! Column-vector convention throughout: matrices multiply vectors on the
//! right, transforms chain right-to-left.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
