//! The rendering pipeline: projection, rasterization, shading, buffers.

pub mod framebuffer;
pub mod project;
pub mod rasterizer;
pub mod renderer;
pub mod shader;

pub use framebuffer::{FrameBuffer, FAR_DEPTH};
pub use project::{project, project_naive, ScreenVertex};
pub use rasterizer::{barycentric, bounding_box, fill_triangle, BoundingBox};
pub use renderer::{Renderer, ShadingMode};
pub use shader::{FlatShader, GouraudShader, PhongShader, PixelShader};
