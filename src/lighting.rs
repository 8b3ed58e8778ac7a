//! Phong reflection model.
//!
//! Pure per-point illumination: ambient plus diffuse plus specular, with all
//! reflectances already resolved to constant colors (see [`crate::material`]).

use crate::material::ResolvedMaterial;
use crate::math::vec3::Vec3;
use crate::pixel::Pixel;

/// Evaluate the Phong reflection model at a surface point.
///
/// * `point` - surface position in world space
/// * `normal` - surface normal; normalized internally. Precondition: finite
///   and non-zero, otherwise the result is unspecified.
/// * `light_pos` - world-space point light position
/// * `eye_pos` - world-space viewer position (for the specular term)
/// * `material` - resolved reflectances and shininess
///
/// The returned color is **not** clamped; clamping happens when the pixel
/// is packed for the frame buffer. Safe to call concurrently for
/// independent pixels.
pub fn shade(
    point: Vec3,
    normal: Vec3,
    light_pos: Vec3,
    eye_pos: Vec3,
    material: &ResolvedMaterial,
) -> Pixel {
    let normal = normal.normalize();
    let light_dir = (light_pos - point).normalize();

    // Ambient
    let mut color = material.ambient;

    // Diffuse: reflectance scaled by the incidence angle
    let n_dot_l = normal.dot(light_dir).max(0.0);
    color = color + material.diffuse * n_dot_l;

    // Specular: light direction mirrored about the normal, compared against
    // the view direction
    let reflected = light_dir.reflect(normal);
    let view_dir = (eye_pos - point).normalize();
    let r_dot_v = reflected.dot(view_dir).max(0.0);
    color = color + material.specular * r_dot_v.powf(material.shininess);

    color
}
