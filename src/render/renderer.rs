//! The frame context: owns the color and depth buffers and drives the
//! per-triangle pipeline (projection, mode dispatch, rasterization).

use super::framebuffer::{FrameBuffer, FAR_DEPTH};
use super::project::{self, ScreenVertex};
use super::rasterizer::fill_triangle;
use super::shader::{FlatShader, GouraudShader, PhongShader};
use crate::lighting;
use crate::material::Material;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::pixel::Pixel;

/// Frame background, opaque black.
const BACKGROUND: u32 = 0xFF000000;

/// Fixed wireframe color.
const WIRE_COLOR: Pixel = Pixel::RED;

/// Step size of the parametric edge walk in wire mode, in pixels of arc length.
const WIRE_STEP: f32 = 0.5;

/// Cross products below this mean the normal triangle is degenerate and the
/// flat-shading normal falls back to the first vertex normal.
const NORMAL_EPSILON: f32 = 1e-12;

/// The selectable per-pixel shading strategy.
///
/// Frame-level configuration: every triangle drawn while a mode is selected
/// uses that mode; no state carries over between triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// No drawing at all.
    #[default]
    None,
    /// Triangle edges only, fixed color, no depth test.
    Wire,
    /// One illumination evaluation per triangle (face normal + centroid).
    Flat,
    /// One illumination evaluation per vertex, colors interpolated.
    Gouraud,
    /// One illumination evaluation per pixel, with texture and normal-map
    /// resolution.
    Phong,
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::None => write!(f, "None"),
            ShadingMode::Wire => write!(f, "Wire"),
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Gouraud => write!(f, "Gouraud"),
            ShadingMode::Phong => write!(f, "Phong"),
        }
    }
}

/// Owns the image and depth buffers for one render target and exposes the
/// draw interface.
///
/// Dimensions are fixed for the renderer's lifetime. The per-frame inputs
/// (shading mode, light position, eye position) are plain setters supplied
/// by the camera/scene collaborators once per frame. Drawing is synchronous
/// and single-threaded: triangles are processed one at a time and the only
/// cross-triangle coupling is the depth buffer's nearest-wins invariant.
pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
    shading_mode: ShadingMode,
    light_pos: Vec3,
    eye_pos: Vec3,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![BACKGROUND; size],
            depth_buffer: vec![FAR_DEPTH; size],
            width,
            height,
            shading_mode: ShadingMode::default(),
            light_pos: Vec3::ZERO,
            eye_pos: Vec3::ZERO,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_shading_mode(&mut self, mode: ShadingMode) {
        self.shading_mode = mode;
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading_mode
    }

    /// World-space point light position, supplied once per frame.
    pub fn set_light_position(&mut self, light_pos: Vec3) {
        self.light_pos = light_pos;
    }

    /// World-space viewer position for the specular term, supplied once per
    /// frame alongside the view-projection matrix it should agree with.
    pub fn set_eye_position(&mut self, eye_pos: Vec3) {
        self.eye_pos = eye_pos;
    }

    /// Reset the image buffer to the background color and the depth buffer
    /// to the far sentinel. Must run before the first triangle of a frame.
    pub fn clear(&mut self) {
        self.color_buffer.fill(BACKGROUND);
        self.depth_buffer.fill(FAR_DEPTH);
    }

    /// Draw one triangle under the currently selected shading mode.
    ///
    /// * `verts` - world-space vertex positions
    /// * `normals` - per-vertex normals
    /// * `uvs` - optional per-vertex texture coordinates in [0, 1]
    /// * `material` - reflectance description, shared across the mesh
    /// * `view_projection` - combined camera transform for this frame
    ///
    /// A triangle rejected by projection, or degenerate on screen, is a
    /// no-op; nothing aborts the frame.
    pub fn draw_triangle(
        &mut self,
        verts: &[Vec3; 3],
        normals: &[Vec3; 3],
        uvs: Option<[Vec2; 3]>,
        material: &Material,
        view_projection: &Mat4,
    ) {
        if self.shading_mode == ShadingMode::None {
            return;
        }

        let Some(screen) = project::project(verts, view_projection, self.width, self.height)
        else {
            return;
        };

        match self.shading_mode {
            ShadingMode::None => {}
            ShadingMode::Wire => self.draw_wire(&screen),
            ShadingMode::Flat => self.draw_flat(verts, normals, uvs, material, &screen),
            ShadingMode::Gouraud => {
                let light_pos = self.light_pos;
                let eye_pos = self.eye_pos;
                let colors = [0, 1, 2].map(|i| {
                    let resolved = material.resolve(uvs.map(|uv| uv[i]));
                    lighting::shade(verts[i], normals[i], light_pos, eye_pos, &resolved)
                });
                let shader = GouraudShader::new(colors);
                fill_triangle(&screen, &mut self.as_framebuffer(), &shader);
            }
            ShadingMode::Phong => {
                let shader = PhongShader::new(
                    *verts,
                    *normals,
                    uvs,
                    material,
                    self.light_pos,
                    self.eye_pos,
                );
                fill_triangle(&screen, &mut self.as_framebuffer(), &shader);
            }
        }
    }

    /// Flat shading: one illumination evaluation per triangle.
    fn draw_flat(
        &mut self,
        verts: &[Vec3; 3],
        normals: &[Vec3; 3],
        uvs: Option<[Vec2; 3]>,
        material: &Material,
        screen: &[ScreenVertex; 3],
    ) {
        // Face normal from the normal triangle's edge vectors. When the
        // vertex normals coincide the cross product vanishes; degrade to the
        // first vertex normal instead of dividing by zero.
        let cross = (normals[1] - normals[0]).cross(normals[2] - normals[0]);
        let face_normal = if cross.dot(cross) < NORMAL_EPSILON {
            normals[0].normalize()
        } else {
            cross.normalize()
        };

        let centroid = (verts[0] + verts[1] + verts[2]) / 3.0;
        let centroid_uv = uvs.map(|uv| {
            Vec2::new(
                (uv[0].x + uv[1].x + uv[2].x) / 3.0,
                (uv[0].y + uv[1].y + uv[2].y) / 3.0,
            )
        });

        let resolved = material.resolve(centroid_uv);
        let color = lighting::shade(
            centroid,
            face_normal,
            self.light_pos,
            self.eye_pos,
            &resolved,
        );

        let shader = FlatShader::new(color);
        fill_triangle(screen, &mut self.as_framebuffer(), &shader);
    }

    /// Wire mode: walk each edge parametrically at a fixed arc-length step,
    /// rounding to the nearest pixel. No fill, no depth test.
    fn draw_wire(&mut self, screen: &[ScreenVertex; 3]) {
        let color = WIRE_COLOR.pack();
        for i in 0..3 {
            let va = screen[(i + 1) % 3];
            let vb = screen[(i + 2) % 3];

            let edge = Vec2::new(vb.x - va.x, vb.y - va.y);
            let length = edge.magnitude();
            if length == 0.0 {
                self.set_pixel(va.x.round() as i32, va.y.round() as i32, color);
                continue;
            }
            let dir = edge.normalize();

            let mut j = 0.0;
            while j <= length {
                let x = (va.x + dir.x * j).round() as i32;
                let y = (va.y + dir.y * j).round() as i32;
                self.set_pixel(x, y, color);
                j += WIRE_STEP;
            }
        }
    }

    /// Write a pixel without depth testing, ignoring out-of-bounds writes.
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.color_buffer[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.depth_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// The rendered frame as bytes (ARGB8888) for presentation by whatever
    /// surface the collaborator uses.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }

    /// True if (x, y) holds something other than the cleared background.
    #[cfg(test)]
    fn is_covered(&self, x: i32, y: i32) -> bool {
        self.get_pixel(x, y) != Some(BACKGROUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialChannel;
    use crate::projection::Projection;

    const W: u32 = 100;
    const H: u32 = 100;
    const EYE: Vec3 = Vec3::new(0.0, 0.0, -10.0);

    fn camera_vp() -> Mat4 {
        Projection::from_degrees(45.0, 1.0, 0.1, 100.0).view_projection(
            EYE,
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    fn renderer(mode: ShadingMode) -> Renderer {
        let mut r = Renderer::new(W, H);
        r.set_shading_mode(mode);
        r.set_light_position(EYE);
        r.set_eye_position(EYE);
        r.clear();
        r
    }

    /// Triangle in the z = 0 plane facing the camera at -z.
    fn facing_triangle() -> ([Vec3; 3], [Vec3; 3]) {
        (
            [
                Vec3::ZERO,
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
            ],
            [Vec3::new(0.0, 0.0, -1.0); 3],
        )
    }

    fn covered_count(r: &Renderer) -> usize {
        let mut count = 0;
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                if r.is_covered(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    fn buffers_match(a: &Renderer, b: &Renderer) -> bool {
        a.as_bytes() == b.as_bytes()
            && (0..H as i32)
                .all(|y| (0..W as i32).all(|x| a.get_depth(x, y) == b.get_depth(x, y)))
    }

    #[test]
    fn flat_fill_covers_half_base_times_height() {
        let mut r = renderer(ShadingMode::Flat);
        let (verts, normals) = facing_triangle();
        r.draw_triangle(&verts, &normals, None, &Material::default(), &camera_vp());

        // Screen-space legs are both ~24.1 px, so the filled area should be
        // close to 0.5 * base * height.
        let screen = project::project(&verts, &camera_vp(), W, H).unwrap();
        let base = screen[1].x - screen[0].x;
        let height = screen[2].y - screen[0].y;
        let expected = 0.5 * base * height;

        let count = covered_count(&r) as f32;
        assert!(
            (count - expected).abs() / expected < 0.15,
            "covered {} pixels, expected about {}",
            count,
            expected
        );

        // White diffuse lit head-on: every covered pixel is white-ish.
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                if r.is_covered(x, y) {
                    let c = Pixel::unpack(r.get_pixel(x, y).unwrap());
                    assert!(c.r > 0.9 && c.g > 0.9 && c.b > 0.9);
                }
            }
        }
    }

    #[test]
    fn triangle_beyond_far_plane_leaves_buffers_untouched() {
        let mut r = renderer(ShadingMode::Flat);
        let pristine = renderer(ShadingMode::Flat);
        // Camera sits at z = -10 with a far plane of 100.
        let verts = [
            Vec3::new(0.0, 0.0, 200.0),
            Vec3::new(2.0, 0.0, 200.0),
            Vec3::new(0.0, 2.0, 200.0),
        ];
        let normals = [Vec3::new(0.0, 0.0, -1.0); 3];
        r.draw_triangle(&verts, &normals, None, &Material::default(), &camera_vp());
        assert!(buffers_match(&r, &pristine));
    }

    #[test]
    fn redrawing_at_equal_depth_changes_nothing() {
        let mut r = renderer(ShadingMode::Flat);
        let (verts, normals) = facing_triangle();
        let material = Material::default();
        r.draw_triangle(&verts, &normals, None, &material, &camera_vp());

        let mut again = renderer(ShadingMode::Flat);
        again.draw_triangle(&verts, &normals, None, &material, &camera_vp());
        again.draw_triangle(&verts, &normals, None, &material, &camera_vp());

        assert!(buffers_match(&r, &again));
    }

    #[test]
    fn nearest_wins_regardless_of_draw_order() {
        let near_verts = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.5, -1.0, 0.0),
            Vec3::new(0.0, 1.5, 0.0),
        ];
        let far_verts = [
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(1.5, -1.0, 3.0),
            Vec3::new(0.0, 1.5, 3.0),
        ];
        let normals = [Vec3::new(0.0, 0.0, -1.0); 3];
        let red = Material {
            diffuse: MaterialChannel::Color(Pixel::rgb(1.0, 0.0, 0.0)),
            ..Material::default()
        };
        let green = Material {
            diffuse: MaterialChannel::Color(Pixel::rgb(0.0, 1.0, 0.0)),
            ..Material::default()
        };

        let mut near_first = renderer(ShadingMode::Flat);
        near_first.draw_triangle(&near_verts, &normals, None, &red, &camera_vp());
        near_first.draw_triangle(&far_verts, &normals, None, &green, &camera_vp());

        let mut far_first = renderer(ShadingMode::Flat);
        far_first.draw_triangle(&far_verts, &normals, None, &green, &camera_vp());
        far_first.draw_triangle(&near_verts, &normals, None, &red, &camera_vp());

        assert!(buffers_match(&near_first, &far_first));
        // Sanity: both triangles actually contributed pixels somewhere.
        assert!(covered_count(&near_first) > 0);
    }

    #[test]
    fn wire_mode_never_touches_the_depth_buffer() {
        let mut r = renderer(ShadingMode::Wire);
        let (verts, normals) = facing_triangle();
        r.draw_triangle(&verts, &normals, None, &Material::default(), &camera_vp());

        assert!(covered_count(&r) > 0, "wire edges should be visible");
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                assert_eq!(r.get_depth(x, y), Some(FAR_DEPTH));
            }
        }
    }

    #[test]
    fn filled_modes_pair_color_and_depth_writes() {
        for mode in [ShadingMode::Flat, ShadingMode::Gouraud, ShadingMode::Phong] {
            let mut r = renderer(mode);
            let (verts, normals) = facing_triangle();
            r.draw_triangle(&verts, &normals, None, &Material::default(), &camera_vp());

            for y in 0..H as i32 {
                for x in 0..W as i32 {
                    let covered = r.is_covered(x, y);
                    let depth_written = r.get_depth(x, y) != Some(FAR_DEPTH);
                    assert_eq!(covered, depth_written, "mismatch at ({x}, {y}) in {mode}");
                }
            }
        }
    }

    #[test]
    fn uniform_triangle_shades_alike_in_all_filled_modes() {
        // Identical vertex normals and a distant light make the lighting
        // constant across the face, so interpolating colors (Gouraud) or
        // normals (Phong) must agree with Flat up to rounding.
        let (verts, normals) = facing_triangle();
        let material = Material {
            specular: MaterialChannel::Color(Pixel::BLACK),
            ..Material::default()
        };
        let far_light = Vec3::new(0.0, 0.0, -1000.0);

        let render = |mode| {
            let mut r = renderer(mode);
            r.set_light_position(far_light);
            r.set_eye_position(far_light);
            r.draw_triangle(&verts, &normals, None, &material, &camera_vp());
            r
        };
        let flat = render(ShadingMode::Flat);
        let gouraud = render(ShadingMode::Gouraud);
        let phong = render(ShadingMode::Phong);

        for y in 0..H as i32 {
            for x in 0..W as i32 {
                assert_eq!(flat.is_covered(x, y), gouraud.is_covered(x, y));
                assert_eq!(flat.is_covered(x, y), phong.is_covered(x, y));
                if flat.is_covered(x, y) {
                    let f = Pixel::unpack(flat.get_pixel(x, y).unwrap());
                    for other in [&gouraud, &phong] {
                        let o = Pixel::unpack(other.get_pixel(x, y).unwrap());
                        assert!((f.r - o.r).abs() <= 2.0 / 255.0);
                        assert!((f.g - o.g).abs() <= 2.0 / 255.0);
                        assert!((f.b - o.b).abs() <= 2.0 / 255.0);
                    }
                }
            }
        }
    }

    #[test]
    fn no_mode_draws_nothing() {
        let mut r = renderer(ShadingMode::None);
        let pristine = renderer(ShadingMode::None);
        let (verts, normals) = facing_triangle();
        r.draw_triangle(&verts, &normals, None, &Material::default(), &camera_vp());
        assert!(buffers_match(&r, &pristine));
    }

    #[test]
    fn clear_resets_both_buffers() {
        let mut r = renderer(ShadingMode::Flat);
        let (verts, normals) = facing_triangle();
        r.draw_triangle(&verts, &normals, None, &Material::default(), &camera_vp());
        assert!(covered_count(&r) > 0);

        r.clear();
        assert_eq!(covered_count(&r), 0);
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                assert_eq!(r.get_depth(x, y), Some(FAR_DEPTH));
            }
        }
    }

    #[test]
    fn textured_phong_picks_distinct_checkerboard_texels() {
        use crate::texture::Texture;

        // 2x2 checkerboard diffuse texture, one triangle mapped so that
        // different pixels land in different texels.
        let tex = Texture::from_pixels(
            2,
            2,
            &[
                Pixel::rgb(1.0, 0.0, 0.0),
                Pixel::rgb(0.0, 0.0, 1.0),
                Pixel::rgb(0.0, 0.0, 1.0),
                Pixel::rgb(1.0, 0.0, 0.0),
            ],
        )
        .unwrap();
        let material = Material {
            ambient: MaterialChannel::Color(Pixel::BLACK),
            diffuse: MaterialChannel::Texture(tex),
            specular: MaterialChannel::Color(Pixel::BLACK),
            ..Material::default()
        };

        let verts = [
            Vec3::new(-2.0, -2.0, 0.0),
            Vec3::new(2.0, -2.0, 0.0),
            Vec3::new(-2.0, 2.0, 0.0),
        ];
        let normals = [Vec3::new(0.0, 0.0, -1.0); 3];
        let uvs = Some([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ]);

        let mut r = renderer(ShadingMode::Phong);
        r.draw_triangle(&verts, &normals, uvs, &material, &camera_vp());

        let mut reds = 0;
        let mut blues = 0;
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                if !r.is_covered(x, y) {
                    continue;
                }
                let c = Pixel::unpack(r.get_pixel(x, y).unwrap());
                if c.r > c.b {
                    reds += 1;
                } else {
                    blues += 1;
                }
            }
        }
        assert!(reds > 0 && blues > 0, "both texel colors should appear");
    }
}
