//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column (column-major convention).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a perspective matrix with left-handed coordinate system.
    ///
    /// Points between the near and far planes map to NDC z in [-1, 1];
    /// clip-space w carries the view depth for perspective division.
    pub fn perspective_lh(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let t = near * (fov / 2.0).tan();
        let r = t * aspect_ratio;
        let a = (far + near) / (far - near);
        let b = -2.0 * far * near / (far - near);
        Mat4::new([
            [near / r, 0.0, 0.0, 0.0],
            [0.0, near / t, 0.0, 0.0],
            [0.0, 0.0, a, b],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Creates a view matrix with left-handed coordinate system.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    pub fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right).normalize();

        // Rotation matrix (basis vectors as rows) combined with translation
        // to the eye position
        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [forward.x, forward.y, forward.z, -forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_leaves_point_unchanged() {
        let p = Vec4::point(1.0, -2.0, 3.0);
        let out = Mat4::identity() * p;
        assert_eq!(out, p);
    }

    #[test]
    fn perspective_w_carries_view_depth() {
        let proj = Mat4::perspective_lh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let clip = proj * Vec4::point(0.0, 0.0, 5.0);
        assert_relative_eq!(clip.w, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let view = Mat4::look_at_lh(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        );
        let at_eye = view * Vec4::point(0.0, 0.0, -10.0);
        assert_relative_eq!(at_eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(at_eye.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(at_eye.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn chained_transforms_apply_right_to_left() {
        let m = Mat4::translation(1.0, 0.0, 0.0) * Mat4::translation(0.0, 2.0, 0.0);
        let out = m * Vec4::point(0.0, 0.0, 0.0);
        assert_relative_eq!(out.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(out.y, 2.0, epsilon = 1e-6);
    }
}
