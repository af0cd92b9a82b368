//! Column-major 4x4 fixed-point matrix.

use std::ops::Mul;

use crate::fixed::{self, Fixed};
use crate::vector::{Vec3, Vec4};

/// `m[col][row]`, matching the source's column-major storage. Identity by
/// default.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mat4 {
    pub m: [[Fixed; 4]; 4],
}

impl Default for Mat4 {
    #[inline]
    fn default() -> Self {
        Mat4::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Self {
        let mut m = [[Fixed::ZERO; 4]; 4];
        m[0][0] = Fixed::ONE;
        m[1][1] = Fixed::ONE;
        m[2][2] = Fixed::ONE;
        m[3][3] = Fixed::ONE;
        Mat4 { m }
    }

    pub fn translation(v: Vec3) -> Self {
        let mut n = Mat4::identity();
        n.m[3][0] = v.x;
        n.m[3][1] = v.y;
        n.m[3][2] = v.z;
        n.m[3][3] = Fixed::ONE;
        n
    }

    pub fn translation_vec4(v: Vec4) -> Self {
        let mut n = Mat4::identity();
        n.m[3][0] = v.x;
        n.m[3][1] = v.y;
        n.m[3][2] = v.z;
        n.m[3][3] = v.w;
        n
    }

    pub fn rotation_x(radians: Fixed) -> Self {
        let mut r = Mat4::identity();
        let (s, c) = (fixed::sin(radians), fixed::cos(radians));
        r.m[1][1] = c;
        r.m[1][2] = s;
        r.m[2][1] = -s;
        r.m[2][2] = c;
        r
    }

    pub fn rotation_y(radians: Fixed) -> Self {
        let mut r = Mat4::identity();
        let (s, c) = (fixed::sin(radians), fixed::cos(radians));
        r.m[0][0] = c;
        r.m[0][2] = -s;
        r.m[2][0] = s;
        r.m[2][2] = c;
        r
    }

    pub fn rotation_z(radians: Fixed) -> Self {
        let mut r = Mat4::identity();
        let (s, c) = (fixed::sin(radians), fixed::cos(radians));
        r.m[0][0] = c;
        r.m[0][1] = s;
        r.m[1][0] = -s;
        r.m[1][1] = c;
        r
    }

    /// Standard right-handed OpenGL perspective projection. `fovy` is in
    /// *degrees* (converted internally to radians) — rotations take
    /// radians directly. This split matches the source and is intentional,
    /// not an inconsistency to fix.
    pub fn perspective(fovy_deg: Fixed, aspect: Fixed, near: Fixed, far: Fixed) -> Self {
        let mut n = Mat4::identity();
        let tau = Fixed::from_f32(std::f32::consts::TAU);
        let three_sixty = Fixed::from_int(360);
        let fov_rad = fovy_deg * (tau / three_sixty);
        let f = fixed::cot(fov_rad * Fixed::HALF);

        n.m[0][0] = f / aspect;
        n.m[1][1] = f;
        n.m[2][2] = (far + near) / (near - far);
        n.m[3][2] = (Fixed::from_int(2) * far * near) / (near - far);
        n.m[2][3] = -Fixed::ONE;
        n.m[3][3] = Fixed::ZERO;
        n
    }

    /// Shortcut for a square viewport with a 90-degree vertical FOV, where
    /// `f == 1` so the `[0][0]`/`[1][1]` division by `aspect`/`cot` collapses
    /// away.
    pub fn perspective_90_deg_square(near: Fixed, far: Fixed) -> Self {
        let mut n = Mat4::identity();
        n.m[0][0] = Fixed::ONE;
        n.m[1][1] = Fixed::ONE;
        n.m[2][2] = (far + near) / (near - far);
        n.m[3][2] = (Fixed::from_int(2) * far * near) / (near - far);
        n.m[2][3] = -Fixed::ONE;
        n.m[3][3] = Fixed::ZERO;
        n
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut n = Mat4 { m: [[Fixed::ZERO; 4]; 4] };
        for c in 0..4 {
            for r in 0..4 {
                n.m[c][r] = self.m[0][r] * rhs.m[c][0]
                    + self.m[1][r] * rhs.m[c][1]
                    + self.m[2][r] * rhs.m[c][2]
                    + self.m[3][r] * rhs.m[c][3];
            }
        }
        n
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.m[0][0] * v.x + self.m[1][0] * v.y + self.m[2][0] * v.z + self.m[3][0] * v.w,
            self.m[0][1] * v.x + self.m[1][1] * v.y + self.m[2][1] * v.z + self.m[3][1] * v.w,
            self.m[0][2] * v.x + self.m[1][2] * v.y + self.m[2][2] * v.z + self.m[3][2] * v.w,
            self.m[0][3] * v.x + self.m[1][3] * v.y + self.m[2][3] * v.z + self.m[3][3] * v.w,
        )
    }
}
