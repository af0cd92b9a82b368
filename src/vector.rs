//! Fixed-point vector types: `Vec2`, `Vec3`, `Vec4`.
//!
//! Component-wise add/sub, scalar mul/div, and a dot product exposed both as
//! `.dot()` and as `*` between two vectors of the same arity (mirroring
//! `vec3::operator*` in the source). `Vec4::w` defaults to `1` so that
//! promoting a `Vec3`/`Vec2` into clip space is just filling in the missing
//! components.

use std::ops::{Add, Div, Mul, Sub};

use crate::fixed::Fixed;

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2 {
    pub x: Fixed,
    pub y: Fixed,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: Fixed::ZERO, y: Fixed::ZERO };

    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> Fixed {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(self) -> Fixed {
        self.dot(self).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Fixed> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Fixed) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<Fixed> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: Fixed) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Mul<Vec2> for Vec2 {
    type Output = Fixed;
    #[inline]
    fn mul(self, rhs: Vec2) -> Fixed {
        self.dot(rhs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: Fixed::ZERO, y: Fixed::ZERO, z: Fixed::ZERO };

    #[inline]
    pub const fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> Fixed {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length(self) -> Fixed {
        self.dot(self).sqrt()
    }
}

// Note: the original source's vec3::operator+/- reuse `that.x` in place of
// `that.z` for the third component (a copy-paste artifact). The component-wise
// behavior implemented here is the intended one.
impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<Fixed> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Fixed) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<Fixed> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: Fixed) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Fixed;
    #[inline]
    fn mul(self, rhs: Vec3) -> Fixed {
        self.dot(rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec4 {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
    pub w: Fixed,
}

impl Default for Vec4 {
    #[inline]
    fn default() -> Self {
        Vec4::new(Fixed::ZERO, Fixed::ZERO, Fixed::ZERO, Fixed::ONE)
    }
}

impl Vec4 {
    pub const ZERO: Vec4 =
        Vec4 { x: Fixed::ZERO, y: Fixed::ZERO, z: Fixed::ZERO, w: Fixed::ZERO };

    #[inline]
    pub const fn new(x: Fixed, y: Fixed, z: Fixed, w: Fixed) -> Self {
        Self { x, y, z, w }
    }

    /// Promotes a `Vec2` to clip space: `{x, y, 0, 1}`.
    #[inline]
    pub fn from_vec2(v: Vec2) -> Self {
        Vec4::new(v.x, v.y, Fixed::ZERO, Fixed::ONE)
    }

    /// Promotes a `Vec3` to clip space: `{x, y, z, 1}`.
    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Vec4::new(v.x, v.y, v.z, Fixed::ONE)
    }

    #[inline]
    pub fn dot(self, other: Vec4) -> Fixed {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length(self) -> Fixed {
        self.dot(self).sqrt()
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    #[inline]
    fn add(self, rhs: Vec4) -> Vec4 {
        Vec4::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    #[inline]
    fn sub(self, rhs: Vec4) -> Vec4 {
        Vec4::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<Fixed> for Vec4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, rhs: Fixed) -> Vec4 {
        Vec4::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Div<Fixed> for Vec4 {
    type Output = Vec4;
    #[inline]
    fn div(self, rhs: Fixed) -> Vec4 {
        Vec4::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

impl Mul<Vec4> for Vec4 {
    type Output = Fixed;
    #[inline]
    fn mul(self, rhs: Vec4) -> Fixed {
        self.dot(rhs)
    }
}
