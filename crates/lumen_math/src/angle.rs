//! Spherical angles.
//!
//! Pitch is measured from the +Y axis, yaw in the XZ plane from +X towards
//! +Z. Values are kept in degrees; conversion to radians happens only when
//! turning an angle back into a direction.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub};

use crate::Vec3;

/// A (yaw, pitch) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angle {
    pub yaw: f64,
    pub pitch: f64,
}

impl Angle {
    /// Create a new angle.
    #[inline]
    pub const fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Angle of a direction vector. The vector does not need to be unit length.
    pub fn from_vector(v: Vec3) -> Self {
        let yaw = v.z.atan2(v.x);
        let adjacent = (v.x * v.x + v.z * v.z).sqrt();
        let pitch = adjacent.atan2(v.y);
        Self::new(yaw.to_degrees(), pitch.to_degrees())
    }

    /// Offset by a yaw and pitch delta.
    #[inline]
    pub fn delta(self, d_yaw: f64, d_pitch: f64) -> Self {
        Self::new(self.yaw + d_yaw, self.pitch + d_pitch)
    }

    /// Both components converted to radians.
    #[inline]
    pub fn to_radians(self) -> Self {
        Self::new(self.yaw.to_radians(), self.pitch.to_radians())
    }

    /// Unit direction pointing along this angle.
    pub fn to_unit_vector(self) -> Vec3 {
        let rad = self.to_radians();
        let (sin_pitch, cos_pitch) = rad.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = rad.yaw.sin_cos();
        Vec3::new(sin_pitch * cos_yaw, cos_pitch, sin_pitch * sin_yaw)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.yaw + rhs.yaw, self.pitch + rhs.pitch)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        *self = *self + rhs;
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.yaw - rhs.yaw, self.pitch - rhs.pitch)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::new(self.yaw * rhs, self.pitch * rhs)
    }
}

impl MulAssign<f64> for Angle {
    fn mul_assign(&mut self, rhs: f64) {
        self.yaw *= rhs;
        self.pitch *= rhs;
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle::new(self.yaw / rhs, self.pitch / rhs)
    }
}

impl DivAssign<f64> for Angle {
    fn div_assign(&mut self, rhs: f64) {
        self.yaw /= rhs;
        self.pitch /= rhs;
    }
}
