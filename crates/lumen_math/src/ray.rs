use crate::{Coords, Vec3};

/// A half-line starting at `origin` and travelling along `direction`.
///
/// The direction is not required to be unit length. Intersection routines
/// report both the ray parameter `t` and the world-space distance so
/// callers never have to care.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Coords,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Coords, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray from `origin` through `target`.
    #[inline]
    pub fn towards(origin: Coords, target: Coords) -> Self {
        Self::new(origin, target - origin)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Coords {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_towards() {
        let ray = Ray::towards(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 4.0, 1.0));
        assert_eq!(ray.direction, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(ray.at(1.0), Vec3::new(1.0, 4.0, 1.0));
    }
}
