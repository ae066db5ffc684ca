//! Geometric primitives and ray intersection.

use lumen_math::{Coords, Interval, Ray, Vec3};

use crate::GeometryError;

/// Minimum accepted ray parameter.
///
/// Bounce and shadow rays start on a surface and must not re-hit it.
pub const IMPRECISION_DELTA: f64 = 0.001;

/// Range of ray parameters that count as a hit.
const HIT_RANGE: Interval = Interval::beyond(IMPRECISION_DELTA);

/// Record of a ray-shape intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitData {
    /// Point of intersection
    pub position: Coords,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
    /// Whether the ray hit the outward-facing side of the surface
    pub front_face: bool,
    /// Ray parameter at the hit
    pub t: f64,
    /// World-space distance from the ray origin
    pub distance: f64,
}

impl HitData {
    /// Build a hit at parameter `t`, orienting `outward_normal` against the ray.
    pub fn facing(ray: &Ray, t: f64, outward_normal: Vec3) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction.dot(outward_normal) <= 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            position: ray.at(t),
            normal,
            front_face,
            t,
            distance: t * ray.direction.length(),
        }
    }
}

/// A shape that rays can hit. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere { center: Coords, radius: f64 },
    Plane { point: Coords, normal: Vec3 },
}

impl Shape {
    /// Create a sphere. The radius must be finite and positive.
    pub fn sphere(center: Coords, radius: f64) -> Result<Self, GeometryError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Shape::Sphere { center, radius })
    }

    /// Create an infinite plane through `point`. The normal is normalized.
    pub fn plane(point: Coords, normal: Vec3) -> Result<Self, GeometryError> {
        let normal = normal
            .try_normalize()
            .ok_or(GeometryError::ZeroLengthVector)?;
        Ok(Shape::Plane { point, normal })
    }

    /// The point shadow rays aim at when this shape is used as a light.
    pub fn anchor(&self) -> Coords {
        match self {
            Shape::Sphere { center, .. } => *center,
            Shape::Plane { point, .. } => *point,
        }
    }

    /// Intersect a ray with this shape, returning the nearest hit beyond
    /// [`IMPRECISION_DELTA`].
    pub fn hit(&self, ray: &Ray) -> Option<HitData> {
        match self {
            Shape::Sphere { center, radius } => hit_sphere(*center, *radius, ray),
            Shape::Plane { point, normal } => hit_plane(*point, *normal, ray),
        }
    }
}

fn hit_sphere(center: Coords, radius: f64, ray: &Ray) -> Option<HitData> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let half_b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let root = HIT_RANGE.nearest([(-half_b - sqrtd) / a, (-half_b + sqrtd) / a])?;

    let outward_normal = (ray.at(root) - center) / radius;
    Some(HitData::facing(ray, root, outward_normal))
}

fn hit_plane(point: Coords, normal: Vec3, ray: &Ray) -> Option<HitData> {
    // Parallel rays divide by zero and land on inf or NaN, both rejected here
    let t = (point - ray.origin).dot(normal) / ray.direction.dot(normal);
    if !HIT_RANGE.surrounds(t) {
        return None;
    }
    Some(HitData::facing(ray, t, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Light;
    use lumen_math::Color;

    fn unit_sphere_at(z: f64) -> Shape {
        Shape::sphere(Vec3::new(0.0, 0.0, z), 1.0).unwrap()
    }

    #[test]
    fn test_sphere_hit_distance() {
        let sphere = Shape::sphere(Vec3::new(0.0, 0.0, 10.0), 2.5).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let hit = sphere.hit(&ray).expect("ray aimed at center must hit");
        assert!((hit.distance - 7.5).abs() < 1e-9);
        assert!(hit.front_face);
        assert!((hit.normal - -Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_distance_with_scaled_direction() {
        let sphere = Shape::sphere(Vec3::new(3.0, 4.0, 0.0), 1.0).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0) * 0.1);

        let hit = sphere.hit(&ray).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-9);
        assert!((hit.t - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_miss_when_aimed_away() {
        let sphere = unit_sphere_at(-5.0);
        assert!(sphere.hit(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
        assert!(sphere.hit(&Ray::new(Vec3::ZERO, Vec3::Y)).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside_is_back_face() {
        let sphere = unit_sphere_at(0.0);
        let hit = sphere.hit(&Ray::new(Vec3::ZERO, Vec3::X)).unwrap();

        assert!(!hit.front_face);
        assert!((hit.distance - 1.0).abs() < 1e-9);
        // Normal flipped to face the ray
        assert!((hit.normal - -Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_sphere_rejects_self_intersection() {
        let sphere = unit_sphere_at(0.0);
        // Start on the surface heading outward: the near root is ~0
        let ray = Ray::new(Vec3::X, Vec3::X);
        assert!(sphere.hit(&ray).is_none());
    }

    #[test]
    fn test_plane_hit() {
        let plane = Shape::plane(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0)).unwrap();
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 1.0));

        let hit = plane.hit(&ray).unwrap();
        assert!((hit.t - 10.0).abs() < 1e-9);
        assert!(hit.position.y.abs() < 1e-9);
        assert!(hit.front_face);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_plane_parallel_never_hits() {
        let plane = Shape::plane(Vec3::ZERO, Vec3::Y).unwrap();

        for origin in [Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, Vec3::new(5.0, -3.0, 2.0)] {
            assert!(plane.hit(&Ray::new(origin, Vec3::X)).is_none());
            assert!(plane.hit(&Ray::new(origin, Vec3::new(1.0, 0.0, -4.0))).is_none());
        }
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let plane = Shape::plane(Vec3::ZERO, Vec3::Y).unwrap();
        assert!(plane.hit(&Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y)).is_none());
    }

    #[test]
    fn test_plane_from_below_is_back_face() {
        let plane = Shape::plane(Vec3::ZERO, Vec3::Y).unwrap();
        let hit = plane.hit(&Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y)).unwrap();
        assert!(!hit.front_face);
        assert_eq!(hit.normal, -Vec3::Y);
    }

    #[test]
    fn test_invalid_shapes() {
        assert_eq!(
            Shape::sphere(Vec3::ZERO, 0.0),
            Err(GeometryError::NonPositiveRadius(0.0))
        );
        assert!(Shape::sphere(Vec3::ZERO, f64::NAN).is_err());
        assert_eq!(
            Shape::plane(Vec3::ZERO, Vec3::ZERO),
            Err(GeometryError::ZeroLengthVector)
        );
    }

    #[test]
    fn test_invalid_light_intensity() {
        let shape = unit_sphere_at(5.0);
        for intensity in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let result = Light::new(shape.clone(), Color::WHITE, intensity);
            assert!(matches!(result, Err(GeometryError::NonPositiveIntensity(_))));
        }
        assert!(Light::new(shape, Color::WHITE, 0.5).is_ok());
    }

    #[test]
    fn test_anchor() {
        assert_eq!(unit_sphere_at(4.0).anchor(), Vec3::new(0.0, 0.0, 4.0));
        let plane = Shape::plane(Vec3::new(1.0, 2.0, 3.0), Vec3::Y).unwrap();
        assert_eq!(plane.anchor(), Vec3::new(1.0, 2.0, 3.0));
    }
}
