//! Camera and viewplane construction.
//!
//! The viewplane is described by four corner offsets relative to the camera
//! position, built by swinging the look direction's yaw and pitch by half
//! the field of view in each direction.

use lumen_math::{Angle, Coords, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Camera for generating rays into the scene. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Coords,
    target: Coords,
    image_width: u32,
    image_height: u32,

    /// Horizontal and vertical field of view in degrees
    fov_horizontal: f64,
    fov_vertical: f64,

    // Viewplane corners relative to `position`
    top_left: Vec3,
    top_right: Vec3,
    bottom_left: Vec3,
    bottom_right: Vec3,
}

impl Camera {
    /// Build a camera at `position` looking at `target`.
    ///
    /// The vertical field of view follows from the horizontal one and the
    /// image aspect ratio, so pixels are square in angle space.
    pub fn new(
        position: Coords,
        target: Coords,
        fov_horizontal: f64,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, GeometryError> {
        if image_width == 0 || image_height == 0 {
            return Err(GeometryError::EmptyImage {
                width: image_width,
                height: image_height,
            });
        }
        if !(fov_horizontal > 0.0 && fov_horizontal < 180.0) {
            return Err(GeometryError::InvalidFov(fov_horizontal));
        }
        let look = (target - position)
            .try_normalize()
            .ok_or(GeometryError::ZeroLengthVector)?;

        let width = f64::from(image_width);
        let height = f64::from(image_height);
        let fov_vertical = fov_horizontal * height / width;
        if !(fov_vertical > 0.0 && fov_vertical < 180.0) {
            return Err(GeometryError::InvalidFov(fov_vertical));
        }

        let looking = Angle::from_vector(look);
        let (half_h, half_v) = (fov_horizontal / 2.0, fov_vertical / 2.0);

        // Distance to a viewplane corner from the half-width and half-height triangles
        let half = Angle::new(half_h, half_v).to_radians();
        let to_edge_h = (width / 2.0) / half.yaw.sin();
        let to_edge_v = (height / 2.0) / half.pitch.sin();
        let to_vert_line = Vec3::new(0.0, to_edge_v * half.pitch.sin(), to_edge_v * half.pitch.cos());
        let to_horiz_line = Vec3::new(0.0, to_edge_h * half.yaw.sin(), to_edge_h * half.yaw.cos());
        let to_corner = (to_vert_line + to_horiz_line).length();

        let corner = |d_yaw: f64, d_pitch: f64| looking.delta(d_yaw, d_pitch).to_unit_vector() * to_corner;

        Ok(Self {
            position,
            target,
            image_width,
            image_height,
            fov_horizontal,
            fov_vertical,
            top_left: corner(half_h, -half_v),
            top_right: corner(-half_h, -half_v),
            bottom_left: corner(half_h, half_v),
            bottom_right: corner(-half_h, half_v),
        })
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    pub fn target(&self) -> Coords {
        self.target
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Horizontal and vertical field of view in degrees.
    pub fn fov(&self) -> (f64, f64) {
        (self.fov_horizontal, self.fov_vertical)
    }

    /// Viewplane corners relative to the camera position, in the order
    /// top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Angular size of one pixel (yaw, pitch) in degrees.
    pub fn pixel_angle(&self) -> Angle {
        Angle::new(
            self.fov_horizontal / f64::from(self.image_width),
            self.fov_vertical / f64::from(self.image_height),
        )
    }

    /// View angle through a point on the image, in fractional pixel units.
    ///
    /// (0, 0) is the top-left corner of the image and
    /// (width, height) the bottom-right one.
    pub fn view_angle(&self, px: f64, py: f64) -> Angle {
        let across = (self.top_right - self.top_left) * (px / f64::from(self.image_width));
        let down = (self.bottom_left - self.top_left) * (py / f64::from(self.image_height));
        Angle::from_vector(self.top_left + across + down)
    }

    /// Ray from the camera along `angle`.
    pub fn ray(&self, angle: Angle) -> Ray {
        Ray::new(self.position, angle.to_unit_vector())
    }
}

/// Serializable camera description, turned into a [`Camera`] once the image
/// size is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Coords,
    pub target: Coords,
    /// Horizontal field of view in degrees
    pub fov: f64,
}

impl CameraConfig {
    /// Build the camera for an image of the given size.
    pub fn build(&self, image_width: u32, image_height: u32) -> Result<Camera, GeometryError> {
        Camera::new(self.position, self.target, self.fov, image_width, image_height)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, -30.0),
            target: Vec3::new(0.0, -1.0, 0.0),
            fov: 90.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_vertical_fov_follows_aspect() {
        let camera = Camera::new(Vec3::ZERO, Vec3::Z, 90.0, 200, 100).unwrap();
        assert_eq!(camera.fov(), (90.0, 45.0));
        assert_eq!(camera.pixel_angle(), Angle::new(0.45, 0.45));
    }

    #[test]
    fn test_corners_are_symmetric_around_look_direction() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 13.0), 60.0, 100, 100)
            .unwrap();
        let [tl, tr, bl, br] = camera.corners();

        // Equal distances to every corner
        let d = tl.length();
        for c in [tr, bl, br] {
            assert!((c.length() - d).abs() < 1e-9);
        }

        // Top corners look up, bottom corners look down
        assert!(tl.y > 0.0 && tr.y > 0.0);
        assert!(bl.y < 0.0 && br.y < 0.0);

        // Left/right mirror each other across the look axis
        assert!((tl.x + tr.x).abs() < 1e-9);
        assert!((tl.y - tr.y).abs() < 1e-9);
        assert!((bl.x + br.x).abs() < 1e-9);
    }

    #[test]
    fn test_center_view_angle_is_look_direction() {
        let camera = Camera::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0), 70.0, 64, 64).unwrap();
        let center = camera.view_angle(32.0, 32.0);
        assert_close(center.to_unit_vector(), Vec3::new(0.6, 0.0, 0.8));
    }

    #[test]
    fn test_view_angle_at_corners() {
        let camera = Camera::new(Vec3::ZERO, Vec3::Z, 90.0, 40, 30).unwrap();
        let [tl, _, _, br] = camera.corners();

        assert_close(camera.view_angle(0.0, 0.0).to_unit_vector(), tl.normalize());
        // The viewplane is a parallelogram spanned from the top-left corner
        let far = camera.view_angle(40.0, 30.0).to_unit_vector();
        assert!(far.y < 0.0);
        assert!(far.dot(br.normalize()) > 0.99);
    }

    #[test]
    fn test_ray_starts_at_position() {
        let camera = Camera::new(Vec3::new(0.0, 10.0, -30.0), Vec3::new(0.0, -1.0, 0.0), 90.0, 10, 10)
            .unwrap();
        let ray = camera.ray(camera.view_angle(5.0, 5.0));
        assert_eq!(ray.origin, Vec3::new(0.0, 10.0, -30.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-12);
        assert!(ray.direction.y < 0.0);
    }

    #[test]
    fn test_degenerate_cameras_are_rejected() {
        assert_eq!(
            Camera::new(Vec3::ZERO, Vec3::Z, 0.0, 10, 10),
            Err(GeometryError::InvalidFov(0.0))
        );
        assert_eq!(
            Camera::new(Vec3::ZERO, Vec3::Z, 180.0, 10, 10),
            Err(GeometryError::InvalidFov(180.0))
        );
        assert!(Camera::new(Vec3::ZERO, Vec3::Z, f64::NAN, 10, 10).is_err());
        // Tall images push the vertical FOV past 180
        assert_eq!(
            Camera::new(Vec3::ZERO, Vec3::Z, 100.0, 10, 20),
            Err(GeometryError::InvalidFov(200.0))
        );
        assert_eq!(
            Camera::new(Vec3::ONE, Vec3::ONE, 90.0, 10, 10),
            Err(GeometryError::ZeroLengthVector)
        );
        assert_eq!(
            Camera::new(Vec3::ZERO, Vec3::Z, 90.0, 0, 10),
            Err(GeometryError::EmptyImage { width: 0, height: 10 })
        );
    }

    #[test]
    fn test_camera_config_default_builds() {
        let camera = CameraConfig::default().build(80, 45).unwrap();
        assert_eq!(camera.image_width(), 80);
        assert_eq!(camera.position(), Vec3::new(0.0, 10.0, -30.0));
    }
}
