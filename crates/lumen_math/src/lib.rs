//! Lumen math types.
//!
//! Double precision throughout: the camera builds its viewplane by going
//! back and forth between vectors and spherical angles, and single
//! precision drifts visibly over that round trip.

// Re-export glam for convenience
pub use glam;

mod angle;
mod color;
mod interval;
mod ray;

pub use angle::Angle;
pub use color::Color;
pub use interval::Interval;
pub use ray::Ray;

/// 3D vector used for directions and offsets.
pub type Vec3 = glam::DVec3;

/// A position in world space.
pub type Coords = Vec3;
