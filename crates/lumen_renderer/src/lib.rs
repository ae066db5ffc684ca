//! Lumen renderer - CPU ray tracing
//!
//! A recursive ray tracer with jittered antialiasing and stylized material
//! scattering, driven by a bucket scheduler over a fixed worker pool.
//!
//! # Example
//!
//! ```no_run
//! use lumen_renderer::{render, Camera, Color, Material, NoProgress, Object, RenderConfig, Scene, Shape, Vec3};
//!
//! let config = RenderConfig { width: 320, height: 180, ..RenderConfig::default() };
//! let camera = Camera::new(Vec3::new(0.0, 2.0, -8.0), Vec3::ZERO, 70.0, config.width, config.height)?;
//! let scene = Scene::new().with_object(Object::new(
//!     Shape::plane(Vec3::ZERO, Vec3::Y)?,
//!     Color::splat(0.6),
//!     Material::Diffuse,
//! ));
//!
//! let image = render(&camera, &scene, &config, &NoProgress)?;
//! image.save("out.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bucket;
mod camera;
mod error;
mod integrator;
mod material;
mod renderer;
mod scene;
mod shape;

pub use bucket::{generate_blocks, Block, BlockGrid, BlockOrder, BlockResult, CancelFlag};
pub use camera::{Camera, CameraConfig};
pub use error::{ConfigError, GeometryError, RenderError, RenderResult};
pub use integrator::{clear_path, direct_light, surface_filter, trace};
pub use material::Material;
pub use renderer::{
    render, render_blocks, render_pixel, render_with_cancel, ImageBuffer, NoProgress,
    RenderConfig, RenderProgress,
};
pub use scene::{Light, Object, Scene, Surface};
pub use shape::{HitData, Shape, IMPRECISION_DELTA};

/// Re-export math types from lumen_math
pub use lumen_math::{Angle, Color, Coords, Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10_000 {
            let v = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
