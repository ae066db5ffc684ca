//! Built-in demo scene.

use std::sync::Arc;

use lumen_renderer::{Color, GeometryError, Light, Material, Object, Scene, Shape, Vec3};

/// Ground plane with one sphere of each material under a single light.
pub fn build_scene() -> Result<Scene, GeometryError> {
    let diffuse = Arc::new(Material::Diffuse);

    let mut scene = Scene::new();

    // Ground
    scene.add_object(Object::new(
        Shape::plane(Vec3::ZERO, Vec3::Y)?,
        Color::splat(0.6),
        diffuse.clone(),
    ));

    let spheres = [
        (Vec3::new(-12.0, 4.0, 4.0), 4.0, Color::new(0.8, 0.3, 0.3), diffuse.clone()),
        (Vec3::new(-3.0, 4.0, 6.0), 4.0, Color::new(0.8, 0.8, 0.8), Arc::new(Material::Metal)),
        (Vec3::new(6.0, 4.0, 4.0), 4.0, Color::new(0.8, 0.6, 0.2), Arc::new(Material::FuzzyMetal)),
        (Vec3::new(2.0, 2.5, -6.0), 2.5, Color::WHITE, Arc::new(Material::glass(1.5))),
        (Vec3::new(13.0, 2.0, -4.0), 2.0, Color::new(0.2, 0.4, 0.8), diffuse),
    ];
    for (center, radius, color, material) in spheres {
        scene.add_object(Object::new(Shape::sphere(center, radius)?, color, material));
    }

    scene.add_light(Light::new(
        Shape::sphere(Vec3::new(0.0, 25.0, -5.0), 3.0)?,
        Color::new(1.0, 0.95, 0.85),
        400.0,
    )?);

    log::debug!(
        "Demo scene: {} objects, {} lights",
        scene.objects().len(),
        scene.lights().len()
    );
    Ok(scene)
}
