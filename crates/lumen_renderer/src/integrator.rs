//! Recursive light transport.
//!
//! `trace` is a pure function of the ray, the scene, the remaining depth and
//! the random source handed in by the caller. It never mutates the scene.

use lumen_math::{Color, Ray};
use rand::RngCore;

use crate::scene::{Light, Object, Scene, Surface};
use crate::shape::HitData;

/// Compute the color seen along `ray`.
///
/// Returns black once `depth` reaches zero, and `background` when the ray
/// escapes the scene.
pub fn trace(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::BLACK;
    }

    let Some((hit, surface)) = scene.nearest_hit(ray) else {
        return background;
    };

    match surface {
        // Lights only emit. Direct lighting is not added on top.
        Surface::Light(light) => light.emission(),
        Surface::Object(object) => {
            let bounced = object.material.bounce(ray, &hit, rng);
            let indirect = trace(&bounced, scene, depth - 1, background, rng);
            indirect * surface_filter(object) + direct_light(&hit, scene)
        }
    }
}

/// Per-channel multiplier applied to light bounced off `object`.
///
/// `WHITE - invert(color) * attenuation`: a material with zero attenuation
/// passes light untinted, one with attenuation 1 multiplies by the full
/// surface color. Every channel stays within [0, 1].
pub fn surface_filter(object: &Object) -> Color {
    Color::WHITE - object.color.invert() * object.material.attenuation()
}

/// Sum of unoccluded light contributions at a surface point.
pub fn direct_light(hit: &HitData, scene: &Scene) -> Color {
    let mut total = Color::BLACK;
    for light in scene.lights() {
        if let Some(contribution) = light_contribution(hit, light, scene.objects()) {
            total += contribution;
        }
    }
    total
}

fn light_contribution(hit: &HitData, light: &Light, objects: &[Object]) -> Option<Color> {
    let to_anchor = Ray::towards(hit.position, light.shape.anchor());
    let on_light = light.shape.hit(&to_anchor)?;

    let shadow_ray = Ray::towards(hit.position, on_light.position);
    let distance = on_light.distance;
    if !clear_path(&shadow_ray, distance, objects) {
        return None;
    }

    let to_light = shadow_ray.direction.try_normalize()?;
    let cosine = hit.normal.dot(to_light).max(0.0);
    let strength = (cosine * light.intensity / (distance * distance)).min(1.0);
    Some(light.color * strength)
}

/// True if no object is hit along `ray` closer than `max_distance`.
pub fn clear_path(ray: &Ray, max_distance: f64, objects: &[Object]) -> bool {
    !objects.iter().any(|obj| {
        obj.shape
            .hit(ray)
            .is_some_and(|hit| hit.distance < max_distance)
    })
}
