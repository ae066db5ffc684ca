//! Surface scattering models.
//!
//! Materials carry no color: the integrator tints bounced light with the
//! object's surface color, weighted by [`Material::attenuation`].

use lumen_math::{Ray, Vec3};
use rand::RngCore;

use crate::{gen_f64, shape::HitData};

/// Strength of the random perturbation added by [`Material::FuzzyMetal`].
const FUZZ: f64 = 0.2;

/// How a surface bounces incoming rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian-ish scatter around the normal.
    Diffuse,
    /// Perfect mirror.
    Metal,
    /// Mirror with blurred reflections.
    FuzzyMetal,
    /// Dielectric that refracts or reflects.
    Glass { refractive_index: f64 },
}

impl Material {
    /// Glass with the given index of refraction (1.5 for window glass, 2.4 for diamond).
    pub fn glass(refractive_index: f64) -> Self {
        Material::Glass { refractive_index }
    }

    /// Fraction of the surface color that tints bounced light.
    pub fn attenuation(&self) -> f64 {
        match self {
            Material::Diffuse => 0.8,
            Material::Metal => 0.6,
            Material::FuzzyMetal => 0.65,
            Material::Glass { .. } => 0.0,
        }
    }

    /// Produce the outgoing ray for `ray_in` hitting the surface at `hit`.
    pub fn bounce(&self, ray_in: &Ray, hit: &HitData, rng: &mut dyn RngCore) -> Ray {
        let direction = match self {
            Material::Diffuse => {
                let scatter = hit.normal + random_unit_vector(rng);
                // Catch degenerate scatter direction
                if scatter.length_squared() < 1e-12 {
                    hit.normal
                } else {
                    scatter
                }
            }
            Material::Metal => reflect(ray_in.direction, hit.normal),
            Material::FuzzyMetal => {
                reflect(ray_in.direction, hit.normal) + FUZZ * random_in_unit_sphere(rng)
            }
            Material::Glass { refractive_index } => {
                refract_or_reflect(ray_in.direction, hit, *refractive_index, rng)
            }
        };

        Ray::new(hit.position, direction)
    }
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f64, refractive_index: f64) -> f64 {
    let r0 = ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

fn refract_or_reflect(
    direction: Vec3,
    hit: &HitData,
    refractive_index: f64,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let ratio = if hit.front_face {
        1.0 / refractive_index
    } else {
        refractive_index
    };

    let unit_direction = direction.normalize();
    let cos_theta = (-unit_direction).dot(hit.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // Total internal reflection
    let cannot_refract = ratio * sin_theta > 1.0;

    if cannot_refract || reflectance(cos_theta, refractive_index) > gen_f64(rng) {
        reflect(unit_direction, hit.normal)
    } else {
        refract(unit_direction, hit.normal, ratio).normalize()
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Random point inside the unit sphere, by rejection sampling.
fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
        );
        if v.length_squared() < 1.0 {
            return v;
        }
    }
}

/// Random unit vector, uniformly distributed on the sphere.
fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = random_in_unit_sphere(rng);
        if v.length_squared() > 1e-12 {
            return v.normalize();
        }
    }
}
