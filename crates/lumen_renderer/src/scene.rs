//! Scene contents: surface objects plus emitting lights.

use std::sync::Arc;

use lumen_math::{Color, Ray};

use crate::{shape::HitData, GeometryError, Material, Shape};

/// A shape with a surface color and a material.
///
/// Shapes and materials are reference counted so several objects can share
/// one definition without copying geometry.
#[derive(Debug, Clone)]
pub struct Object {
    pub shape: Arc<Shape>,
    pub color: Color,
    pub material: Arc<Material>,
}

impl Object {
    pub fn new(shape: impl Into<Arc<Shape>>, color: Color, material: impl Into<Arc<Material>>) -> Self {
        Self {
            shape: shape.into(),
            color,
            material: material.into(),
        }
    }
}

/// An emitting shape. Lights have no material: they never scatter.
#[derive(Debug, Clone)]
pub struct Light {
    pub shape: Arc<Shape>,
    pub color: Color,
    pub intensity: f64,
}

impl Light {
    /// Create a light. The intensity must be finite and positive.
    pub fn new(
        shape: impl Into<Arc<Shape>>,
        color: Color,
        intensity: f64,
    ) -> Result<Self, GeometryError> {
        if !(intensity.is_finite() && intensity > 0.0) {
            return Err(GeometryError::NonPositiveIntensity(intensity));
        }
        Ok(Self {
            shape: shape.into(),
            color,
            intensity,
        })
    }

    /// Color seen when a ray hits the light directly.
    ///
    /// Saturates towards white as the intensity grows.
    pub fn emission(&self) -> Color {
        Color::WHITE - self.color.invert() / self.intensity.sqrt()
    }
}

/// What the nearest hit along a ray belongs to.
#[derive(Debug, Clone, Copy)]
pub enum Surface<'a> {
    Object(&'a Object),
    Light(&'a Light),
}

/// Objects and lights to render. Read-only while rendering.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Builder form of [`Scene::add_object`].
    pub fn with_object(mut self, object: Object) -> Self {
        self.add_object(object);
        self
    }

    /// Builder form of [`Scene::add_light`].
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Total number of objects and lights.
    pub fn len(&self) -> usize {
        self.objects.len() + self.lights.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.lights.is_empty()
    }

    /// Nearest hit across all objects and lights.
    ///
    /// Objects and lights compete in the same search, so a light can hide an
    /// object behind it and the other way round.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(HitData, Surface<'_>)> {
        let objects = self
            .objects
            .iter()
            .filter_map(|obj| obj.shape.hit(ray).map(|hit| (hit, Surface::Object(obj))));
        let lights = self
            .lights
            .iter()
            .filter_map(|light| light.shape.hit(ray).map(|hit| (hit, Surface::Light(light))));

        objects
            .chain(lights)
            .min_by(|(a, _), (b, _)| a.distance.total_cmp(&b.distance))
    }
}
