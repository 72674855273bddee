// Copyright @yucwang 2026

use crate::core::field::DensityField;
use crate::fields::cube::Cube;
use crate::fields::deform::Deformation;
use crate::fields::sphere::Sphere;
use crate::fields::{Collection, Primitive};
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

/// Immutable density scene shared read-only by every render thread.
#[derive(Clone, Debug)]
pub struct Scene {
    field: Primitive,
    deformation: Option<Deformation>,
}

impl Default for Scene {
    /// Unit cube with a sphere of radius 0.25 carved out of its centre.
    fn default() -> Self {
        let field = Collection::new()
            .with_member(Primitive::Cube(Cube::new(Vector3f::zeros(), 1.0)), 1.0)
            .with_member(Primitive::Sphere(Sphere::new(Vector3f::zeros(), 0.25)), -1.0);
        Self::new(Primitive::Collection(field))
    }
}

impl Scene {
    pub fn new(field: Primitive) -> Self {
        Self { field, deformation: None }
    }

    pub fn with_deformation(mut self, deformation: Option<Deformation>) -> Self {
        self.deformation = deformation;
        self
    }

    pub fn field(&self) -> &Primitive {
        &self.field
    }

    pub fn deformation(&self) -> Option<&Deformation> {
        self.deformation.as_ref()
    }

    pub fn describe(&self) -> String {
        let bounds = match self.field.bbox() {
            Some(b) => format!("[{:.3}, {:.3}, {:.3}] - [{:.3}, {:.3}, {:.3}]",
                               b.p_min.x, b.p_min.y, b.p_min.z,
                               b.p_max.x, b.p_max.y, b.p_max.z),
            None => String::from("unbounded"),
        };
        format!("{} field, {} primitives, bounds {}, deformation: {}",
                self.field.type_name(),
                self.field.leaf_count(),
                bounds,
                self.deformation.as_ref().map(|d| d.type_name()).unwrap_or("none"))
    }
}

impl DensityField for Scene {
    // A deformation can move material outside the undeformed bounds.
    fn bbox(&self) -> Option<AABB> {
        match self.deformation {
            Some(_) => None,
            None => self.field.bbox(),
        }
    }

    fn density(&self, p_world: Vector3f) -> Float {
        let p = match &self.deformation {
            Some(d) => d.apply(p_world),
            None => p_world,
        };
        self.field.density(p)
    }
}
