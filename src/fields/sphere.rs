// Copyright @yucwang 2026

use crate::core::field::DensityField;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vector3f,
    pub radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }
}

impl DensityField for Sphere {
    fn bbox(&self) -> Option<AABB> {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Some(AABB::new(self.center - r, self.center + r))
    }

    fn density(&self, p_world: Vector3f) -> Float {
        if (p_world - self.center).norm_squared() < self.radius * self.radius {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_inside_outside() {
        let sphere = Sphere::new(Vector3f::zeros(), 0.5);
        assert_eq!(sphere.density(Vector3f::zeros()), 1.0);
        assert_eq!(sphere.density(Vector3f::new(0.3, 0.3, 0.0)), 1.0);
        assert_eq!(sphere.density(Vector3f::new(0.4, 0.4, 0.0)), 0.0);
        assert_eq!(sphere.density(Vector3f::new(0.5, 0.0, 0.0)), 0.0);
        assert_eq!(sphere.density(Vector3f::new(1e12, -1e12, 3.0)), 0.0);
    }
}
