// Copyright @yucwang 2026

use crate::core::field::DensityField;
use crate::math::aabb::AABB;
use crate::math::constants::{EPSILON, Float, Vector3f};

/// Finite solid cylinder around the segment `p0 -> p1`, flat at both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub p0: Vector3f,
    pub p1: Vector3f,
    pub radius: Float,
}

impl Cylinder {
    pub fn new(p0: Vector3f, p1: Vector3f, radius: Float) -> Self {
        Self { p0, p1, radius }
    }

    pub fn contains(&self, p: &Vector3f) -> bool {
        let axis = self.p1 - self.p0;
        let len2 = axis.norm_squared();
        if len2 < EPSILON {
            return false;
        }
        let rel = p - self.p0;
        let t = rel.dot(&axis) / len2;
        if t < 0.0 || t > 1.0 {
            return false;
        }
        (rel - axis * t).norm_squared() < self.radius * self.radius
    }
}

impl DensityField for Cylinder {
    fn bbox(&self) -> Option<AABB> {
        let mut bbox = AABB::new(self.p0, self.p1);
        bbox.dilate(self.radius);
        Some(bbox)
    }

    fn density(&self, p_world: Vector3f) -> Float {
        if self.contains(&p_world) { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_contains_along_axis() {
        let cyl = Cylinder::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), 0.1);
        assert!(cyl.contains(&Vector3f::new(0.05, 0.0, 0.5)));
        assert!(!cyl.contains(&Vector3f::new(0.15, 0.0, 0.5)));
        // Beyond the end caps.
        assert!(!cyl.contains(&Vector3f::new(0.0, 0.0, 1.05)));
        assert!(!cyl.contains(&Vector3f::new(0.0, 0.0, -0.05)));
        assert_eq!(cyl.density(Vector3f::new(0.0, 0.05, 0.99)), 1.0);
    }

    #[test]
    fn cylinder_oblique_axis() {
        let cyl = Cylinder::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 0.0), 0.05);
        assert!(cyl.contains(&Vector3f::new(0.5, 0.5, 0.0)));
        assert!(cyl.contains(&Vector3f::new(0.52, 0.48, 0.0)));
        assert!(!cyl.contains(&Vector3f::new(0.6, 0.4, 0.0)));
    }

    #[test]
    fn degenerate_cylinder_is_empty() {
        let cyl = Cylinder::new(Vector3f::zeros(), Vector3f::zeros(), 1.0);
        assert_eq!(cyl.density(Vector3f::zeros()), 0.0);
    }
}
