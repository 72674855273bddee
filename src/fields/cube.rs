// Copyright @yucwang 2026

use crate::core::field::DensityField;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

/// Axis-aligned solid cube, 1 strictly inside, 0 elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Cube {
    pub center: Vector3f,
    pub side: Float,
}

impl Cube {
    pub fn new(center: Vector3f, side: Float) -> Self {
        Self { center, side }
    }

    pub fn contains(&self, p: &Vector3f) -> bool {
        let half = 0.5 * self.side;
        let d = p - self.center;
        d.x.abs() < half && d.y.abs() < half && d.z.abs() < half
    }
}

impl DensityField for Cube {
    fn bbox(&self) -> Option<AABB> {
        let half = Vector3f::new(0.5 * self.side, 0.5 * self.side, 0.5 * self.side);
        Some(AABB::new(self.center - half, self.center + half))
    }

    fn density(&self, p_world: Vector3f) -> Float {
        if self.contains(&p_world) { 1.0 } else { 0.0 }
    }
}
