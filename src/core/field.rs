// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

/// Scalar absorption coefficient over space. Must be deterministic and free
/// of side effects: renderers evaluate it from many threads at once.
pub trait DensityField: Send + Sync {
    fn bbox(&self) -> Option<AABB> {
        None
    }
    fn density(&self, p_world: Vector3f) -> Float;
}
