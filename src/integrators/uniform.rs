// Copyright @yucwang 2026

use crate::core::field::DensityField;
use crate::core::integrator::{IntegrationInterval, Integrator};
use crate::math::constants::Float;
use crate::math::ray::Ray3f;

/// Fixed-step Beer-Lambert marcher. A step can straddle a density jump, so
/// boundaries are aliased by up to one step.
pub struct UniformIntegrator {
    /// Optical depth added to every ray before marching.
    pub flat_field: Float,
}

impl UniformIntegrator {
    pub fn new(flat_field: Float) -> Self {
        Self { flat_field }
    }
}

impl Default for UniformIntegrator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Integrator for UniformIntegrator {
    fn integrate(&self, field: &dyn DensityField, ray: &Ray3f, interval: &IntegrationInterval) -> Float {
        if interval.is_degenerate() {
            return 1.0;
        }

        let ds = interval.step;
        let mut depth = self.flat_field;
        let mut s = interval.s_min;
        while s < interval.s_max {
            depth += field.density(ray.at(s)) * ds;
            s += ds;
        }
        (-depth).exp()
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}
