// Copyright @yucwang 2026

use crate::core::field::DensityField;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;

/// Arc-length bounds along a ray plus the base sampling step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationInterval {
    pub s_min: Float,
    pub s_max: Float,
    pub step: Float,
}

impl IntegrationInterval {
    pub fn new(s_min: Float, s_max: Float, step: Float) -> Self {
        Self { s_min, s_max, step }
    }

    /// `[center - half_width, center + half_width]`.
    pub fn centered(center: Float, half_width: Float, step: Float) -> Self {
        Self::new(center - half_width, center + half_width, step)
    }

    // Stepping loops only terminate for a positive, finite step.
    pub fn is_degenerate(&self) -> bool {
        !(self.s_max > self.s_min) || !(self.step > 0.0) || !self.step.is_finite()
    }
}

pub trait Integrator: Sync {
    /// Transmittance `exp(-optical_depth)` along `ray` over `interval`.
    fn integrate(&self, field: &dyn DensityField, ray: &Ray3f, interval: &IntegrationInterval) -> Float;
    fn name(&self) -> &'static str;
}
