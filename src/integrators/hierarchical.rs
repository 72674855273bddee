// Copyright @yucwang 2026

use crate::core::field::DensityField;
use crate::core::integrator::{IntegrationInterval, Integrator};
use crate::math::constants::Float;
use crate::math::ray::Ray3f;

pub const FINE_STEPS_PER_COARSE: Float = 25.0;

/// Coarse marcher that re-integrates a window with a fine step whenever the
/// "material present" state differs between the window's two edges.
///
/// Only the zero / non-zero state at the edges is compared, so a window that
/// enters and leaves material again is treated as uniform. A trailing window
/// shorter than the coarse step is not integrated.
pub struct HierarchicalIntegrator;

impl HierarchicalIntegrator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HierarchicalIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for HierarchicalIntegrator {
    fn integrate(&self, field: &dyn DensityField, ray: &Ray3f, interval: &IntegrationInterval) -> Float {
        if interval.is_degenerate() {
            return 1.0;
        }

        let coarse = interval.step;
        let fine = coarse / FINE_STEPS_PER_COARSE;
        let mut left = interval.s_min;
        let mut right = interval.s_min + coarse;
        let mut prev_rho: Float = 0.0;
        let mut depth: Float = 0.0;

        while right <= interval.s_max {
            let rho = field.density(ray.at(right));
            if (rho == 0.0) != (prev_rho == 0.0) {
                left += fine;
                while left < right {
                    depth += field.density(ray.at(left)) * fine;
                    left += fine;
                }
                // The right edge sample closes the fine sweep.
                depth += rho * fine;
            } else {
                depth += rho * coarse;
            }
            prev_rho = rho;
            left = right;
            right += coarse;
        }
        (-depth).exp()
    }

    fn name(&self) -> &'static str {
        "hierarchical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::sphere::Sphere;
    use crate::fields::ConstantField;
    use crate::integrators::uniform::UniformIntegrator;
    use crate::math::constants::Vector3f;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn axis_ray() -> Ray3f {
        Ray3f::new(Vector3f::new(-6.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn empty_field_is_transparent() {
        let t = HierarchicalIntegrator::new()
            .integrate(&ConstantField::new(0.0), &axis_ray(), &IntegrationInterval::new(5.0, 7.0, 0.01));
        assert_eq!(t, 1.0);
    }

    #[test]
    fn degenerate_interval_is_transparent() {
        let integrator = HierarchicalIntegrator::new();
        let field = ConstantField::new(2.0);
        assert_eq!(integrator.integrate(&field, &axis_ray(), &IntegrationInterval::new(1.0, 1.0, 0.01)), 1.0);
        assert_eq!(integrator.integrate(&field, &axis_ray(), &IntegrationInterval::new(2.0, 1.0, 0.01)), 1.0);
    }

    #[test]
    fn interval_shorter_than_coarse_step_is_skipped() {
        let t = HierarchicalIntegrator::new()
            .integrate(&ConstantField::new(5.0), &axis_ray(), &IntegrationInterval::new(0.0, 0.2, 0.25));
        assert_eq!(t, 1.0);
    }

    #[test]
    fn constant_field_matches_closed_form() {
        let d = 1.0;
        let t = HierarchicalIntegrator::new()
            .integrate(&ConstantField::new(d), &axis_ray(), &IntegrationInterval::new(0.0, 2.0, 0.25));
        let expected = (-d * 2.0 as Float).exp();
        assert!((t - expected).abs() < 5e-3, "got {}, expected {}", t, expected);
    }

    #[test]
    fn refines_only_at_boundaries() {
        struct CountingField {
            inner: Sphere,
            calls: AtomicUsize,
        }
        impl DensityField for CountingField {
            fn density(&self, p_world: Vector3f) -> Float {
                self.calls.fetch_add(1, Ordering::Relaxed);
                self.inner.density(p_world)
            }
        }

        let field = CountingField { inner: Sphere::new(Vector3f::zeros(), 0.25), calls: AtomicUsize::new(0) };
        let t = HierarchicalIntegrator::new()
            .integrate(&field, &axis_ray(), &IntegrationInterval::new(5.0, 7.0, 0.01));
        assert!((t - (-0.5 as Float).exp()).abs() < 2e-3, "got {}", t);

        // About 200 coarse samples plus two refined windows of ~24 fine samples.
        let calls = field.calls.load(Ordering::Relaxed);
        assert!(calls > 200 && calls < 270, "{} density calls", calls);
    }

    #[test]
    fn agrees_with_uniform_on_fine_grid() {
        let field = Sphere::new(Vector3f::zeros(), 0.25);
        let ray = Ray3f::new(Vector3f::new(0.0, -6.0, 0.1), Vector3f::new(0.0, 1.0, 0.0));
        let coarse = HierarchicalIntegrator::new()
            .integrate(&field, &ray, &IntegrationInterval::new(5.0, 7.0, 0.01));
        let fine = UniformIntegrator::default()
            .integrate(&field, &ray, &IntegrationInterval::new(5.0, 7.0, 0.0004));
        assert!((coarse - fine).abs() < 2e-3, "{} vs {}", coarse, fine);
    }

    #[test]
    fn thin_slab_inside_one_window_is_missed() {
        // Material that starts and ends strictly between two coarse samples
        // leaves both edges empty.
        struct Slab;
        impl DensityField for Slab {
            fn density(&self, p_world: Vector3f) -> Float {
                if p_world.x > 0.1 && p_world.x < 0.15 { 1.0 } else { 0.0 }
            }
        }
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0));
        let t = HierarchicalIntegrator::new()
            .integrate(&Slab, &ray, &IntegrationInterval::new(0.0, 1.0, 0.25));
        assert_eq!(t, 1.0);
    }
}
