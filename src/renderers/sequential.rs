// Copyright @yucwang 2026

use crate::core::integrator::{IntegrationInterval, Integrator};
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::grid::TransmittanceGrid;

pub use super::renderer::{trace_pixel, Renderer};

/// Single-threaded pixel-by-pixel reference renderer.
pub struct SequentialRenderer {
    integrator: Box<dyn Integrator>,
    interval: IntegrationInterval,
}

impl SequentialRenderer {
    pub fn new(integrator: Box<dyn Integrator>, interval: IntegrationInterval) -> Self {
        Self { integrator, interval }
    }
}

impl Renderer for SequentialRenderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor, grid: &mut TransmittanceGrid) {
        let res = sensor.resolution();
        if grid.resolution() != res {
            *grid = TransmittanceGrid::new(res);
        }
        for j in 0..res {
            for i in 0..res {
                grid[(i, j)] = trace_pixel(scene, sensor, self.integrator.as_ref(), &self.interval, i, j);
            }
        }
    }
}
