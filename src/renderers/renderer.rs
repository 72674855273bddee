// Copyright @yucwang 2026

use crate::core::integrator::{IntegrationInterval, Integrator};
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::constants::Float;
use crate::math::grid::TransmittanceGrid;

pub trait Renderer {
    /// Fill `grid` with the transmittance seen through every pixel of
    /// `sensor`. Returns only once every pixel has been written.
    fn render(&self, scene: &Scene, sensor: &dyn Sensor, grid: &mut TransmittanceGrid);
}

/// Evaluate a single pixel. Shared by every renderer so that they only
/// differ in scheduling.
pub fn trace_pixel(scene: &Scene,
                   sensor: &dyn Sensor,
                   integrator: &dyn Integrator,
                   interval: &IntegrationInterval,
                   i: usize,
                   j: usize) -> Float {
    let ray = sensor.pixel_ray(i, j);
    integrator.integrate(scene, &ray, interval)
}
