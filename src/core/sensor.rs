// Copyright @yucwang 2026

use crate::math::ray::Ray3f;

pub trait Sensor: Sync {
    /// Ray through pixel column `i`, row `j`.
    fn pixel_ray(&self, i: usize, j: usize) -> Ray3f;
    fn resolution(&self) -> usize;
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
