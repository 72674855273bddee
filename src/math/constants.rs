/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f64;

pub type Vector3f = na::Vector3<Float>;
pub type Matrix4f = na::Matrix4<Float>;

pub const EPSILON: Float = 1e-9;
pub const PI: Float = std::f64::consts::PI;
pub const FLOAT_MIN: Float = Float::MIN;
pub const FLOAT_MAX: Float = Float::MAX;

pub fn deg_to_rad(deg: Float) -> Float {
    deg * PI / 180.0
}
