// Copyright 2020 @TwoCookingMice

pub mod aabb;
pub mod constants;
pub mod grid;
pub mod ray;
pub mod transform;
