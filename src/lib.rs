// Copyright @yucwang 2021

pub mod core;
pub mod fields;
pub mod integrators;
pub mod io;
pub mod math;
pub mod renderers;
pub mod sensors;
