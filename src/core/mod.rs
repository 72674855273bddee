// Copyright @yucwang 2021

pub mod field;
pub mod integrator;
pub mod scene;
pub mod scene_loader;
pub mod sensor;
pub mod settings;
