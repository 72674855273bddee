// Copyright @yucwang 2026

pub mod orbit;
pub mod parallel;
pub mod renderer;
pub mod sequential;
