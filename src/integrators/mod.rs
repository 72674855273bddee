// Copyright @yucwang 2026

pub mod hierarchical;
pub mod uniform;

use crate::core::integrator::Integrator;
use crate::math::constants::Float;

use self::hierarchical::HierarchicalIntegrator;
use self::uniform::UniformIntegrator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegratorKind {
    Uniform,
    Hierarchical,
}

impl IntegratorKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "uniform" => Some(IntegratorKind::Uniform),
            "hierarchical" => Some(IntegratorKind::Hierarchical),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntegratorKind::Uniform => "uniform",
            IntegratorKind::Hierarchical => "hierarchical",
        }
    }

    /// `flat_field` only affects the uniform integrator.
    pub fn build(&self, flat_field: Float) -> Box<dyn Integrator> {
        match self {
            IntegratorKind::Uniform => Box::new(UniformIntegrator::new(flat_field)),
            IntegratorKind::Hierarchical => Box::new(HierarchicalIntegrator::new()),
        }
    }
}
