// Copyright @yucwang 2026

pub mod cube;
pub mod cylinder;
pub mod deform;
pub mod lattice;
pub mod sphere;

use crate::core::field::DensityField;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

use self::cube::Cube;
use self::cylinder::Cylinder;
use self::lattice::Lattice;
use self::sphere::Sphere;

/// Uniform density everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField {
    pub value: Float,
}

impl ConstantField {
    pub fn new(value: Float) -> Self {
        Self { value }
    }
}

impl DensityField for ConstantField {
    fn density(&self, _p_world: Vector3f) -> Float {
        self.value
    }
}

/// The closed set of density providers a scene can be built from.
#[derive(Clone, Debug)]
pub enum Primitive {
    Constant(ConstantField),
    Cube(Cube),
    Sphere(Sphere),
    Cylinder(Cylinder),
    Lattice(Lattice),
    Collection(Collection),
}

impl Primitive {
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Constant(_) => "constant",
            Primitive::Cube(_) => "cube",
            Primitive::Sphere(_) => "sphere",
            Primitive::Cylinder(_) => "cylinder",
            Primitive::Lattice(_) => "lattice",
            Primitive::Collection(_) => "collection",
        }
    }

    /// Number of leaf primitives, counting every lattice strut.
    pub fn leaf_count(&self) -> usize {
        match self {
            Primitive::Lattice(lattice) => lattice.struts().len(),
            Primitive::Collection(collection) => collection
                .members()
                .iter()
                .map(|(member, _)| member.leaf_count())
                .sum(),
            _ => 1,
        }
    }
}

impl DensityField for Primitive {
    fn bbox(&self) -> Option<AABB> {
        match self {
            Primitive::Constant(f) => f.bbox(),
            Primitive::Cube(f) => f.bbox(),
            Primitive::Sphere(f) => f.bbox(),
            Primitive::Cylinder(f) => f.bbox(),
            Primitive::Lattice(f) => f.bbox(),
            Primitive::Collection(f) => f.bbox(),
        }
    }

    fn density(&self, p_world: Vector3f) -> Float {
        match self {
            Primitive::Constant(f) => f.density(p_world),
            Primitive::Cube(f) => f.density(p_world),
            Primitive::Sphere(f) => f.density(p_world),
            Primitive::Cylinder(f) => f.density(p_world),
            Primitive::Lattice(f) => f.density(p_world),
            Primitive::Collection(f) => f.density(p_world),
        }
    }
}

/// Ordered, weighted sum of sub-fields. Negative weights carve material out
/// of whatever earlier members put at the same point.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    members: Vec<(Primitive, Float)>,
}

impl Collection {
    pub fn new() -> Self {
        Self { members: Vec::new() }
    }

    pub fn with_member(mut self, field: Primitive, weight: Float) -> Self {
        self.push(field, weight);
        self
    }

    pub fn push(&mut self, field: Primitive, weight: Float) {
        self.members.push((field, weight));
    }

    pub fn members(&self) -> &[(Primitive, Float)] {
        &self.members
    }
}

impl DensityField for Collection {
    fn bbox(&self) -> Option<AABB> {
        let mut out = AABB::default();
        for (member, _) in self.members.iter() {
            out.expand_by_aabb(&member.bbox()?);
        }
        if out.is_valid() { Some(out) } else { None }
    }

    // Every member contributes; a later negative member must be able to
    // cancel an earlier positive one.
    fn density(&self, p_world: Vector3f) -> Float {
        self.members
            .iter()
            .map(|(member, weight)| weight * member.density(p_world))
            .sum()
    }
}
