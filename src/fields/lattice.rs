// Copyright @yucwang 2026

use crate::core::field::DensityField;
use crate::fields::cylinder::Cylinder;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

/// Repeating strut pattern inscribed in the unit cube `[0, 1]^3`.
#[derive(Clone, Debug)]
pub struct UnitCell {
    name: &'static str,
    radius: Float,
    struts: Vec<(Vector3f, Vector3f)>,
}

impl UnitCell {
    pub fn by_name(name: &str, radius: Float) -> Option<Self> {
        match name {
            "kelvin" => Some(Self::kelvin(radius)),
            _ => None,
        }
    }

    // Truncated octahedron: vertices are the permutations of (0, ±1/4, ±1/2)
    // about the cube centre, edges join vertices sqrt(2)/4 apart.
    pub fn kelvin(radius: Float) -> Self {
        let perms = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        let mut vertices = Vec::with_capacity(24);
        for perm in perms.iter() {
            for &sa in [-1.0, 1.0].iter() {
                for &sb in [-1.0, 1.0].iter() {
                    let mut v = Vector3f::new(0.5, 0.5, 0.5);
                    v[perm[1]] += sa * 0.25;
                    v[perm[2]] += sb * 0.5;
                    vertices.push(v);
                }
            }
        }

        let edge = (2.0 as Float).sqrt() / 4.0;
        let mut struts = Vec::with_capacity(36);
        for a in 0..vertices.len() {
            for b in (a + 1)..vertices.len() {
                if ((vertices[a] - vertices[b]).norm() - edge).abs() < 1e-9 {
                    struts.push((vertices[a], vertices[b]));
                }
            }
        }

        Self { name: "kelvin", radius, struts }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    pub fn struts(&self) -> &[(Vector3f, Vector3f)] {
        &self.struts
    }
}

/// Union of identical-radius struts: 1 inside any strut, 0 elsewhere.
#[derive(Clone, Debug)]
pub struct Lattice {
    cell_name: String,
    cell_radius: Float,
    tiling: [usize; 3],
    struts: Vec<Cylinder>,
    bbox: AABB,
}

impl Lattice {
    /// Tile `cell` over an `nx * ny * nz` grid, then scale and shift so the
    /// whole lattice fits the unit cube centred at the origin.
    pub fn tessellate(cell: &UnitCell, nx: usize, ny: usize, nz: usize) -> Self {
        let scaler = 1.0 / (nx.max(ny).max(nz).max(1) as Float);
        let shift = Vector3f::new(0.5, 0.5, 0.5);
        let mut struts = Vec::with_capacity(nx * ny * nz * cell.struts().len());
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let offset = Vector3f::new(i as Float, j as Float, k as Float);
                    for (p0, p1) in cell.struts() {
                        struts.push(Cylinder::new(
                            (p0 + offset) * scaler - shift,
                            (p1 + offset) * scaler - shift,
                            cell.radius() * scaler,
                        ));
                    }
                }
            }
        }

        let mut bbox = AABB::default();
        for strut in struts.iter() {
            if let Some(b) = strut.bbox() {
                bbox.expand_by_aabb(&b);
            }
        }

        log::debug!("Lattice tessellated: {} cell, {}x{}x{}, {} struts.",
                    cell.name(), nx, ny, nz, struts.len());

        Self {
            cell_name: cell.name().to_string(),
            cell_radius: cell.radius(),
            tiling: [nx, ny, nz],
            struts,
            bbox,
        }
    }

    pub fn cell_name(&self) -> &str {
        &self.cell_name
    }

    pub fn cell_radius(&self) -> Float {
        self.cell_radius
    }

    pub fn tiling(&self) -> [usize; 3] {
        self.tiling
    }

    pub fn struts(&self) -> &[Cylinder] {
        &self.struts
    }
}

impl DensityField for Lattice {
    fn bbox(&self) -> Option<AABB> {
        Some(self.bbox)
    }

    fn density(&self, p_world: Vector3f) -> Float {
        if !self.bbox.contains(&p_world) {
            return 0.0;
        }
        if self.struts.iter().any(|s| s.contains(&p_world)) {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_cell_topology() {
        let cell = UnitCell::kelvin(0.075);
        assert_eq!(cell.struts().len(), 36);
        for (p0, p1) in cell.struts() {
            for idx in 0..3 {
                assert!(p0[idx] >= 0.0 && p0[idx] <= 1.0);
                assert!(p1[idx] >= 0.0 && p1[idx] <= 1.0);
            }
        }
        assert!(UnitCell::by_name("kelvin", 0.1).is_some());
        assert!(UnitCell::by_name("octet", 0.1).is_none());
    }

    #[test]
    fn lattice_fits_unit_cube() {
        let cell = UnitCell::kelvin(0.075);
        let lattice = Lattice::tessellate(&cell, 4, 4, 4);
        assert_eq!(lattice.struts().len(), 4 * 4 * 4 * 36);
        assert!((lattice.struts()[0].radius - 0.075 / 4.0).abs() < 1e-12);

        let bbox = lattice.bbox().unwrap();
        let r = 0.075 / 4.0;
        for idx in 0..3 {
            assert!(bbox.p_min[idx] >= -0.5 - r - 1e-12);
            assert!(bbox.p_max[idx] <= 0.5 + r + 1e-12);
        }
    }

    #[test]
    fn lattice_density_is_binary() {
        let cell = UnitCell::kelvin(0.05);
        let lattice = Lattice::tessellate(&cell, 1, 1, 1);

        let strut = &lattice.struts()[0];
        let mid = 0.5 * (strut.p0 + strut.p1);
        assert_eq!(lattice.density(mid), 1.0);

        // The cell centre is far from every strut.
        assert_eq!(lattice.density(Vector3f::zeros()), 0.0);
        assert_eq!(lattice.density(Vector3f::new(3.0, 0.0, 0.0)), 0.0);
    }
}
