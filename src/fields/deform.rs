// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Point warp applied before the density lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Deformation {
    /// Pushes points along -y by a Gaussian bump centred at the origin.
    Gaussian { amplitude: Float, sigma: Float },
}

impl Deformation {
    pub fn apply(&self, p: Vector3f) -> Vector3f {
        match *self {
            Deformation::Gaussian { amplitude, sigma } => {
                let falloff = (-p.norm_squared() / (2.0 * sigma * sigma)).exp();
                Vector3f::new(p.x, p.y - amplitude * falloff, p.z)
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Deformation::Gaussian { .. } => "gaussian",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_displaces_only_y() {
        let d = Deformation::Gaussian { amplitude: 0.05, sigma: 0.2 };
        let q = d.apply(Vector3f::zeros());
        assert_eq!(q.x, 0.0);
        assert!((q.y + 0.05).abs() < 1e-12);
        assert_eq!(q.z, 0.0);

        // Far from the origin the bump has decayed away.
        let p = Vector3f::new(5.0, 1.0, -2.0);
        assert!((d.apply(p) - p).norm() < 1e-12);
    }
}
