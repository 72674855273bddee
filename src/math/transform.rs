// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f, Matrix4f };
use nalgebra::Point3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self { matrix: matrix,
               inv_matrix: matrix.try_inverse().unwrap_or(Matrix4f::identity())}
    }

    // Right-handed world-to-view matrix, camera looking down -z with `up`
    // projected onto +y (the classic gluLookAt convention).
    pub fn look_at(eye: Vector3f, target: Vector3f, up: Vector3f) -> Self {
        let view = Matrix4f::look_at_rh(&Point3::from(eye), &Point3::from(target), &up);
        Self::new(view)
    }

    pub fn inverse(&self) -> Self {
        Self { matrix: self.inv_matrix,
               inv_matrix: self.matrix }
    }

    pub fn matrix(&self) -> &Matrix4f {
        &self.matrix
    }

    /// Row-major copy of the matrix.
    pub fn rows(&self) -> [[Float; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                rows[i][j] = self.matrix[(i, j)];
            }
        }
        rows
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        let x = p[0] * self.matrix[(0, 0)] + p[1] * self.matrix[(0, 1)] +
            p[2] * self.matrix[(0, 2)] + self.matrix[(0, 3)];
        let y = p[0] * self.matrix[(1, 0)] + p[1] * self.matrix[(1, 1)] +
            p[2] * self.matrix[(1, 2)] + self.matrix[(1, 3)];
        let z = p[0] * self.matrix[(2, 0)] + p[1] * self.matrix[(2, 1)] +
            p[2] * self.matrix[(2, 2)] + self.matrix[(2, 3)];
        let w = p[0] * self.matrix[(3, 0)] + p[1] * self.matrix[(3, 1)] +
            p[2] * self.matrix[(3, 2)] + self.matrix[(3, 3)];

        Vector3f::new(x / w, y / w, z / w)
    }
}
