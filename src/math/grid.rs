// Copyright 2020 @TwoCookingMice

use super::constants::Float;

use std::ops;
use std::slice::ChunksMut;

/// Square buffer of per-pixel transmittance. `(i, j)` addresses column `i`
/// of row `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransmittanceGrid {
    data: Vec<Float>,
    resolution: usize
}

impl ops::Index<(usize, usize)> for TransmittanceGrid {
    type Output = Float;

    fn index(&self, index: (usize, usize)) -> &Float {
        assert!(index.0 < self.resolution && index.1 < self.resolution);
        &self.data[index.0 + self.resolution * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for TransmittanceGrid {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Float {
        assert!(index.0 < self.resolution && index.1 < self.resolution);
        &mut self.data[index.0 + self.resolution * index.1]
    }
}

impl TransmittanceGrid {
    pub fn new(resolution: usize) -> Self {
        Self { data: vec![0.0; resolution * resolution],
               resolution: resolution }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn reset(&mut self) {
        for v in self.data.iter_mut() {
            *v = 0.0;
        }
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    /// Split the grid into disjoint blocks of `rows_per_block` whole rows.
    /// The last block may be shorter.
    pub fn row_blocks_mut(&mut self, rows_per_block: usize) -> ChunksMut<'_, Float> {
        let rows = rows_per_block.max(1);
        self.data.chunks_mut(rows * self.resolution.max(1))
    }

    pub fn max_abs_diff(&self, other: &TransmittanceGrid) -> Float {
        if self.resolution != other.resolution {
            return Float::INFINITY;
        }
        self.data.iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, Float::max)
    }
}

/* Test for TransmittanceGrid */
