// Copyright @yucwang 2026

use crate::core::integrator::{IntegrationInterval, Integrator};
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::grid::TransmittanceGrid;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

pub use super::renderer::{trace_pixel, Renderer};

/// Fans pixels out over scoped worker threads.
///
/// The grid is cut into disjoint blocks of whole rows up front. Workers take
/// the next unclaimed block from a shared queue and write only into that
/// block, so no cell is ever touched by two threads and no per-cell locking
/// is needed. Leaving the thread scope joins every worker before `render`
/// returns.
pub struct ParallelRenderer {
    integrator: Box<dyn Integrator>,
    interval: IntegrationInterval,
    rows_per_block: usize,
    thread_count: usize,
    show_progress: bool,
}

impl ParallelRenderer {
    pub fn new(integrator: Box<dyn Integrator>, interval: IntegrationInterval) -> Self {
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            integrator,
            interval,
            rows_per_block: 4,
            thread_count,
            show_progress: false,
        }
    }

    pub fn with_rows_per_block(mut self, rows: usize) -> Self {
        self.rows_per_block = rows.max(1);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.thread_count = threads.max(1);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }
}

impl Renderer for ParallelRenderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor, grid: &mut TransmittanceGrid) {
        let res = sensor.resolution();
        if grid.resolution() != res {
            log::warn!("Grid resolution {} does not match sensor {}, reallocating.", grid.resolution(), res);
            *grid = TransmittanceGrid::new(res);
        }
        if res == 0 {
            return;
        }

        let start = Instant::now();
        let rows_per_block = self.rows_per_block;
        let total_blocks = (res + rows_per_block - 1) / rows_per_block;
        let thread_count = self.thread_count.min(total_blocks).max(1);
        let integrator_ref: &dyn Integrator = self.integrator.as_ref();
        let interval = &self.interval;

        let progress = if self.show_progress {
            ProgressBar::new(total_blocks as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let blocks = Mutex::new(grid.row_blocks_mut(rows_per_block).enumerate());
        let (tx, rx) = mpsc::channel::<usize>();

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let tx = tx.clone();
                let blocks = &blocks;
                scope.spawn(move || {
                    loop {
                        let next = blocks.lock().ok().and_then(|mut queue| queue.next());
                        let (block_index, block) = match next {
                            Some(b) => b,
                            None => break,
                        };

                        let j0 = block_index * rows_per_block;
                        for (offset, cell) in block.iter_mut().enumerate() {
                            let i = offset % res;
                            let j = j0 + offset / res;
                            *cell = trace_pixel(scene, sensor, integrator_ref, interval, i, j);
                        }
                        if tx.send(block_index).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in rx.iter() {
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        log::debug!("Rendered {}x{} pixels with {} ({} blocks, {} threads) in {:?}.",
                    res, res, integrator_ref.name(), total_blocks, thread_count, start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::sphere::Sphere;
    use crate::fields::Primitive;
    use crate::integrators::hierarchical::HierarchicalIntegrator;
    use crate::integrators::uniform::UniformIntegrator;
    use crate::math::constants::Vector3f;
    use crate::renderers::sequential::SequentialRenderer;
    use crate::sensors::orbit::OrbitCamera;

    fn sphere_scene() -> Scene {
        Scene::new(Primitive::Sphere(Sphere::new(Vector3f::zeros(), 0.25)))
    }

    fn interval() -> IntegrationInterval {
        IntegrationInterval::centered(6.0, 1.0, 0.01)
    }

    #[test]
    fn parallel_matches_sequential() {
        let scene = Scene::default();
        let cam = OrbitCamera::new(30.0, 90.0, 6.0, 45.0, 24);

        let mut parallel = TransmittanceGrid::new(24);
        ParallelRenderer::new(Box::new(HierarchicalIntegrator::new()), interval())
            .with_threads(4)
            .with_rows_per_block(5)
            .render(&scene, &cam, &mut parallel);

        let mut sequential = TransmittanceGrid::new(24);
        SequentialRenderer::new(Box::new(HierarchicalIntegrator::new()), interval())
            .render(&scene, &cam, &mut sequential);

        assert_eq!(parallel.max_abs_diff(&sequential), 0.0);
    }

    #[test]
    fn rerender_is_idempotent() {
        let scene = Scene::default();
        let cam = OrbitCamera::new(0.0, 90.0, 6.0, 45.0, 16);
        let renderer = ParallelRenderer::new(Box::new(UniformIntegrator::default()), interval());

        let mut grid = TransmittanceGrid::new(16);
        renderer.render(&scene, &cam, &mut grid);
        let first = grid.clone();
        grid.reset();
        renderer.render(&scene, &cam, &mut grid);
        assert_eq!(first, grid);
    }

    #[test]
    fn every_cell_is_written() {
        let scene = Scene::new(Primitive::Constant(crate::fields::ConstantField::new(0.0)));
        let cam = OrbitCamera::new(0.0, 90.0, 6.0, 45.0, 13);
        let mut grid = TransmittanceGrid::new(13);
        ParallelRenderer::new(Box::new(HierarchicalIntegrator::new()), interval())
            .with_threads(3)
            .with_rows_per_block(2)
            .render(&scene, &cam, &mut grid);
        assert!(grid.as_slice().iter().all(|v| *v == 1.0));
    }

    #[test]
    fn sphere_silhouette_is_centered() {
        let scene = sphere_scene();
        let res = 32;
        for theta in [0.0, 90.0, 180.0, 270.0].iter() {
            let cam = OrbitCamera::new(*theta, 90.0, 6.0, 45.0, res);
            let mut grid = TransmittanceGrid::new(res);
            ParallelRenderer::new(Box::new(HierarchicalIntegrator::new()), interval())
                .render(&scene, &cam, &mut grid);

            let center = grid[(res / 2, res / 2)];
            assert!(center < 0.7, "center transmittance {}", center);
            assert!(center > 0.5, "center transmittance {}", center);
            for &(i, j) in [(0, 0), (res - 1, 0), (0, res - 1), (res - 1, res - 1)].iter() {
                assert_eq!(grid[(i, j)], 1.0);
            }
            assert!(grid.as_slice().iter().all(|v| *v > 0.0 && *v <= 1.0));
        }
    }

    #[test]
    fn mismatched_grid_is_reallocated() {
        let scene = sphere_scene();
        let cam = OrbitCamera::new(0.0, 90.0, 6.0, 45.0, 8);
        let mut grid = TransmittanceGrid::new(3);
        ParallelRenderer::new(Box::new(HierarchicalIntegrator::new()), interval())
            .render(&scene, &cam, &mut grid);
        assert_eq!(grid.resolution(), 8);
    }
}
