// Copyright @yucwang 2026

use crate::core::scene::Scene;
use crate::core::settings::RenderSettings;
use crate::io::dataset::DatasetWriter;
use crate::math::grid::TransmittanceGrid;
use crate::renderers::renderer::Renderer;
use crate::sensors::orbit::OrbitCamera;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrbitSummary {
    pub frames_written: usize,
    pub frames_failed: usize,
}

/// Camera of frame `index`: evenly spaced azimuths at the configured polar
/// angle and orbit radius.
pub fn frame_camera(settings: &RenderSettings, index: usize) -> OrbitCamera {
    OrbitCamera::new(settings.frame_angle(index),
                     settings.polar_deg,
                     settings.orbit_radius,
                     settings.fov_deg,
                     settings.resolution)
}

/// Render every orbit frame in order and hand each one to `writer`.
///
/// One grid is reused across frames. A frame whose image cannot be written
/// is logged and counted; the remaining frames still render.
pub fn render_orbit(scene: &Scene,
                    settings: &RenderSettings,
                    renderer: &dyn Renderer,
                    writer: &mut DatasetWriter,
                    show_progress: bool) -> OrbitSummary {
    let mut summary = OrbitSummary::default();
    let mut grid = TransmittanceGrid::new(settings.resolution);

    let progress = if show_progress {
        ProgressBar::new(settings.frame_count as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.green/white} {pos}/{len} frames {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for k in 0..settings.frame_count {
        let start = Instant::now();
        let camera = frame_camera(settings, k);
        progress.set_message(format!("theta = {:.1}", settings.frame_angle(k)));

        grid.reset();
        renderer.render(scene, &camera, &mut grid);

        match writer.write_frame(k, &grid, &camera) {
            Ok(()) => {
                summary.frames_written += 1;
                log::debug!("Frame {} rendered in {:.2?}.", k, start.elapsed());
            }
            Err(e) => {
                summary.frames_failed += 1;
                log::error!("Frame {} could not be written: {}.", k, e);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrators::IntegratorKind;
    use crate::io::scratch_dir;
    use crate::renderers::parallel::ParallelRenderer;
    use crate::renderers::sequential::SequentialRenderer;
    use std::fs;

    fn small_settings() -> RenderSettings {
        let mut settings = RenderSettings::default();
        settings.resolution = 12;
        settings.frame_count = 3;
        settings.step_size = 0.05;
        settings
    }

    #[test]
    fn frame_cameras_orbit_the_origin() {
        let settings = small_settings();
        for k in 0..settings.frame_count {
            let cam = frame_camera(&settings, k);
            assert!((cam.position().norm() - settings.orbit_radius).abs() < 1e-9);
            assert!(cam.position().z.abs() < 1e-9);
        }
        assert!((frame_camera(&settings, 0).position().x - 6.0).abs() < 1e-9);
    }

    #[test]
    fn renders_every_frame() {
        let dir = scratch_dir("orbit");
        let settings = small_settings();
        let renderer = ParallelRenderer::new(settings.integrator.build(settings.flat_field), settings.interval())
            .with_threads(2);
        let mut writer = DatasetWriter::create(&dir, &settings).unwrap();

        let summary = render_orbit(&Scene::default(), &settings, &renderer, &mut writer, false);
        assert_eq!(summary, OrbitSummary { frames_written: 3, frames_failed: 0 });
        assert_eq!(writer.transforms().frames.len(), 3);
        for k in 0..3 {
            assert!(dir.join(format!("pics/out{}.png", k)).is_file());
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_frame_does_not_stop_orbit() {
        let dir = scratch_dir("orbit-fail");
        let settings = small_settings();
        let renderer = SequentialRenderer::new(IntegratorKind::Uniform.build(0.0), settings.interval());
        let mut writer = DatasetWriter::create(&dir, &settings).unwrap();
        fs::create_dir_all(dir.join("pics/out1.png")).unwrap();

        let summary = render_orbit(&Scene::default(), &settings, &renderer, &mut writer, false);
        assert_eq!(summary, OrbitSummary { frames_written: 2, frames_failed: 1 });
        let recorded: Vec<&str> = writer.transforms().frames.iter().map(|f| f.file_path.as_str()).collect();
        assert_eq!(recorded, vec!["pics/out0.png", "pics/out2.png"]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
