// Copyright @yucwang 2026

use crate::core::settings::RenderSettings;
use crate::io::ExportError;
use crate::math::constants::{deg_to_rad, Float};
use crate::sensors::orbit::OrbitCamera;

use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub file_path: String,
    /// Camera-to-world, row-major.
    pub transform_matrix: [[Float; 4]; 4],
}

/// Camera intrinsics shared by every frame plus the per-frame poses, laid out
/// the way NeRF-style training pipelines read `transforms.json`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TransformsFile {
    pub camera_angle_x: Float,
    pub fl_x: Float,
    pub fl_y: Float,
    pub w: usize,
    pub h: usize,
    pub cx: Float,
    pub cy: Float,
    pub frames: Vec<FrameRecord>,
}

impl TransformsFile {
    pub fn new(settings: &RenderSettings) -> Self {
        let res = settings.resolution as Float;
        let focal = 1.0 / deg_to_rad(0.5 * settings.fov_deg).tan() * res / 2.0;
        Self {
            camera_angle_x: deg_to_rad(settings.fov_deg),
            fl_x: focal,
            fl_y: focal,
            w: settings.resolution,
            h: settings.resolution,
            cx: res / 2.0,
            cy: res / 2.0,
            frames: Vec::new(),
        }
    }

    pub fn push_frame(&mut self, file_path: String, camera: &OrbitCamera) {
        self.frames.push(FrameRecord {
            file_path,
            transform_matrix: camera.camera_to_world().rows(),
        });
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), ExportError> {
        log::info!("Writing camera poses for {} frames to: {}.", self.frames.len(), path.display());
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsics_follow_settings() {
        let mut settings = RenderSettings::default();
        settings.resolution = 512;
        settings.fov_deg = 90.0;
        let transforms = TransformsFile::new(&settings);
        assert!((transforms.camera_angle_x - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((transforms.fl_x - 256.0).abs() < 1e-9);
        assert_eq!(transforms.fl_x, transforms.fl_y);
        assert_eq!(transforms.w, 512);
        assert_eq!(transforms.h, 512);
        assert_eq!(transforms.cx, 256.0);
        assert_eq!(transforms.cy, 256.0);
    }

    #[test]
    fn focal_length_agrees_with_camera() {
        let settings = RenderSettings::default();
        let cam = OrbitCamera::new(0.0, settings.polar_deg, settings.orbit_radius, settings.fov_deg, settings.resolution);
        assert!((TransformsFile::new(&settings).fl_x - cam.focal_length_px()).abs() < 1e-9);
    }

    #[test]
    fn json_layout() {
        let settings = RenderSettings::default();
        let mut transforms = TransformsFile::new(&settings);
        let cam = OrbitCamera::new(90.0, 90.0, 6.0, 45.0, settings.resolution);
        transforms.push_frame("pics/out1.png".to_string(), &cam);

        let value: serde_json::Value = serde_json::from_str(&transforms.to_json().unwrap()).unwrap();
        for key in ["camera_angle_x", "fl_x", "fl_y", "w", "h", "cx", "cy", "frames"].iter() {
            assert!(value.get(*key).is_some(), "missing {}", key);
        }
        assert_eq!(value["w"].as_u64(), Some(1024));
        assert_eq!(value["h"].as_u64(), Some(1024));
        let frame = &value["frames"][0];
        assert_eq!(frame["file_path"], "pics/out1.png");
        let rows = frame["transform_matrix"].as_array().unwrap();
        assert_eq!(rows.len(), 4);
        // Last column of the first three rows is the camera position.
        assert!((rows[1][3].as_f64().unwrap() - 6.0).abs() < 1e-9);
        assert_eq!(rows[3][3].as_f64().unwrap(), 1.0);
    }
}
