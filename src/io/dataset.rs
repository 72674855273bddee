// Copyright @yucwang 2026

use crate::core::scene::Scene;
use crate::core::settings::{ImageFormat, RenderSettings};
use crate::io::exr_utils::write_exr_to_file;
use crate::io::image_utils::write_png_to_file;
use crate::io::scene_writer::write_scene_xml;
use crate::io::transforms::TransformsFile;
use crate::io::ExportError;
use crate::math::grid::TransmittanceGrid;
use crate::sensors::orbit::OrbitCamera;

use std::fs;
use std::path::{Path, PathBuf};

pub const IMAGE_DIR: &str = "pics";
pub const TRANSFORMS_FILE: &str = "transforms.json";
pub const SCENE_FILE: &str = "object.xml";

/// Lays out one orbit dataset on disk:
///
/// ```text
/// <root>/pics/out<k>.png
/// <root>/transforms.json
/// <root>/object.xml
/// ```
pub struct DatasetWriter {
    root: PathBuf,
    format: ImageFormat,
    transforms: TransformsFile,
}

impl DatasetWriter {
    pub fn create<P: AsRef<Path>>(root: P, settings: &RenderSettings) -> Result<Self, ExportError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(IMAGE_DIR))?;
        Ok(Self {
            root,
            format: settings.image_format,
            transforms: TransformsFile::new(settings),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of frame `index` relative to the dataset root.
    pub fn frame_path(&self, index: usize) -> String {
        format!("{}/out{}.{}", IMAGE_DIR, index, self.format.extension())
    }

    /// Write one frame image. The pose is recorded only once the image is on
    /// disk, so a failed frame never shows up in `transforms.json`.
    pub fn write_frame(&mut self,
                       index: usize,
                       grid: &TransmittanceGrid,
                       camera: &OrbitCamera) -> Result<(), ExportError> {
        let relative = self.frame_path(index);
        let path = self.root.join(&relative);
        match self.format {
            ImageFormat::Png => write_png_to_file(grid, &path)?,
            ImageFormat::Exr => write_exr_to_file(grid, &path)?,
        }
        self.transforms.push_frame(relative, camera);
        Ok(())
    }

    pub fn transforms(&self) -> &TransformsFile {
        &self.transforms
    }

    /// Write the camera poses and the scene description.
    pub fn finish(&self, scene: &Scene, settings: &RenderSettings) -> Result<(), ExportError> {
        self.transforms.write(&self.root.join(TRANSFORMS_FILE))?;
        write_scene_xml(scene, settings, &self.root.join(SCENE_FILE))
    }
}
