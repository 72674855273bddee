// Copyright @yucwang 2021

pub mod dataset;
pub mod exr_utils;
pub mod image_utils;
pub mod scene_writer;
pub mod transforms;

use std::fmt;

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Image(image::ImageError),
    Exr(exr::error::Error),
    Json(serde_json::Error),
    Xml(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Image(err)
    }
}

impl From<exr::error::Error> for ExportError {
    fn from(err: exr::error::Error) -> Self {
        ExportError::Exr(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json(err)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "io error: {}", e),
            ExportError::Image(e) => write!(f, "image error: {}", e),
            ExportError::Exr(e) => write!(f, "exr error: {}", e),
            ExportError::Json(e) => write!(f, "json error: {}", e),
            ExportError::Xml(msg) => write!(f, "xml error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

#[cfg(test)]
pub(crate) fn scratch_dir(tag: &str) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "translucence-{}-{}-{}", tag, std::process::id(), NEXT.fetch_add(1, Ordering::Relaxed)));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
