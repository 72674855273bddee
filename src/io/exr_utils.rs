/* Copyright 2020 @TwoCookingMice */

use crate::io::ExportError;
use crate::math::grid::TransmittanceGrid;

use exr::prelude::*;
use std::path::Path;

// Write raw float transmittance to an OpenEXR file, replicated over RGB.
pub fn write_exr_to_file(grid: &TransmittanceGrid, file_path: &Path) -> std::result::Result<(), ExportError> {
    log::info!("Starting writing openexr images: {}.", file_path.display());

    let res = grid.resolution();
    write_rgb_file(file_path, res, res, |x, y| {
        let v = grid[(x, y)] as f32;
        (v, v, v)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::scratch_dir;

    #[test]
    fn exr_file_is_written() {
        let dir = scratch_dir("exr");
        let path = dir.join("frame.exr");
        let mut grid = TransmittanceGrid::new(3);
        grid[(2, 0)] = 0.125;
        write_exr_to_file(&grid, &path).unwrap();

        let written = std::fs::metadata(&path).unwrap();
        assert!(written.len() > 0);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
