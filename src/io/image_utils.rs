/* Copyright 2020 @TwoCookingMice */

use crate::io::ExportError;
use crate::math::constants::Float;
use crate::math::grid::TransmittanceGrid;

use image::{ImageBuffer, ImageFormat, Rgba};
use std::path::Path;

pub fn transmittance_to_u16(t: Float) -> u16 {
    (t.max(0.0).min(1.0) * 65535.0) as u16
}

// Write the grid as 16-bit grayscale-as-RGBA PNG, alpha fully opaque.
// Grid cell (i, j) lands at image column i, row j.
pub fn write_png_to_file(grid: &TransmittanceGrid, file_path: &Path) -> Result<(), ExportError> {
    log::info!("Starting writing png image: {}.", file_path.display());

    let res = grid.resolution() as u32;
    let img: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::from_fn(res, res, |x, y| {
        let v = transmittance_to_u16(grid[(x as usize, y as usize)]);
        Rgba([v, v, v, u16::MAX])
    });
    img.save_with_format(file_path, ImageFormat::Png)?;
    Ok(())
}
