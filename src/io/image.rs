//! PNG export of a cost map with a path drawn over it

use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::io::configuration::{ENDPOINT_COLOR, PATH_COLOR};
use crate::io::error::{GridError, Result};
use crate::io::map::{CostMap, luma_from_cost};
use crate::math::geometry::Coordinate;

// Image rows run top-down while grid rows run bottom-up
fn pixel_of(map: &CostMap, coordinate: Coordinate) -> Option<(u32, u32)> {
    map.cost_at(coordinate)?;
    let y = map.rows() - 1 - coordinate.y as usize;
    Some((coordinate.x as u32, y as u32))
}

/// Render a cost map in grayscale and overlay a route and its endpoints
///
/// Route tiles outside the map are ignored.
///
/// # Errors
///
/// Returns `FileSystem` if the parent directory cannot be created, and
/// `ImageExport` if the image cannot be saved.
pub fn export_path_overlay(
    map: &CostMap,
    route: &[Coordinate],
    endpoints: [Coordinate; 2],
    output_path: &Path,
) -> Result<()> {
    let (width, height) = (map.columns() as u32, map.rows() as u32);
    let mut img = ImageBuffer::from_fn(width, height, |x, y| {
        let coordinate = Coordinate::new(x as i32, (height - 1 - y) as i32);
        let luma = map.cost_at(coordinate).map_or(0, luma_from_cost);
        Rgba([luma, luma, luma, u8::MAX])
    });

    for &coordinate in route {
        if let Some((x, y)) = pixel_of(map, coordinate) {
            img.put_pixel(x, y, Rgba(PATH_COLOR));
        }
    }
    for coordinate in endpoints {
        if let Some((x, y)) = pixel_of(map, coordinate) {
            img.put_pixel(x, y, Rgba(ENDPOINT_COLOR));
        }
    }

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| GridError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| GridError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
