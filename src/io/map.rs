//! Cost maps: PNG decoding, random generation, and grid construction
//!
//! A cost map stores one movement cost per tile in an `Array2` indexed
//! `(row, column)`, with row 0 at the bottom. Images are stored top-down, so
//! the image's last pixel row becomes grid row 0.

use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::io::configuration::{DEFAULT_TILE_SIZE, WALL_LUMA_THRESHOLD};
use crate::io::error::{GridError, Result, invalid_map, invalid_parameter};
use crate::map::movement::MovementTile;
use crate::math::cost::{MAX_MOVEMENT_COST, MIN_MOVEMENT_COST, clamp_movement_cost};
use crate::math::geometry::Coordinate;
use crate::spatial::grid::{Grid, GridConfig};

// Highest cost a generated walkable tile may get
const MAX_GENERATED_COST: u32 = 4;

/// Movement cost per tile, indexed `(row, column)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMap {
    costs: Array2<u32>,
}

impl CostMap {
    /// Wrap a cost array, clamping every cost into the supported range
    ///
    /// # Errors
    ///
    /// Returns `InvalidMapData` if the array is empty.
    pub fn new(mut costs: Array2<u32>) -> Result<Self> {
        if costs.is_empty() {
            return Err(invalid_map(&"cost map has no tiles"));
        }
        costs.mapv_inplace(clamp_movement_cost);
        Ok(Self { costs })
    }

    /// Number of tile columns
    pub fn columns(&self) -> usize {
        self.costs.ncols()
    }

    /// Number of tile rows
    pub fn rows(&self) -> usize {
        self.costs.nrows()
    }

    /// Cost at a coordinate; `None` outside the map
    pub fn cost_at(&self, coordinate: Coordinate) -> Option<u32> {
        let column = usize::try_from(coordinate.x).ok()?;
        let row = usize::try_from(coordinate.y).ok()?;
        self.costs.get((row, column)).copied()
    }

    /// Underlying cost array
    pub const fn costs(&self) -> &Array2<u32> {
        &self.costs
    }

    /// Build a chunked movement grid covering the map
    ///
    /// Tiles in the padding of partially covered edge chunks are walls.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the chunk size is zero or the map is too
    /// large for a grid.
    pub fn build_grid(&self, chunk_size: usize) -> Result<Grid<MovementTile>> {
        if chunk_size == 0 {
            return Err(invalid_parameter("chunk_size", &chunk_size, &"must be positive"));
        }
        let config = GridConfig::covering(self.columns(), self.rows(), chunk_size, DEFAULT_TILE_SIZE);
        Grid::new(config, |_, coordinate| {
            self.cost_at(coordinate)
                .map_or_else(MovementTile::wall, MovementTile::new)
        })
    }
}

/// Movement cost of a grayscale pixel
///
/// Pixels at or below `WALL_LUMA_THRESHOLD` are walls; brighter pixels are
/// cheaper, with white costing 1.
pub fn cost_from_luma(luma: u8) -> u32 {
    if luma <= WALL_LUMA_THRESHOLD {
        return MAX_MOVEMENT_COST;
    }
    let span = u32::from(u8::MAX - WALL_LUMA_THRESHOLD);
    let darkness = u32::from(u8::MAX - luma);
    let steps = MAX_MOVEMENT_COST - MIN_MOVEMENT_COST - 2;
    1 + (darkness * steps).div_ceil(span).min(steps)
}

/// Grayscale pixel representing a movement cost
pub fn luma_from_cost(cost: u32) -> u8 {
    if cost >= MAX_MOVEMENT_COST {
        return 0;
    }
    let steps = MAX_MOVEMENT_COST - MIN_MOVEMENT_COST - 2;
    let span = u32::from(u8::MAX - WALL_LUMA_THRESHOLD);
    let darkness = (cost.max(1) - 1).min(steps) * (span - 1) / steps;
    u8::MAX - darkness as u8
}

/// Decode a PNG cost map
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded, and
/// `InvalidMapData` if it has no pixels.
pub fn load_cost_map(path: &Path) -> Result<CostMap> {
    let image = image::open(path)
        .map_err(|source| GridError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .to_luma8();

    let (width, height) = (image.width() as usize, image.height() as usize);
    let costs = Array2::from_shape_fn((height, width), |(row, column)| {
        let pixel_y = (height - 1 - row) as u32;
        image
            .get_pixel_checked(column as u32, pixel_y)
            .map_or(MAX_MOVEMENT_COST, |Luma([luma])| cost_from_luma(*luma))
    });

    debug!(path = %path.display(), width, height, "cost map loaded");
    CostMap::new(costs)
}

/// Encode a cost map as a grayscale PNG
///
/// # Errors
///
/// Returns `FileSystem` if the parent directory cannot be created, and
/// `ImageExport` if the image cannot be written.
pub fn save_cost_map(map: &CostMap, path: &Path) -> Result<()> {
    let (width, height) = (map.columns(), map.rows());
    let image = GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let row = height - 1 - y as usize;
        let cost = map
            .costs
            .get((row, x as usize))
            .copied()
            .unwrap_or(MAX_MOVEMENT_COST);
        Luma([luma_from_cost(cost)])
    });

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GridError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image.save(path).map_err(|source| GridError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate a square random cost map
///
/// Each tile is a wall with probability `density`, otherwise it gets a random
/// cost from 1 to 4. The bottom-left and top-right corners are always
/// walkable so they can serve as default endpoints.
///
/// # Errors
///
/// Returns `InvalidParameter` if `size` is zero or `density` is outside
/// `0.0..=1.0`.
pub fn generate_cost_map(size: usize, density: f64, seed: u64) -> Result<CostMap> {
    if size == 0 {
        return Err(invalid_parameter("size", &size, &"must be positive"));
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(invalid_parameter("density", &density, &"must be within 0.0..=1.0"));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut costs = Array2::from_shape_simple_fn((size, size), || {
        if rng.random_bool(density) {
            MAX_MOVEMENT_COST
        } else {
            rng.random_range(1..=MAX_GENERATED_COST)
        }
    });

    for corner in [(0, 0), (size - 1, size - 1)] {
        if let Some(cost) = costs.get_mut(corner) {
            *cost = 1;
        }
    }

    debug!(size, density, seed, "cost map generated");
    CostMap::new(costs)
}
