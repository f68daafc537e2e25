//! Grid constants and runtime configuration defaults

// Grid layout defaults
/// Tiles along each edge of a chunk
pub const DEFAULT_CHUNK_SIZE: usize = 16;
/// World-space edge length of a tile
pub const DEFAULT_TILE_SIZE: f32 = 1.0;
/// Depth stamped onto path points
pub const DEFAULT_PATH_DEPTH: f32 = 0.0;

// Safety limit to prevent excessive memory allocation
/// Maximum number of tiles a single grid may hold
pub const MAX_GRID_TILES: usize = 16_777_216;

// Cost map decoding
/// Pixels with a luminance at or below this value are impassable walls
pub const WALL_LUMA_THRESHOLD: u8 = 32;

// Random map generation
/// Fixed seed for reproducible map generation
pub const DEFAULT_SEED: u64 = 42;
/// Fraction of generated tiles that become walls
pub const DEFAULT_WALL_DENSITY: f64 = 0.25;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_path";
/// Overlay color for tiles on the computed path
pub const PATH_COLOR: [u8; 4] = [220, 40, 40, 255];
/// Overlay color for the source and destination tiles
pub const ENDPOINT_COLOR: [u8; 4] = [40, 200, 60, 255];
