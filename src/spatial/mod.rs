//! Chunked tile storage and the fixed neighbor graph
//!
//! This module contains the spatial index:
//! - Grid construction, coordinate and world-position lookup
//! - Chunks owning render buffers with dirty tracking
//! - Tiles carrying a caller-defined payload and neighbor links

/// Fixed-size tile blocks owning render buffers and dirty flags
pub mod chunk;
/// Grid construction, lookup, traversal, and the pending-update queue
pub mod grid;
/// Initial per-chunk render buffer generation
pub mod mesh;
/// UV and vertex quads for a single tile
pub mod rect;
/// Tile identity, neighbor links, and tick membership
pub mod tile;

pub use chunk::{BufferFlags, Chunk, MeshRecorder, MeshSink};
pub use grid::{Grid, GridConfig, GridLayout};
pub use rect::{Rect2D, Rect3D};
pub use tile::{Tickable, Tile};
