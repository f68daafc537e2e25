//! Chunked tile grid with neighbor-graph pathfinding and bitmask autotiling
//!
//! A `Grid` partitions rectangular tiles into fixed-size chunks that own the
//! render buffers for their tiles and report modified buffers through a
//! pending-update queue. Tiles are linked to their 8 neighbors, which the
//! breadth-first, Dijkstra, and A* searches walk over cardinal moves, and
//! which the rule resolver turns into a 16-bit mask for picking sprite
//! variants.

#![forbid(unsafe_code)]

/// Path searches over the grid's neighbor graph
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Concrete tile payloads: terrain and movement cost
pub mod map;
/// Coordinates, directions, movement costs, and heuristics
pub mod math;
/// Neighbor masks and autotile rule tables
pub mod rules;
/// Chunked grid, tiles, and render buffers
pub mod spatial;

pub use io::error::{GridError, Result};
