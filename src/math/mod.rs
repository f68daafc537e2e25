//! Shared geometry, movement cost, and distance utilities

/// Movement cost capability and the impassable sentinel
pub mod cost;
/// Integer tile coordinates, neighbor directions, and world-to-cell conversion
pub mod geometry;
/// Distance estimates used to order the A* frontier
pub mod heuristic;
