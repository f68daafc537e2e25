/// Bitset over flat tile indices used as the visited marker
pub mod bitset;
/// Priority frontier with FIFO tie-breaking
pub mod frontier;
/// One-shot sequence of world positions
pub mod path;
/// Breadth-first, Dijkstra, and A* searches
pub mod pathfinding;
