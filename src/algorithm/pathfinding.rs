//! Breadth-first, Dijkstra, and A* search over a grid's cardinal neighbor graph
//!
//! All three searches share one contract: only walkable tiles enter the
//! frontier, the source counts as visited from the start, and the result is
//! the ordered world positions from just past the source to the destination.
//! An unreachable destination, an out-of-range endpoint, or a source equal to
//! the destination yields `None`.

use std::collections::VecDeque;
use std::fmt;

use glam::Vec3;
use tracing::debug;

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::frontier::Frontier;
use crate::algorithm::path::Path;
use crate::math::cost::MovementCost;
use crate::math::geometry::{Coordinate, Direction};
use crate::math::heuristic::Heuristic;
use crate::spatial::grid::Grid;
use crate::spatial::tile::Tile;

/// Search strategy used by [`Pathfinder::calculate_path`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathfindingAlgorithm {
    /// Cost-ordered search guided by a distance estimate
    #[default]
    AStar,
    /// Unweighted search; shortest by step count
    BreadthFirst,
    /// Cost-ordered search; cheapest by accumulated movement cost
    Dijkstra,
}

impl fmt::Display for PathfindingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AStar => "a-star",
            Self::BreadthFirst => "breadth-first",
            Self::Dijkstra => "dijkstra",
        };
        f.write_str(name)
    }
}

/// Stateless path search configured with an algorithm and a heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pathfinder {
    /// Algorithm used by `calculate_path`
    pub algorithm: PathfindingAlgorithm,
    /// Remaining-distance estimate used by A*
    pub heuristic: Heuristic,
}

impl Pathfinder {
    /// Create a pathfinder using the Manhattan heuristic
    pub const fn new(algorithm: PathfindingAlgorithm) -> Self {
        Self {
            algorithm,
            heuristic: Heuristic::Manhattan,
        }
    }

    /// Replace the A* heuristic
    #[must_use]
    pub const fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Search from `source` to `destination` with the configured algorithm
    ///
    /// Output points carry the tile centers' x and y and the given `z`.
    pub fn calculate_path<T: MovementCost>(
        &self,
        grid: &Grid<T>,
        source: Coordinate,
        destination: Coordinate,
        z: f32,
    ) -> Option<Path> {
        match self.algorithm {
            PathfindingAlgorithm::AStar => a_star(grid, source, destination, z, self.heuristic),
            PathfindingAlgorithm::BreadthFirst => breadth_first(grid, source, destination, z),
            PathfindingAlgorithm::Dijkstra => dijkstra(grid, source, destination, z),
        }
    }
}

/// Breadth-first search; the result is shortest by step count
pub fn breadth_first<T: MovementCost>(
    grid: &Grid<T>,
    source: Coordinate,
    destination: Coordinate,
    z: f32,
) -> Option<Path> {
    let (source, destination) = endpoints(grid, source, destination)?;
    let tile_count = grid.layout().tile_count();

    let mut visited = TileBitset::new(tile_count);
    let mut came_from: Vec<Option<usize>> = vec![None; tile_count];
    let mut frontier = VecDeque::from([source.index()]);
    let mut expanded = 0_usize;
    visited.insert(source.index());

    while let Some(current) = frontier.pop_front().and_then(|index| grid.tile(index)) {
        if current.index() == destination.index() {
            break;
        }
        expanded += 1;

        for next in walkable_neighbors(grid, current) {
            if visited.insert(next.index()) {
                set_parent(&mut came_from, next.index(), current.index());
                frontier.push_back(next.index());
            }
        }
    }

    finish(
        PathfindingAlgorithm::BreadthFirst,
        grid,
        &came_from,
        source,
        destination,
        z,
        expanded,
    )
}

/// Dijkstra search; the result has the lowest accumulated movement cost
pub fn dijkstra<T: MovementCost>(
    grid: &Grid<T>,
    source: Coordinate,
    destination: Coordinate,
    z: f32,
) -> Option<Path> {
    cost_ordered(
        PathfindingAlgorithm::Dijkstra,
        grid,
        source,
        destination,
        z,
        |_| 0.0,
    )
}

/// A* search; Dijkstra ordering plus `heuristic` to the destination
pub fn a_star<T: MovementCost>(
    grid: &Grid<T>,
    source: Coordinate,
    destination: Coordinate,
    z: f32,
    heuristic: Heuristic,
) -> Option<Path> {
    let goal = grid.tile_at(destination)?;
    let step = cheapest_step(grid);
    cost_ordered(
        PathfindingAlgorithm::AStar,
        grid,
        source,
        destination,
        z,
        |tile| heuristic.estimate(tile, goal, step),
    )
}

/// Lowest movement cost among walkable tiles, or zero when none are walkable
fn cheapest_step<T: MovementCost>(grid: &Grid<T>) -> u32 {
    grid.iter()
        .map(Tile::payload)
        .filter(|payload| payload.is_walkable())
        .map(MovementCost::movement_cost)
        .min()
        .unwrap_or(0)
}

/// Sum of the movement costs of every tile a path enters
///
/// Points outside the grid contribute nothing.
pub fn path_cost<T: MovementCost>(grid: &Grid<T>, path: &Path) -> u32 {
    path.points()
        .iter()
        .filter_map(|&point| grid.tile_at_position(point))
        .map(|tile| tile.payload().movement_cost())
        .sum()
}

fn cost_ordered<T, H>(
    algorithm: PathfindingAlgorithm,
    grid: &Grid<T>,
    source: Coordinate,
    destination: Coordinate,
    z: f32,
    estimate: H,
) -> Option<Path>
where
    T: MovementCost,
    H: Fn(&Tile<T>) -> f32,
{
    let (source, destination) = endpoints(grid, source, destination)?;
    let tile_count = grid.layout().tile_count();

    let mut closed = TileBitset::new(tile_count);
    let mut came_from: Vec<Option<usize>> = vec![None; tile_count];
    let mut cost_so_far: Vec<Option<u32>> = vec![None; tile_count];
    let mut frontier = Frontier::new();
    let mut expanded = 0_usize;

    if let Some(cost) = cost_so_far.get_mut(source.index()) {
        *cost = Some(0);
    }
    frontier.push(source.index(), 0.0);

    while let Some(entry) = frontier.pop() {
        // Superseded entries of already expanded tiles
        if !closed.insert(entry.tile) {
            continue;
        }
        let Some(current) = grid.tile(entry.tile) else {
            continue;
        };
        if current.index() == destination.index() {
            break;
        }
        expanded += 1;

        let Some(current_cost) = cost_so_far.get(current.index()).copied().flatten() else {
            continue;
        };

        for next in walkable_neighbors(grid, current) {
            let new_cost = current_cost.saturating_add(next.payload().movement_cost());
            let Some(recorded) = cost_so_far.get_mut(next.index()) else {
                continue;
            };
            if recorded.is_some_and(|cost| new_cost >= cost) {
                continue;
            }

            *recorded = Some(new_cost);
            set_parent(&mut came_from, next.index(), current.index());
            closed.remove(next.index());
            frontier.push(next.index(), new_cost as f32 + estimate(next));
        }
    }

    finish(
        algorithm,
        grid,
        &came_from,
        source,
        destination,
        z,
        expanded,
    )
}

fn endpoints<T>(
    grid: &Grid<T>,
    source: Coordinate,
    destination: Coordinate,
) -> Option<(&Tile<T>, &Tile<T>)> {
    if source == destination {
        return None;
    }
    Some((grid.tile_at(source)?, grid.tile_at(destination)?))
}

fn walkable_neighbors<'a, T: MovementCost>(
    grid: &'a Grid<T>,
    tile: &'a Tile<T>,
) -> impl Iterator<Item = &'a Tile<T>> + 'a {
    Direction::CARDINALS
        .into_iter()
        .filter_map(move |direction| grid.neighbor(tile, direction))
        .filter(|next| next.payload().is_walkable())
}

fn set_parent(came_from: &mut [Option<usize>], tile: usize, parent: usize) {
    if let Some(slot) = came_from.get_mut(tile) {
        *slot = Some(parent);
    }
}

fn finish<T>(
    algorithm: PathfindingAlgorithm,
    grid: &Grid<T>,
    came_from: &[Option<usize>],
    source: &Tile<T>,
    destination: &Tile<T>,
    z: f32,
    expanded: usize,
) -> Option<Path> {
    let path = construct_path(grid, came_from, source.index(), destination.index(), z);
    debug!(
        %algorithm,
        source = %source.coordinate(),
        destination = %destination.coordinate(),
        expanded,
        steps = path.as_ref().map(Path::len),
        "path search finished"
    );
    path
}

fn construct_path<T>(
    grid: &Grid<T>,
    came_from: &[Option<usize>],
    source: usize,
    destination: usize,
    z: f32,
) -> Option<Path> {
    came_from.get(destination).copied().flatten()?;

    let mut points = Vec::new();
    let mut current = destination;
    while current != source {
        let tile = grid.tile(current)?;
        let position = tile.position();
        points.push(Vec3::new(position.x, position.y, z));
        current = came_from.get(current).copied().flatten()?;
    }
    points.reverse();

    Some(Path::new(points))
}
