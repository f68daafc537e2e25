//! Chunked tile grid with a fixed 8-directional neighbor graph
//!
//! Tiles live in one contiguous row-major array owned by the grid; chunks own
//! the render buffers for their block of tiles. Construction is two-phase:
//! every tile is created first, then each tile's neighbor slots are resolved
//! through the grid. Buffer writes go through the grid so that each chunk is
//! queued for upload once per modification burst.

use std::collections::{BTreeSet, VecDeque};

use glam::{Vec3, Vec4};
use ndarray::Array2;
use tracing::debug;

use crate::io::configuration::MAX_GRID_TILES;
use crate::io::error::{GridError, Result, invalid_parameter};
use crate::math::geometry::{Coordinate, Direction, world_to_cell};
use crate::spatial::chunk::{Chunk, MeshSink};
use crate::spatial::mesh;
use crate::spatial::rect::{Rect2D, Rect3D};
use crate::spatial::tile::{Tickable, Tile};

/// Requested grid dimensions, validated by [`GridConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// World position of the grid's bottom-left corner
    pub origin: Vec3,
    /// Number of chunks along the x axis
    pub chunk_columns: usize,
    /// Number of chunks along the y axis
    pub chunk_rows: usize,
    /// Tile columns per chunk
    pub columns_per_chunk: usize,
    /// Tile rows per chunk
    pub rows_per_chunk: usize,
    /// World-space edge length of a tile
    pub tile_size: f32,
}

impl GridConfig {
    /// Create a configuration anchored at the world origin
    pub const fn new(
        chunk_columns: usize,
        chunk_rows: usize,
        columns_per_chunk: usize,
        rows_per_chunk: usize,
        tile_size: f32,
    ) -> Self {
        Self {
            origin: Vec3::ZERO,
            chunk_columns,
            chunk_rows,
            columns_per_chunk,
            rows_per_chunk,
            tile_size,
        }
    }

    /// Smallest grid of square `chunk_size` chunks covering `columns x rows` tiles
    pub const fn covering(columns: usize, rows: usize, chunk_size: usize, tile_size: f32) -> Self {
        let chunk_size = if chunk_size == 0 { 1 } else { chunk_size };
        Self::new(
            columns.div_ceil(chunk_size),
            rows.div_ceil(chunk_size),
            chunk_size,
            chunk_size,
            tile_size,
        )
    }

    /// Move the grid's bottom-left corner
    #[must_use]
    pub const fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Check every dimension and derive the grid layout
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any dimension is zero, the tile size is
    /// not a positive finite number, the origin is not finite, or the tile
    /// count exceeds `MAX_GRID_TILES`.
    pub fn validate(&self) -> Result<GridLayout> {
        let dimensions = [
            ("chunk_columns", self.chunk_columns),
            ("chunk_rows", self.chunk_rows),
            ("columns_per_chunk", self.columns_per_chunk),
            ("rows_per_chunk", self.rows_per_chunk),
        ];
        for (parameter, value) in dimensions {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
        }

        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be a positive finite number",
            ));
        }

        if !self.origin.is_finite() {
            return Err(invalid_parameter(
                "origin",
                &self.origin,
                &"must be finite",
            ));
        }

        let columns = self.chunk_columns.checked_mul(self.columns_per_chunk);
        let rows = self.chunk_rows.checked_mul(self.rows_per_chunk);
        let (Some(columns), Some(rows)) = (columns, rows) else {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{self:?}"),
                &"tile count overflows",
            ));
        };

        match columns.checked_mul(rows) {
            Some(count) if count <= MAX_GRID_TILES => {}
            _ => {
                return Err(invalid_parameter(
                    "dimensions",
                    &format!("{columns}x{rows}"),
                    &format!("grid may hold at most {MAX_GRID_TILES} tiles"),
                ));
            }
        }

        Ok(GridLayout {
            origin: self.origin,
            columns,
            rows,
            chunk_columns: self.chunk_columns,
            chunk_rows: self.chunk_rows,
            columns_per_chunk: self.columns_per_chunk,
            rows_per_chunk: self.rows_per_chunk,
            tile_size: self.tile_size,
        })
    }
}

/// Validated grid geometry, shared with tile factories
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    origin: Vec3,
    columns: usize,
    rows: usize,
    chunk_columns: usize,
    chunk_rows: usize,
    columns_per_chunk: usize,
    rows_per_chunk: usize,
    tile_size: f32,
}

impl GridLayout {
    /// World position of the grid's bottom-left corner
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Total tile columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Total tile rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of chunks along the x axis
    pub const fn chunk_columns(&self) -> usize {
        self.chunk_columns
    }

    /// Number of chunks along the y axis
    pub const fn chunk_rows(&self) -> usize {
        self.chunk_rows
    }

    /// Tile columns per chunk
    pub const fn columns_per_chunk(&self) -> usize {
        self.columns_per_chunk
    }

    /// Tile rows per chunk
    pub const fn rows_per_chunk(&self) -> usize {
        self.rows_per_chunk
    }

    /// World-space edge length of a tile
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Total number of tiles
    pub const fn tile_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Total number of chunks
    pub const fn chunk_count(&self) -> usize {
        self.chunk_columns * self.chunk_rows
    }

    /// World-space width of the grid
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// World-space height of the grid
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Whether `coordinate` lies in `[0, columns) x [0, rows)`
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.flat_index(coordinate).is_some()
    }

    /// Row-major index of an in-range coordinate
    pub fn flat_index(&self, coordinate: Coordinate) -> Option<usize> {
        let column = usize::try_from(coordinate.x).ok()?;
        let row = usize::try_from(coordinate.y).ok()?;
        (column < self.columns && row < self.rows).then_some(row * self.columns + column)
    }

    /// Coordinate of a row-major index
    pub const fn coordinate_of(&self, index: usize) -> Option<Coordinate> {
        if index >= self.tile_count() {
            return None;
        }
        Some(Coordinate::new(
            (index % self.columns) as i32,
            (index / self.columns) as i32,
        ))
    }

    /// Row-major index of the chunk owning an in-range coordinate
    pub fn chunk_index_of(&self, coordinate: Coordinate) -> Option<usize> {
        self.flat_index(coordinate)?;
        let chunk_column = coordinate.x as usize / self.columns_per_chunk;
        let chunk_row = coordinate.y as usize / self.rows_per_chunk;
        Some(chunk_row * self.chunk_columns + chunk_column)
    }

    /// Coordinate relative to the owning chunk
    pub fn local_coordinate(&self, coordinate: Coordinate) -> Option<Coordinate> {
        self.flat_index(coordinate)?;
        Some(Coordinate::new(
            coordinate.x % self.columns_per_chunk as i32,
            coordinate.y % self.rows_per_chunk as i32,
        ))
    }

    /// World-space center of a tile, at the grid's depth
    pub fn tile_center(&self, coordinate: Coordinate) -> Vec3 {
        Vec3::new(
            (coordinate.x as f32).mul_add(self.tile_size, self.origin.x) + self.tile_size / 2.0,
            (coordinate.y as f32).mul_add(self.tile_size, self.origin.y) + self.tile_size / 2.0,
            self.origin.z,
        )
    }

    /// World position of a chunk's bottom-left corner
    pub fn chunk_origin(&self, chunk_column: usize, chunk_row: usize) -> Vec3 {
        Vec3::new(
            (chunk_column * self.columns_per_chunk) as f32 * self.tile_size + self.origin.x,
            (chunk_row * self.rows_per_chunk) as f32 * self.tile_size + self.origin.y,
            self.origin.z,
        )
    }

    /// Tile coordinate containing a world position
    ///
    /// Positions outside `[origin, origin + extent)` on either axis resolve
    /// to `None`.
    pub fn coordinate_at_position(&self, position: Vec3) -> Option<Coordinate> {
        let x = world_to_cell(position.x, self.origin.x, self.tile_size)?;
        let y = world_to_cell(position.y, self.origin.y, self.tile_size)?;
        let coordinate = Coordinate::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?);
        self.contains(coordinate).then_some(coordinate)
    }

    /// Flat indices of the 8 neighbors of a coordinate, in slot order
    pub fn neighbor_indices(&self, coordinate: Coordinate) -> [Option<usize>; 8] {
        Direction::ALL.map(|direction| self.flat_index(coordinate.offset(direction)))
    }
}

/// Tile grid partitioned into fixed-size chunks
///
/// Owns every chunk and tile for its whole lifetime. Chunks are stored in
/// row-major chunk order; tiles are stored row-major in an
/// `ndarray::Array2` of shape `(rows, columns)`.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    layout: GridLayout,
    chunks: Vec<Chunk>,
    tiles: Array2<Tile<T>>,
    pending_updates: VecDeque<usize>,
    active_chunks: BTreeSet<usize>,
    visible_chunks: BTreeSet<usize>,
}

impl<T> Grid<T> {
    /// Build a grid, creating each tile's payload with `factory`
    ///
    /// Chunks are allocated in row-major chunk order and their initial render
    /// buffers are generated in parallel; every chunk starts queued for its
    /// first upload. Tiles are then created chunk by chunk, and finally every
    /// tile's 8 neighbor slots are resolved.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `config` fails validation; no tile or
    /// chunk is created in that case.
    pub fn new<F>(config: GridConfig, mut factory: F) -> Result<Self>
    where
        F: FnMut(&GridLayout, Coordinate) -> T,
    {
        let layout = config.validate()?;

        let mut chunks = Vec::with_capacity(layout.chunk_count());
        for chunk_row in 0..layout.chunk_rows {
            for chunk_column in 0..layout.chunk_columns {
                chunks.push(Chunk::new(
                    chunks.len(),
                    layout.chunk_origin(chunk_column, chunk_row),
                    layout.rows_per_chunk,
                    layout.columns_per_chunk,
                    layout.tile_size,
                ));
            }
        }
        mesh::generate_all(&mut chunks);

        let mut slots: Vec<Option<Tile<T>>> = (0..layout.tile_count()).map(|_| None).collect();
        for chunk_row in 0..layout.chunk_rows {
            for chunk_column in 0..layout.chunk_columns {
                let chunk_index = chunk_row * layout.chunk_columns + chunk_column;
                for local_row in 0..layout.rows_per_chunk {
                    for local_column in 0..layout.columns_per_chunk {
                        let coordinate = Coordinate::new(
                            (chunk_column * layout.columns_per_chunk + local_column) as i32,
                            (chunk_row * layout.rows_per_chunk + local_row) as i32,
                        );
                        let Some(index) = layout.flat_index(coordinate) else {
                            continue;
                        };
                        let tile = Tile::new(
                            coordinate,
                            Coordinate::new(local_column as i32, local_row as i32),
                            index,
                            chunk_index,
                            layout.tile_center(coordinate),
                            factory(&layout, coordinate),
                        );
                        if let Some(slot) = slots.get_mut(index) {
                            *slot = Some(tile);
                        }
                    }
                }
            }
        }

        let mut tiles: Vec<Tile<T>> = slots.into_iter().flatten().collect();
        if tiles.len() != layout.tile_count() {
            return Err(invalid_parameter(
                "dimensions",
                &tiles.len(),
                &"tile allocation did not cover the grid",
            ));
        }

        for tile in &mut tiles {
            tile.set_neighbors(layout.neighbor_indices(tile.coordinate()));
        }

        let tiles = Array2::from_shape_vec((layout.rows, layout.columns), tiles).map_err(|e| {
            GridError::InvalidParameter {
                parameter: "dimensions",
                value: format!("{}x{}", layout.columns, layout.rows),
                reason: e.to_string(),
            }
        })?;

        debug!(
            columns = layout.columns,
            rows = layout.rows,
            chunks = chunks.len(),
            "grid constructed"
        );

        Ok(Self {
            layout,
            pending_updates: (0..chunks.len()).collect(),
            chunks,
            tiles,
            active_chunks: BTreeSet::new(),
            visible_chunks: BTreeSet::new(),
        })
    }

    /// Validated geometry of this grid
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Total tile columns
    pub const fn columns(&self) -> usize {
        self.layout.columns
    }

    /// Total tile rows
    pub const fn rows(&self) -> usize {
        self.layout.rows
    }

    /// World-space edge length of a tile
    pub const fn tile_size(&self) -> f32 {
        self.layout.tile_size
    }

    /// World position of the grid's bottom-left corner
    pub const fn origin(&self) -> Vec3 {
        self.layout.origin
    }

    /// Chunks in row-major chunk order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk by row-major chunk index
    pub fn chunk(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Chunk containing a world position
    pub fn chunk_at_position(&self, position: Vec3) -> Option<&Chunk> {
        let coordinate = self.layout.coordinate_at_position(position)?;
        self.chunk(self.layout.chunk_index_of(coordinate)?)
    }

    /// Tile at a grid coordinate; `None` outside the grid
    pub fn tile_at(&self, coordinate: Coordinate) -> Option<&Tile<T>> {
        self.tile(self.layout.flat_index(coordinate)?)
    }

    /// Mutable tile at a grid coordinate; `None` outside the grid
    pub fn tile_at_mut(&mut self, coordinate: Coordinate) -> Option<&mut Tile<T>> {
        let index = self.layout.flat_index(coordinate)?;
        self.tile_mut(index)
    }

    /// Tile containing a world position; `None` outside the grid extent
    pub fn tile_at_position(&self, position: Vec3) -> Option<&Tile<T>> {
        self.tile_at(self.layout.coordinate_at_position(position)?)
    }

    /// Tile by flat row-major index
    pub fn tile(&self, index: usize) -> Option<&Tile<T>> {
        self.tiles.as_slice()?.get(index)
    }

    /// Mutable tile by flat row-major index
    pub fn tile_mut(&mut self, index: usize) -> Option<&mut Tile<T>> {
        self.tiles.as_slice_mut()?.get_mut(index)
    }

    /// Neighbor of `tile` in `direction`
    pub fn neighbor(&self, tile: &Tile<T>, direction: Direction) -> Option<&Tile<T>> {
        self.tile(tile.neighbor_index(direction)?)
    }

    /// Present neighbors of `tile` in slot order
    pub fn neighbors<'a>(
        &'a self,
        tile: &'a Tile<T>,
    ) -> impl Iterator<Item = (Direction, &'a Tile<T>)> + 'a {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, self.neighbor(tile, direction)?)))
    }

    /// Present east, west, south, and north neighbors of `tile`
    pub fn cardinal_neighbors<'a>(&'a self, tile: &'a Tile<T>) -> impl Iterator<Item = &'a Tile<T>> + 'a {
        Direction::CARDINALS
            .into_iter()
            .filter_map(move |direction| self.neighbor(tile, direction))
    }

    /// Call `action` on each present neighbor of the tile at `coordinate`
    pub fn for_each_neighbor<F>(&self, coordinate: Coordinate, mut action: F)
    where
        F: FnMut(&Tile<T>),
    {
        if let Some(tile) = self.tile_at(coordinate) {
            self.neighbors(tile).for_each(|(_, neighbor)| action(neighbor));
        }
    }

    /// Whether any present neighbor of the tile at `coordinate` satisfies `predicate`
    pub fn any_neighbor<P>(&self, coordinate: Coordinate, mut predicate: P) -> bool
    where
        P: FnMut(&Tile<T>) -> bool,
    {
        self.tile_at(coordinate)
            .is_some_and(|tile| self.neighbors(tile).any(|(_, neighbor)| predicate(neighbor)))
    }

    /// All tiles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Tile<T>> {
        self.tiles.iter()
    }

    /// Visit every tile in row-major order
    pub fn for_each_tile<F>(&self, action: F)
    where
        F: FnMut(&Tile<T>),
    {
        self.tiles.iter().for_each(action);
    }

    /// Visit every tile mutably in row-major order
    pub fn for_each_tile_mut<F>(&mut self, action: F)
    where
        F: FnMut(&mut Tile<T>),
    {
        self.tiles.iter_mut().for_each(action);
    }

    /// Visit every coordinate in row-major order
    pub fn for_each_coordinate<F>(&self, mut action: F)
    where
        F: FnMut(Coordinate),
    {
        self.tiles.iter().for_each(|tile| action(tile.coordinate()));
    }

    /// Set the UVs of one tile; false outside the grid
    pub fn set_tile_uvs(&mut self, coordinate: Coordinate, uv_rect: &Rect2D) -> bool {
        self.modify_tile_chunk(coordinate, |chunk, local| chunk.set_tile_uvs(local, uv_rect))
    }

    /// Set the vertex quad of one tile; false outside the grid
    pub fn set_tile_vertices(&mut self, coordinate: Coordinate, vertex_rect: &Rect3D) -> bool {
        self.modify_tile_chunk(coordinate, |chunk, local| {
            chunk.set_tile_vertices(local, vertex_rect)
        })
    }

    /// Set the vertex color of one tile; false outside the grid
    pub fn set_tile_color(&mut self, coordinate: Coordinate, color: Vec4) -> bool {
        self.modify_tile_chunk(coordinate, |chunk, local| chunk.set_tile_color(local, color))
    }

    /// Current UV quad of one tile
    pub fn tile_uv_rect(&self, coordinate: Coordinate) -> Option<Rect2D> {
        let chunk = self.chunk(self.layout.chunk_index_of(coordinate)?)?;
        chunk.tile_uv_rect(self.layout.local_coordinate(coordinate)?)
    }

    /// Current vertex quad of one tile
    pub fn tile_vertex_rect(&self, coordinate: Coordinate) -> Option<Rect3D> {
        let chunk = self.chunk(self.layout.chunk_index_of(coordinate)?)?;
        chunk.tile_vertex_rect(self.layout.local_coordinate(coordinate)?)
    }

    /// Paint every tile of a chunk with the same UVs; false for an unknown chunk
    pub fn set_chunk_uvs(&mut self, chunk_index: usize, uv_rect: &Rect2D) -> bool {
        self.modify_chunk(chunk_index, |chunk| chunk.set_uvs(uv_rect))
    }

    /// Paint every vertex of a chunk with one color; false for an unknown chunk
    pub fn set_chunk_color(&mut self, chunk_index: usize, color: Vec4) -> bool {
        self.modify_chunk(chunk_index, |chunk| chunk.set_color(color))
    }

    /// Chunks awaiting upload, oldest first
    pub const fn pending_updates(&self) -> &VecDeque<usize> {
        &self.pending_updates
    }

    /// Drain the pending-update queue, uploading each chunk's modified buffers
    ///
    /// Returns the number of chunks flushed. A chunk modified after this call
    /// is queued again for the next one.
    pub fn update<S: MeshSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut flushed = 0;
        while let Some(chunk_index) = self.pending_updates.pop_front() {
            if let Some(chunk) = self.chunks.get_mut(chunk_index) {
                chunk.flush(sink);
                flushed += 1;
            }
        }
        if flushed > 0 {
            debug!(chunks = flushed, "pending chunk updates flushed");
        }
        flushed
    }

    /// Add a tile to its chunk's tick list and activate the chunk
    ///
    /// Returns false if the tile does not exist or was already active.
    pub fn mark_tile_active(&mut self, coordinate: Coordinate) -> bool {
        let Some(index) = self.layout.flat_index(coordinate) else {
            return false;
        };
        let Some(tile) = self.tiles.as_slice_mut().and_then(|tiles| tiles.get_mut(index)) else {
            return false;
        };
        if tile.is_active_tickable() {
            return false;
        }
        let chunk_index = tile.chunk_index();
        let Some(chunk) = self.chunks.get_mut(chunk_index) else {
            return false;
        };
        chunk.add_active_tickable(index);
        tile.set_active_tickable(true);
        self.active_chunks.insert(chunk_index);
        true
    }

    /// Remove a tile from its chunk's tick list
    ///
    /// The chunk leaves the active set once its tick list is empty. Returns
    /// false if the tile does not exist or was not active.
    pub fn mark_tile_inactive(&mut self, coordinate: Coordinate) -> bool {
        let Some(index) = self.layout.flat_index(coordinate) else {
            return false;
        };
        let Some(tile) = self.tiles.as_slice_mut().and_then(|tiles| tiles.get_mut(index)) else {
            return false;
        };
        if !tile.is_active_tickable() {
            return false;
        }
        let chunk_index = tile.chunk_index();
        let Some(chunk) = self.chunks.get_mut(chunk_index) else {
            return false;
        };
        chunk.remove_active_tickable(index);
        tile.set_active_tickable(false);
        if chunk.active_tickables().is_empty() {
            self.active_chunks.remove(&chunk_index);
        }
        true
    }

    /// Chunks currently ticked, in chunk order
    pub fn active_chunks(&self) -> impl Iterator<Item = usize> + '_ {
        self.active_chunks.iter().copied()
    }

    /// Chunks currently drawn, in chunk order
    pub fn visible_chunks(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible_chunks.iter().copied()
    }

    /// Include a chunk in ticking; false for an unknown chunk
    pub fn mark_chunk_active(&mut self, chunk_index: usize) -> bool {
        chunk_index < self.chunks.len() && self.active_chunks.insert(chunk_index)
    }

    /// Exclude a chunk from ticking
    ///
    /// Refused while any of the chunk's tiles is still active; deactivate
    /// those tiles instead and the chunk leaves the set with the last one.
    pub fn mark_chunk_inactive(&mut self, chunk_index: usize) -> bool {
        let has_active_tiles = self
            .chunks
            .get(chunk_index)
            .is_some_and(|chunk| !chunk.active_tickables().is_empty());
        !has_active_tiles && self.active_chunks.remove(&chunk_index)
    }

    /// Flip a chunk's membership in the active set
    pub fn toggle_chunk_active(&mut self, chunk_index: usize) -> bool {
        if self.active_chunks.contains(&chunk_index) {
            self.mark_chunk_inactive(chunk_index)
        } else {
            self.mark_chunk_active(chunk_index)
        }
    }

    /// Include a chunk in drawing; false for an unknown chunk
    pub fn mark_chunk_visible(&mut self, chunk_index: usize) -> bool {
        chunk_index < self.chunks.len() && self.visible_chunks.insert(chunk_index)
    }

    /// Exclude a chunk from drawing
    pub fn mark_chunk_invisible(&mut self, chunk_index: usize) -> bool {
        self.visible_chunks.remove(&chunk_index)
    }

    /// Flip a chunk's membership in the visible set
    pub fn toggle_chunk_visible(&mut self, chunk_index: usize) -> bool {
        if self.visible_chunks.contains(&chunk_index) {
            self.mark_chunk_invisible(chunk_index)
        } else {
            self.mark_chunk_visible(chunk_index)
        }
    }

    fn modify_tile_chunk<F>(&mut self, coordinate: Coordinate, write: F) -> bool
    where
        F: FnOnce(&mut Chunk, Coordinate) -> bool,
    {
        let (Some(chunk_index), Some(local)) = (
            self.layout.chunk_index_of(coordinate),
            self.layout.local_coordinate(coordinate),
        ) else {
            return false;
        };
        self.modify_chunk(chunk_index, |chunk| write(chunk, local))
    }

    fn modify_chunk<F>(&mut self, chunk_index: usize, write: F) -> bool
    where
        F: FnOnce(&mut Chunk) -> bool,
    {
        let Some(chunk) = self.chunks.get_mut(chunk_index) else {
            return false;
        };
        if write(chunk) {
            self.pending_updates.push_back(chunk_index);
        }
        true
    }
}

impl<T: Tickable> Grid<T> {
    /// Tick every active tile of every active chunk, in chunk order
    pub fn tick(&mut self, ticks: u64) {
        let Some(tiles) = self.tiles.as_slice_mut() else {
            return;
        };
        for &chunk_index in &self.active_chunks {
            let Some(chunk) = self.chunks.get(chunk_index) else {
                continue;
            };
            for &tile_index in chunk.active_tickables() {
                if let Some(tile) = tiles.get_mut(tile_index) {
                    tile.payload_mut().tick(ticks);
                }
            }
        }
    }
}
