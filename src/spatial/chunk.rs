//! Fixed-size tile blocks with per-buffer dirty tracking
//!
//! A chunk never talks to its grid directly. Every mutating method reports
//! whether the chunk went from clean to dirty, and the grid uses that single
//! transition to enqueue the chunk for the next flush. This keeps a chunk in
//! the pending-update queue at most once between flushes, no matter how many
//! writes or buffer kinds are involved.

use std::ops::{BitOr, BitOrAssign};

use glam::{Vec2, Vec3, Vec4};
use tracing::{trace, warn};

use crate::math::geometry::Coordinate;
use crate::spatial::mesh::{ChunkMesh, VERTICES_PER_TILE};
use crate::spatial::rect::{Rect2D, Rect3D};

/// Set of render buffers awaiting upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BufferFlags(u8);

impl BufferFlags {
    /// No buffer modified
    pub const NONE: Self = Self(0);
    /// Vertex positions
    pub const VERTICES: Self = Self(1);
    /// Texture coordinates
    pub const UVS: Self = Self(1 << 1);
    /// Vertex colors
    pub const COLORS: Self = Self(1 << 2);
    /// Triangle indices
    pub const INDICES: Self = Self(1 << 3);
    /// Every buffer
    pub const ALL: Self = Self(0b1111);

    /// Whether every flag of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bit representation
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for BufferFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for BufferFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Receiver for chunk buffer uploads, implemented by the render collaborator
pub trait MeshSink {
    /// Replace the vertex buffer of a chunk
    fn upload_vertices(&mut self, chunk: usize, vertices: &[Vec3]);
    /// Replace the UV buffer of a chunk
    fn upload_uvs(&mut self, chunk: usize, uvs: &[Vec2]);
    /// Replace the color buffer of a chunk
    fn upload_colors(&mut self, chunk: usize, colors: &[Vec4]);
    /// Replace the index buffer of a chunk
    fn upload_indices(&mut self, chunk: usize, indices: &[u32]);
}

/// Sink that only records which buffers were uploaded, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshRecorder {
    /// `(chunk index, buffer)` for every upload received
    pub uploads: Vec<(usize, BufferFlags)>,
}

impl MeshRecorder {
    /// Create an empty recorder
    pub const fn new() -> Self {
        Self {
            uploads: Vec::new(),
        }
    }

    /// Number of uploads of a given buffer kind
    pub fn count(&self, kind: BufferFlags) -> usize {
        self.uploads
            .iter()
            .filter(|(_, uploaded)| *uploaded == kind)
            .count()
    }

    /// Distinct chunks in the order they were first uploaded
    pub fn chunks(&self) -> Vec<usize> {
        let mut seen = Vec::new();
        for &(chunk, _) in &self.uploads {
            if !seen.contains(&chunk) {
                seen.push(chunk);
            }
        }
        seen
    }
}

impl MeshSink for MeshRecorder {
    fn upload_vertices(&mut self, chunk: usize, _vertices: &[Vec3]) {
        self.uploads.push((chunk, BufferFlags::VERTICES));
    }

    fn upload_uvs(&mut self, chunk: usize, _uvs: &[Vec2]) {
        self.uploads.push((chunk, BufferFlags::UVS));
    }

    fn upload_colors(&mut self, chunk: usize, _colors: &[Vec4]) {
        self.uploads.push((chunk, BufferFlags::COLORS));
    }

    fn upload_indices(&mut self, chunk: usize, _indices: &[u32]) {
        self.uploads.push((chunk, BufferFlags::INDICES));
    }
}

/// Rectangular block of tiles sharing one set of render buffers
#[derive(Debug, Clone)]
pub struct Chunk {
    index: usize,
    origin: Vec3,
    rows: usize,
    columns: usize,
    tile_size: f32,
    mesh: ChunkMesh,
    modified: BufferFlags,
    active_tickables: Vec<usize>,
}

impl Chunk {
    /// Create a chunk with empty buffers; the grid installs the generated mesh
    pub fn new(index: usize, origin: Vec3, rows: usize, columns: usize, tile_size: f32) -> Self {
        Self {
            index,
            origin,
            rows,
            columns,
            tile_size,
            mesh: ChunkMesh::default(),
            modified: BufferFlags::NONE,
            active_tickables: Vec::new(),
        }
    }

    /// Position of this chunk in the grid's row-major chunk order
    pub const fn index(&self) -> usize {
        self.index
    }

    /// World position of the chunk's bottom-left corner
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Tile rows in this chunk
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Tile columns in this chunk
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// World-space edge length of a tile
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World-space width of the chunk
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// World-space height of the chunk
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Current render buffers
    pub const fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Buffers modified since the last flush
    pub const fn modified(&self) -> BufferFlags {
        self.modified
    }

    /// Grid tile indices that are ticked while this chunk is active
    pub fn active_tickables(&self) -> &[usize] {
        &self.active_tickables
    }

    /// Replace every buffer with `mesh` and mark all of them modified
    pub(crate) fn install_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = mesh;
        self.modified = BufferFlags::ALL;
    }

    /// Paint every tile of the chunk with the same UVs
    pub(crate) fn set_uvs(&mut self, uv_rect: &Rect2D) -> bool {
        let corners = uv_rect.corners();
        for quad in self.mesh.uvs.chunks_exact_mut(VERTICES_PER_TILE) {
            quad.copy_from_slice(&corners);
        }
        self.mark_modified(BufferFlags::UVS)
    }

    /// Set the UVs of a single tile
    pub(crate) fn set_tile_uvs(&mut self, local: Coordinate, uv_rect: &Rect2D) -> bool {
        let Some(offset) = self.quad_offset(local) else {
            warn!(chunk = self.index, %local, "tile UV write outside chunk ignored");
            return false;
        };
        write_quad(&mut self.mesh.uvs, offset, uv_rect.corners());
        self.mark_modified(BufferFlags::UVS)
    }

    /// Set the vertices of a single tile
    pub(crate) fn set_tile_vertices(&mut self, local: Coordinate, vertex_rect: &Rect3D) -> bool {
        let Some(offset) = self.quad_offset(local) else {
            warn!(chunk = self.index, %local, "tile vertex write outside chunk ignored");
            return false;
        };
        write_quad(&mut self.mesh.vertices, offset, vertex_rect.corners());
        self.mark_modified(BufferFlags::VERTICES)
    }

    /// Paint every vertex of the chunk with one color
    pub(crate) fn set_color(&mut self, color: Vec4) -> bool {
        self.mesh.colors.fill(color);
        self.mark_modified(BufferFlags::COLORS)
    }

    /// Paint the four vertices of a single tile
    pub(crate) fn set_tile_color(&mut self, local: Coordinate, color: Vec4) -> bool {
        let Some(offset) = self.quad_offset(local) else {
            warn!(chunk = self.index, %local, "tile color write outside chunk ignored");
            return false;
        };
        write_quad(&mut self.mesh.colors, offset, [color; VERTICES_PER_TILE]);
        self.mark_modified(BufferFlags::COLORS)
    }

    /// Vertex quad of a single tile
    pub fn tile_vertex_rect(&self, local: Coordinate) -> Option<Rect3D> {
        let offset = self.quad_offset(local)?;
        let quad = self.mesh.vertices.get(offset..offset + VERTICES_PER_TILE)?;
        let corners: [Vec3; VERTICES_PER_TILE] = quad.try_into().ok()?;
        Some(Rect3D::from_corners(corners))
    }

    /// UV quad of a single tile
    pub fn tile_uv_rect(&self, local: Coordinate) -> Option<Rect2D> {
        let offset = self.quad_offset(local)?;
        let quad = self.mesh.uvs.get(offset..offset + VERTICES_PER_TILE)?;
        let [bottom_left, top_left, bottom_right, top_right]: [Vec2; VERTICES_PER_TILE] =
            quad.try_into().ok()?;
        Some(Rect2D::new(bottom_left, top_left, bottom_right, top_right))
    }

    /// Upload every modified buffer to `sink` and clear the flags
    ///
    /// Returns the set of buffers that were uploaded.
    pub(crate) fn flush<S: MeshSink + ?Sized>(&mut self, sink: &mut S) -> BufferFlags {
        let uploaded = self.modified;
        self.modified = BufferFlags::NONE;

        if uploaded.contains(BufferFlags::VERTICES) {
            sink.upload_vertices(self.index, &self.mesh.vertices);
        }
        if uploaded.contains(BufferFlags::UVS) {
            sink.upload_uvs(self.index, &self.mesh.uvs);
        }
        if uploaded.contains(BufferFlags::COLORS) {
            sink.upload_colors(self.index, &self.mesh.colors);
        }
        if uploaded.contains(BufferFlags::INDICES) {
            sink.upload_indices(self.index, &self.mesh.indices);
        }

        trace!(chunk = self.index, buffers = uploaded.bits(), "chunk flushed");
        uploaded
    }

    /// Add a grid tile to the active list; false if it was already listed
    pub(crate) fn add_active_tickable(&mut self, tile_index: usize) -> bool {
        if self.active_tickables.contains(&tile_index) {
            return false;
        }
        self.active_tickables.push(tile_index);
        true
    }

    /// Remove a grid tile from the active list; false if it was not listed
    pub(crate) fn remove_active_tickable(&mut self, tile_index: usize) -> bool {
        let Some(position) = self.active_tickables.iter().position(|&t| t == tile_index) else {
            return false;
        };
        self.active_tickables.remove(position);
        true
    }

    // Returns true only on the clean -> dirty transition
    const fn mark_modified(&mut self, kind: BufferFlags) -> bool {
        let was_clean = self.modified.is_empty();
        self.modified = BufferFlags(self.modified.0 | kind.0);
        was_clean
    }

    fn quad_offset(&self, local: Coordinate) -> Option<usize> {
        let column = usize::try_from(local.x).ok()?;
        let row = usize::try_from(local.y).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some((row * self.columns + column) * VERTICES_PER_TILE)
    }
}

fn write_quad<V: Copy>(buffer: &mut [V], offset: usize, corners: [V; VERTICES_PER_TILE]) {
    if let Some(quad) = buffer.get_mut(offset..offset + VERTICES_PER_TILE) {
        quad.copy_from_slice(&corners);
    }
}
