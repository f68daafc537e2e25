//! Initial render buffers for a chunk
//!
//! Every chunk's buffers depend only on its own origin and dimensions, so the
//! one-time build at grid construction runs one independent task per chunk
//! and joins them all before the grid is handed out.

use glam::{Vec2, Vec3, Vec4};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::spatial::chunk::Chunk;
use crate::spatial::rect::{Rect2D, Rect3D};

/// Vertices (and UVs and colors) stored per tile
pub const VERTICES_PER_TILE: usize = 4;

/// Triangle indices stored per tile
pub const INDICES_PER_TILE: usize = 6;

/// Default vertex color
pub const WHITE: Vec4 = Vec4::ONE;

/// The four parallel render buffers of one chunk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    pub(crate) vertices: Vec<Vec3>,
    pub(crate) uvs: Vec<Vec2>,
    pub(crate) colors: Vec<Vec4>,
    pub(crate) indices: Vec<u32>,
}

impl ChunkMesh {
    /// Build the default quad mesh for a `rows x columns` block
    ///
    /// Tile `i` sits at local row `i / columns` and column `i % columns`; its
    /// quad is centered on the tile, textured with the full UV range, and
    /// painted white.
    pub fn generate(origin: Vec3, rows: usize, columns: usize, tile_size: f32) -> Self {
        let tile_count = rows * columns;
        let mut mesh = Self {
            vertices: Vec::with_capacity(tile_count * VERTICES_PER_TILE),
            uvs: Vec::with_capacity(tile_count * VERTICES_PER_TILE),
            colors: Vec::with_capacity(tile_count * VERTICES_PER_TILE),
            indices: Vec::with_capacity(tile_count * INDICES_PER_TILE),
        };

        for cell in 0..tile_count {
            let row = cell / columns.max(1);
            let column = cell % columns.max(1);
            let center = Vec3::new(
                (column as f32).mul_add(tile_size, origin.x) + tile_size / 2.0,
                (row as f32).mul_add(tile_size, origin.y) + tile_size / 2.0,
                origin.z,
            );

            mesh.vertices
                .extend(Rect3D::centered(center, tile_size).corners());
            mesh.uvs.extend(Rect2D::UNIT.corners());
            mesh.colors.extend([WHITE; VERTICES_PER_TILE]);

            let base = (cell * VERTICES_PER_TILE) as u32;
            mesh.indices
                .extend([base, base + 1, base + 2, base + 2, base + 1, base + 3]);
        }

        mesh
    }

    /// Number of tiles the buffers describe
    pub const fn tile_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_TILE
    }

    /// Vertex positions, four per tile
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Texture coordinates, four per tile
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Vertex colors, four per tile
    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// Triangle indices, six per tile
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

/// Generate and install the initial mesh of every chunk
///
/// Runs one task per chunk on the rayon pool when the `parallel` feature is
/// enabled; returns only after every chunk has its buffers.
pub(crate) fn generate_all(chunks: &mut [Chunk]) {
    #[cfg(feature = "parallel")]
    {
        chunks.par_iter_mut().for_each(install_generated);
    }

    #[cfg(not(feature = "parallel"))]
    {
        chunks.iter_mut().for_each(install_generated);
    }
}

fn install_generated(chunk: &mut Chunk) {
    let mesh = ChunkMesh::generate(
        chunk.origin(),
        chunk.rows(),
        chunk.columns(),
        chunk.tile_size(),
    );
    chunk.install_mesh(mesh);
}
