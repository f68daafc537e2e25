//! Tests for grid validation, lookup, traversal, and chunk bookkeeping

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use tilegrid::GridError;
    use tilegrid::math::geometry::{Coordinate, Direction};
    use tilegrid::spatial::{BufferFlags, Grid, GridConfig, MeshRecorder, Tickable};

    #[derive(Debug, Default)]
    struct Counter {
        ticks: u64,
        last: u64,
    }

    impl Tickable for Counter {
        fn tick(&mut self, ticks: u64) {
            self.ticks += 1;
            self.last = ticks;
        }
    }

    fn coordinate_grid(config: GridConfig) -> Grid<Coordinate> {
        Grid::new(config, |_, c| c).expect("Failed to create grid")
    }

    // Zero dimensions and bad tile sizes are rejected before allocation
    // Verified by removing the zero-dimension loop
    #[test]
    fn test_invalid_configurations_rejected() {
        let invalid = [
            GridConfig::new(0, 1, 4, 4, 1.0),
            GridConfig::new(1, 1, 4, 0, 1.0),
            GridConfig::new(1, 1, 4, 4, 0.0),
            GridConfig::new(1, 1, 4, 4, -1.0),
            GridConfig::new(1, 1, 4, 4, f32::NAN),
            GridConfig::new(1, 1, 4, 4, 1.0).with_origin(Vec3::new(f32::INFINITY, 0.0, 0.0)),
            GridConfig::new(5000, 5000, 16, 16, 1.0),
        ];
        for config in invalid {
            let result = Grid::new(config, |_, _| ());
            assert!(
                matches!(result, Err(GridError::InvalidParameter { .. })),
                "{config:?}"
            );
        }
    }

    // Verified by rounding the chunk count down
    #[test]
    fn test_covering_rounds_up() {
        let config = GridConfig::covering(10, 7, 4, 1.0);
        assert_eq!(config.chunk_columns, 3);
        assert_eq!(config.chunk_rows, 2);
        let layout = config.validate().expect("Failed to validate");
        assert_eq!(layout.columns(), 12);
        assert_eq!(layout.rows(), 8);
        assert_eq!(layout.chunk_count(), 6);
    }

    // Every tile's coordinate matches the coordinate it was created at
    // Verified by swapping local row and column during tile creation
    #[test]
    fn test_tiles_created_at_their_coordinates() {
        let grid = coordinate_grid(GridConfig::new(3, 2, 2, 3, 1.0));
        assert_eq!(grid.columns(), 6);
        assert_eq!(grid.rows(), 6);
        grid.for_each_tile(|tile| assert_eq!(*tile.payload(), tile.coordinate()));
    }

    // Tiles are grouped into chunks by block, not by row
    // Verified by computing the chunk index from the flat tile index
    #[test]
    fn test_chunk_membership() {
        let grid = coordinate_grid(GridConfig::new(2, 2, 3, 2, 1.0));
        let expectations = [
            ((0, 0), 0, (0, 0)),
            ((4, 1), 1, (1, 1)),
            ((2, 3), 2, (2, 1)),
            ((5, 2), 3, (2, 0)),
        ];
        for ((x, y), chunk, (lx, ly)) in expectations {
            let tile = grid.tile_at(Coordinate::new(x, y)).expect("Tile missing");
            assert_eq!(tile.chunk_index(), chunk);
            assert_eq!(tile.local_coordinate(), Coordinate::new(lx, ly));
        }
    }

    // Out-of-range coordinates are absent, never clamped
    // Verified by clamping coordinates into the grid
    #[test]
    fn test_tile_at_out_of_range() {
        let grid = coordinate_grid(GridConfig::new(1, 1, 4, 4, 1.0));
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MAX, i32::MIN)] {
            assert!(grid.tile_at(Coordinate::new(x, y)).is_none());
        }
        assert!(grid.tile_at(Coordinate::new(3, 3)).is_some());
    }

    // World positions resolve by floor within [origin, origin + extent)
    // Verified by using round instead of floor
    #[test]
    fn test_tile_at_position() {
        let config = GridConfig::new(2, 1, 2, 2, 0.5).with_origin(Vec3::new(-1.0, 2.0, 3.0));
        let grid = coordinate_grid(config);

        let hit = grid.tile_at_position(Vec3::new(-0.26, 2.74, 99.0));
        assert_eq!(hit.map(|t| t.coordinate()), Some(Coordinate::new(1, 1)));
        let origin = grid.tile_at_position(Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(origin.map(|t| t.coordinate()), Some(Coordinate::new(0, 0)));

        assert!(grid.tile_at_position(Vec3::new(1.0, 2.0, 0.0)).is_none());
        assert!(grid.tile_at_position(Vec3::new(0.0, 3.0, 0.0)).is_none());
        assert!(grid.tile_at_position(Vec3::new(-1.01, 2.5, 0.0)).is_none());
        assert!(grid.tile_at_position(Vec3::new(f32::NAN, 2.5, 0.0)).is_none());
    }

    // Verified by ignoring the grid origin when placing tile centers
    #[test]
    fn test_tile_positions_include_origin() {
        let config = GridConfig::new(1, 1, 2, 2, 2.0).with_origin(Vec3::new(10.0, -4.0, 1.5));
        let grid = coordinate_grid(config);
        let tile = grid.tile_at(Coordinate::new(1, 0)).expect("Tile missing");
        assert_eq!(tile.position(), Vec3::new(13.0, -3.0, 1.5));
    }

    #[test]
    fn test_chunk_at_position() {
        let grid = coordinate_grid(GridConfig::new(2, 2, 4, 4, 1.0));
        let chunk = grid.chunk_at_position(Vec3::new(5.5, 6.5, 0.0));
        assert_eq!(chunk.map(|c| c.index()), Some(3));
        assert_eq!(chunk.map(|c| c.origin()), Some(Vec3::new(4.0, 4.0, 0.0)));
        assert!(grid.chunk_at_position(Vec3::new(8.0, 0.0, 0.0)).is_none());
    }

    // Neighbor links are symmetric across the whole grid
    // Verified by offsetting North neighbors by two rows
    #[test]
    fn test_neighbor_symmetry() {
        let grid = coordinate_grid(GridConfig::new(2, 3, 3, 2, 1.0));
        grid.for_each_tile(|tile| {
            for direction in Direction::ALL {
                if let Some(neighbor) = grid.neighbor(tile, direction) {
                    assert_eq!(neighbor.coordinate(), tile.coordinate().offset(direction));
                    let back = grid.neighbor(neighbor, direction.opposite());
                    assert_eq!(back.map(|t| t.coordinate()), Some(tile.coordinate()));
                } else {
                    assert!(grid.tile_at(tile.coordinate().offset(direction)).is_none());
                }
            }
        });
    }

    // Verified by including diagonals in cardinal_neighbors
    #[test]
    fn test_neighbor_iterators() {
        let grid = coordinate_grid(GridConfig::new(1, 1, 3, 3, 1.0));
        let center = grid.tile_at(Coordinate::new(1, 1)).expect("Tile missing");
        assert_eq!(grid.neighbors(center).count(), 8);
        assert_eq!(grid.cardinal_neighbors(center).count(), 4);

        let corner = grid.tile_at(Coordinate::new(2, 2)).expect("Tile missing");
        assert_eq!(grid.neighbors(corner).count(), 3);
        assert_eq!(grid.cardinal_neighbors(corner).count(), 2);

        let mut seen = 0;
        grid.for_each_neighbor(Coordinate::new(0, 1), |_| seen += 1);
        assert_eq!(seen, 5);

        assert!(grid.any_neighbor(Coordinate::new(1, 1), |t| t.coordinate() == Coordinate::new(2, 2)));
        assert!(!grid.any_neighbor(Coordinate::new(0, 0), |t| t.coordinate() == Coordinate::new(2, 2)));
        assert!(!grid.any_neighbor(Coordinate::new(9, 9), |_| true));
    }

    // Traversal is row-major across chunk boundaries
    // Verified by iterating tiles chunk by chunk
    #[test]
    fn test_traversal_is_row_major() {
        let grid = coordinate_grid(GridConfig::new(2, 1, 2, 2, 1.0));
        let mut order = Vec::new();
        grid.for_each_coordinate(|c| order.push((c.x, c.y)));
        assert_eq!(
            order,
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1), (3, 1)]
        );
    }

    #[test]
    fn test_for_each_tile_mut() {
        let config = GridConfig::new(1, 1, 3, 2, 1.0);
        let mut grid = Grid::new(config, |_, _| 0_u32).expect("Failed to create grid");
        grid.for_each_tile_mut(|tile| {
            let index = tile.index() as u32;
            *tile.payload_mut() = index;
        });
        let sum: u32 = grid.iter().map(|t| *t.payload()).sum();
        assert_eq!(sum, 15);
    }

    // The first update uploads every buffer of every chunk
    // Verified by starting with an empty pending queue
    #[test]
    fn test_initial_update_uploads_everything() {
        let mut grid = coordinate_grid(GridConfig::new(3, 2, 2, 2, 1.0));
        assert_eq!(grid.pending_updates().len(), 6);

        let mut recorder = MeshRecorder::new();
        assert_eq!(grid.update(&mut recorder), 6);
        assert_eq!(recorder.chunks(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(recorder.count(BufferFlags::VERTICES), 6);
        assert_eq!(recorder.count(BufferFlags::INDICES), 6);
        assert_eq!(grid.update(&mut recorder), 0);
    }

    // Out-of-range tile writes are ignored and enqueue nothing
    // Verified by removing the coordinate check before the chunk write
    #[test]
    fn test_out_of_range_tile_write() {
        let mut grid = coordinate_grid(GridConfig::new(1, 1, 2, 2, 1.0));
        grid.update(&mut MeshRecorder::new());
        assert!(!grid.set_tile_color(Coordinate::new(2, 0), Vec3::ONE.extend(1.0)));
        assert!(grid.pending_updates().is_empty());
    }

    // Chunk sets reject unknown indices and toggle membership
    // Verified by inserting without checking the chunk count
    #[test]
    fn test_chunk_active_and_visible_sets() {
        let mut grid = coordinate_grid(GridConfig::new(2, 1, 2, 2, 1.0));
        assert!(grid.mark_chunk_visible(1));
        assert!(!grid.mark_chunk_visible(1));
        assert!(!grid.mark_chunk_visible(2));
        assert!(grid.toggle_chunk_visible(0));
        assert_eq!(grid.visible_chunks().collect::<Vec<_>>(), vec![0, 1]);
        assert!(grid.toggle_chunk_visible(1));
        assert_eq!(grid.visible_chunks().collect::<Vec<_>>(), vec![0]);
        assert!(grid.mark_chunk_invisible(0));

        assert!(grid.mark_chunk_active(0));
        assert!(grid.toggle_chunk_active(0));
        assert_eq!(grid.active_chunks().count(), 0);
    }

    // Tile activation keeps the flag, the chunk list, and the active set in agreement
    // Verified by leaving the chunk active after its last tile is removed
    #[test]
    fn test_tile_activation_bookkeeping() {
        let config = GridConfig::new(2, 1, 2, 2, 1.0);
        let mut grid = Grid::new(config, |_, _| Counter::default()).expect("Failed to create grid");
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(1, 1);

        assert!(grid.mark_tile_active(a));
        assert!(grid.mark_tile_active(b));
        assert!(!grid.mark_tile_active(a));
        assert!(grid.tile_at(a).is_some_and(|t| t.is_active_tickable()));
        assert_eq!(grid.chunk(0).map(|c| c.active_tickables().len()), Some(2));
        assert_eq!(grid.active_chunks().collect::<Vec<_>>(), vec![0]);

        assert!(grid.mark_tile_inactive(a));
        assert!(!grid.mark_tile_inactive(a));
        assert_eq!(grid.active_chunks().collect::<Vec<_>>(), vec![0]);
        assert!(grid.mark_tile_inactive(b));
        assert_eq!(grid.active_chunks().count(), 0);
        assert!(!grid.mark_tile_active(Coordinate::new(5, 0)));
    }

    // Only active tiles of active chunks are ticked
    // Verified by ticking every tile of every chunk
    #[test]
    fn test_tick_reaches_active_tiles_only() {
        let config = GridConfig::new(2, 1, 2, 2, 1.0);
        let mut grid = Grid::new(config, |_, _| Counter::default()).expect("Failed to create grid");
        let active = Coordinate::new(3, 1);
        grid.mark_tile_active(active);

        grid.tick(7);
        grid.tick(8);
        let counter = grid.tile_at(active).map(|t| (t.payload().ticks, t.payload().last));
        assert_eq!(counter, Some((2, 8)));
        assert_eq!(grid.tile_at(Coordinate::new(2, 1)).map(|t| t.payload().ticks), Some(0));

        assert!(grid.mark_tile_inactive(active));
        grid.tick(9);
        assert_eq!(grid.tile_at(active).map(|t| t.payload().ticks), Some(2));
    }

    // A chunk holding active tiles stays in the active set
    // Verified by removing the chunk without checking its active tiles
    #[test]
    fn test_chunk_with_active_tiles_stays_active() {
        let config = GridConfig::new(2, 1, 2, 2, 1.0);
        let mut grid = Grid::new(config, |_, _| Counter::default()).expect("Failed to create grid");
        let active = Coordinate::new(3, 1);
        assert!(grid.mark_tile_active(active));

        assert!(!grid.mark_chunk_inactive(1));
        assert!(!grid.toggle_chunk_active(1));
        assert_eq!(grid.active_chunks().collect::<Vec<_>>(), vec![1]);
        grid.tick(4);
        assert_eq!(grid.tile_at(active).map(|t| t.payload().ticks), Some(1));

        assert!(grid.mark_tile_inactive(active));
        assert_eq!(grid.active_chunks().count(), 0);
        assert!(!grid.mark_chunk_inactive(1));
    }
}
