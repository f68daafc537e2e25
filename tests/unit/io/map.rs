//! Tests for cost map decoding, generation, and grid construction

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};
    use ndarray::{Array2, array};
    use tilegrid::GridError;
    use tilegrid::io::configuration::WALL_LUMA_THRESHOLD;
    use tilegrid::io::map::{
        CostMap, cost_from_luma, generate_cost_map, load_cost_map, luma_from_cost, save_cost_map,
    };
    use tilegrid::math::cost::{MAX_MOVEMENT_COST, MovementCost};
    use tilegrid::math::geometry::Coordinate;

    // Dark pixels are walls and white is the cheapest walkable tile
    // Verified by treating the threshold itself as walkable
    #[test]
    fn test_cost_from_luma() {
        assert_eq!(cost_from_luma(0), MAX_MOVEMENT_COST);
        assert_eq!(cost_from_luma(WALL_LUMA_THRESHOLD), MAX_MOVEMENT_COST);
        assert_eq!(cost_from_luma(WALL_LUMA_THRESHOLD + 1), 9);
        assert_eq!(cost_from_luma(u8::MAX), 1);
        assert!(cost_from_luma(128) > cost_from_luma(200));
    }

    // Every walkable cost survives encoding as a pixel
    // Verified by spanning the full range down to the wall threshold
    #[test]
    fn test_luma_preserves_walkable_costs() {
        for cost in 1..MAX_MOVEMENT_COST {
            let luma = luma_from_cost(cost);
            assert!(luma > WALL_LUMA_THRESHOLD, "cost {cost} encoded as a wall");
            assert_eq!(cost_from_luma(luma), cost);
        }
        assert_eq!(luma_from_cost(MAX_MOVEMENT_COST), 0);
    }

    #[test]
    fn test_cost_map_new() {
        assert!(matches!(
            CostMap::new(Array2::zeros((0, 3))),
            Err(GridError::InvalidMapData { .. })
        ));

        let map = CostMap::new(array![[1, 40], [3, 4]]).expect("Valid map");
        assert_eq!(map.columns(), 2);
        assert_eq!(map.rows(), 2);
        assert_eq!(map.cost_at(Coordinate::new(1, 0)), Some(MAX_MOVEMENT_COST));
        assert_eq!(map.cost_at(Coordinate::new(0, 1)), Some(3));
        assert_eq!(map.cost_at(Coordinate::new(-1, 0)), None);
        assert_eq!(map.cost_at(Coordinate::new(2, 0)), None);
    }

    // Chunk padding beyond the map is impassable
    // Verified by filling padding with cost 1
    #[test]
    fn test_build_grid_pads_with_walls() {
        let map = CostMap::new(array![[1, 2, 3], [4, 5, 6]]).expect("Valid map");
        let grid = map.build_grid(2).expect("Failed to build grid");

        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.chunks().len(), 2);
        let cost = |x, y| grid.tile_at(Coordinate::new(x, y)).map(|t| t.payload().movement_cost());
        assert_eq!(cost(2, 0), Some(3));
        assert_eq!(cost(0, 1), Some(4));
        assert_eq!(cost(3, 0), Some(MAX_MOVEMENT_COST));

        assert!(map.build_grid(0).is_err());
    }

    // The top image row becomes the last grid row
    // Verified by loading rows without flipping
    #[test]
    fn test_load_flips_rows() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("map.png");
        let mut img = GrayImage::from_pixel(2, 3, Luma([255]));
        img.put_pixel(0, 0, Luma([0]));
        img.save(&path).expect("Failed to save image");

        let map = load_cost_map(&path).expect("Failed to load map");
        assert_eq!(map.rows(), 3);
        assert_eq!(map.cost_at(Coordinate::new(0, 2)), Some(MAX_MOVEMENT_COST));
        assert_eq!(map.cost_at(Coordinate::new(0, 0)), Some(1));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("maps").join("saved.png");
        let map = CostMap::new(array![[1, 9, MAX_MOVEMENT_COST], [2, 3, 4]]).expect("Valid map");

        save_cost_map(&map, &path).expect("Failed to save map");
        assert_eq!(load_cost_map(&path).expect("Failed to load map"), map);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = load_cost_map(&temp_dir.path().join("absent.png"));
        assert!(matches!(result, Err(GridError::ImageLoad { .. })));
    }

    // Same seed gives the same map, with walkable corners
    // Verified by seeding from entropy
    #[test]
    fn test_generate_is_reproducible() {
        let first = generate_cost_map(12, 0.3, 5).expect("Generation failed");
        let second = generate_cost_map(12, 0.3, 5).expect("Generation failed");
        assert_eq!(first, second);

        assert_eq!(first.cost_at(Coordinate::new(0, 0)), Some(1));
        assert_eq!(first.cost_at(Coordinate::new(11, 11)), Some(1));
        assert!(
            first
                .costs()
                .iter()
                .all(|&cost| cost == MAX_MOVEMENT_COST || (1..=4).contains(&cost))
        );
    }

    // Verified by ignoring the density for the corner tiles
    #[test]
    fn test_generate_density_extremes() {
        let open = generate_cost_map(6, 0.0, 1).expect("Generation failed");
        assert!(open.costs().iter().all(|&cost| cost < MAX_MOVEMENT_COST));

        let closed = generate_cost_map(6, 1.0, 1).expect("Generation failed");
        let walls = closed
            .costs()
            .iter()
            .filter(|&&cost| cost == MAX_MOVEMENT_COST)
            .count();
        assert_eq!(walls, 34);
    }

    #[test]
    fn test_generate_rejects_invalid_parameters() {
        assert!(generate_cost_map(0, 0.5, 1).is_err());
        assert!(generate_cost_map(4, 1.5, 1).is_err());
        assert!(generate_cost_map(4, -0.1, 1).is_err());
    }
}
