//! Tests for UV and vertex quads

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};
    use tilegrid::spatial::{Rect2D, Rect3D};

    // Corner order is bottom-left, top-left, bottom-right, top-right
    // Verified by swapping top_left and bottom_right in corners()
    #[test]
    fn test_rect2d_corner_order() {
        let rect = Rect2D::from_min_max(Vec2::new(0.25, 0.5), Vec2::new(0.5, 0.75));
        assert_eq!(
            rect.corners(),
            [
                Vec2::new(0.25, 0.5),
                Vec2::new(0.25, 0.75),
                Vec2::new(0.5, 0.5),
                Vec2::new(0.5, 0.75),
            ]
        );
    }

    // Verified by building UNIT from the zero vector
    #[test]
    fn test_rect2d_constants() {
        assert_eq!(Rect2D::ZERO.corners(), [Vec2::ZERO; 4]);
        assert_eq!(Rect2D::UNIT.top_right, Vec2::ONE);
        assert_eq!(Rect2D::default(), Rect2D::ZERO);
        assert_eq!(Rect2D::solid(Vec2::X).corners(), [Vec2::X; 4]);
    }

    // Verified by using the full size instead of half as margin
    #[test]
    fn test_rect3d_centered() {
        let rect = Rect3D::centered(Vec3::new(1.5, 2.5, -3.0), 1.0);
        assert_eq!(rect.bottom_left, Vec3::new(1.0, 2.0, -3.0));
        assert_eq!(rect.top_left, Vec3::new(1.0, 3.0, -3.0));
        assert_eq!(rect.bottom_right, Vec3::new(2.0, 2.0, -3.0));
        assert_eq!(rect.top_right, Vec3::new(2.0, 3.0, -3.0));
    }

    #[test]
    fn test_rect3d_from_corners_round_trip() {
        let rect = Rect3D::centered(Vec3::ZERO, 2.0);
        assert_eq!(Rect3D::from_corners(rect.corners()), rect);
    }
}
