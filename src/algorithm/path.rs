//! One-shot sequence of world positions produced by a path search

use glam::Vec3;

/// Ordered world positions from just past the source tile to the destination
///
/// Consumed front to back: `next` hands out each point once and
/// `reached_end_point` reports exhaustion. A consumed path cannot be
/// restarted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<Vec3>,
    cursor: usize,
}

impl Path {
    /// Create a path from points ordered source to destination
    pub const fn new(points: Vec<Vec3>) -> Self {
        Self { points, cursor: 0 }
    }

    /// Whether every point has been handed out
    pub fn reached_end_point(&self) -> bool {
        self.cursor >= self.points.len()
    }

    /// Total number of points, consumed or not
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points not yet handed out
    pub fn remaining(&self) -> usize {
        self.points.len().saturating_sub(self.cursor)
    }

    /// Every point, consumed or not
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Final point of the path
    pub fn destination(&self) -> Option<Vec3> {
        self.points.last().copied()
    }
}

impl Iterator for Path {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        let point = self.points.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}
