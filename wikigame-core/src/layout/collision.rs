// Spatial hash grid for point collision checks.
//
// Nodes are points that must keep a minimum center distance from each other.
// With the cell size equal to that distance, anything closer than the
// minimum lies in the 3x3 block of cells around the query point, so a check
// never scans the whole board.
//
// Points whose cell index is too large to be exact (tiny minimum distance,
// far-off coordinates) are kept in a separate list that every check scans.

use std::collections::HashMap;

use crate::graph::Position;

/// Largest cell index (in magnitude) that still floors to the exact cell.
const MAX_EXACT_CELL: f64 = (1u64 << 40) as f64;

#[derive(Debug, Clone)]
pub struct PointGrid {
    /// Collision threshold; also the cell size when positive.
    min_distance: f64,
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<Position>>,
    far: Vec<Position>,
}

impl PointGrid {
    pub fn new(min_distance: f64) -> Self {
        Self {
            min_distance,
            // Nothing collides at distance 0, any cell size works.
            cell_size: if min_distance > 0.0 { min_distance } else { 1.0 },
            cells: HashMap::new(),
            far: Vec::new(),
        }
    }

    pub fn from_positions<'a>(
        positions: impl IntoIterator<Item = &'a Position>,
        min_distance: f64,
    ) -> Self {
        let mut grid = Self::new(min_distance);
        for p in positions {
            grid.insert(*p);
        }
        grid
    }

    fn cell_of(&self, p: &Position) -> Option<(i64, i64)> {
        let cx = (p.x / self.cell_size).floor();
        let cy = (p.y / self.cell_size).floor();
        if cx.abs() < MAX_EXACT_CELL && cy.abs() < MAX_EXACT_CELL {
            Some((cx as i64, cy as i64))
        } else {
            None
        }
    }

    pub fn insert(&mut self, p: Position) {
        match self.cell_of(&p) {
            Some(cell) => self.cells.entry(cell).or_default().push(p),
            None => self.far.push(p),
        }
    }

    fn near(&self, p: &Position, q: &Position) -> bool {
        p.distance(q) < self.min_distance
    }

    /// True when some stored point is strictly closer than the minimum distance.
    pub fn collides(&self, p: &Position) -> bool {
        if self.far.iter().any(|q| self.near(p, q)) {
            return true;
        }
        let Some((cx, cy)) = self.cell_of(p) else {
            return self.cells.values().flatten().any(|q| self.near(p, q));
        };
        for dx in -1..=1 {
            for dy in -1..=1 {
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                if let Some(points) = self.cells.get(&key) {
                    if points.iter().any(|q| self.near(p, q)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum::<usize>() + self.far.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collides_within_min_distance() {
        let mut grid = PointGrid::new(100.0);
        grid.insert(Position::new(0.0, 0.0));

        assert!(grid.collides(&Position::new(50.0, 50.0)));
        assert!(grid.collides(&Position::new(-99.0, 0.0)));
        assert!(!grid.collides(&Position::new(150.0, 0.0)));
    }

    #[test]
    fn test_exact_min_distance_is_clear() {
        let grid = PointGrid::from_positions(&[Position::new(0.0, 0.0)], 100.0);
        assert!(!grid.collides(&Position::new(100.0, 0.0)));
        assert!(!grid.collides(&Position::new(60.0, 80.0)));
    }

    #[test]
    fn test_neighbor_cells_are_checked() {
        // Points straddling a cell boundary still collide.
        let grid = PointGrid::from_positions(&[Position::new(99.0, 99.0)], 100.0);
        assert!(grid.collides(&Position::new(101.0, 101.0)));
        assert!(grid.collides(&Position::new(-0.5, 99.0)));
    }

    #[test]
    fn test_zero_distance_never_collides() {
        let grid = PointGrid::from_positions(&[Position::new(0.0, 0.0)], 0.0);
        assert!(!grid.collides(&Position::new(0.0, 0.0)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_tiny_distance_is_still_exact() {
        // Cell indices here are around 1e13, past exact flooring.
        let mut grid = PointGrid::new(1e-12);
        grid.insert(Position::new(10.0, 0.0));

        assert!(grid.collides(&Position::new(10.0 + 4e-13, 0.0)));
        assert!(grid.collides(&Position::new(10.0, 4e-13)));
        assert!(!grid.collides(&Position::new(10.0 + 2e-12, 0.0)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_far_points_meet_grid_points() {
        let mut grid = PointGrid::new(1e-12);
        grid.insert(Position::new(0.0, 0.0));
        grid.insert(Position::new(5e-13, 0.0));
        assert!(grid.collides(&Position::new(-5e-13, 0.0)));

        // Far points are checked from any query.
        grid.insert(Position::new(20.0, 0.0));
        assert!(grid.collides(&Position::new(20.0 + 1e-13, 0.0)));
        assert!(!grid.collides(&Position::new(3e-12, 0.0)));
    }
}
