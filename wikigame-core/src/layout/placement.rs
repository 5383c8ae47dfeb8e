// Node placement planner.
//
// Places a batch of new topic nodes around a center point (the parent node,
// or the midpoint of two parents for an intersection).
//
// 1. Cardinal rows: for 0°, 90°, 180°, 270° in order, lay the batch out as a
//    row one radius out from the center, perpendicular to the direction and
//    centered on it. The first direction where the whole row is free wins.
// 2. Spiral fallback: walk rings of growing radius and growing point count,
//    accepting every free point until the batch is placed.
//
// Deterministic: no randomness, the same input always gives the same output.

use std::f64::consts::PI;

use log::{debug, warn};

use super::PlacementConfig;
use super::collision::PointGrid;
use crate::error::PlacementError;
use crate::graph::Position;

/// Unit vectors for 0°, 90°, 180°, 270°, in the order they are tried.
const CARDINAL_DIRECTIONS: [(f64, f64); 4] = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];

/// Plan `count` positions around `center`, each at least `cfg.min_distance`
/// away from every `existing` position and from each other.
pub fn plan_positions(
    center: Position,
    count: usize,
    existing: &[Position],
    cfg: &PlacementConfig,
) -> Result<Vec<Position>, PlacementError> {
    cfg.validate()?;
    if !center.is_finite() {
        return Err(PlacementError::InvalidInput(format!(
            "center ({}, {}) is not finite",
            center.x, center.y
        )));
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let grid = PointGrid::from_positions(existing, cfg.min_distance);

    for (i, &direction) in CARDINAL_DIRECTIONS.iter().enumerate() {
        if let Some(row) = fit_row(center, count, direction, &grid, cfg) {
            debug!(
                "placed {} nodes around ({:.0}, {:.0}) facing {}°",
                count,
                center.x,
                center.y,
                i * 90
            );
            return Ok(row);
        }
    }

    warn!(
        "no cardinal direction fits {} nodes around ({:.0}, {:.0}); using spiral search",
        count, center.x, center.y
    );
    spiral_positions(center, count, grid, cfg)
}

/// Positions of a row of `count` nodes, one radius out along `direction`,
/// spaced one radius apart along the perpendicular.
fn row_positions(center: Position, count: usize, direction: (f64, f64), radius: f64) -> Vec<Position> {
    let (dx, dy) = direction;
    let (px, py) = (-dy, dx);
    let mid = (count as f64 - 1.0) / 2.0;

    (0..count)
        .map(|i| {
            let offset = (i as f64 - mid) * radius;
            Position {
                x: center.x + dx * radius + px * offset,
                y: center.y + dy * radius + py * offset,
            }
        })
        .collect()
}

/// The row for `direction` if every node in it is collision-free, else None.
fn fit_row(
    center: Position,
    count: usize,
    direction: (f64, f64),
    grid: &PointGrid,
    cfg: &PlacementConfig,
) -> Option<Vec<Position>> {
    let row = row_positions(center, count, direction, cfg.base_radius());

    for (i, p) in row.iter().enumerate() {
        if grid.collides(p) {
            return None;
        }
        // Spacing equals the radius, so this only trips when radius_factor < 1.
        if row[..i].iter().any(|q| p.distance(q) < cfg.min_distance) {
            return None;
        }
    }
    Some(row)
}

fn spiral_positions(
    center: Position,
    count: usize,
    mut grid: PointGrid,
    cfg: &PlacementConfig,
) -> Result<Vec<Position>, PlacementError> {
    let base_radius = cfg.base_radius();
    let mut positions: Vec<Position> = Vec::with_capacity(count);
    let mut radius_multiplier = 1.0;
    let mut attempts = cfg.initial_ring_attempts;

    for _ in 0..cfg.max_spiral_rings {
        let radius = base_radius * radius_multiplier;
        let step = 2.0 * PI / attempts as f64;

        for i in 0..attempts {
            let angle = i as f64 * step;
            let p = Position {
                x: center.x + angle.cos() * radius,
                y: center.y + angle.sin() * radius,
            };
            if grid.collides(&p) {
                continue;
            }
            grid.insert(p);
            positions.push(p);
            if positions.len() == count {
                return Ok(positions);
            }
        }

        radius_multiplier += cfg.ring_radius_step;
        attempts += cfg.ring_attempts_step;
    }

    warn!(
        "spiral search placed {} of {} nodes in {} rings",
        positions.len(),
        count,
        cfg.max_spiral_rings
    );
    Err(PlacementError::Exhausted {
        placed: positions.len(),
        requested: count,
        rings: cfg.max_spiral_rings,
    })
}
