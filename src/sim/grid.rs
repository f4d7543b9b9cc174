//! Static obstacle grid
//!
//! Row-major terrain. Rows may have different lengths; any cell past the end
//! of a short row is open space. The level edges follow a fixed policy:
//! falling out through the bottom is lethal (lava), every other edge is a
//! solid wall.

use serde::{Deserialize, Serialize};

use super::vector::Vector;
use crate::error::{SimError, SimResult};

/// Terrain classification of a blocked cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Obstacle {
    Wall,
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

/// One grid cell: `None` is open space
pub type Cell = Option<Obstacle>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row (0 for an empty grid)
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at column `x`, row `y`; anything outside the stored rows is open
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Resolve what blocks a rectangle at `position` with extent `size`.
    ///
    /// Pure query, first match wins:
    /// 1. bottom edge below the grid → lava
    /// 2. left/top edge negative or right edge past the width → wall
    /// 3. first blocked cell the rectangle overlaps, scanned row by row
    pub fn obstacle_at(&self, position: Vector, size: Vector) -> SimResult<Cell> {
        validate_rect(position, size)?;

        let left = position.x;
        let top = position.y;
        let right = left + size.x;
        let bottom = top + size.y;

        if bottom > self.height() as f64 {
            return Ok(Some(Obstacle::Lava));
        }
        if left < 0.0 || top < 0.0 || right > self.width() as f64 {
            return Ok(Some(Obstacle::Wall));
        }

        // Bounds checks above keep every index in [0, width] x [0, height]
        let (x_start, x_end) = (left.floor() as usize, right.ceil() as usize);
        let (y_start, y_end) = (top.floor() as usize, bottom.ceil() as usize);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if let Some(obstacle) = self.cell(x, y) {
                    return Ok(Some(obstacle));
                }
            }
        }

        Ok(None)
    }
}

/// A query rectangle needs finite coordinates and a non-negative extent.
/// Either argument being bad is enough to reject the query.
fn validate_rect(position: Vector, size: Vector) -> SimResult<()> {
    if !position.is_finite() {
        return Err(SimError::InvalidArgument(format!(
            "position ({}, {}) is not finite",
            position.x, position.y
        )));
    }
    if !size.is_finite() || size.x < 0.0 || size.y < 0.0 {
        return Err(SimError::InvalidArgument(format!(
            "size ({}, {}) must be finite and non-negative",
            size.x, size.y
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: Cell = Some(Obstacle::Wall);
    const L: Cell = Some(Obstacle::Lava);

    fn grid() -> Grid {
        // 3 rows, middle row shorter than the others
        Grid::new(vec![
            vec![None, None, None, None],
            vec![None, W],
            vec![None, None, L, None],
        ])
    }

    #[test]
    fn test_dimensions() {
        let g = grid();
        assert_eq!(g.height(), 3);
        assert_eq!(g.width(), 4);
        assert_eq!(Grid::default().width(), 0);
        assert_eq!(Grid::default().height(), 0);
    }

    #[test]
    fn test_cell_past_short_row_is_open() {
        let g = grid();
        assert_eq!(g.cell(1, 1), W);
        assert_eq!(g.cell(3, 1), None);
        assert_eq!(g.cell(0, 10), None);
    }

    #[test]
    fn test_out_of_bounds_left_is_wall() {
        let g = grid();
        let unit = Vector::ONE;
        assert_eq!(g.obstacle_at(Vector::new(-1.0, 0.0), unit).unwrap(), W);
        assert_eq!(g.obstacle_at(Vector::new(0.0, -0.5), unit).unwrap(), W);
        assert_eq!(g.obstacle_at(Vector::new(3.5, 0.0), unit).unwrap(), W);
    }

    #[test]
    fn test_falling_off_bottom_is_lava() {
        let g = grid();
        assert_eq!(g.obstacle_at(Vector::new(0.0, 3.0), Vector::ONE).unwrap(), L);
        // Bottom check wins over the side check
        assert_eq!(g.obstacle_at(Vector::new(-5.0, 2.5), Vector::ONE).unwrap(), L);
    }

    #[test]
    fn test_open_cell_is_unobstructed() {
        let g = grid();
        assert_eq!(g.obstacle_at(Vector::new(0.0, 0.0), Vector::ONE).unwrap(), None);
        // Over the missing tail of the short row
        assert_eq!(g.obstacle_at(Vector::new(2.0, 1.0), Vector::ONE).unwrap(), None);
    }

    #[test]
    fn test_partial_overlap_hits_cell() {
        let g = grid();
        // Straddles (0,0)-(1,1); reaches into the wall at column 1, row 1
        let hit = g.obstacle_at(Vector::new(0.5, 0.5), Vector::ONE).unwrap();
        assert_eq!(hit, W);
        // Touching the wall cell's edge exactly is not an overlap
        let touch = g.obstacle_at(Vector::new(0.0, 1.0), Vector::ONE).unwrap();
        assert_eq!(touch, None);
    }

    #[test]
    fn test_row_major_scan_order() {
        // Wall in row 0, lava in row 1, rectangle covers both
        let g = Grid::new(vec![vec![None, W], vec![L, None], vec![None, None]]);
        let hit = g.obstacle_at(Vector::new(0.0, 0.0), Vector::new(2.0, 2.0)).unwrap();
        assert_eq!(hit, W);
    }

    #[test]
    fn test_invalid_rect_rejected() {
        let g = grid();
        let bad_pos = g.obstacle_at(Vector::new(f64::NAN, 0.0), Vector::ONE);
        assert!(matches!(bad_pos, Err(SimError::InvalidArgument(_))));
        let bad_size = g.obstacle_at(Vector::ZERO, Vector::new(-1.0, 1.0));
        assert!(matches!(bad_size, Err(SimError::InvalidArgument(_))));
        let bad_size = g.obstacle_at(Vector::ZERO, Vector::new(1.0, f64::INFINITY));
        assert!(bad_size.is_err());
    }
}
