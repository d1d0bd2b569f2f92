//! Initial grid construction from four fixed edge temperatures.

use crate::error::GridError;
use crate::grid::Grid;

/// Fixed temperatures on the four edges of the domain.
///
/// The interior starts at the arithmetic mean of the four values. Corners
/// take the left/right column values; the stencil never reads them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryConditions {
    /// Row 0.
    pub top: f64,
    /// Last row.
    pub bottom: f64,
    /// Column 0.
    pub left: f64,
    /// Last column.
    pub right: f64,
}

impl BoundaryConditions {
    /// Mean of the four edge temperatures.
    pub fn mean(&self) -> f64 {
        (self.top + self.bottom + self.left + self.right) / 4.0
    }

    /// Build a `rows × cols` grid with these boundaries and a uniform
    /// interior at [`mean()`](Self::mean).
    ///
    /// Returns `Err(GridError::TooSmall)` if the grid has no interior cell.
    pub fn build(&self, rows: usize, cols: usize) -> Result<Grid, GridError> {
        if rows < 3 || cols < 3 {
            return Err(GridError::TooSmall { rows, cols });
        }
        let mut grid = Grid::new(rows, cols)?;
        let mean = self.mean();
        for y in 1..rows - 1 {
            grid.row_mut(y).fill(mean);
        }
        grid.row_mut(0).fill(self.top);
        grid.row_mut(rows - 1).fill(self.bottom);
        for y in 0..rows {
            grid[(y, 0)] = self.left;
            grid[(y, cols - 1)] = self.right;
        }
        Ok(grid)
    }
}

impl Default for BoundaryConditions {
    /// The edge temperatures of the reference heat problem.
    fn default() -> Self {
        Self {
            top: 200.0,
            bottom: 400.0,
            left: 100.0,
            right: 300.0,
        }
    }
}
