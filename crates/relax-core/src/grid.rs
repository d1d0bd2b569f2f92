//! Dense row-major grid of `f64` temperatures.
//!
//! A [`Grid`] separates its *logical* shape (`rows × cols`, the domain the
//! caller cares about) from its *row capacity* (how many rows the buffer
//! actually holds). Distributed solves over-allocate rows so that every
//! rank's block has the same stride, which lets the final gather move
//! equal-sized blocks. The extra rows sit after the logical ones and are
//! never part of the result.
//!
//! # Buffer layout
//!
//! ```text
//! row 0                 top boundary
//! rows 1 .. rows-1      interior (split across ranks)
//! row rows-1            bottom boundary
//! rows .. capacity      padding (zero, only present in padded buffers)
//! ```

use std::ops::{Index, IndexMut};

use crate::error::GridError;

/// Fixed-size 2-D buffer with row-major storage.
///
/// The shape is fixed at construction; nothing resizes it afterwards.
/// `Clone` performs a deep copy and is how solvers create a second
/// buffer for double-buffered relaxation.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    capacity_rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Allocate a zeroed buffer, reporting failure instead of aborting.
fn allocate(rows: usize, cols: usize) -> Result<Vec<f64>, GridError> {
    let len = rows
        .checked_mul(cols)
        .ok_or(GridError::AllocationFailed { rows, cols })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| GridError::AllocationFailed { rows, cols })?;
    data.resize(len, 0.0);
    Ok(data)
}

impl Grid {
    /// Create a zero-filled grid of exactly `rows × cols`.
    ///
    /// Returns `Err(GridError::Empty)` for a zero dimension and
    /// `Err(GridError::AllocationFailed)` if the buffer cannot be allocated.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::with_capacity(rows, cols, rows)
    }

    /// Create a zero-filled grid of `rows × cols` backed by
    /// `capacity_rows` rows of storage.
    pub fn with_capacity(rows: usize, cols: usize, capacity_rows: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if capacity_rows < rows {
            return Err(GridError::CapacityTooSmall {
                rows,
                capacity: capacity_rows,
            });
        }
        Ok(Self {
            rows,
            capacity_rows,
            cols,
            data: allocate(capacity_rows, cols)?,
        })
    }

    /// Build a grid from row-major values with no padding.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        let expected = rows * cols;
        if data.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows,
            capacity_rows: rows,
            cols,
            data,
        })
    }

    /// Deep copy of this grid's logical rows into a buffer with
    /// `capacity_rows` rows of storage. Padding rows are zero.
    pub fn padded(&self, capacity_rows: usize) -> Result<Self, GridError> {
        let mut out = Self::with_capacity(self.rows, self.cols, capacity_rows)?;
        let logical = self.rows * self.cols;
        out.data[..logical].copy_from_slice(&self.data[..logical]);
        Ok(out)
    }

    /// Deep copy of the logical rows only, dropping any padding.
    pub fn truncated(&self) -> Result<Self, GridError> {
        self.padded(self.rows)
    }

    /// Logical row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Allocated row capacity (`>= rows()`).
    pub fn capacity_rows(&self) -> usize {
        self.capacity_rows
    }

    /// Whether storage extends past the logical rows.
    pub fn is_padded(&self) -> bool {
        self.capacity_rows > self.rows
    }

    /// Value at `(row, col)`, or `None` if outside the allocated capacity.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.capacity_rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Row `y` as a slice of `cols()` values.
    ///
    /// # Panics
    ///
    /// Panics if `y >= capacity_rows()`.
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Row `y` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= capacity_rows()`.
    pub fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Rows `y - 1` and `y + 1` shared, row `y` mutable, for in-place
    /// stencils.
    ///
    /// # Panics
    ///
    /// Panics if `y == 0` or `y + 1 >= capacity_rows()`.
    pub fn stencil_rows_mut(&mut self, y: usize) -> (&[f64], &mut [f64], &[f64]) {
        assert!(y > 0, "row 0 has no row above it");
        let cols = self.cols;
        let window = &mut self.data[(y - 1) * cols..(y + 2) * cols];
        let (up, rest) = window.split_at_mut(cols);
        let (mid, down) = rest.split_at_mut(cols);
        (up, mid, down)
    }

    /// `count` consecutive rows starting at `start`, as one contiguous slice.
    pub fn block(&self, start: usize, count: usize) -> Result<&[f64], GridError> {
        let end = self.check_rows(start, count)?;
        Ok(&self.data[start * self.cols..end * self.cols])
    }

    /// Overwrite row `y` with `values`, which must be exactly one row.
    pub fn copy_row_from(&mut self, y: usize, values: &[f64]) -> Result<(), GridError> {
        if values.len() != self.cols {
            return Err(GridError::LengthMismatch {
                expected: self.cols,
                actual: values.len(),
            });
        }
        self.write_block(y, values)
    }

    /// Overwrite consecutive rows starting at `start` with `values`,
    /// whose length must be a whole number of rows.
    pub fn write_block(&mut self, start: usize, values: &[f64]) -> Result<(), GridError> {
        if values.len() % self.cols != 0 {
            return Err(GridError::LengthMismatch {
                expected: values.len().div_ceil(self.cols) * self.cols,
                actual: values.len(),
            });
        }
        let end = self.check_rows(start, values.len() / self.cols)?;
        self.data[start * self.cols..end * self.cols].copy_from_slice(values);
        Ok(())
    }

    /// The logical rows as one row-major slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data[..self.rows * self.cols]
    }

    /// Iterate over the logical rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.as_slice().chunks_exact(self.cols)
    }

    /// Largest absolute difference between the logical cells of two grids
    /// of the same logical shape, or `None` if the shapes differ.
    pub fn max_abs_diff(&self, other: &Grid) -> Option<f64> {
        if self.rows != other.rows || self.cols != other.cols {
            return None;
        }
        Some(
            self.as_slice()
                .iter()
                .zip(other.as_slice())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    fn check_rows(&self, start: usize, count: usize) -> Result<usize, GridError> {
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.capacity_rows)
            .ok_or(GridError::RowOutOfBounds {
                row: start.saturating_add(count).saturating_sub(1),
                capacity: self.capacity_rows,
            })?;
        Ok(end)
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(col < self.cols, "column {col} out of bounds for {} columns", self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(col < self.cols, "column {col} out of bounds for {} columns", self.cols);
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed_and_unpadded() {
        let g = Grid::new(4, 5).unwrap();
        assert_eq!(g.rows(), 4);
        assert_eq!(g.cols(), 5);
        assert_eq!(g.capacity_rows(), 4);
        assert!(!g.is_padded());
        assert!(g.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(Grid::new(0, 3), Err(GridError::Empty));
        assert_eq!(Grid::new(3, 0), Err(GridError::Empty));
    }

    #[test]
    fn capacity_below_rows_rejected() {
        assert_eq!(
            Grid::with_capacity(5, 3, 4),
            Err(GridError::CapacityTooSmall {
                rows: 5,
                capacity: 4
            })
        );
    }

    #[test]
    fn huge_allocation_fails_cleanly() {
        let err = Grid::new(usize::MAX / 2, 4).unwrap_err();
        assert!(matches!(err, GridError::AllocationFailed { .. }));
    }

    #[test]
    fn index_is_row_major() {
        let mut g = Grid::new(3, 4).unwrap();
        g[(1, 2)] = 7.5;
        assert_eq!(g.as_slice()[4 + 2], 7.5);
        assert_eq!(g.row(1), &[0.0, 0.0, 7.5, 0.0]);
        assert_eq!(g.get(1, 2), Some(7.5));
        assert_eq!(g.get(3, 0), None);
        assert_eq!(g.get(0, 4), None);
    }

    #[test]
    #[should_panic(expected = "column 4 out of bounds")]
    fn column_overflow_does_not_alias_next_row() {
        let g = Grid::new(3, 4).unwrap();
        let _ = g[(0, 4)];
    }

    #[test]
    fn padded_copy_keeps_logical_rows_and_zero_pads() {
        let g = Grid::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let p = g.padded(5).unwrap();
        assert_eq!(p.rows(), 3);
        assert_eq!(p.capacity_rows(), 5);
        assert!(p.is_padded());
        assert_eq!(p.as_slice(), g.as_slice());
        assert_eq!(p.row(3), &[0.0, 0.0]);
        assert_eq!(p.row(4), &[0.0, 0.0]);
        assert_eq!(p.truncated().unwrap(), g);
    }

    #[test]
    fn clone_is_deep() {
        let mut a = Grid::new(3, 3).unwrap();
        let b = a.clone();
        a[(1, 1)] = 1.0;
        assert_eq!(b[(1, 1)], 0.0);
    }

    #[test]
    fn block_and_write_block_round_rows() {
        let mut g = Grid::new(4, 2).unwrap();
        g.write_block(1, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(g.block(1, 2).unwrap(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(g.row(0), &[0.0, 0.0]);
        assert_eq!(g.row(3), &[0.0, 0.0]);
    }

    #[test]
    fn write_block_rejects_partial_rows_and_overflow() {
        let mut g = Grid::new(3, 2).unwrap();
        assert!(matches!(
            g.write_block(0, &[1.0, 2.0, 3.0]),
            Err(GridError::LengthMismatch { .. })
        ));
        assert_eq!(
            g.copy_row_from(0, &[1.0, 2.0, 3.0, 4.0]),
            Err(GridError::LengthMismatch {
                expected: 2,
                actual: 4
            })
        );
        assert!(matches!(
            g.copy_row_from(3, &[1.0, 2.0]),
            Err(GridError::RowOutOfBounds { .. })
        ));
        assert!(g.block(2, 2).is_err());
    }

    #[test]
    fn stencil_rows_split_around_centre() {
        let mut g = Grid::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let (up, mid, down) = g.stencil_rows_mut(1);
        assert_eq!(up, &[1.0, 2.0]);
        assert_eq!(down, &[5.0, 6.0]);
        mid[0] = 9.0;
        assert_eq!(g.row(1), &[9.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "row 0")]
    fn stencil_rows_reject_top_row() {
        let mut g = Grid::new(3, 3).unwrap();
        let _ = g.stencil_rows_mut(0);
    }

    #[test]
    fn max_abs_diff_ignores_padding() {
        let a = Grid::new(3, 3).unwrap();
        let mut b = a.padded(6).unwrap();
        b.row_mut(5).fill(100.0);
        b[(2, 2)] = -0.25;
        assert_eq!(a.max_abs_diff(&b), Some(0.25));
        assert_eq!(a.max_abs_diff(&Grid::new(4, 3).unwrap()), None);
    }
}
