//! The extents of a board and the wraparound math over them
//!
//! A board is `rows` cells along the `i` axis and `cols` cells along the `j`
//! axis. Every integer pair maps onto exactly one cell, which makes the board
//! a torus.

use core::fmt::Debug;
use std::hash::Hash;

use crate::error::BoardError;

use super::Position;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// The extents of a rectangular board
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    /// Build dimensions, rejecting empty boards
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// A square board with `side` cells along both axes
    pub fn square(side: usize) -> Result<Self, BoardError> {
        Self::new(side, side)
    }

    /// extent of the `i` axis
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// extent of the `j` axis
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Maps any integer pair onto the board. Both indices are reduced modulo
    /// their extent and negative remainders are shifted up by the extent.
    pub fn wrap(&self, i: i64, j: i64) -> Position {
        Position {
            i: i.rem_euclid(self.rows as i64) as usize,
            j: j.rem_euclid(self.cols as i64) as usize,
        }
    }

    /// flat index of an in-range position
    pub(crate) fn flat_index(&self, pos: Position) -> usize {
        debug_assert!(pos.i < self.rows && pos.j < self.cols);
        pos.i * self.cols + pos.j
    }

    /// inverse of [`Dimensions::flat_index`]
    pub(crate) fn position_of(&self, flat: usize) -> Position {
        Position {
            i: flat / self.cols,
            j: flat % self.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_extents() {
        assert_eq!(
            Dimensions::new(0, 4),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert!(Dimensions::new(3, 0).is_err());
        assert!(Dimensions::square(1).is_ok());
    }

    #[test]
    fn test_wrap_handles_far_out_of_range_indices() {
        let d = Dimensions::new(7, 4).unwrap();
        for i in -30i64..30 {
            for j in -30i64..30 {
                let expected = Position {
                    i: (((i % 7) + 7) % 7) as usize,
                    j: (((j % 4) + 4) % 4) as usize,
                };
                assert_eq!(d.wrap(i, j), expected);
            }
        }
        assert!(d.wrap(i64::MIN + 1, 1_000_000_007).i < 7);
    }

    #[test]
    fn test_flat_index_round_trips_every_cell() {
        let d = Dimensions::new(3, 5).unwrap();
        for flat in 0..d.cell_count() {
            assert_eq!(d.flat_index(d.position_of(flat)), flat);
        }
    }
}
