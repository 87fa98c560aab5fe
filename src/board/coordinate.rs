use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Vector;

/// A grid index pair. This is what the snake and the food hold on to; cells
/// themselves stay owned by the [`Board`](super::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// index along the horizontal axis, `0..rows`
    pub i: usize,
    /// index along the vertical axis, `0..cols`
    pub j: usize,
}

impl Position {
    #[allow(missing_docs)]
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// adds a vector without wrapping. Feed the result through the board's
    /// wraparound addressing to land back on a cell.
    pub fn add_vec(&self, v: Vector) -> (i64, i64) {
        (self.i as i64 + v.x, self.j as i64 + v.y)
    }
}

/// Formats as the replay log's `i,j`
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.i, self.j)
    }
}

/// the token could not be read as `i,j`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPosition;

impl FromStr for Position {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (i, j) = s.split_once(',').ok_or(InvalidPosition)?;
        Ok(Position {
            i: i.trim().parse().map_err(|_| InvalidPosition)?,
            j: j.trim().parse().map_err(|_| InvalidPosition)?,
        })
    }
}

/// The location of a single cell: its pixel origin `(x, y)` for display and
/// its grid index `(i, j)`. Immutable once built. Equality compares all
/// four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    x: i32,
    y: i32,
    i: usize,
    j: usize,
}

impl Coordinate {
    #[allow(missing_docs)]
    pub fn new(x: i32, y: i32, i: usize, j: usize) -> Self {
        Self { x, y, i, j }
    }

    /// pixel x of the cell's upper left corner
    pub fn x(&self) -> i32 {
        self.x
    }

    /// pixel y of the cell's upper left corner
    pub fn y(&self) -> i32 {
        self.y
    }

    #[allow(missing_docs)]
    pub fn i(&self) -> usize {
        self.i
    }

    #[allow(missing_docs)]
    pub fn j(&self) -> usize {
        self.j
    }

    /// the grid index part of this coordinate
    pub fn position(&self) -> Position {
        Position {
            i: self.i,
            j: self.j,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.position().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parses_log_tokens() {
        assert_eq!("3,14".parse(), Ok(Position::new(3, 14)));
        assert_eq!(" 0 , 2 ".parse(), Ok(Position::new(0, 2)));
        assert_eq!("3".parse::<Position>(), Err(InvalidPosition));
        assert_eq!("a,1".parse::<Position>(), Err(InvalidPosition));
        assert_eq!("1,-1".parse::<Position>(), Err(InvalidPosition));
        assert_eq!("1,2,3".parse::<Position>(), Err(InvalidPosition));
    }

    #[test]
    fn test_coordinate_equality_includes_pixels() {
        let a = Coordinate::new(0, 0, 1, 1);
        assert_eq!(a, Coordinate::new(0, 0, 1, 1));
        assert_ne!(a, Coordinate::new(20, 0, 1, 1));
        assert_eq!(a.to_string(), "1,1");
        assert_eq!(a.position(), Position::new(1, 1));
    }
}
