//! various types that are shared between the board, the snake and the replay codec
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::error::{ConfigError, ReplayError};

/// A vector with which to do grid math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// offset along the `i` (horizontal) axis
    pub x: i64,
    /// offset along the `j` (vertical) axis
    pub y: i64,
}

/// Represents a heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Direction {
    /// convert this direction to a unit vector. `j` grows downwards, so `Up` is `(0, -1)`
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Up => Vector { x: 0, y: -1 },
            Direction::Down => Vector { x: 0, y: 1 },
            Direction::Left => Vector { x: -1, y: 0 },
            Direction::Right => Vector { x: 1, y: 0 },
        }
    }

    /// returns all four directions
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// the exact reversal of this direction
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// checks if a given direction is not opposite this one. e.g. Up is not opposite to Left, but is opposite to Down
    pub fn is_not_opposite(&self, other: &Direction) -> bool {
        other.opposite() != *self
    }

    /// the key letter used for this direction in replay logs
    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'W',
            Direction::Left => 'A',
            Direction::Down => 'S',
            Direction::Right => 'D',
        }
    }

    /// translates a replay log token. Anything other than `W`, `A`, `S` or `D`
    /// (including the empty token) is "no direction".
    pub fn from_letter(token: &str) -> Option<Direction> {
        match token {
            "W" => Some(Direction::Up),
            "A" => Some(Direction::Left),
            "S" => Some(Direction::Down),
            "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A drawing surface the board paints itself onto, one rectangle per cell.
pub trait RenderSurface {
    /// fill the pixel rectangle at `(x, y)` of size `w` by `h` with `color`
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: &str);
}

/// Storage a finished session log is written to.
pub trait LogSink: Debug {
    /// write the complete log text, replacing anything previously stored
    fn persist(&mut self, contents: &str) -> Result<(), ReplayError>;
}

/// An indexed key-value settings store.
///
/// Index 0 holds the board density code, index 1 the speed code and indices
/// 2 to 4 the snake, board and food colors.
pub trait SettingsStore {
    /// get the raw value at `index`, if the store has one
    fn get(&self, index: usize) -> Option<&str>;

    /// set the raw value at `index`
    fn set(&mut self, index: usize, value: String);

    /// persist the current values
    fn save(&self) -> Result<(), ConfigError>;

    /// reload values from the backing storage
    fn load(&mut self) -> Result<(), ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_pair_up() {
        for d in Direction::all() {
            assert_eq!(d.opposite().opposite(), d);
            assert!(!d.is_not_opposite(&d.opposite()));
            let v = d.to_vector();
            let o = d.opposite().to_vector();
            assert_eq!((v.x + o.x, v.y + o.y), (0, 0));
        }
        assert!(Direction::Up.is_not_opposite(&Direction::Left));
    }

    #[test]
    fn test_letters_translate_back() {
        for d in Direction::all() {
            assert_eq!(Direction::from_letter(&d.letter().to_string()), Some(d));
        }
        assert_eq!(Direction::from_letter(""), None);
        assert_eq!(Direction::from_letter("w"), None);
        assert_eq!(Direction::from_letter("SUBTRACT"), None);
        assert_eq!(Direction::Left.to_string(), "A");
    }
}
