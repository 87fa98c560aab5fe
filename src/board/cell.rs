use serde::{Deserialize, Serialize};

use super::Coordinate;

/// What currently occupies a cell
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[allow(missing_docs)]
    Empty,
    #[allow(missing_docs)]
    Snake,
    #[allow(missing_docs)]
    Food,
}

/// A single addressable grid location
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    coordinate: Coordinate,
    width: u32,
    height: u32,
    label: Label,
}

impl Cell {
    pub(crate) fn empty(coordinate: Coordinate, width: u32, height: u32) -> Self {
        Cell {
            coordinate,
            width,
            height,
            label: Label::Empty,
        }
    }

    #[allow(missing_docs)]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// pixel width of the cell
    pub fn width(&self) -> u32 {
        self.width
    }

    /// pixel height of the cell
    pub fn height(&self) -> u32 {
        self.height
    }

    #[allow(missing_docs)]
    pub fn label(&self) -> Label {
        self.label
    }

    pub(crate) fn set_label(&mut self, label: Label) {
        self.label = label;
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.label == Label::Empty
    }

    #[allow(missing_docs)]
    pub fn is_food(&self) -> bool {
        self.label == Label::Food
    }

    #[allow(missing_docs)]
    pub fn is_snake(&self) -> bool {
        self.label == Label::Snake
    }
}
