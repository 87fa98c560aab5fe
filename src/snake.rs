//! The snake: a one-cell-per-tick movement and collision state machine
use std::collections::VecDeque;

use tracing::{debug, info};

use crate::board::{Board, Label, Position};
use crate::food::Food;
use crate::types::Direction;

/// Life cycle of a snake. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakeState {
    #[allow(missing_docs)]
    Alive,
    #[allow(missing_docs)]
    Dead,
}

/// What a single tick did to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// moved onto an empty cell, length unchanged
    Moved,
    /// ate the food and grew by one
    Ate,
    /// ran into its own body; this is only ever returned once
    Died,
    /// did not move: the snake is dead or already fills the board
    Idle,
}

/// The body is an ordered run of board positions, head first. The snake
/// does not own cells: every label change goes through the [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    forbidden: Direction,
    state: SnakeState,
    max_size: usize,
}

impl Snake {
    /// Places a one-cell snake at `(start_i, start_j)` (wrapped onto the
    /// board) heading up.
    pub fn new(board: &mut Board, start_i: i64, start_j: i64, max_size: usize) -> Self {
        let head = board.wrap(start_i, start_j);
        board.set_label(head, Label::Snake);
        let direction = Direction::Up;
        Snake {
            body: VecDeque::from(vec![head]),
            direction,
            forbidden: direction.opposite(),
            state: SnakeState::Alive,
            max_size,
        }
    }

    /// A snake in the middle of the board that may grow to fill all of it
    pub fn centered(board: &mut Board) -> Self {
        let max_size = board.dimensions().cell_count();
        let (i, j) = ((board.rows() / 2) as i64, (board.cols() / 2) as i64);
        Self::new(board, i, j, max_size)
    }

    /// Advances one tick.
    ///
    /// An input that is the forbidden reversal, or no input at all, keeps
    /// the current heading. A dead snake is left untouched.
    pub fn update(&mut self, board: &mut Board, food: &mut Food, input: Option<Direction>) -> TickOutcome {
        if self.is_dead() {
            return TickOutcome::Idle;
        }

        if let Some(direction) = input {
            if direction != self.forbidden && direction != self.direction {
                debug!(from = %self.direction, to = %direction, "changing direction");
                self.direction = direction;
            }
        }

        let outcome = if self.body.len() < self.max_size {
            self.slither(board, food)
        } else {
            TickOutcome::Idle
        };

        self.forbidden = self.direction.opposite();
        outcome
    }

    fn slither(&mut self, board: &mut Board, food: &mut Food) -> TickOutcome {
        let target = board.neighbor(self.head(), self.direction);
        match board.label_at(target) {
            Label::Food => {
                self.body.push_front(target);
                board.set_label(target, Label::Snake);
                food.regenerate(board);
                board.increment_score();
                TickOutcome::Ate
            }
            Label::Snake => {
                self.state = SnakeState::Dead;
                info!(at = %target, length = self.body.len(), score = board.score(), "snake died");
                TickOutcome::Died
            }
            Label::Empty => {
                self.body.push_front(target);
                board.set_label(target, Label::Snake);
                if let Some(tail) = self.body.pop_back() {
                    board.set_label(tail, Label::Empty);
                }
                TickOutcome::Moved
            }
        }
    }

    #[allow(missing_docs)]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    #[allow(missing_docs)]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// body positions from head to tail
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// never true; a snake always has a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// the current heading
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// the one heading the next tick will refuse
    pub fn forbidden_direction(&self) -> Direction {
        self.forbidden
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> SnakeState {
        self.state
    }

    #[allow(missing_docs)]
    pub fn is_dead(&self) -> bool {
        self.state == SnakeState::Dead
    }

    #[allow(missing_docs)]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
