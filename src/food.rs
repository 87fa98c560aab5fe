//! Food placement, either sampled at random or taken from a recorded session
use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, warn};

use crate::board::{Board, Label, Position};

/// Where new food comes from
#[derive(Debug, Clone)]
pub enum FoodSource {
    /// rejection sampling over the board
    Random(SmallRng),
    /// recorded coordinates, consumed front to back and never replenished
    Replay(VecDeque<Position>),
}

/// The single piece of food on the board
#[derive(Debug, Clone)]
pub struct Food {
    location: Option<Position>,
    source: FoodSource,
}

impl Food {
    /// Places the first food at a random cell not occupied by the snake
    pub fn new_random(board: &mut Board, rng: SmallRng) -> Self {
        let mut food = Food {
            location: None,
            source: FoodSource::Random(rng),
        };
        food.regenerate(board);
        food
    }

    /// Places the first food at the first recorded coordinate. With no
    /// recorded coordinates there is simply no food.
    pub fn new_from_replay(board: &mut Board, coordinates: impl IntoIterator<Item = Position>) -> Self {
        let mut food = Food {
            location: None,
            source: FoodSource::Replay(coordinates.into_iter().collect()),
        };
        food.regenerate(board);
        food
    }

    /// the cell the food currently sits on
    pub fn location(&self) -> Option<Position> {
        self.location
    }

    /// whether this food follows a recording
    pub fn is_replay(&self) -> bool {
        matches!(self.source, FoodSource::Replay(_))
    }

    /// recorded coordinates not placed yet
    pub fn pending(&self) -> usize {
        match &self.source {
            FoodSource::Random(_) => 0,
            FoodSource::Replay(queue) => queue.len(),
        }
    }

    /// Places the next food: random food is sampled again, replay food pops
    /// its next coordinate.
    pub fn regenerate(&mut self, board: &mut Board) {
        match self.source {
            FoodSource::Random(_) => self.generate_food(board),
            FoodSource::Replay(_) => self.generate_from_save(board),
        }
    }

    /// Samples `(i, j)` from `[0, rows] x [0, cols]` (the upper bound is one
    /// past the board and folds back onto index 0 through wraparound) until
    /// the cell is not part of the snake, then marks it as food. If the snake
    /// fills every cell nothing is placed.
    pub fn generate_food(&mut self, board: &mut Board) {
        let rng = match &mut self.source {
            FoodSource::Random(rng) => rng,
            FoodSource::Replay(_) => {
                warn!("random placement requested for replay food, ignoring");
                return;
            }
        };
        if !board.has_non_snake_cell() {
            debug!("no free cell left for food");
            self.location = None;
            return;
        }

        let mut space = random_cell(board, rng);
        while board.label_at(space) == Label::Snake {
            space = random_cell(board, rng);
        }
        self.place(board, space);
    }

    /// Pops the next recorded coordinate and places food there without any
    /// collision check. Does nothing once the recording is used up.
    pub fn generate_from_save(&mut self, board: &mut Board) {
        let next = match &mut self.source {
            FoodSource::Replay(queue) => queue.pop_front(),
            FoodSource::Random(_) => {
                warn!("recorded placement requested for random food, ignoring");
                return;
            }
        };
        match next {
            Some(pos) => {
                let pos = board.wrap(pos.i as i64, pos.j as i64);
                self.place(board, pos);
            }
            // the recording is used up; only forget a location that was eaten
            None => {
                if let Some(pos) = self.location {
                    if board.label_at(pos) != Label::Food {
                        self.location = None;
                    }
                }
            }
        }
    }

    fn place(&mut self, board: &mut Board, pos: Position) {
        board.set_label(pos, Label::Food);
        debug!(food = %pos, "placed food");
        self.location = Some(pos);
    }
}

fn random_cell(board: &Board, rng: &mut SmallRng) -> Position {
    let i = rng.gen_range(0..=board.rows());
    let j = rng.gen_range(0..=board.cols());
    board.wrap(i as i64, j as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_random_food_avoids_snake() {
        for seed in 0..50 {
            let mut board = Board::new(3, 3, 30, 30).unwrap();
            for i in 0..3 {
                for j in 0..3 {
                    if (i, j) != (2, 1) {
                        board.set_label(Position::new(i, j), Label::Snake);
                    }
                }
            }
            let food = Food::new_random(&mut board, SmallRng::seed_from_u64(seed));
            assert_eq!(food.location(), Some(Position::new(2, 1)));
            assert_eq!(board.label_at(Position::new(2, 1)), Label::Food);
        }
    }

    #[test]
    fn test_full_board_gets_no_food() {
        let mut board = Board::new(2, 2, 2, 2).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                board.set_label(Position::new(i, j), Label::Snake);
            }
        }
        let food = Food::new_random(&mut board, SmallRng::seed_from_u64(7));
        assert_eq!(food.location(), None);
        assert_eq!(board.count(Label::Food), 0);
    }

    #[test]
    fn test_sampling_reaches_every_free_cell() {
        let mut rng = SmallRng::seed_from_u64(11);
        let board = Board::new(4, 3, 40, 30).unwrap();
        let mut seen = fxhash::FxHashSet::default();
        for _ in 0..500 {
            let pos = random_cell(&board, &mut rng);
            assert!(pos.i < 4 && pos.j < 3);
            seen.insert(pos);
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_replay_food_follows_queue_then_stops() {
        let mut board = Board::new(5, 5, 50, 50).unwrap();
        let mut food = Food::new_from_replay(
            &mut board,
            vec![Position::new(1, 1), Position::new(3, 4)],
        );
        assert!(food.is_replay());
        assert_eq!(food.location(), Some(Position::new(1, 1)));
        assert_eq!(food.pending(), 1);

        food.regenerate(&mut board);
        assert_eq!(food.location(), Some(Position::new(3, 4)));
        assert_eq!(food.pending(), 0);

        food.regenerate(&mut board);
        assert_eq!(food.location(), Some(Position::new(3, 4)));

        // eaten with nothing left to place
        board.set_label(Position::new(3, 4), Label::Snake);
        food.regenerate(&mut board);
        assert_eq!(food.location(), None);
        assert_eq!(board.count(Label::Food), 1);
    }

    #[test]
    fn test_replay_food_is_placed_unconditionally() {
        let mut board = Board::new(5, 5, 50, 50).unwrap();
        board.set_label(Position::new(2, 2), Label::Snake);
        let food = Food::new_from_replay(&mut board, vec![Position::new(2, 2)]);
        assert_eq!(food.location(), Some(Position::new(2, 2)));
        assert_eq!(board.label_at(Position::new(2, 2)), Label::Food);
    }

    #[test]
    fn test_empty_recording_places_nothing() {
        let mut board = Board::new(5, 5, 50, 50).unwrap();
        let food = Food::new_from_replay(&mut board, Vec::<Position>::new());
        assert_eq!(food.location(), None);
        assert_eq!(board.count(Label::Food), 0);
    }
}
