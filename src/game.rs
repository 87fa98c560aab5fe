//! A running session: the board, its snake and food, and the session log.
//!
//! The external driver decides when a tick happens. [`FrameClock`] turns a
//! stream of animation frames into ticks and [`InputQueue`] collects the key
//! presses made between two ticks.
use std::collections::VecDeque;

use rand::rngs::SmallRng;
use tracing::{debug, instrument};

use crate::board::{Board, Position};
use crate::error::{BoardError, ReplayError};
use crate::food::Food;
use crate::replay::{SessionLog, TickRecord};
use crate::settings::{Settings, Speed};
use crate::snake::{Snake, TickOutcome};
use crate::types::{Direction, LogSink, RenderSurface};

/// One session, live or replayed
#[derive(Debug)]
pub struct Game {
    board: Board,
    snake: Snake,
    food: Food,
    settings: Settings,
    log: SessionLog,
    sink: Option<Box<dyn LogSink>>,
}

impl Game {
    /// A live session on `board`, with food sampled from `rng`. The snake is
    /// placed first so the food never lands on it.
    pub fn live(mut board: Board, settings: Settings, rng: SmallRng) -> Self {
        let snake = Snake::centered(&mut board);
        let food = Food::new_random(&mut board, rng);
        Self::assemble(board, snake, food, settings)
    }

    /// A session whose food follows the recorded coordinates
    pub fn replay(mut board: Board, settings: Settings, food: impl IntoIterator<Item = Position>) -> Self {
        let snake = Snake::centered(&mut board);
        let food = Food::new_from_replay(&mut board, food);
        Self::assemble(board, snake, food, settings)
    }

    /// a live session on the square board `settings` describe
    pub fn from_settings(
        settings: Settings,
        pixel_width: u32,
        pixel_height: u32,
        rng: SmallRng,
    ) -> Result<Self, BoardError> {
        let board = settings.board(pixel_width, pixel_height)?;
        Ok(Self::live(board, settings, rng))
    }

    fn assemble(board: Board, snake: Snake, food: Food, settings: Settings) -> Self {
        Game {
            board,
            snake,
            food,
            settings,
            log: SessionLog::new(),
            sink: None,
        }
    }

    /// Where the log goes when the snake dies
    pub fn with_log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Advances the snake and appends the tick to the log if it survived.
    pub(crate) fn step(&mut self, input: Option<Direction>) -> TickOutcome {
        let food = self.food.location();
        let outcome = self.snake.update(&mut self.board, &mut self.food, input);
        if !self.snake.is_dead() {
            self.log.record(TickRecord {
                score: self.board.score(),
                direction: Some(self.snake.direction()),
                food,
                head: self.snake.head(),
                tail: self.snake.tail(),
            });
        }
        outcome
    }

    /// Runs one tick. The tick the snake dies on persists the log to the
    /// sink; this happens exactly once per session.
    #[instrument(level = "trace", skip_all)]
    pub fn tick(&mut self, input: Option<Direction>) -> Result<TickOutcome, ReplayError> {
        let outcome = self.step(input);
        if outcome == TickOutcome::Died {
            self.save_log()?;
        }
        Ok(outcome)
    }

    /// One tick per queued input, or a single tick without input when the
    /// queue is empty.
    pub fn tick_queued(&mut self, queue: &mut InputQueue) -> Result<Vec<TickOutcome>, ReplayError> {
        if queue.is_empty() {
            return Ok(vec![self.tick(None)?]);
        }
        let mut outcomes = Vec::with_capacity(queue.len());
        while let Some(direction) = queue.pop() {
            outcomes.push(self.tick(Some(direction))?);
        }
        Ok(outcomes)
    }

    /// Persists the log now. Without a sink this does nothing.
    pub fn save_log(&mut self) -> Result<(), ReplayError> {
        match self.sink.as_mut() {
            Some(sink) => self.log.persist(&self.settings, sink.as_mut()),
            None => {
                debug!("no log sink configured, log not saved");
                Ok(())
            }
        }
    }

    /// paints the board onto `surface`
    pub fn render(&self, surface: &mut impl RenderSurface) {
        self.board.display(surface);
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[allow(missing_docs)]
    pub fn food(&self) -> &Food {
        &self.food
    }

    #[allow(missing_docs)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// the ticks recorded so far
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    #[allow(missing_docs)]
    pub fn score(&self) -> u32 {
        self.board.score()
    }

    /// true once the snake died
    pub fn is_over(&self) -> bool {
        self.snake.is_dead()
    }
}

/// Direction presses waiting for the next tick. A direction already waiting
/// is not queued again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// queue `direction` unless it is already waiting
    pub fn push(&mut self, direction: Direction) {
        if !self.pending.contains(&direction) {
            self.pending.push_back(direction);
        }
    }

    #[allow(missing_docs)]
    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Counts animation frames and fires on the first and then every
/// `frame_lag`-th one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    frame_lag: u32,
    frames: u32,
}

impl FrameClock {
    /// a lag of zero is treated as one
    pub fn new(frame_lag: u32) -> Self {
        FrameClock {
            frame_lag: frame_lag.max(1),
            frames: 0,
        }
    }

    #[allow(missing_docs)]
    pub fn from_speed(speed: Speed) -> Self {
        Self::new(speed.frame_lag())
    }

    /// Registers one frame; true when a tick is due. The first frame always
    /// ticks.
    pub fn on_frame(&mut self) -> bool {
        let due = self.frames == 0;
        self.frames = (self.frames + 1) % self.frame_lag;
        due
    }

    #[allow(missing_docs)]
    pub fn frame_lag(&self) -> u32 {
        self.frame_lag
    }
}
