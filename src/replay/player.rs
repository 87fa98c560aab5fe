use std::collections::VecDeque;

use tracing::debug;

use crate::error::BoardError;
use crate::game::Game;
use crate::settings::Settings;
use crate::snake::TickOutcome;
use crate::types::Direction;

use super::ReplayLog;

/// Feeds a decoded log back into a fresh game, one recorded direction per
/// tick, with food taken from the recording instead of random placement.
/// The replayed game keeps its own session log, so its trace can be
/// compared against the recording.
#[derive(Debug)]
pub struct ReplayPlayer {
    game: Game,
    commands: VecDeque<Option<Direction>>,
}

impl ReplayPlayer {
    /// Settings come from the log header, or from `fallback` when the
    /// header did not hold any.
    pub fn new(
        log: &ReplayLog,
        fallback: &Settings,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Self, BoardError> {
        let mut settings = fallback.clone();
        log.apply_settings(&mut settings);
        let board = settings.board(pixel_width, pixel_height)?;
        Ok(ReplayPlayer {
            game: Game::replay(board, settings, log.food().iter().copied()),
            commands: log.directions().iter().copied().collect(),
        })
    }

    /// Plays the next recorded tick. `None` once the recording is used up;
    /// the replay has then simply ended.
    pub fn advance(&mut self) -> Option<TickOutcome> {
        let command = match self.commands.pop_front() {
            Some(command) => command,
            None => {
                debug!(score = self.game.score(), "replay finished");
                return None;
            }
        };
        Some(self.game.step(command))
    }

    /// recorded ticks not played yet
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }

    #[allow(missing_docs)]
    pub fn is_finished(&self) -> bool {
        self.commands.is_empty()
    }

    /// the game being replayed
    pub fn game(&self) -> &Game {
        &self.game
    }
}

impl Iterator for ReplayPlayer {
    type Item = TickOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}
