#![deny(missing_debug_implementations, missing_docs)]
//! A grid engine for a snake game played on a torus, together with a plain
//! text replay log that reproduces a session tick for tick.
//!
//! A [`Board`] owns every cell. The [`Snake`] and its [`Food`] refer to cells
//! by [`Position`] and change labels through the board. Each tick a driver
//! hands one optional [`Direction`] to [`Game::tick`]; the game records the
//! tick in its [`SessionLog`] and persists the log to a [`LogSink`] when the
//! snake dies.
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//! use torus_snake::{Direction, Game, ReplayLog, ReplayPlayer, Settings};
//!
//! let mut game = Game::from_settings(Settings::default(), 400, 400, SmallRng::seed_from_u64(3)).unwrap();
//! game.tick(Some(Direction::Left)).unwrap();
//! game.tick(None).unwrap();
//!
//! let text = game.log().encode(game.settings());
//! let log = ReplayLog::decode(&text).unwrap();
//! let mut player = ReplayPlayer::new(&log, &Settings::default(), 400, 400).unwrap();
//! while player.advance().is_some() {}
//! assert_eq!(player.game().snake().head(), game.snake().head());
//! ```

pub mod board;
pub mod error;
pub mod food;
pub mod game;
pub mod replay;
pub mod settings;
pub mod snake;
pub mod types;

pub use board::{Board, Cell, Coordinate, Dimensions, Label, Position};
pub use error::{BoardError, ConfigError, ParseError, ReplayError};
pub use food::{Food, FoodSource};
pub use game::{FrameClock, Game, InputQueue};
pub use replay::{FileLogSink, ReplayLog, ReplayPlayer, SessionLog, TickRecord};
pub use settings::{Density, FileSettingsStore, Palette, Settings, Speed};
pub use snake::{Snake, SnakeState, TickOutcome};
pub use types::{Direction, LogSink, RenderSurface, SettingsStore, Vector};
