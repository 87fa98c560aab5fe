//! Game settings: board density, tick speed and colors, plus the
//! line-per-value settings file they are persisted in.
//!
//! Settings are a plain value handed to whoever needs them. A malformed or
//! missing field never stops a game; it is replaced by its default and
//! reported with a `warn!`.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::Board;
use crate::error::{BoardError, ConfigError};
use crate::types::SettingsStore;

/// Number of fields in a serialized settings record
pub const SETTINGS_FIELDS: usize = 5;

/// index of the board density code
pub const DENSITY_INDEX: usize = 0;
/// index of the speed code
pub const SPEED_INDEX: usize = 1;
/// index of the snake color
pub const SNAKE_COLOR_INDEX: usize = 2;
/// index of the board color
pub const BOARD_COLOR_INDEX: usize = 3;
/// index of the food color
pub const FOOD_COLOR_INDEX: usize = 4;

/// How finely the board is divided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Density {
    /// 10 cells per side
    Low,
    /// 20 cells per side
    #[default]
    Medium,
    /// 40 cells per side
    High,
}

impl Density {
    /// the settings code for this density
    pub fn code(self) -> u8 {
        match self {
            Density::Low => 0,
            Density::Medium => 1,
            Density::High => 2,
        }
    }

    #[allow(missing_docs)]
    pub fn from_code(code: &str) -> Result<Self, ConfigError> {
        match code.trim() {
            "0" => Ok(Density::Low),
            "1" => Ok(Density::Medium),
            "2" => Ok(Density::High),
            other => Err(ConfigError::InvalidDensity(other.to_string())),
        }
    }

    /// cells along each side of the square board
    pub fn board_size(self) -> usize {
        match self {
            Density::Low => 10,
            Density::Medium => 20,
            Density::High => 40,
        }
    }
}

/// How often the snake moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Speed {
    #[allow(missing_docs)]
    Slow,
    #[allow(missing_docs)]
    #[default]
    Normal,
    #[allow(missing_docs)]
    Fast,
}

impl Speed {
    /// the settings code for this speed
    pub fn code(self) -> u8 {
        match self {
            Speed::Slow => 0,
            Speed::Normal => 1,
            Speed::Fast => 2,
        }
    }

    #[allow(missing_docs)]
    pub fn from_code(code: &str) -> Result<Self, ConfigError> {
        match code.trim() {
            "0" => Ok(Speed::Slow),
            "1" => Ok(Speed::Normal),
            "2" => Ok(Speed::Fast),
            other => Err(ConfigError::InvalidSpeed(other.to_string())),
        }
    }

    /// the snake advances once every this many frames
    pub fn frame_lag(self) -> u32 {
        match self {
            Speed::Slow => 8,
            Speed::Normal => 4,
            Speed::Fast => 1,
        }
    }
}

/// Colors the board paints its cells with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Palette {
    /// color of snake cells
    pub snake: String,
    /// color of empty cells
    pub board: String,
    /// color of the food cell
    pub food: String,
}

impl Palette {
    #[allow(missing_docs)]
    pub fn new(snake: impl Into<String>, board: impl Into<String>, food: impl Into<String>) -> Self {
        Palette {
            snake: snake.into(),
            board: board.into(),
            food: food.into(),
        }
    }

    /// A color has to survive the `-` separated header and the `_` separated
    /// records untouched.
    pub fn is_valid_color(color: &str) -> bool {
        !color.is_empty()
            && !color
                .chars()
                .any(|c| c == '-' || c == '_' || c.is_whitespace())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new("000000", "FFFFFF", "FF0000")
    }
}

/// Everything a session needs to be reproduced besides its moves
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Settings {
    #[allow(missing_docs)]
    pub density: Density,
    #[allow(missing_docs)]
    pub speed: Speed,
    #[allow(missing_docs)]
    pub palette: Palette,
}

impl Settings {
    /// The five ordered fields: density code, speed code, snake, board and
    /// food color.
    pub fn to_fields(&self) -> [String; SETTINGS_FIELDS] {
        [
            self.density.code().to_string(),
            self.speed.code().to_string(),
            self.palette.snake.clone(),
            self.palette.board.clone(),
            self.palette.food.clone(),
        ]
    }

    /// Builds settings from ordered fields. Each missing or malformed field
    /// takes its default, and the problems found are returned alongside.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|index| fields.get(index).map(|f| f.as_ref()))
    }

    /// Reads settings out of a store, substituting defaults for anything the
    /// store lacks or holds in a bad shape. Never fails.
    pub fn from_store(store: &impl SettingsStore) -> Self {
        let (settings, errors) = Self::from_lookup(|index| store.get(index));
        for e in errors {
            warn!(error = %e, "substituting default setting");
        }
        settings
    }

    /// Writes every field into a store; the caller decides when to save.
    pub fn write_to(&self, store: &mut impl SettingsStore) {
        for (index, value) in self.to_fields().into_iter().enumerate() {
            store.set(index, value);
        }
    }

    /// the replay log header: fields joined with `-`
    pub fn header(&self) -> String {
        self.to_fields().iter().join("-")
    }

    /// side length of the square board these settings describe
    pub fn board_size(&self) -> usize {
        self.density.board_size()
    }

    /// builds a square board sized by this density and painted with this palette
    pub fn board(&self, pixel_width: u32, pixel_height: u32) -> Result<Board, BoardError> {
        Board::with_palette(
            self.board_size(),
            self.board_size(),
            pixel_width,
            pixel_height,
            self.palette.clone(),
        )
    }

    fn from_lookup<'a>(lookup: impl Fn(usize) -> Option<&'a str>) -> (Self, Vec<ConfigError>) {
        let mut errors = vec![];
        let defaults = Settings::default();

        let density = match lookup(DENSITY_INDEX).map(Density::from_code) {
            Some(Ok(d)) => d,
            Some(Err(e)) => {
                errors.push(e);
                defaults.density
            }
            None => {
                errors.push(ConfigError::MissingField(DENSITY_INDEX));
                defaults.density
            }
        };

        let speed = match lookup(SPEED_INDEX).map(Speed::from_code) {
            Some(Ok(s)) => s,
            Some(Err(e)) => {
                errors.push(e);
                defaults.speed
            }
            None => {
                errors.push(ConfigError::MissingField(SPEED_INDEX));
                defaults.speed
            }
        };

        let mut color = |index: usize, default: String| match lookup(index) {
            Some(c) if Palette::is_valid_color(c) => c.to_string(),
            Some(c) => {
                errors.push(ConfigError::InvalidColor {
                    index,
                    value: c.to_string(),
                });
                default
            }
            None => {
                errors.push(ConfigError::MissingField(index));
                default
            }
        };
        let palette = Palette {
            snake: color(SNAKE_COLOR_INDEX, defaults.palette.snake.clone()),
            board: color(BOARD_COLOR_INDEX, defaults.palette.board.clone()),
            food: color(FOOD_COLOR_INDEX, defaults.palette.food.clone()),
        };

        (
            Settings {
                density,
                speed,
                palette,
            },
            errors,
        )
    }
}

/// An in-memory store; saving and loading do nothing.
impl SettingsStore for Vec<String> {
    fn get(&self, index: usize) -> Option<&str> {
        self.as_slice().get(index).map(|s| s.as_str())
    }

    fn set(&mut self, index: usize, value: String) {
        if index >= self.len() {
            self.resize(index + 1, String::new());
        }
        self[index] = value;
    }

    fn save(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    fn load(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// A settings file holding one value per line. Indices the file does not
/// hold are answered from a defaults list.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: Vec<String>,
    defaults: Vec<String>,
}

impl FileSettingsStore {
    /// A store over `path` whose fallback values are [`Settings::default`].
    /// Nothing is read until [`SettingsStore::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: vec![],
            defaults: Settings::default().to_fields().to_vec(),
        }
    }

    /// Uses the lines of another file as the fallback values. A defaults
    /// file that cannot be read keeps the built-in defaults.
    pub fn with_defaults_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match read_lines(path) {
            Ok(Some(lines)) => self.defaults = lines,
            Ok(None) => warn!(path = %path.display(), "defaults file not found, using built-in defaults"),
            Err(e) => warn!(error = %e, "using built-in defaults"),
        }
        self
    }

    #[allow(missing_docs)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// whether the file supplied no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// forget the loaded values; lookups fall back to the defaults
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, index: usize) -> Option<&str> {
        self.values
            .as_slice()
            .get(index)
            .or_else(|| self.defaults.as_slice().get(index))
            .map(|s| s.as_str())
    }

    fn set(&mut self, index: usize, value: String) {
        if self.values.len() <= index {
            let missing = self.values.len()..=index;
            let filler = missing
                .map(|i| self.defaults.as_slice().get(i).cloned().unwrap_or_default())
                .collect_vec();
            self.values.extend(filler);
        }
        self.values[index] = value;
    }

    fn save(&self) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents: String = self.values.iter().map(|v| format!("{}\n", v)).collect();
        std::fs::write(&self.path, contents).map_err(io_err)
    }

    /// A missing or unreadable file leaves the store empty, so every lookup
    /// falls back to the defaults. Never fails.
    fn load(&mut self) -> Result<(), ConfigError> {
        match read_lines(&self.path) {
            Ok(Some(lines)) => self.values = lines,
            Ok(None) => {
                warn!(path = %self.path.display(), "settings file not found, using defaults");
                self.values.clear();
            }
            Err(e) => {
                warn!(error = %e, "settings file unreadable, using defaults");
                self.values.clear();
            }
        }
        Ok(())
    }
}

fn read_lines(path: &Path) -> Result<Option<Vec<String>>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.lines().map(str::to_string).collect())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
