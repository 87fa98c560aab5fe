//! The replay log codec.
//!
//! A log is a header line of `-` joined settings, one blank separator line,
//! then one `score_direction_food_head_tail` line per tick the snake survived:
//! ```plain
//! 1-1-000000-FFFFFF-FF0000
//!
//! 0_W_3,7_10,9_10,9
//! 0_D_3,7_11,9_11,9
//! ```
//! Decoding yields the settings, the direction sequence, the food coordinates
//! in first-seen order and the recorded head/tail trace.
use std::path::Path;

use fxhash::FxHashSet;
use tracing::{debug, info, instrument, warn};

use crate::board::Position;
use crate::error::{ParseError, ReplayError};
use crate::settings::{Settings, SETTINGS_FIELDS};
use crate::types::Direction;

mod player;
mod record;
mod session_log;

use record::DataLine;

pub use player::ReplayPlayer;
pub use record::TickRecord;
pub use session_log::{FileLogSink, SessionLog};

/// A decoded replay log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayLog {
    header: Vec<String>,
    settings: Option<Settings>,
    directions: Vec<Option<Direction>>,
    food: Vec<Position>,
    records: Vec<TickRecord>,
}

impl ReplayLog {
    /// Parses log text.
    ///
    /// The settings are only taken when the header holds exactly
    /// [`SETTINGS_FIELDS`] fields. Unknown direction letters decode to
    /// `None`; a data line with the wrong number of fields or a malformed
    /// number fails the whole log.
    #[instrument(level = "trace", skip_all)]
    pub fn decode(text: &str) -> Result<Self, ParseError> {
        let mut lines = text.lines();
        let header_line = lines.next().ok_or(ParseError::Empty)?;
        let header: Vec<String> = header_line.split('-').map(str::to_string).collect();

        let settings = if header.len() == SETTINGS_FIELDS {
            let (settings, errors) = Settings::from_fields(&header);
            for e in errors {
                warn!(error = %e, "substituting default setting from replay header");
            }
            Some(settings)
        } else {
            warn!(fields = header.len(), "replay header does not hold a full settings record");
            None
        };

        let rest: Vec<&str> = lines.collect();
        let mut directions = vec![];
        let mut food = vec![];
        let mut records = vec![];
        let mut seen_food = FxHashSet::default();

        if rest.len() > 1 {
            // rest[0] is the separator, so data starts on line 3
            for (offset, text) in rest.iter().enumerate().skip(1) {
                if text.trim().is_empty() {
                    continue;
                }
                let parsed = DataLine::parse(text, offset + 2)?;
                directions.push(parsed.direction);
                if let Some(pos) = parsed.food {
                    if seen_food.insert(pos) {
                        food.push(pos);
                    }
                }
                records.extend(parsed.record);
            }
        }

        debug!(
            moves = directions.len(),
            food = food.len(),
            "decoded replay log"
        );
        Ok(ReplayLog {
            header,
            settings,
            directions,
            food,
            records,
        })
    }

    /// Reads and decodes a log file. Every failure names the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let log = Self::decode(&text).map_err(|source| ReplayError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), moves = log.directions.len(), "loaded replay log");
        Ok(log)
    }

    /// the raw `-` separated header fields
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// the settings the session was played with, if the header held them
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Overwrites `settings` when this log carries its own; returns whether
    /// it did.
    pub fn apply_settings(&self, settings: &mut Settings) -> bool {
        match &self.settings {
            Some(s) => {
                *settings = s.clone();
                true
            }
            None => false,
        }
    }

    /// one entry per recorded tick; `None` where the tick had no input
    pub fn directions(&self) -> &[Option<Direction>] {
        &self.directions
    }

    /// food coordinates in the order they first appeared
    pub fn food(&self) -> &[Position] {
        &self.food
    }

    /// the head/tail trace of lines that carried one
    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Density, Palette, Speed};

    #[test]
    fn test_decodes_header_and_two_lines() {
        let log = ReplayLog::decode("1-1-000000-FFFFFF-FF0000\n\n0_W_3,3_5,4_5,4\n0_D_3,3_6,4_6,4\n")
            .unwrap();
        assert_eq!(log.header(), ["1", "1", "000000", "FFFFFF", "FF0000"]);
        assert_eq!(
            log.settings(),
            Some(&Settings {
                density: Density::Medium,
                speed: Speed::Normal,
                palette: Palette::new("000000", "FFFFFF", "FF0000"),
            })
        );
        assert_eq!(
            log.directions(),
            [Some(Direction::Up), Some(Direction::Right)]
        );
        assert_eq!(log.food(), [Position::new(3, 3)]);
        assert_eq!(log.records().len(), 2);
        assert_eq!(log.records()[1].head, Position::new(6, 4));
    }

    #[test]
    fn test_food_keeps_first_occurrence_order() {
        let log = ReplayLog::decode("0-2-a-b-c\n\n0_W_1,1\n1_W_4,4\n1_A_1,1\n2_A_4,4\n2_S_0,2\n").unwrap();
        assert_eq!(
            log.food(),
            [Position::new(1, 1), Position::new(4, 4), Position::new(0, 2)]
        );
        assert_eq!(log.directions().len(), 5);
        assert!(log.records().is_empty());
    }

    #[test]
    fn test_short_header_keeps_previous_settings() {
        let log = ReplayLog::decode("1-1-000000\n\n0_W_1,1\n").unwrap();
        assert_eq!(log.settings(), None);
        let mut settings = Settings {
            density: Density::High,
            ..Settings::default()
        };
        assert!(!log.apply_settings(&mut settings));
        assert_eq!(settings.density, Density::High);

        let log = ReplayLog::decode("0-2-a-b-c\n\n").unwrap();
        assert!(log.apply_settings(&mut settings));
        assert_eq!(settings.density, Density::Low);
        assert_eq!(settings.speed, Speed::Fast);
    }

    #[test]
    fn test_missing_letters_and_food_are_not_errors() {
        let log = ReplayLog::decode("1-1-a-b-c\n\n0___5,4_5,4\n0_x_2,2_5,3_5,3\n").unwrap();
        assert_eq!(log.directions(), [None, None]);
        assert_eq!(log.food(), [Position::new(2, 2)]);
        assert_eq!(log.records()[0].food, None);
    }

    #[test]
    fn test_header_only_logs_have_no_moves() {
        for text in ["1-1-a-b-c", "1-1-a-b-c\n", "1-1-a-b-c\n\n", "1-1-a-b-c\n0_W_1,1\n"] {
            let log = ReplayLog::decode(text).unwrap();
            assert!(log.directions().is_empty(), "{:?}", text);
            assert!(log.food().is_empty());
        }
    }

    #[test]
    fn test_structural_errors_abort_decoding() {
        assert_eq!(ReplayLog::decode(""), Err(ParseError::Empty));
        assert_eq!(
            ReplayLog::decode("1-1-a-b-c\n\n0_W_1,1\n0W11\n"),
            Err(ParseError::FieldCount { line: 4, found: 1 })
        );
        assert_eq!(
            ReplayLog::decode("1-1-a-b-c\n\n0_W_one,1\n"),
            Err(ParseError::Coordinate {
                line: 3,
                value: "one,1".to_string()
            })
        );
    }

    #[test]
    fn test_blank_lines_inside_data_are_skipped() {
        let log = ReplayLog::decode("1-1-a-b-c\n\n0_W_1,1\n\n1_W_2,2\n\n").unwrap();
        assert_eq!(log.directions().len(), 2);
    }

    #[test]
    fn test_load_names_the_file() {
        let dir = std::env::temp_dir().join(format!("torus-snake-load-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let broken = dir.join("broken.txt");
        std::fs::write(&broken, "1-1-a-b-c\n\nnot a line\n").unwrap();

        let err = ReplayLog::load(&broken).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { .. }));
        assert!(err.to_string().contains("broken.txt"));

        let err = ReplayLog::load(dir.join("missing.txt")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));

        let good = dir.join("good.txt");
        std::fs::write(&good, "2-0-a-b-c\n\n0_S_1,1_4,4_4,4\n").unwrap();
        let log = ReplayLog::load(&good).unwrap();
        assert_eq!(log.directions(), [Some(Direction::Down)]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
