use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ReplayError;
use crate::settings::Settings;
use crate::types::LogSink;

use super::TickRecord;

/// The in-memory log of a session, one record per tick survived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLog {
    records: Vec<TickRecord>,
}

impl SessionLog {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// append one tick
    pub fn record(&mut self, record: TickRecord) {
        self.records.push(record);
    }

    #[allow(missing_docs)]
    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The complete log text: the settings header, a blank separator line,
    /// then one line per record.
    pub fn encode(&self, settings: &Settings) -> String {
        let mut out = settings.header();
        out.push_str("\n\n");
        for record in &self.records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }

    /// encode and hand the text to `sink`
    pub fn persist(&self, settings: &Settings, sink: &mut dyn LogSink) -> Result<(), ReplayError> {
        sink.persist(&self.encode(settings))?;
        info!(records = self.records.len(), sink = ?sink, "session log persisted");
        Ok(())
    }
}

/// Persists a log to a file, creating missing parent directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    #[allow(missing_docs)]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves `name` inside the save directory `dir`, unless it already
    /// points into that directory.
    pub fn in_dir(dir: impl AsRef<Path>, name: impl AsRef<Path>) -> Self {
        let (dir, name) = (dir.as_ref(), name.as_ref());
        if name.starts_with(dir) {
            Self::new(name)
        } else {
            Self::new(dir.join(name))
        }
    }

    #[allow(missing_docs)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLogSink {
    fn persist(&mut self, contents: &str) -> Result<(), ReplayError> {
        let io_err = |source| ReplayError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, contents).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::types::Direction;

    fn record(score: u32, head: (usize, usize)) -> TickRecord {
        TickRecord {
            score,
            direction: Some(Direction::Up),
            food: Some(Position::new(0, 0)),
            head: Position::new(head.0, head.1),
            tail: Position::new(head.0, head.1 + 1),
        }
    }

    #[test]
    fn test_empty_session_is_header_and_separator() {
        let log = SessionLog::new();
        assert_eq!(log.encode(&Settings::default()), "1-1-000000-FFFFFF-FF0000\n\n");
    }

    #[test]
    fn test_records_follow_the_separator() {
        let mut log = SessionLog::new();
        log.record(record(0, (5, 4)));
        log.record(record(1, (5, 3)));
        assert_eq!(
            log.encode(&Settings::default()),
            "1-1-000000-FFFFFF-FF0000\n\n0_W_0,0_5,4_5,5\n1_W_0,0_5,3_5,4\n"
        );
    }

    #[test]
    fn test_in_dir_does_not_nest_twice() {
        let dir = Path::new("/tmp/GameFiles");
        assert_eq!(
            FileLogSink::in_dir(dir, "run.txt").path(),
            Path::new("/tmp/GameFiles/run.txt")
        );
        assert_eq!(
            FileLogSink::in_dir(dir, "/tmp/GameFiles/run.txt").path(),
            Path::new("/tmp/GameFiles/run.txt")
        );
    }

    #[test]
    fn test_file_sink_creates_directories() {
        let dir = std::env::temp_dir().join(format!("torus-snake-sink-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let mut sink = FileLogSink::in_dir(&dir, "nested/run.txt");
        sink.persist("1-1-a-b-c\n\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.join("nested/run.txt")).unwrap(),
            "1-1-a-b-c\n\n"
        );
        let _ = std::fs::remove_dir_all(&dir);
    }
}
