//! Game log in JSON Lines format
//!
//! Every turn of a quiz leaves a trail here: `question_asked` when a member is
//! drawn, `answer_given` with the player's choice or text and whether it was
//! right, and `game_finished` with the final tally. Payload fields are lifted
//! to the top level next to `type` and a UTC `timestamp`, so one line reads as
//! one flat game record.

use akanamen_application::ports::game_logger::{GameEvent, GameLogger};
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Writes quiz game records to a `.jsonl` file
///
/// The file is opened in append mode, so the records of every game played
/// with the same `--log-file` end up in one history.
pub struct JsonlGameLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlGameLogger {
    /// Open the game log at `path`, creating missing directories
    ///
    /// Returns `None` with a warning if the file cannot be opened; the game
    /// then runs without a history.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(dir = %parent.display(), error = %e, "Could not create game log directory");
            return None;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .inspect_err(|e| warn!(path = %path.display(), error = %e, "Could not open game log"))
            .ok()?;

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Where the game history is written
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Flatten a game event into one record
///
/// Object payloads are merged with `type` and `timestamp`; anything else is
/// kept under `data`.
fn game_record(event: GameEvent, timestamp: String) -> Value {
    let mut record = match event.payload {
        Value::Object(fields) => fields,
        other => {
            let mut fields = Map::new();
            fields.insert("data".to_string(), other);
            fields
        }
    };
    record.insert("type".to_string(), Value::from(event.event_type));
    record.insert("timestamp".to_string(), Value::from(timestamp));
    Value::Object(record)
}

impl GameLogger for JsonlGameLogger {
    fn log(&self, event: GameEvent) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&game_record(event, timestamp)) else {
            return;
        };

        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line).and_then(|()| writer.flush()) {
            warn!(path = %self.path.display(), error = %e, "Could not write game record");
        }
    }
}

impl Drop for JsonlGameLogger {
    fn drop(&mut self) {
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("games.jsonl");
        let logger = JsonlGameLogger::new(&path).unwrap();

        logger.log(GameEvent::new(
            "question_asked",
            serde_json::json!({
                "player": 1,
                "hint_attribute": "last_name",
                "question_attribute": "instruments",
            }),
        ));
        logger.log(GameEvent::new(
            "answer_given",
            serde_json::json!({ "player": 1, "correct": true }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.get("timestamp").is_some());
        }
        assert_eq!(records[0]["type"], "question_asked");
        assert_eq!(records[0]["question_attribute"], "instruments");
        assert_eq!(records[1]["type"], "answer_given");
        assert_eq!(records[1]["correct"], true);
    }

    #[test]
    fn test_jsonl_logger_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");
        for _ in 0..2 {
            let logger = JsonlGameLogger::new(&path).unwrap();
            logger.log(GameEvent::new("game_finished", serde_json::json!({})));
        }
        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_jsonl_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");
        let logger = JsonlGameLogger::new(&path).unwrap();

        logger.log(GameEvent::new("note", serde_json::json!("just a string")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "just a string");
    }

    #[test]
    fn test_jsonl_logger_returns_none_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlGameLogger::new(dir.path()).is_none());
    }

    #[test]
    fn test_game_record_keeps_payload_fields_flat() {
        let record = game_record(
            GameEvent::new(
                "game_finished",
                serde_json::json!({ "player": 3, "correct": 4, "answers": 5 }),
            ),
            "2020-01-01T00:00:00.000Z".to_string(),
        );
        assert_eq!(
            record,
            serde_json::json!({
                "type": "game_finished",
                "timestamp": "2020-01-01T00:00:00.000Z",
                "player": 3,
                "correct": 4,
                "answers": 5,
            })
        );
    }
}
