//! Operation scripts for replaying window workloads.
//!
//! One operation per line. Blank lines are skipped and a `#` that opens the
//! line or is followed by whitespace starts a comment, so `delete #3` still
//! names record 3:
//!
//! ```text
//! insert <payload...>
//! delete <id>
//! undo-insert <mark> <payload...>
//! undo-delete <id> <mark>
//! dump
//! take-trigger
//! ```
//!
//! Payloads are the rest of the line, trimmed.

use crate::store::RecordStore;
use crate::types::{RecordId, UndoMark};
use crate::window::{InsertOutcome, WindowManager};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOp {
    Insert(String),
    Delete(RecordId),
    UndoInsert { mark: UndoMark, payload: String },
    UndoDelete { id: RecordId, mark: UndoMark },
    Dump,
    TakeTrigger,
}

/// A parsed operation with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub op: ReplayOp,
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ReplayError> {
    let mut ops = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }
        let (command, rest) = match text.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (text, ""),
        };
        let err = |message: String| ReplayError::Parse { line, message };
        let op = match command {
            "insert" => {
                if rest.is_empty() {
                    return Err(err("insert needs a payload".to_string()));
                }
                ReplayOp::Insert(rest.to_string())
            }
            "delete" => ReplayOp::Delete(parse_id(rest).map_err(err)?),
            "undo-insert" => {
                let (mark, payload) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| err("undo-insert needs <mark> <payload>".to_string()))?;
                ReplayOp::UndoInsert {
                    mark: parse_mark(mark).map_err(err)?,
                    payload: payload.trim().to_string(),
                }
            }
            "undo-delete" => {
                let mut parts = rest.split_whitespace();
                let (Some(id), Some(mark), None) = (parts.next(), parts.next(), parts.next())
                else {
                    return Err(err("undo-delete needs <id> <mark>".to_string()));
                };
                ReplayOp::UndoDelete {
                    id: parse_id(id).map_err(err)?,
                    mark: parse_mark(mark).map_err(err)?,
                }
            }
            "dump" => ReplayOp::Dump,
            "take-trigger" => ReplayOp::TakeTrigger,
            other => return Err(err(format!("unknown operation '{}'", other))),
        };
        ops.push(ScriptLine { line, op });
    }
    Ok(ops)
}

fn strip_comment(raw: &str) -> &str {
    for (index, c) in raw.char_indices() {
        if c == '#' && raw[index + 1..].chars().next().map_or(true, char::is_whitespace) {
            return &raw[..index];
        }
    }
    raw
}

fn parse_id(text: &str) -> Result<RecordId, String> {
    text.trim_start_matches('#')
        .parse::<u32>()
        .map(RecordId)
        .map_err(|e| format!("invalid record id '{}': {}", text, e))
}

fn parse_mark(text: &str) -> Result<UndoMark, String> {
    text.parse::<usize>()
        .map(UndoMark)
        .map_err(|e| format!("invalid undo mark '{}': {}", text, e))
}

/// Apply `ops` in order, returning one report line (or dump block) per op.
///
/// Forward-path failures are reported and replay continues.
pub fn run_script<S>(manager: &mut WindowManager<S>, ops: &[ScriptLine]) -> Vec<String>
where
    S: RecordStore<Payload = String>,
{
    let mut lines = Vec::with_capacity(ops.len());
    for ScriptLine { line, op } in ops {
        let entry = match op {
            ReplayOp::Insert(payload) => match manager.insert(payload.clone()) {
                Ok(InsertOutcome::Staged { id }) => format!("insert {} staged", id),
                Ok(InsertOutcome::Slid { id, report }) => format!(
                    "insert {} slid: evicted {}, promoted {}, window {}",
                    id,
                    report.evicted.len(),
                    report.promoted,
                    report.tuple_count
                ),
                Err(e) => format!("line {}: insert failed: {}", line, e),
            },
            ReplayOp::Delete(id) => match manager.delete(*id, true) {
                Ok(()) => format!("delete {} ok", id),
                Err(e) => format!("line {}: delete failed: {}", line, e),
            },
            ReplayOp::UndoInsert { mark, payload } => {
                manager.insert_for_undo(payload.clone(), *mark);
                format!("undo-insert mark {} applied", mark.0)
            }
            ReplayOp::UndoDelete { id, mark } => {
                manager.delete_for_undo(*id, *mark);
                format!("undo-delete {} mark {} applied", id, mark.0)
            }
            ReplayOp::Dump => manager.dump().trim_end().to_string(),
            ReplayOp::TakeTrigger => match manager.take_trigger() {
                Some(signal) => format!("trigger fired at {}", signal.newest_window_id),
                None => "trigger none".to_string(),
            },
        };
        lines.push(entry);
    }
    lines
}
