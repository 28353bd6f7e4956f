//! Outcomes emitted by window operations

use crate::types::RecordId;
use serde::{Deserialize, Serialize};

/// Raised when a slide completes on a table with downstream triggers.
///
/// Carries no per-record detail: the executor re-derives the fired records
/// from `newest_window_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSignal {
    pub newest_window_id: RecordId,
}

/// What a completed slide did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideReport {
    /// Records evicted from the old end, in eviction order.
    pub evicted: Vec<RecordId>,
    /// Staged records confirmed as window members.
    pub promoted: usize,
    /// Last record visited by the tagging pass.
    pub newest_window_id: Option<RecordId>,
    /// Window members after the slide.
    pub tuple_count: usize,
    pub trigger: Option<TriggerSignal>,
}

/// Result of a successful forward insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InsertOutcome {
    /// Record staged; no slide was due.
    Staged { id: RecordId },
    /// Record staged and a slide ran.
    Slid { id: RecordId, report: SlideReport },
}

impl InsertOutcome {
    pub fn id(&self) -> RecordId {
        match self {
            Self::Staged { id } | Self::Slid { id, .. } => *id,
        }
    }

    pub fn slide(&self) -> Option<&SlideReport> {
        match self {
            Self::Staged { .. } => None,
            Self::Slid { report, .. } => Some(report),
        }
    }

    pub fn fired_trigger(&self) -> Option<TriggerSignal> {
        self.slide().and_then(|report| report.trigger)
    }
}
