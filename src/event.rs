//! Task lifecycle event model.
//!
//! One `TaskEvent` is a single observation extracted from the log: a task
//! starting or finishing, with the timestamps its record carried. Events are
//! immutable once constructed; timing math lives in the `metrics` module.

use serde::{Deserialize, Serialize};

/// Sentinel for an identifier the record did not carry.
pub const UNKNOWN_ID: i64 = -1;

/// Which lifecycle transition a record describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    Start,
    End,
}

impl TaskEventKind {
    /// Map a record's `Event` discriminator to a kind, if it is one we keep.
    pub fn from_discriminator(event: &str) -> Option<Self> {
        match event {
            "SparkListenerTaskStart" => Some(TaskEventKind::Start),
            "SparkListenerTaskEnd" => Some(TaskEventKind::End),
            _ => None,
        }
    }

    /// The discriminator string this kind was extracted from.
    pub fn discriminator(&self) -> &'static str {
        match self {
            TaskEventKind::Start => "SparkListenerTaskStart",
            TaskEventKind::End => "SparkListenerTaskEnd",
        }
    }
}

/// A normalized task lifecycle event.
///
/// Identifier fields use [`UNKNOWN_ID`] when the record lacked them; the
/// timestamps stay `None` so that "absent" never collides with a real epoch
/// value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskEvent {
    pub task_id: i64,
    pub stage_id: i64,
    pub kind: TaskEventKind,
    /// Milliseconds since epoch when the task launched, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_time: Option<i64>,
    /// Milliseconds since epoch when the task finished, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<i64>,
}

impl TaskEvent {
    /// Task execution time in milliseconds, when both timestamps are present.
    ///
    /// May be negative for inconsistent records; callers decide what to do
    /// with that.
    pub fn exec_time_ms(&self) -> Option<i64> {
        match (self.launch_time, self.finish_time) {
            (Some(launch), Some(finish)) => Some(finish.saturating_sub(launch)),
            _ => None,
        }
    }
}
