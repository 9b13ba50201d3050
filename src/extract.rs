//! Tolerant extraction of task events from raw log lines.
//!
//! Event logs interleave many record kinds and occasionally end in a
//! truncated line, so a line that fails to parse is an expected outcome, not
//! an error. Every line maps to exactly one [`Extraction`], which keeps the
//! skip path an explicit, testable branch.

use serde::Deserialize;

use crate::event::{TaskEvent, TaskEventKind, UNKNOWN_ID};

/// Outcome of offering one line to the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The line was a task start/end record.
    Event(TaskEvent),
    /// The line contributed nothing; the reason says why.
    Skip(SkipReason),
}

/// Why a line produced no event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only line.
    Blank,
    /// Not parseable as a JSON record of the expected shape.
    Malformed,
    /// Well-formed record of a kind we do not keep.
    Ignored,
}

/// Wire shape of a raw log record, limited to the fields we read.
///
/// Everything is optional: records routinely omit fields, and a missing
/// field must default rather than fail the record.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Event")]
    event: Option<String>,
    #[serde(rename = "Stage ID")]
    stage_id: Option<i64>,
    #[serde(rename = "Task Info")]
    task_info: Option<RawTaskInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTaskInfo {
    #[serde(rename = "Task ID")]
    task_id: Option<i64>,
    #[serde(rename = "Launch Time")]
    launch_time: Option<i64>,
    #[serde(rename = "Finish Time")]
    finish_time: Option<i64>,
}

/// Parse one line into at most one normalized task event.
///
/// Only task start/end records are retained. Missing identifiers default to
/// [`UNKNOWN_ID`]; missing timestamps stay `None`. Unparseable syntax is the
/// only thing that marks a line malformed.
pub fn extract_line(line: &str) -> Extraction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Extraction::Skip(SkipReason::Blank);
    }

    let record: RawRecord = match serde_json::from_str(trimmed) {
        Ok(record) => record,
        Err(_) => return Extraction::Skip(SkipReason::Malformed),
    };

    let kind = match record
        .event
        .as_deref()
        .and_then(TaskEventKind::from_discriminator)
    {
        Some(kind) => kind,
        None => return Extraction::Skip(SkipReason::Ignored),
    };

    let info = record.task_info.unwrap_or_default();
    Extraction::Event(TaskEvent {
        task_id: info.task_id.unwrap_or(UNKNOWN_ID),
        stage_id: record.stage_id.unwrap_or(UNKNOWN_ID),
        kind,
        launch_time: info.launch_time,
        finish_time: info.finish_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_event(line: &str) -> TaskEvent {
        match extract_line(line) {
            Extraction::Event(event) => event,
            other => panic!("expected event, got {other:?}"),
        }
    }

    #[test]
    fn extracts_task_end_record() {
        let line = r#"{"Event":"SparkListenerTaskEnd","Stage ID":2,"Task Info":{"Task ID":17,"Launch Time":1000,"Finish Time":1450}}"#;
        let event = expect_event(line);
        assert_eq!(event.kind, TaskEventKind::End);
        assert_eq!(event.task_id, 17);
        assert_eq!(event.stage_id, 2);
        assert_eq!(event.launch_time, Some(1000));
        assert_eq!(event.finish_time, Some(1450));
    }

    #[test]
    fn extracts_task_start_record() {
        let line = r#"{"Event":"SparkListenerTaskStart","Stage ID":0,"Task Info":{"Task ID":3,"Launch Time":500}}"#;
        let event = expect_event(line);
        assert_eq!(event.kind, TaskEventKind::Start);
        assert_eq!(event.launch_time, Some(500));
        assert_eq!(event.finish_time, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let line = r#"{"Event":"SparkListenerTaskEnd","Stage ID":1,"Stage Attempt ID":0,"Task Type":"ResultTask","Task Info":{"Task ID":5,"Index":4,"Executor ID":"1","Launch Time":10,"Finish Time":20}}"#;
        let event = expect_event(line);
        assert_eq!(event.task_id, 5);
        assert_eq!(event.exec_time_ms(), Some(10));
    }

    #[test]
    fn missing_sub_fields_default_to_sentinels() {
        let line = r#"{"Event":"SparkListenerTaskStart","Task Info":{}}"#;
        let event = expect_event(line);
        assert_eq!(event.task_id, UNKNOWN_ID);
        assert_eq!(event.stage_id, UNKNOWN_ID);
        assert_eq!(event.launch_time, None);
        assert_eq!(event.finish_time, None);
    }

    #[test]
    fn missing_task_info_behaves_as_all_fields_missing() {
        let line = r#"{"Event":"SparkListenerTaskEnd","Stage ID":4}"#;
        let event = expect_event(line);
        assert_eq!(event.stage_id, 4);
        assert_eq!(event.task_id, UNKNOWN_ID);
        assert_eq!(event.exec_time_ms(), None);
    }

    #[test]
    fn blank_lines_are_blank_skips() {
        assert_eq!(extract_line(""), Extraction::Skip(SkipReason::Blank));
        assert_eq!(extract_line("   \t"), Extraction::Skip(SkipReason::Blank));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        assert_eq!(
            extract_line("{ not json"),
            Extraction::Skip(SkipReason::Malformed)
        );
        assert_eq!(
            extract_line(r#"{"Event":"SparkListenerTaskEnd","Task Info":"#),
            Extraction::Skip(SkipReason::Malformed)
        );
        // valid JSON, but not a record-shaped object
        assert_eq!(
            extract_line("[1,2,3]"),
            Extraction::Skip(SkipReason::Malformed)
        );
    }

    #[test]
    fn wrong_field_types_are_malformed() {
        let line = r#"{"Event":"SparkListenerTaskEnd","Stage ID":1,"Task Info":{"Task ID":"seventeen"}}"#;
        assert_eq!(extract_line(line), Extraction::Skip(SkipReason::Malformed));
    }

    #[test]
    fn unrelated_records_are_ignored() {
        let line = r#"{"Event":"SparkListenerStageCompleted","Stage Info":{"Stage ID":1}}"#;
        assert_eq!(extract_line(line), Extraction::Skip(SkipReason::Ignored));
    }

    #[test]
    fn missing_discriminator_is_ignored() {
        assert_eq!(
            extract_line(r#"{"Stage ID":1}"#),
            Extraction::Skip(SkipReason::Ignored)
        );
    }
}
