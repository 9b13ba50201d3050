//! Stage and job timing metrics derived from the event store.
//!
//! Aggregation is a single pass over the accumulated events: group by stage,
//! reduce with min/max/mean, then fold the stage rows into one job figure.
//! Both functions are pure reads of their input, so re-running them yields
//! identical results.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::EventStore;

/// Timing statistics for one stage, display-ready.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StageMetrics {
    pub stage_id: i64,
    /// Earliest task launch in the stage (ms since epoch).
    pub stage_start: i64,
    /// Latest task finish in the stage (ms since epoch).
    pub stage_end: i64,
    /// Mean task execution time in ms, rounded to 2 decimals.
    pub task_avg: f64,
    /// Longest task execution time in ms.
    pub task_max: i64,
    pub stage_duration_ms: i64,
    /// `stage_start` as calendar time; `None` only for timestamps outside
    /// chrono's representable range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_start_time: Option<DateTime<Utc>>,
    /// `stage_end` as calendar time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_end_time: Option<DateTime<Utc>>,
}

/// Whole-job execution time, reduced from the stage rows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JobMetrics {
    pub job_start: i64,
    pub job_end: i64,
    pub total_job_time_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_end_time: Option<DateTime<Utc>>,
}

/// Compute per-stage timing statistics, ordered by ascending stage id.
///
/// A row missing either timestamp is excluded from every aggregate rather
/// than leaking a null into a mean; a stage with no complete row at all is
/// omitted. The `-1` unknown-stage bucket aggregates like any other stage.
pub fn aggregate_stages(store: &EventStore) -> Vec<StageMetrics> {
    let mut stages = Vec::new();

    for (stage_id, events) in store.by_stage() {
        let mut stage_start: Option<i64> = None;
        let mut stage_end: Option<i64> = None;
        let mut exec_sum: i64 = 0;
        let mut exec_max: Option<i64> = None;
        let mut eligible: u64 = 0;

        for event in events {
            let (Some(launch), Some(finish)) = (event.launch_time, event.finish_time) else {
                continue;
            };
            let exec = finish.saturating_sub(launch);

            stage_start = Some(stage_start.map_or(launch, |cur| cur.min(launch)));
            stage_end = Some(stage_end.map_or(finish, |cur| cur.max(finish)));
            exec_sum = exec_sum.saturating_add(exec);
            exec_max = Some(exec_max.map_or(exec, |cur| cur.max(exec)));
            eligible += 1;
        }

        let (Some(stage_start), Some(stage_end), Some(task_max)) =
            (stage_start, stage_end, exec_max)
        else {
            continue;
        };

        stages.push(StageMetrics {
            stage_id,
            stage_start,
            stage_end,
            task_avg: round2(exec_sum as f64 / eligible as f64),
            task_max,
            stage_duration_ms: stage_end.saturating_sub(stage_start),
            stage_start_time: DateTime::from_timestamp_millis(stage_start),
            stage_end_time: DateTime::from_timestamp_millis(stage_end),
        });
    }

    stages
}

/// Reduce the stage rows into the single job-level figure.
///
/// An empty sequence is a named condition the caller must handle; a
/// min/max over nothing would fabricate a zero that looks like real data.
pub fn summarize_job(stages: &[StageMetrics]) -> Result<JobMetrics> {
    let first = stages.first().ok_or(Error::NoData)?;

    let mut job_start = first.stage_start;
    let mut job_end = first.stage_end;
    for stage in &stages[1..] {
        job_start = job_start.min(stage.stage_start);
        job_end = job_end.max(stage.stage_end);
    }

    Ok(JobMetrics {
        job_start,
        job_end,
        total_job_time_ms: job_end.saturating_sub(job_start),
        job_start_time: DateTime::from_timestamp_millis(job_start),
        job_end_time: DateTime::from_timestamp_millis(job_end),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
