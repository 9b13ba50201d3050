//! stagetime stages command implementation.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::ingest::{ingest_log, CancelFlag, ScanStats};
use crate::metrics::{aggregate_stages, StageMetrics};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct StagesOptions {
    pub log: Option<PathBuf>,
    pub cancel: CancelFlag,
    pub verbose: bool,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct StagesOutput {
    log: PathBuf,
    stage_count: usize,
    stages: Vec<StageMetrics>,
    scan: ScanStats,
}

pub fn run(options: StagesOptions) -> Result<()> {
    let ctx = super::load_report_context(options.log)?;
    let report = ingest_log(&ctx.log, &options.cancel)?;
    let stages = aggregate_stages(&report.store);

    let output = StagesOutput {
        log: ctx.log.clone(),
        stage_count: stages.len(),
        stages,
        scan: report.scan,
    };

    let mut human = HumanOutput::new("Stage timing");
    human.push_summary("Log", ctx.log.display().to_string());
    human.push_summary("Lines read", report.scan.lines_read.to_string());
    human.push_summary("Task events", report.scan.events_extracted.to_string());
    human.push_summary("Stages", output.stage_count.to_string());
    if report.scan.lines_malformed > 0 {
        human.push_warning(format!(
            "skipped {} malformed line(s)",
            report.scan.lines_malformed
        ));
    }
    if output.stages.is_empty() {
        human.push_warning("no complete task timing rows in the log");
    }
    for stage in &output.stages {
        human.push_detail(stage_line(
            stage,
            options.verbose,
            &ctx.config.report.time_format,
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "stages",
        &output,
        Some(&human),
    )
}

/// Render one stage row as a report line.
pub(crate) fn stage_line(stage: &StageMetrics, verbose: bool, time_format: &str) -> String {
    let mut line = format!(
        "stage {}: start {} end {} ({} ms), avg {:.2} ms, max {} ms",
        stage.stage_id,
        stage.stage_start,
        stage.stage_end,
        stage.stage_duration_ms,
        stage.task_avg,
        stage.task_max
    );
    if verbose {
        if let (Some(start), Some(end)) = (stage.stage_start_time, stage.stage_end_time) {
            line.push_str(&format!(
                " [{} .. {}]",
                start.format(time_format),
                end.format(time_format)
            ));
        }
    }
    line
}
