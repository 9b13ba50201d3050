//! stagetime analyze command implementation.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::ingest::{ingest_log, CancelFlag, ScanStats};
use crate::metrics::{aggregate_stages, summarize_job, JobMetrics, StageMetrics};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct AnalyzeOptions {
    pub log: Option<PathBuf>,
    pub cancel: CancelFlag,
    pub verbose: bool,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput {
    log: PathBuf,
    stage_count: usize,
    stages: Vec<StageMetrics>,
    job: JobMetrics,
    scan: ScanStats,
}

pub fn run(options: AnalyzeOptions) -> Result<()> {
    let ctx = super::load_report_context(options.log)?;
    let report = ingest_log(&ctx.log, &options.cancel)?;
    let stages = aggregate_stages(&report.store);
    let job = summarize_job(&stages)?;

    let output = AnalyzeOutput {
        log: ctx.log.clone(),
        stage_count: stages.len(),
        stages,
        job,
        scan: report.scan,
    };

    let time_format = &ctx.config.report.time_format;
    let mut human = HumanOutput::new("Event log analysis");
    human.push_summary("Log", ctx.log.display().to_string());
    human.push_summary("Lines read", report.scan.lines_read.to_string());
    human.push_summary("Task events", report.scan.events_extracted.to_string());
    human.push_summary("Stages", output.stage_count.to_string());
    human.push_summary(
        "Total job time",
        format!("{} ms", output.job.total_job_time_ms),
    );
    if report.scan.lines_malformed > 0 {
        human.push_warning(format!(
            "skipped {} malformed line(s)",
            report.scan.lines_malformed
        ));
    }
    for stage in &output.stages {
        human.push_detail(super::stages::stage_line(
            stage,
            options.verbose,
            time_format,
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "analyze",
        &output,
        Some(&human),
    )
}
