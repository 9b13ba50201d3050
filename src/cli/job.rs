//! stagetime job command implementation.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::ingest::{ingest_log, CancelFlag, ScanStats};
use crate::metrics::{aggregate_stages, summarize_job, JobMetrics};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct JobOptions {
    pub log: Option<PathBuf>,
    pub cancel: CancelFlag,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct JobOutput {
    log: PathBuf,
    job: JobMetrics,
    scan: ScanStats,
}

pub fn run(options: JobOptions) -> Result<()> {
    let ctx = super::load_report_context(options.log)?;
    let report = ingest_log(&ctx.log, &options.cancel)?;
    let stages = aggregate_stages(&report.store);
    let job = summarize_job(&stages)?;

    let output = JobOutput {
        log: ctx.log.clone(),
        job,
        scan: report.scan,
    };

    let time_format = &ctx.config.report.time_format;
    let mut human = HumanOutput::new("Job window");
    human.push_summary("Log", ctx.log.display().to_string());
    human.push_summary("Job start", output.job.job_start.to_string());
    human.push_summary("Job end", output.job.job_end.to_string());
    if let (Some(start), Some(end)) = (output.job.job_start_time, output.job.job_end_time) {
        human.push_summary("Started", start.format(time_format).to_string());
        human.push_summary("Finished", end.format(time_format).to_string());
    }
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

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "job",
        &output,
        Some(&human),
    )
}
