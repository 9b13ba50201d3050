//! stagetime - Spark Stage Timing Library
//!
//! This library provides the core functionality for the stagetime CLI tool,
//! turning raw Spark event logs into per-stage and whole-job timing reports.
//!
//! # Core Concepts
//!
//! - **Decoding**: Streaming line reads from zstd-compressed event logs
//! - **Extraction**: Tolerant per-line parsing of task lifecycle records
//! - **Event Store**: Append-only accumulation of task events in log order
//! - **Stage Metrics**: Per-stage min/max/mean reductions of task timing
//! - **Job Summary**: The whole-job execution window folded from stage rows
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.stagetime.toml`
//! - `decode`: zstd stream decoding into lines
//! - `error`: Error types and result aliases
//! - `event`: Task event records and their field defaults
//! - `extract`: Per-line record extraction and skip classification
//! - `ingest`: The decode-extract-store ingestion pass
//! - `metrics`: Stage aggregation and job summarization
//! - `output`: JSON envelopes and human-readable report rendering
//! - `store`: Append-only event store with stage grouping

pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod event;
pub mod extract;
pub mod ingest;
pub mod metrics;
pub mod output;
pub mod store;

pub use error::{Error, Result};
