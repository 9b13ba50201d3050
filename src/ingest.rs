//! The ingestion pass: stream, extract, accumulate.
//!
//! Decoder and extractor are fused into one pull-based loop; each line is
//! decoded, parsed, and stored before the next is requested, so memory use
//! is bounded by one line regardless of log size.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::decode::LogLines;
use crate::error::{Error, Result};
use crate::extract::{extract_line, Extraction, SkipReason};
use crate::store::EventStore;

/// Cooperative cancellation flag checked between line reads.
///
/// Clones share the flag, so a signal handler can hold one end while the
/// ingestion loop polls the other.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the ingestion stop before its next line.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Counters describing one ingestion pass.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines decoded from the log, blank ones included.
    pub lines_read: u64,
    /// Lines that failed to parse as records.
    pub lines_malformed: u64,
    /// Well-formed records of kinds we do not keep.
    pub events_ignored: u64,
    /// Task events appended to the store.
    pub events_extracted: u64,
}

/// Everything one ingestion pass produced.
#[derive(Debug)]
pub struct IngestReport {
    pub store: EventStore,
    pub scan: ScanStats,
}

/// Drain a compressed event log into an event store.
///
/// Malformed lines and foreign record kinds are counted, traced at debug
/// level, and dropped; they never fail the run. Open and decode failures
/// abort it, as does a raised [`CancelFlag`].
pub fn ingest_log(path: &Path, cancel: &CancelFlag) -> Result<IngestReport> {
    let mut store = EventStore::new();
    let mut scan = ScanStats::default();

    for line in LogLines::open(path)? {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let line = line?;
        scan.lines_read += 1;

        match extract_line(&line) {
            Extraction::Event(event) => {
                store.push(event);
                scan.events_extracted += 1;
            }
            Extraction::Skip(SkipReason::Blank) => {}
            Extraction::Skip(SkipReason::Malformed) => {
                scan.lines_malformed += 1;
                debug!(line = scan.lines_read, "skipping malformed log line");
            }
            Extraction::Skip(SkipReason::Ignored) => {
                scan.events_ignored += 1;
            }
        }
    }

    debug!(
        lines = scan.lines_read,
        events = scan.events_extracted,
        malformed = scan.lines_malformed,
        ignored = scan.events_ignored,
        "event log drained"
    );

    Ok(IngestReport { store, scan })
}
