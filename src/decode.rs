//! Streaming decode of a zstd-compressed event log.
//!
//! The log is one continuous zstd frame wrapping line-oriented text. The
//! reader decompresses incrementally, so a multi-gigabyte log never has to
//! fit in memory.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use zstd::stream::read::Decoder;

use crate::error::{Error, Result};

/// Lazy line source over a zstd-compressed log file.
///
/// Owns the file handle and decompression state; dropping the value releases
/// both on every exit path. The sequence is finite and not restartable: call
/// [`LogLines::open`] again to re-read a file.
pub struct LogLines {
    path: PathBuf,
    lines: Lines<BufReader<Decoder<'static, BufReader<File>>>>,
}

impl LogLines {
    /// Open a compressed log for streaming line iteration.
    ///
    /// A missing file maps to [`Error::LogNotFound`]; any other open failure
    /// surfaces as [`Error::Io`]. Both abort the pipeline.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => Error::LogNotFound(path.to_path_buf()),
            _ => Error::Io(err),
        })?;
        let decoder = Decoder::new(file).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(decoder).lines(),
        })
    }
}

impl Iterator for LogLines {
    type Item = Result<String>;

    /// Yield the next decoded line.
    ///
    /// A read failure here means the frame is truncated or corrupt (or the
    /// text is not UTF-8); there is no valid-prefix semantics for the format,
    /// so it surfaces as [`Error::Decode`] and the caller aborts the run.
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.lines.next()?;
        Some(item.map_err(|source| Error::Decode {
            path: self.path.clone(),
            source,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_compressed(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        let bytes = zstd::stream::encode_all(text.as_bytes(), 3).expect("compress");
        fs::write(&path, bytes).expect("write log");
        path
    }

    #[test]
    fn reads_lines_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_compressed(&dir, "events.zst", "alpha\nbeta\ngamma\n");

        let lines: Vec<String> = LogLines::open(&path)
            .expect("open")
            .collect::<Result<_>>()
            .expect("decode");
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn fresh_open_rereads_from_the_start() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_compressed(&dir, "events.zst", "only\n");

        for _ in 0..2 {
            let lines: Vec<String> = LogLines::open(&path)
                .expect("open")
                .collect::<Result<_>>()
                .expect("decode");
            assert_eq!(lines, vec!["only"]);
        }
    }

    #[test]
    fn missing_file_is_log_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.zst");

        let err = LogLines::open(&path).err().expect("open should fail");
        assert!(matches!(err, Error::LogNotFound(_)));
    }

    #[test]
    fn garbage_bytes_fail_as_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("events.zst");
        fs::write(&path, b"definitely not a zstd frame").expect("write");

        let result =
            LogLines::open(&path).and_then(|lines| lines.collect::<Result<Vec<String>>>());
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn truncated_frame_fails_mid_stream() {
        let dir = tempfile::tempdir().expect("tempdir");
        let text = "a line of event text\n".repeat(4096);
        let path = write_compressed(&dir, "events.zst", &text);

        let bytes = fs::read(&path).expect("read");
        fs::write(&path, &bytes[..bytes.len() / 2]).expect("truncate");

        let result =
            LogLines::open(&path).and_then(|lines| lines.collect::<Result<Vec<String>>>());
        assert!(matches!(result, Err(Error::Decode { .. })));
    }
}
