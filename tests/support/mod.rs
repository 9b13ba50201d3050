use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch directory holding compressed event logs and optional config.
pub struct LogFixture {
    dir: TempDir,
}

impl LogFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Join `lines`, compress them as a single zstd frame, and write the
    /// result under the fixture directory.
    pub fn write_log(&self, name: &str, lines: &[String]) -> PathBuf {
        let text = lines.join("\n");
        let bytes = zstd::stream::encode_all(text.as_bytes(), 3).expect("compress log");
        self.write_raw(name, &bytes)
    }

    pub fn write_raw(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, bytes).expect("write file");
        path
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join(".stagetime.toml");
        fs::write(&path, contents).expect("write config");
        path
    }
}

pub fn task_start_line(task_id: i64, stage_id: i64, launch: i64) -> String {
    format!(
        r#"{{"Event":"SparkListenerTaskStart","Stage ID":{stage_id},"Task Info":{{"Task ID":{task_id},"Launch Time":{launch}}}}}"#
    )
}

pub fn task_end_line(task_id: i64, stage_id: i64, launch: i64, finish: i64) -> String {
    format!(
        r#"{{"Event":"SparkListenerTaskEnd","Stage ID":{stage_id},"Task Info":{{"Task ID":{task_id},"Launch Time":{launch},"Finish Time":{finish}}}}}"#
    )
}

pub fn stagetime_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stagetime").expect("binary");
    cmd.env_remove("STAGETIME_LOG");
    cmd
}
