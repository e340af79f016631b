//! Shared helpers for CLI specs

use std::path::{Path, PathBuf};

pub use predicates::str::contains;

/// A temporary project directory holding scenario files
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into the project and return its path
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("write scenario file");
        path
    }

    /// A gavel command rooted in this project
    pub fn gavel(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("gavel").expect("gavel binary");
        cmd.current_dir(self.path());
        cmd
    }
}

pub const BASIC_SCENARIO: &str = r#"
[events."trade.turn"]
type = "object"
required = ["value"]

[events."trade.turn".properties.value]
type = "integer"

[redact]
"*" = ["secret"]

[[publish]]
event = "trade.turn"

[publish.payload]
value = 3
secret = "token"
"#;

pub const GOVERN_SCENARIO: &str = r#"
[policies]
max_drawdown = 1.5
min_return = 0.0

[input]
subject = "trade"
score = 0.4

[input.metadata]
max_drawdown = 2.0

[input.plan]
status = "new"
"#;
