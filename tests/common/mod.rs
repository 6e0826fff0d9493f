//! Common test utilities for Caboose CLI tests.
//!
//! `TestEnv` is an isolated project directory plus helpers to run the
//! caboose binary inside it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a caboose CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create temp project"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_caboose")),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file under the project root, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(path, content).expect("Failed to write file");
        self
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Run caboose from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from_with_env(&self, cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd).args(args);
        for var in [
            "CABOOSE_ASSETS_ROOT",
            "CABOOSE_BUNDLE",
            "CABOOSE_WORKER_SOCKET",
            "CABOOSE_VERBOSITY",
            "CABOOSE_LOG",
        ] {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute caboose");
        output_to_result(output)
    }

    /// A small native-only asset tree
    pub fn with_native_assets(self) -> Self {
        self.write("assets/js/normal.js", "@normal.js\n")
            .write("assets/js/sub/normal.js", "@sub/normal.js\n")
            .write(
                "assets/js/require2.js",
                "//= require js/normal\n//= require js/sub/normal\n",
            )
            .write("assets/js/error.js", "//= require not/found\n")
            .write("assets/js/errors.js", "//= require js/error\n")
            .write("assets/css/normal.css", "normal.css\n")
            .write(
                "assets/css/require.css",
                "/*\n *= require css/normal\n */\nrequire.css\n",
            )
            .write("assets/static.txt", "static.txt\n");
        self
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
