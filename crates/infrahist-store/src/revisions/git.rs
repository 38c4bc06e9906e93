//! Thin runner over the `git` executable

use crate::errors::{git_error, io_error, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Fixed identity and signing settings so commits never depend on user config
const COMMIT_SETTINGS: [&str; 6] = [
    "-c",
    "user.name=infrahist",
    "-c",
    "user.email=infrahist@localhost",
    "-c",
    "commit.gpgsign=false",
];

/// Whether a working `git` executable is on the PATH
pub fn git_installed() -> bool {
    Command::new("git")
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// `git -C <dir>` invocations against one repository
pub(crate) struct Git<'a> {
    dir: &'a Path,
}

impl<'a> Git<'a> {
    pub(crate) fn new(dir: &'a Path) -> Self {
        Self { dir }
    }

    fn output(&self, op: &str, args: &[&str], envs: &[(&str, String)]) -> Result<Output> {
        Command::new("git")
            .arg("-C")
            .arg(self.dir)
            .args(COMMIT_SETTINGS)
            .args(args)
            .envs(envs.iter().map(|(k, v)| (*k, v.as_str())))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| io_error(op, e))
    }

    /// Run and return raw stdout; a non-zero exit is an error
    pub(crate) fn run_with_env(
        &self,
        op: &str,
        args: &[&str],
        envs: &[(&str, String)],
    ) -> Result<Vec<u8>> {
        let output = self.output(op, args, envs)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(git_error(
                op,
                &format!("git {}: {}", args.join(" "), stderr),
            ));
        }
        Ok(output.stdout)
    }

    pub(crate) fn run(&self, op: &str, args: &[&str]) -> Result<Vec<u8>> {
        self.run_with_env(op, args, &[])
    }

    /// Run and return stdout as trimmed text
    pub(crate) fn run_text(&self, op: &str, args: &[&str]) -> Result<String> {
        let stdout = self.run(op, args)?;
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }

    /// Exit status only; used for existence probes
    pub(crate) fn succeeds(&self, op: &str, args: &[&str]) -> Result<bool> {
        Ok(self.output(op, args, &[])?.status.success())
    }
}
