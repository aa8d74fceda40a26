//! Invocation of the external CLI assistant.
//!
//! Both modes build the same non-interactive command line,
//! `<bin> chat --message <prompt>`, with one `--file <path>` pair per staged
//! attachment in buffered mode. There is no shell in between: arguments go
//! straight to the process.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, error, info};

use crate::error::{CoreError, Result};

/// Runs the external CLI for one logical request.
///
/// The binary name is configuration, which is also the test seam: tests point
/// it at stub shell scripts instead of the real tool.
#[derive(Debug, Clone)]
pub struct CliInvoker {
    bin: String,
    timeout: Option<Duration>,
}

impl CliInvoker {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            timeout: None,
        }
    }

    /// Bound buffered executions to `limit`; exceeding it kills the process
    /// and fails the request. Off by default.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    fn chat_command(&self, prompt: &str) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("chat").arg("--message").arg(prompt);
        cmd.stdin(Stdio::null());
        cmd
    }

    /// Run to completion and capture the output.
    ///
    /// Returns the trimmed combined stdout/stderr blob on success. A non-zero
    /// exit fails with the captured output included so the caller can see what
    /// the tool printed. No retries: a failed invocation ends the request.
    pub async fn run_buffered(
        &self,
        prompt: &str,
        attachments: impl IntoIterator<Item = &Path>,
    ) -> Result<String> {
        let mut cmd = self.chat_command(prompt);
        let mut file_args = 0usize;
        for path in attachments {
            cmd.arg("--file").arg(path);
            file_args += 1;
        }
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // Reaps the child if a timeout abandons wait_with_output below.
        cmd.kill_on_drop(true);

        info!(bin = %self.bin, files = file_args, "Running buffered CLI invocation");

        let child = cmd.spawn().map_err(|source| {
            error!(bin = %self.bin, error = %source, "Failed to spawn CLI process");
            CoreError::SpawnFailed {
                bin: self.bin.clone(),
                source,
            }
        })?;

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result?,
                Err(_) => {
                    error!(bin = %self.bin, secs = limit.as_secs(), "CLI invocation timed out");
                    return Err(CoreError::Timeout {
                        bin: self.bin.clone(),
                        secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait_with_output().await?,
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim().to_string();

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            error!(bin = %self.bin, code, "CLI invocation failed");
            return Err(CoreError::CommandFailed {
                bin: self.bin.clone(),
                code,
                output: combined,
            });
        }

        debug!(bin = %self.bin, bytes = combined.len(), "CLI invocation completed");
        Ok(combined)
    }

    /// Start the process and expose its stdout as a line feed.
    ///
    /// Attachments are not forwarded in this mode; only the prompt text goes
    /// to the CLI. Spawn or pipe failures mean no output was ever produced.
    pub async fn spawn_streamed(&self, prompt: &str) -> Result<StreamedInvocation> {
        let mut cmd = self.chat_command(prompt);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::null());
        cmd.kill_on_drop(true);

        info!(bin = %self.bin, "Starting streamed CLI invocation");

        let mut child = cmd.spawn().map_err(|source| {
            error!(bin = %self.bin, error = %source, "Failed to spawn CLI process");
            CoreError::SpawnFailed {
                bin: self.bin.clone(),
                source,
            }
        })?;

        let stdout = child.stdout.take().ok_or_else(|| CoreError::SpawnFailed {
            bin: self.bin.clone(),
            source: std::io::Error::other("failed to capture stdout"),
        })?;

        Ok(StreamedInvocation {
            bin: self.bin.clone(),
            lines: BufReader::new(stdout).lines(),
            child,
        })
    }
}

/// A live streamed invocation: the stdout line feed plus the child itself,
/// which is waited on once the feed is exhausted.
#[derive(Debug)]
pub struct StreamedInvocation {
    bin: String,
    lines: Lines<BufReader<ChildStdout>>,
    child: Child,
}

impl StreamedInvocation {
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Next raw output line, or `None` at end of stream. Lines come back in
    /// the order the process produces them; blank-line handling is left to
    /// the caller.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    /// Wait for the process to exit after the output is exhausted.
    pub async fn wait(mut self) -> Result<ExitStatus> {
        Ok(self.child.wait().await?)
    }
}
