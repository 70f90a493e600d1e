//! Subprocess execution for external CLI collaborators
//!
//! Executes a [`CommandSpec`], buffering stdout and stderr until the process
//! terminates. There is no streaming and no retry: a single failure is
//! terminal for the invocation. A configurable timeout bounds the wait; on
//! expiry the process is killed and a [`InvokeError::Timeout`] is returned.

use ordbridge_domain::CommandSpec;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info};

/// Captured outcome of one external command.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Trimmed stderr, or a placeholder when the tool wrote nothing.
    pub fn error_message(&self) -> String {
        let trimmed = self.stderr.trim();
        if trimmed.is_empty() {
            "unknown error".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Errors raised before or while waiting for the external process.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Executable '{0}' not found; is it installed and on PATH?")]
    Unreachable(String),

    #[error("Failed to spawn '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    #[error("Failed to read process output: {0}")]
    Wait(String),
}

/// Execute a command, capturing stdout, stderr and the exit code.
pub fn invoke(spec: &CommandSpec, timeout: Duration) -> Result<ExecutionResult, InvokeError> {
    info!(command = %spec, "executing external command");

    let mut cmd = Command::new(spec.executable());
    cmd.args(spec.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InvokeError::Unreachable(spec.executable().to_string())
        } else {
            InvokeError::Spawn {
                executable: spec.executable().to_string(),
                source: e,
            }
        }
    })?;

    // Drain both pipes off-thread from the start: a child that fills the
    // pipe buffer before exiting would otherwise block on write while the
    // parent polls, and the invocation would be killed at the timeout.
    let stdout_reader = child.stdout.take().map(spawn_drain);
    let stderr_reader = child.stderr.take().map(spawn_drain);

    let status = wait_with_timeout(&mut child, timeout).map_err(|e| match e {
        WaitError::Timeout => {
            error!(command = %spec, seconds = timeout.as_secs(), "external command timed out");
            InvokeError::Timeout {
                command: spec.display_line(),
                seconds: timeout.as_secs(),
            }
        }
        WaitError::Io(message) => InvokeError::Wait(message),
    })?;

    let stdout = stdout_reader.map(join_drain).unwrap_or_default();
    let stderr = stderr_reader.map(join_drain).unwrap_or_default();

    let result = ExecutionResult {
        exit_code: status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&stdout).to_string(),
        stderr: String::from_utf8_lossy(&stderr).to_string(),
    };

    if !result.success() {
        error!(command = %spec, exit_code = result.exit_code, stderr = %result.error_message(),
            "external command failed");
    }

    Ok(result)
}

enum WaitError {
    Timeout,
    Io(String),
}

/// Read a pipe to the end on a dedicated thread.
fn spawn_drain<R>(mut stream: R) -> std::thread::JoinHandle<Vec<u8>>
where
    R: std::io::Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        std::io::Read::read_to_end(&mut stream, &mut buf).ok();
        buf
    })
}

fn join_drain(handle: std::thread::JoinHandle<Vec<u8>>) -> Vec<u8> {
    handle.join().unwrap_or_default()
}

/// Wait for a child process, killing it when the timeout expires. The
/// caller must already be draining the output pipes.
fn wait_with_timeout(
    child: &mut std::process::Child,
    timeout: Duration,
) -> Result<std::process::ExitStatus, WaitError> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(WaitError::Timeout);
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(WaitError::Io(format!("Failed to wait for process: {}", e)));
            }
        }
    }
}
