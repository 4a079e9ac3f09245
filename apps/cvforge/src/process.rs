//! Child-process helper shared by the typesetter and external text extractors.
//!
//! Rendering is deterministic for a given input, so nothing here retries.

use std::process::Output;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {}s", .timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },

    #[error("{program} exited with {status}: {stderr_tail}")]
    Failed {
        program: String,
        status: String,
        stderr_tail: String,
    },
}

/// Bytes of stderr kept in `ProcessError::Failed`.
const STDERR_TAIL_BYTES: usize = 800;

/// Runs `command` to completion under `timeout`. The child is killed if the
/// timeout elapses. A non-zero exit is an error carrying the stderr tail.
pub async fn run_with_timeout(
    mut command: Command,
    program: &str,
    timeout: Duration,
) -> Result<Output, ProcessError> {
    command.kill_on_drop(true);
    debug!(program, timeout_secs = timeout.as_secs(), "Spawning child process");

    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| ProcessError::TimedOut {
            program: program.to_string(),
            timeout,
        })?
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // LaTeX engines report errors on stdout; fall back to it when stderr is empty.
        let diagnostics = if stderr.trim().is_empty() { stdout } else { stderr };
        return Err(ProcessError::Failed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr_tail: tail(&diagnostics, STDERR_TAIL_BYTES).trim().to_string(),
        });
    }

    Ok(output)
}

fn tail(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_char_boundaries() {
        assert_eq!(tail("abc", 10), "abc");
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("aé", 1), "");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = run_with_timeout(
            Command::new("cvforge-no-such-binary"),
            "cvforge-no-such-binary",
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo boom >&2; exit 3"]);
        let err = run_with_timeout(command, "sh", Duration::from_secs(5))
            .await
            .unwrap_err();
        match err {
            ProcessError::Failed { stderr_tail, .. } => assert_eq!(stderr_tail, "boom"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_child() {
        let mut command = Command::new("sh");
        command.args(["-c", "sleep 5"]);
        let err = run_with_timeout(command, "sh", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::TimedOut { .. }));
    }
}
