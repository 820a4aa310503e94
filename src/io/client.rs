use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::io::taskrc::Taskrc;
use crate::model::TaskRecord;

/// Bounded wait for the export call when no other value is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Error type for the external `task` invocation
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("`{command}` did not finish within {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
    #[error("could not decode task export: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("io error waiting for task: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch the full task database by running `task rc:<path> export`.
///
/// Synchronous: returns once the child has exited (or been killed after
/// `timeout`) and its output has been decoded. No handles are kept.
pub fn fetch_all(taskrc: &Taskrc, timeout: Duration) -> Result<Vec<TaskRecord>, FetchError> {
    let raw = run_capture(export_command(taskrc), timeout)?;
    decode_export(&raw)
}

fn export_command(taskrc: &Taskrc) -> Command {
    let mut command = Command::new("task");
    command
        .arg(format!("rc:{}", taskrc.path.display()))
        .arg("export");
    command
}

fn decode_export(raw: &[u8]) -> Result<Vec<TaskRecord>, FetchError> {
    Ok(serde_json::from_slice(raw)?)
}

/// Run a command to completion within `timeout`, capturing stdout.
///
/// The exit status alone decides success. taskwarrior writes non-fatal
/// diagnostics ("configuration override", sync nags) to stderr even when it
/// succeeds, so stderr only surfaces in the error on a non-zero exit.
fn run_capture(mut command: Command, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let label = describe(&command);

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| FetchError::Spawn {
            command: label.clone(),
            source: e,
        })?;

    // Both pipes are drained on their own threads so a chatty child can't
    // block on a full pipe while we wait for it to exit.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(FetchError::TimedOut {
                        command: label,
                        timeout,
                    });
                }
                thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(FetchError::Io(e));
            }
        }
    };

    let stdout_buf = stdout.join().unwrap_or_default();
    let stderr_buf = stderr.join().unwrap_or_default();

    if !status.success() {
        let diagnostics = String::from_utf8_lossy(&stderr_buf).trim().to_string();
        return Err(FetchError::Failed {
            command: label,
            status,
            stderr: if diagnostics.is_empty() {
                "(no diagnostic output)".to_string()
            } else {
                diagnostics
            },
        });
    }

    if !stderr_buf.is_empty() {
        debug!(
            command = %label,
            "task wrote {} bytes of diagnostics to stderr on success",
            stderr_buf.len()
        );
    }

    Ok(stdout_buf)
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
