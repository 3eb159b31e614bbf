//! Builder for executing external tool commands with timeout support.

use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Default command timeout: 1 minute.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// Execution is blocking. Output is drained on background threads so a chatty
/// child cannot stall on a full pipe while we wait for it.
///
/// # Example
///
/// ```no_run
/// use flavy_av::ToolCommand;
///
/// let output = ToolCommand::new("ffmpeg")
///     .arg("-hide_banner")
///     .arg("-encoders")
///     .execute()?;
/// println!("{}", output.stdout);
/// # Ok::<(), flavy_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
}

impl ToolCommand {
    /// Create a new command for the given program name or path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl AsRef<OsStr>>) -> &mut Self {
        self.args
            .extend(iter.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Set the maximum execution time.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Short name of the program, used in error messages.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program does not exist.
    /// - [`Error::ToolFailed`] if spawning fails for another reason, or the
    ///   process exits with a non-zero status (message includes stderr).
    /// - [`Error::Timeout`] if the process is still running after the
    ///   configured timeout, or its output pipes are still held open by a
    ///   leftover process at that point. The child's process group is killed
    ///   before returning.
    pub fn execute(&self) -> Result<ToolOutput> {
        let program_name = self.program_name();
        tracing::debug!(tool = %program_name, args = ?self.args, "spawning tool");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Own process group, so helpers the tool starts are killed with it.
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(&program_name)
            } else {
                Error::tool_failed(&program_name, format!("failed to spawn: {e}"))
            }
        })?;

        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        // Readers are never joined past the deadline; on timeout they are
        // left detached.
        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    tracing::warn!(tool = %program_name, timeout = ?self.timeout, "killing timed out tool");
                    kill_tree(&mut child);
                    return Err(Error::timeout(program_name, self.timeout));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    kill_tree(&mut child);
                    return Err(Error::tool_failed(
                        program_name,
                        format!("I/O error waiting for process: {e}"),
                    ));
                }
            }
        };

        // The tool has exited; anything it left in the background can keep
        // the pipes open.
        while !is_finished(&stdout_reader) || !is_finished(&stderr_reader) {
            if Instant::now() >= deadline {
                tracing::warn!(tool = %program_name, "tool exited but its output pipes stayed open");
                kill_group(child.id());
                return Err(Error::timeout(program_name, self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }

        let output = ToolOutput {
            status,
            stdout: String::from_utf8_lossy(&join_reader(stdout_reader)).to_string(),
            stderr: String::from_utf8_lossy(&join_reader(stderr_reader)).to_string(),
        };

        if !output.status.success() {
            return Err(Error::tool_failed(
                program_name,
                format!(
                    "exited with status {}: {}",
                    output.status,
                    output.stderr.trim()
                ),
            ));
        }

        Ok(output)
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn is_finished(reader: &Option<JoinHandle<Vec<u8>>>) -> bool {
    reader.as_ref().map_or(true, JoinHandle::is_finished)
}

fn kill_tree(child: &mut Child) {
    kill_group(child.id());
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let _ = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL);
}

#[cfg(not(unix))]
fn kill_group(_pid: u32) {}

fn join_reader(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_echo() {
        // `echo` should be universally available.
        let output = ToolCommand::new("echo").arg("hello").execute();

        match output {
            Ok(out) => {
                assert!(out.status.success());
                assert!(out.stdout.trim().contains("hello"));
            }
            Err(_) => {
                // On some minimal environments echo may not exist; skip.
            }
        }
    }

    #[test]
    fn execute_nonexistent_tool() {
        let result = ToolCommand::new("nonexistent_tool_xyz_12345").execute();
        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_tool_failure() {
        let result = ToolCommand::new("sh")
            .args(["-c", "echo broken >&2; exit 3"])
            .execute();
        match result {
            Err(Error::ToolFailed { tool, message }) => {
                assert_eq!(tool, "sh");
                assert!(message.contains("broken"), "unexpected message: {message}");
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn timeout_fires() {
        // `sleep 10` should be killed well before 10 seconds.
        let started = Instant::now();
        let result = ToolCommand::new("sleep")
            .arg("10")
            .timeout(Duration::from_millis(100))
            .execute();
        assert!(started.elapsed() < Duration::from_secs(5));
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }), "unexpected error: {err}");
        assert!(err.to_string().contains("timed out"));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_also_kills_helper_processes() {
        // The shell's `sleep` child inherits the pipes; the wait must not
        // outlive the timeout on its account.
        let started = Instant::now();
        let result = ToolCommand::new("sh")
            .args(["-c", "sleep 4; echo done"])
            .timeout(Duration::from_millis(200))
            .execute();
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "took {:?}",
            started.elapsed()
        );
        assert!(matches!(result, Err(Error::Timeout { .. })), "got {result:?}");
    }

    #[cfg(unix)]
    #[test]
    fn background_pipe_holder_is_bounded_by_timeout() {
        // `sh` exits at once but leaves `sleep` holding stdout.
        let started = Instant::now();
        let result = ToolCommand::new("sh")
            .args(["-c", "sleep 4 & echo started"])
            .timeout(Duration::from_millis(300))
            .execute();
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "took {:?}",
            started.elapsed()
        );
        assert!(matches!(result, Err(Error::Timeout { .. })), "got {result:?}");
    }

    #[cfg(unix)]
    #[test]
    fn output_is_collected_after_a_normal_exit() {
        let output = ToolCommand::new("sh")
            .args(["-c", "echo out; echo err >&2"])
            .timeout(Duration::from_secs(10))
            .execute()
            .unwrap();
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[test]
    fn program_name_strips_directories() {
        let cmd = ToolCommand::new("/usr/local/bin/ffmpeg");
        assert_eq!(cmd.program_name(), "ffmpeg");
    }
}
