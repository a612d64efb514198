//! External command execution.
//!
//! Every metric the monitor reports starts life as the stdout of an OS
//! utility. [`CommandRunner`] is the seam between the parsers and the
//! operating system: the real implementation spawns the program with a hard
//! timeout, the canned one replays recorded output.

use std::collections::HashMap;
use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error};
use thiserror::Error;

/// Timeout applied to every external command unless configured otherwise
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Failure of a single external command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' timed out after {}s", .timeout.as_secs_f32())]
    Timeout { program: String, timeout: Duration },

    #[error("'{program}' failed with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Runs an external program and returns its trimmed standard output
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;
}

/// Runs commands on the host with a bounded timeout
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_COMMAND_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        debug!("Running {} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Drain both pipes while waiting, otherwise a large listing (lsof)
        // blocks the child on a full pipe buffer.
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CommandError::Wait {
                        program: program.to_string(),
                        source,
                    });
                }
            }

            if start.elapsed() > self.timeout {
                error!("'{}' timed out after {:?}, killing it", program, self.timeout);
                let _ = child.kill();
                let _ = child.wait();
                return Err(CommandError::Timeout {
                    program: program.to_string(),
                    timeout: self.timeout,
                });
            }

            thread::sleep(POLL_INTERVAL);
        };

        let stdout = join_reader(stdout_reader);
        let stderr = join_reader(stderr_reader);

        if !status.success() {
            let stderr = stderr.trim();
            return Err(CommandError::NonZeroExit {
                program: program.to_string(),
                status,
                stderr: if stderr.is_empty() {
                    "no error output".to_string()
                } else {
                    stderr.to_string()
                },
            });
        }

        Ok(stdout.trim().to_string())
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_reader(reader: Option<JoinHandle<Vec<u8>>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
enum CannedResponse {
    Output(String),
    Timeout,
}

/// Replays recorded command output instead of touching the host.
///
/// Commands are keyed by their full command line (`"ps -eo pid,%cpu,comm -r"`).
/// Anything not registered fails as if the program were not installed.
#[derive(Debug, Clone, Default)]
pub struct CannedRunner {
    responses: HashMap<String, CannedResponse>,
}

impl CannedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, command_line: &str, output: &str) -> Self {
        self.responses.insert(
            command_line.trim().to_string(),
            CannedResponse::Output(output.to_string()),
        );
        self
    }

    pub fn with_timeout(mut self, command_line: &str) -> Self {
        self.responses
            .insert(command_line.trim().to_string(), CannedResponse::Timeout);
        self
    }
}

impl CommandRunner for CannedRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let command_line = if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        };

        match self.responses.get(&command_line) {
            Some(CannedResponse::Output(output)) => Ok(output.trim().to_string()),
            Some(CannedResponse::Timeout) => Err(CommandError::Timeout {
                program: program.to_string(),
                timeout: DEFAULT_COMMAND_TIMEOUT,
            }),
            None => Err(CommandError::Spawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "command not available"),
            }),
        }
    }
}
