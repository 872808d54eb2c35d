//! Production command runner over `std::process`.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use specforge_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    error::SpecforgeResult,
};

/// How often the child is polled while waiting for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs real external processes with captured output and a hard deadline.
///
/// The deadline is enforced by polling: when it expires the child is
/// killed and the call fails with a timeout error. There is no retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> SpecforgeResult<CommandOutput> {
        let command_line = display_command(program, args);
        debug!(command = %command_line, timeout_secs = timeout.as_secs(), "spawning");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ApplicationError::CommandFailed {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        // Drain both pipes on threads so a chatty child cannot deadlock
        // against a full pipe buffer while we poll for exit.
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = wait_with_deadline(&mut child, timeout).map_err(|_| {
            warn!(command = %command_line, "deadline expired, child killed");
            ApplicationError::CommandTimedOut {
                command: command_line.clone(),
                timeout_secs: timeout.as_secs(),
            }
        })?;

        Ok(CommandOutput {
            success: status,
            stdout: join_reader(stdout_reader),
            stderr: join_reader(stderr_reader),
        })
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

fn spawn_reader(pipe: Option<impl Read + Send + 'static>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Poll until exit or deadline. `Err(())` means the deadline expired and
/// the child was killed.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<bool, ()> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status.success()),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(());
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(_) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(());
            }
        }
    }
}
