//! Scripted command runner for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use specforge_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    error::SpecforgeResult,
};

/// One canned response for a command whose argv starts with a prefix.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Exit 0 with this stdout.
    Success { stdout: String },
    /// Non-zero exit with this stderr.
    Failure { stderr: String },
    /// The deadline expires.
    Timeout,
}

/// Returns canned outcomes without spawning anything.
///
/// Outcomes are matched by argv prefix (`["install", "-g"]` matches any
/// install invocation regardless of package spec); an unmatched command is
/// a spawn failure, so a test never silently hits the real tool. Every
/// invocation is recorded for assertion.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommandRunner {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    outcomes: Vec<(Vec<String>, ScriptedOutcome)>,
    calls: Vec<Vec<String>>,
}

impl ScriptedCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an outcome for invocations whose args start with `prefix`.
    pub fn on(&self, prefix: &[&str], outcome: ScriptedOutcome) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner
            .outcomes
            .push((prefix.iter().map(|s| s.to_string()).collect(), outcome));
        self
    }

    /// Every recorded invocation, program first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.inner.lock().unwrap().calls.clone()
    }
}

impl CommandRunner for ScriptedCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> SpecforgeResult<CommandOutput> {
        let mut inner = self.inner.lock().unwrap();

        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|s| s.to_string()));
        inner.calls.push(call);

        let matched = inner
            .outcomes
            .iter()
            .find(|(prefix, _)| {
                args.len() >= prefix.len()
                    && prefix.iter().zip(args.iter()).all(|(p, a)| p == a)
            })
            .map(|(_, outcome)| outcome.clone());

        let command = format!("{program} {}", args.join(" "));
        match matched {
            Some(ScriptedOutcome::Success { stdout }) => Ok(CommandOutput {
                success: true,
                stdout,
                stderr: String::new(),
            }),
            Some(ScriptedOutcome::Failure { stderr }) => Ok(CommandOutput {
                success: false,
                stdout: String::new(),
                stderr,
            }),
            Some(ScriptedOutcome::Timeout) => Err(ApplicationError::CommandTimedOut {
                command,
                timeout_secs: timeout.as_secs(),
            }
            .into()),
            None => Err(ApplicationError::CommandFailed {
                command,
                reason: "no scripted outcome registered".into(),
            }
            .into()),
        }
    }
}
