//! External command execution.
//!
//! Device enumeration and location dispatch only ever need "run this
//! program with these arguments and give me stdout, stderr and the exit
//! status". That capability sits behind [`CommandRunner`] so the device
//! layer can be exercised against [`MockRunner`] without a device farm.
//!
//! # Implementations
//!
//! - `SystemRunner` - spawns real processes through `tokio::process`
//! - `MockRunner` - scripted responses plus a call history

use crate::result::{GeofixError, GeofixResult};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Mutex;

/// Captured result of one external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    /// Captured stdout (lossy UTF-8)
    pub stdout: String,
    /// Captured stderr (lossy UTF-8)
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status zero
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Best available description of a failure: stderr, then stdout, then
    /// the exit status
    #[must_use]
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.status {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Capability to run an external program and capture its output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion.
    ///
    /// A non-zero exit is reported through [`CommandOutput::status`], not as
    /// an error. Errors mean the program could not be run at all.
    async fn run(&self, program: &str, args: &[String]) -> GeofixResult<CommandOutput>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<T> {
    async fn run(&self, program: &str, args: &[String]) -> GeofixResult<CommandOutput> {
        (**self).run(program, args).await
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> GeofixResult<CommandOutput> {
        tracing::debug!(program, ?args, "spawning");

        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| GeofixError::CommandSpawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// One recorded call made against a [`MockRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name
    pub program: String,
    /// Arguments in order
    pub args: Vec<String>,
}

impl Invocation {
    /// Program and arguments joined by single spaces
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Output(CommandOutput),
    SpawnError(String),
}

/// Scripted command runner for tests
///
/// Responses are matched by substring against the rendered command line;
/// the first registered match wins. Unmatched commands succeed with empty
/// output. Every call is recorded in order.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Vec<(String, MockResponse)>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    /// Create new mock runner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `output` to commands whose line contains `needle`
    #[must_use]
    pub fn respond(mut self, needle: impl Into<String>, output: CommandOutput) -> Self {
        self.responses
            .push((needle.into(), MockResponse::Output(output)));
        self
    }

    /// Fail to spawn commands whose line contains `needle`
    #[must_use]
    pub fn fail_spawn(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .push((needle.into(), MockResponse::SpawnError(message.into())));
        self
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Rendered command lines of every call, in order
    #[must_use]
    pub fn command_lines(&self) -> Vec<String> {
        self.history().iter().map(Invocation::command_line).collect()
    }

    /// Number of calls whose command line contains `needle`
    #[must_use]
    pub fn count_matching(&self, needle: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, program: &str, args: &[String]) -> GeofixResult<CommandOutput> {
        let invocation = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        };
        let line = invocation.command_line();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation);
        }

        let response = self
            .responses
            .iter()
            .find(|(needle, _)| line.contains(needle.as_str()))
            .map(|(_, response)| response.clone());

        match response {
            Some(MockResponse::Output(output)) => Ok(output),
            Some(MockResponse::SpawnError(message)) => Err(GeofixError::CommandSpawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message),
            }),
            None => Ok(CommandOutput::ok("")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    mod command_output_tests {
        use super::*;

        #[test]
        fn test_success() {
            assert!(CommandOutput::ok("x").success());
            assert!(!CommandOutput::failed(1, "boom").success());
            assert!(!CommandOutput::default().success());
        }

        #[test]
        fn test_failure_message_prefers_stderr() {
            let out = CommandOutput {
                status: Some(2),
                stdout: "out".to_string(),
                stderr: " err \n".to_string(),
            };
            assert_eq!(out.failure_message(), "err");
        }

        #[test]
        fn test_failure_message_falls_back_to_stdout_then_status() {
            let out = CommandOutput {
                status: Some(2),
                stdout: "out".to_string(),
                stderr: String::new(),
            };
            assert_eq!(out.failure_message(), "out");

            let out = CommandOutput {
                status: Some(2),
                ..CommandOutput::default()
            };
            assert_eq!(out.failure_message(), "exited with status 2");

            let out = CommandOutput::default();
            assert_eq!(out.failure_message(), "terminated by signal");
        }
    }

    mod mock_runner_tests {
        use super::*;

        #[tokio::test]
        async fn test_records_history_in_order() {
            let runner = MockRunner::new();
            runner.run("adb", &args(&["devices"])).await.unwrap();
            runner
                .run("adb", &args(&["-s", "emulator-5554", "emu"]))
                .await
                .unwrap();

            assert_eq!(
                runner.command_lines(),
                vec!["adb devices", "adb -s emulator-5554 emu"]
            );
            assert_eq!(runner.count_matching("emulator-5554"), 1);
        }

        #[tokio::test]
        async fn test_first_match_wins() {
            let runner = MockRunner::new()
                .respond("devices", CommandOutput::ok("first"))
                .respond("adb", CommandOutput::ok("second"));

            let out = runner.run("adb", &args(&["devices"])).await.unwrap();
            assert_eq!(out.stdout, "first");
            let out = runner.run("adb", &args(&["version"])).await.unwrap();
            assert_eq!(out.stdout, "second");
        }

        #[tokio::test]
        async fn test_unmatched_succeeds_empty() {
            let runner = MockRunner::new();
            let out = runner.run("xcrun", &[]).await.unwrap();
            assert!(out.success());
            assert!(out.stdout.is_empty());
        }

        #[tokio::test]
        async fn test_spawn_error() {
            let runner = MockRunner::new().fail_spawn("adb", "not installed");
            let err = runner.run("adb", &args(&["devices"])).await.unwrap_err();
            assert!(matches!(err, GeofixError::CommandSpawn { .. }));
            assert_eq!(runner.history().len(), 1);
        }

        #[tokio::test]
        async fn test_arc_forwarding() {
            let runner = std::sync::Arc::new(MockRunner::new());
            runner.run("adb", &args(&["devices"])).await.unwrap();
            assert_eq!(runner.history().len(), 1);
        }
    }

    mod system_runner_tests {
        use super::*;

        #[tokio::test]
        async fn test_missing_program_is_spawn_error() {
            let err = SystemRunner::new()
                .run("geofix-definitely-not-a-real-program", &[])
                .await
                .unwrap_err();
            assert!(matches!(err, GeofixError::CommandSpawn { .. }));
        }

        #[cfg(unix)]
        #[tokio::test]
        async fn test_captures_output_and_status() {
            let out = SystemRunner::new()
                .run("sh", &args(&["-c", "echo hello; echo oops >&2; exit 3"]))
                .await
                .unwrap();
            assert_eq!(out.status, Some(3));
            assert_eq!(out.stdout.trim(), "hello");
            assert_eq!(out.stderr.trim(), "oops");
        }
    }
}
