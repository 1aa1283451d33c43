//! External program invocation.
//!
//! Every external collaborator (ImageMagick `convert`, `pandoc`, user supplied
//! compression commands) goes through [`ToolRunner`]. Arguments are always a
//! structured list handed to [`std::process::Command`]; nothing is ever
//! interpolated into a shell string, so paths with spaces or quotes are safe.
//!
//! A run is only successful when the program could be spawned **and** exited
//! with status zero. Anything else becomes a [`ToolError`] carrying the exit
//! status and the captured standard error.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{ChildStdin, Command, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("'{program}' was not found on PATH")]
    NotFound { program: String },
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A fully specified invocation: program, arguments and optional stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub stdin: Option<Vec<u8>>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Human-readable command line, for logs only.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Captured result of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs external programs. Abstracted so tests can record invocations
/// instead of spawning processes.
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError>;
}

/// Production runner backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
        tracing::debug!(command = %invocation.display(), "running external tool");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = command.spawn().map_err(|e| spawn_error(&invocation.program, e))?;

        // stdin is fed from its own thread while stdout and stderr are
        // drained here, so neither side can stall on a full pipe.
        let writer = match (&invocation.stdin, child.stdin.take()) {
            (Some(input), Some(pipe)) => {
                let input = input.clone();
                Some(std::thread::spawn(move || feed_stdin(pipe, &input)))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;
        let written = match writer {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer thread panicked"))),
            None => Ok(()),
        };

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: invocation.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written?;

        Ok(ToolOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Write all of `input` and close the pipe.
///
/// A child may exit without reading its input; the resulting broken pipe is
/// not an error here, the exit status decides.
fn feed_stdin(mut pipe: ChildStdin, input: &[u8]) -> io::Result<()> {
    match pipe.write_all(input) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn spawn_error(program: &str, error: io::Error) -> ToolError {
    if error.kind() == io::ErrorKind::NotFound {
        ToolError::NotFound {
            program: program.to_string(),
        }
    } else {
        ToolError::Spawn {
            program: program.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Runner that records invocations and replays scripted results.
    ///
    /// With no scripted results left, every run succeeds with empty output.
    #[derive(Default)]
    pub struct MockRunner {
        pub invocations: RefCell<Vec<Invocation>>,
        pub results: RefCell<VecDeque<Result<ToolOutput, ToolError>>>,
    }

    impl MockRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_result(&self, result: Result<ToolOutput, ToolError>) {
            self.results.borrow_mut().push_back(result);
        }

        pub fn get_invocations(&self) -> Vec<Invocation> {
            self.invocations.borrow().clone()
        }
    }

    impl ToolRunner for MockRunner {
        fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
            self.invocations.borrow_mut().push(invocation.clone());
            self.results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(ToolOutput::default()))
        }
    }

    /// A failure as the system runner would report a non-zero exit.
    #[cfg(unix)]
    pub fn failed(program: &str, stderr: &str) -> ToolError {
        use std::os::unix::process::ExitStatusExt;
        ToolError::Failed {
            program: program.to_string(),
            status: ExitStatus::from_raw(1 << 8),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn invocation_builder_keeps_argument_boundaries() {
        let inv = Invocation::new("convert")
            .arg("/photos/my trip/a.jpg")
            .args(["-quality", "60"]);

        assert_eq!(inv.args.len(), 3);
        assert_eq!(inv.args[0], OsString::from("/photos/my trip/a.jpg"));
        assert_eq!(inv.display(), "convert /photos/my trip/a.jpg -quality 60");
    }

    #[test]
    fn missing_program_is_not_found() {
        let inv = Invocation::new("photo-tiles-definitely-not-a-real-program");
        let err = SystemRunner.run(&inv).unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported_with_stderr() {
        let inv = Invocation::new("sh").args(["-c", "echo broken >&2; exit 3"]);
        let err = SystemRunner.run(&inv).unwrap_err();
        match err {
            ToolError::Failed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn stdin_is_piped_to_the_child() {
        let inv = Invocation::new("cat").stdin("hello");
        let out = SystemRunner.run(&inv).unwrap();
        assert_eq!(out.stdout, b"hello");
    }

    #[cfg(unix)]
    #[test]
    fn large_stdin_round_trips_without_stalling() {
        let input = vec![b'x'; 1 << 20];
        let inv = Invocation::new("cat").stdin(input.clone());
        let out = SystemRunner.run(&inv).unwrap();
        assert_eq!(out.stdout, input);
    }

    #[cfg(unix)]
    #[test]
    fn child_exiting_before_reading_stdin_reports_status_and_stderr() {
        let inv = Invocation::new("sh")
            .args(["-c", "echo 'bad option' >&2; exit 2"])
            .stdin(vec![b'x'; 1 << 20]);
        match SystemRunner.run(&inv).unwrap_err() {
            ToolError::Failed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(2));
                assert_eq!(stderr, "bad option");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unread_stdin_is_fine_when_child_succeeds() {
        let inv = Invocation::new("sh")
            .args(["-c", "echo done"])
            .stdin(vec![b'x'; 1 << 20]);
        let out = SystemRunner.run(&inv).unwrap();
        assert_eq!(out.stdout, b"done\n");
    }

    #[test]
    fn mock_runner_records_and_replays() {
        let runner = MockRunner::new();
        runner.push_result(Err(ToolError::NotFound {
            program: "pandoc".into(),
        }));

        assert!(runner.run(&Invocation::new("pandoc")).is_err());
        assert!(runner.run(&Invocation::new("pandoc")).is_ok());
        assert_eq!(runner.get_invocations().len(), 2);
    }
}
