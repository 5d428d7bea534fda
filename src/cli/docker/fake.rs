//! Scripted [`ProcessRunner`] for unit tests.

use super::process::{CapturedOutput, ProcessRunner, RunStatus};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// One recorded process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub streamed: bool,
}

/// Scripted build result: exit code plus canned output
#[derive(Debug, Clone)]
struct ScriptedBuild {
    code: i32,
    stdout: String,
    stderr: String,
}

/// Runner that never spawns anything. Unscripted calls fail to spawn.
#[derive(Debug, Default)]
pub struct FakeRunner {
    executables: HashMap<String, PathBuf>,
    version: Option<CapturedOutput>,
    build: Option<ScriptedBuild>,
    lookups: RefCell<Vec<String>>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(mut self, name: &str, path: &str) -> Self {
        self.executables.insert(name.to_string(), PathBuf::from(path));
        self
    }

    pub fn with_version(mut self, stdout: &str) -> Self {
        self.version = Some(CapturedOutput {
            status: RunStatus::exited(0),
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        });
        self
    }

    pub fn with_version_failure(mut self, code: i32, stderr: &str) -> Self {
        self.version = Some(CapturedOutput {
            status: RunStatus::exited(code),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        });
        self
    }

    pub fn with_build(mut self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.build = Some(ScriptedBuild {
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        });
        self
    }

    /// Names passed to `find_executable`, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }

    /// Spawned processes, in order
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    fn record(&self, program: &Path, args: &[OsString], streamed: bool) {
        self.calls.borrow_mut().push(Invocation {
            program: program.to_path_buf(),
            args: args.to_vec(),
            streamed,
        });
    }
}

fn spawn_error(program: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file: {}", program.display()),
    )
}

impl ProcessRunner for FakeRunner {
    fn find_executable(&self, name: &str) -> io::Result<PathBuf> {
        self.lookups.borrow_mut().push(name.to_string());
        self.executables.get(name).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "cannot find binary path".to_string(),
            )
        })
    }

    async fn capture(&self, program: &Path, args: &[OsString]) -> io::Result<CapturedOutput> {
        self.record(program, args, false);
        self.version.clone().ok_or_else(|| spawn_error(program))
    }

    async fn stream<O, E>(
        &self,
        program: &Path,
        args: &[OsString],
        stdout: &mut O,
        stderr: &mut E,
    ) -> io::Result<RunStatus>
    where
        O: AsyncWrite + Unpin + ?Sized,
        E: AsyncWrite + Unpin + ?Sized,
    {
        self.record(program, args, true);
        let build = self.build.clone().ok_or_else(|| spawn_error(program))?;
        stdout.write_all(build.stdout.as_bytes()).await?;
        stderr.write_all(build.stderr.as_bytes()).await?;
        Ok(RunStatus::exited(build.code))
    }
}
