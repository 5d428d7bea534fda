//! Process execution seam for the container runtime.
//!
//! Everything that touches the search path or spawns a process goes through
//! [`ProcessRunner`], so the build pipeline can be driven by a fake in tests.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

/// How a finished process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl RunStatus {
    /// Status of a process that exited with `code`
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable exit description for diagnostics
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

impl From<std::process::ExitStatus> for RunStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Output of a process run to completion.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: RunStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Capability to find and run external executables.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    /// Looks `name` up on the search path, returning its absolute path.
    fn find_executable(&self, name: &str) -> io::Result<PathBuf>;

    /// Runs `program` to completion and captures both output streams.
    async fn capture(&self, program: &Path, args: &[OsString]) -> io::Result<CapturedOutput>;

    /// Runs `program`, forwarding its stdout and stderr into the given sinks
    /// as they are produced. Stdin is inherited.
    async fn stream<O, E>(
        &self,
        program: &Path,
        args: &[OsString],
        stdout: &mut O,
        stderr: &mut E,
    ) -> io::Result<RunStatus>
    where
        O: AsyncWrite + Unpin + ?Sized,
        E: AsyncWrite + Unpin + ?Sized;
}

/// [`ProcessRunner`] backed by the real search path and tokio processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn find_executable(&self, name: &str) -> io::Result<PathBuf> {
        which::which(name).map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))
    }

    async fn capture(&self, program: &Path, args: &[OsString]) -> io::Result<CapturedOutput> {
        let output = Command::new(program).args(args).output().await?;

        Ok(CapturedOutput {
            status: output.status.into(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
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
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut child_stdout = child.stdout.take();
        let mut child_stderr = child.stderr.take();

        // Drain both pipes together or a full one stalls the child.
        let (stdout_result, stderr_result) = tokio::join!(
            forward(child_stdout.as_mut(), stdout),
            forward(child_stderr.as_mut(), stderr),
        );

        let status = child.wait().await?;
        stdout_result?;
        stderr_result?;

        Ok(status.into())
    }
}

/// Copies `source` into `sink` until EOF, then flushes.
///
/// If the sink fails, the rest of `source` is still read and discarded so
/// the child never blocks on a full pipe; the sink error is returned.
async fn forward<R, W>(source: Option<&mut R>, sink: &mut W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let Some(source) = source else {
        return Ok(());
    };

    let copied = async {
        tokio::io::copy(source, sink).await?;
        sink.flush().await
    }
    .await;

    if copied.is_err() {
        let _ = tokio::io::copy(source, &mut tokio::io::sink()).await;
    }
    copied
}
