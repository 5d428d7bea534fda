//! Containerized `go build` execution.

use super::config::{OUTPUT_MOUNT, WORKSPACE_MOUNT};
use super::process::ProcessRunner;
use crate::cli::args::Config;
use crate::cli::output_path::ResolvedOutput;
use crate::error::{BuildError, Result};
use std::ffi::{OsStr, OsString};
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::AsyncWrite;

/// Everything the containerized build needs, fixed before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    runtime_path: PathBuf,
    workspace_root: PathBuf,
    output_dir: PathBuf,
    executable_name: OsString,
    package: String,
    image: String,
}

impl BuildRequest {
    /// Assembles a request, naming the executable after the package when
    /// the output path did not name one.
    pub fn new(config: &Config, runtime_path: PathBuf, output: ResolvedOutput) -> Self {
        let executable_name = output
            .file_name
            .unwrap_or_else(|| default_executable_name(&config.package).into());

        Self {
            runtime_path,
            workspace_root: config.workspace_root.clone(),
            output_dir: output.dir,
            executable_name,
            package: config.package.clone(),
            image: config.image.clone(),
        }
    }

    /// Where the executable lands on the host
    pub fn host_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.executable_name)
    }
}

/// Last path segment of a package identifier.
///
/// `github.com/org/tool` becomes `tool`. Trailing slashes are ignored; an
/// identifier with no usable segment is returned unchanged.
pub fn default_executable_name(package: &str) -> String {
    package
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(package)
        .to_string()
}

/// Runs `go build` inside a throwaway container.
#[derive(Debug, Clone, Copy)]
pub struct ContainerRunner {
    tty: bool,
}

impl ContainerRunner {
    /// Creates a runner; `tty` requests a pseudo-terminal in the container.
    pub fn new(tty: bool) -> Self {
        Self { tty }
    }

    /// Requests a pseudo-terminal only when stdin is one; the runtime
    /// refuses `-t` otherwise.
    pub fn detect() -> Self {
        Self::new(std::io::stdin().is_terminal())
    }

    /// Builds runtime arguments for the containerized build.
    ///
    /// # Returns
    ///
    /// Vector of arguments following the runtime executable, i.e.
    /// `run -i [-t] --rm -v ROOT:/go -v OUT:/data IMAGE go build -o /data/NAME PACKAGE`
    ///
    /// Host paths and the executable name are passed through byte for byte,
    /// so non-UTF-8 names reach the runtime unchanged.
    pub fn build_docker_args(&self, request: &BuildRequest) -> Vec<OsString> {
        let workspace_mount = concat_os([
            request.workspace_root.as_os_str(),
            OsStr::new(":"),
            OsStr::new(WORKSPACE_MOUNT),
        ]);
        let output_mount = concat_os([
            request.output_dir.as_os_str(),
            OsStr::new(":"),
            OsStr::new(OUTPUT_MOUNT),
        ]);
        let container_output = concat_os([
            OsStr::new(OUTPUT_MOUNT),
            OsStr::new("/"),
            request.executable_name.as_os_str(),
        ]);

        let mut docker_args: Vec<OsString> = vec!["run".into(), "-i".into()];
        if self.tty {
            docker_args.push("-t".into());
        }
        docker_args.extend([
            "--rm".into(),
            "-v".into(),
            workspace_mount,
            "-v".into(),
            output_mount,
            request.image.clone().into(),
            "go".into(),
            "build".into(),
            "-o".into(),
            container_output,
            request.package.clone().into(),
        ]);

        docker_args
    }

    /// Runs the build, streaming its output into `stdout` and `stderr`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The build exited with status zero
    /// * `Err(BuildFailed)` - Spawn failed or the build exited non-zero
    pub async fn invoke<R, O, E>(
        &self,
        runner: &R,
        request: BuildRequest,
        stdout: &mut O,
        stderr: &mut E,
    ) -> Result<()>
    where
        R: ProcessRunner,
        O: AsyncWrite + Unpin + ?Sized,
        E: AsyncWrite + Unpin + ?Sized,
    {
        let docker_args = self.build_docker_args(&request);
        let runtime = request.runtime_path.display().to_string();
        log::debug!("Running: {} {:?}", runtime, docker_args);

        let status = runner
            .stream(&request.runtime_path, &docker_args, stdout, stderr)
            .await
            .map_err(|e| BuildError::BuildFailed {
                runtime: runtime.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(BuildError::BuildFailed {
                runtime,
                reason: status.describe(),
            });
        }

        Ok(())
    }
}

fn concat_os<const N: usize>(parts: [&OsStr; N]) -> OsString {
    let mut joined = OsString::new();
    for part in parts {
        joined.push(part);
    }
    joined
}
