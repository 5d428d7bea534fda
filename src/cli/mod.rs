//! Command line interface for the containerized Go build.
//!
//! `run` is the only place that touches process arguments and environment;
//! everything below it receives an explicit [`Config`] and can be driven
//! with a fake [`ProcessRunner`].

mod args;
pub mod docker;
mod output;
pub mod output_path;

pub use args::{Args, CURRENT_DIR_MARKER, Config};
pub use output::OutputManager;

use crate::error::Result;
use docker::{BuildRequest, ContainerRunner, ProcessRunner, SystemRunner};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWrite;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = match Args::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => return Ok(report_parse_error(&e)),
    };

    let config = Config::resolve(args, |name| std::env::var_os(name)).inspect_err(|e| {
        if e.is_usage_error() {
            let _ = OutputManager::usage(&Args::usage());
        }
    })?;
    log::debug!("Resolved configuration: {:?}", config);

    let cwd = std::env::current_dir()?;
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();

    execute(
        &config,
        &SystemRunner,
        ContainerRunner::detect(),
        &cwd,
        &mut stdout,
        &mut stderr,
    )
    .await?;

    Ok(0)
}

/// Prints a clap error (or help/version text) and picks the exit code.
fn report_parse_error(error: &clap::Error) -> i32 {
    let _ = error.print();
    if error.use_stderr() { 1 } else { 0 }
}

/// Runs the build pipeline: locate runtime, check it, resolve the output
/// path, then build in a container.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Host path of the built executable
/// * `Err` - The first step that failed
pub async fn execute<R, O, E>(
    config: &Config,
    runner: &R,
    container: ContainerRunner,
    cwd: &Path,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<PathBuf>
where
    R: ProcessRunner,
    O: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
{
    let output = OutputManager::new(config.silent);

    let runtime_path = docker::locate(runner, &config.runtime)?;
    output.progress(&format!("found {}: {}", config.runtime, runtime_path.display()))?;

    let version = docker::check_version(runner, &runtime_path).await?;
    output.progress(&version)?;

    let resolved = output_path::resolve_from(&config.output, cwd)?;
    let request = BuildRequest::new(config, runtime_path, resolved);
    let host_path = request.host_output_path();
    output.progress(&format!("compiling into: {}", host_path.display()))?;

    container.invoke(runner, request, stdout, stderr).await?;

    Ok(host_path)
}
