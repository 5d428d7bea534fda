//! Container runtime discovery and availability checking.

use super::config::VERSION_FLAG;
use super::process::ProcessRunner;
use crate::error::{BuildError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Finds the `runtime` executable on the search path.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Absolute path to the executable
/// * `Err(RuntimeNotFound)` - Not on the search path
pub fn locate<R: ProcessRunner>(runner: &R, runtime: &str) -> Result<PathBuf> {
    let path = runner
        .find_executable(runtime)
        .map_err(|e| BuildError::RuntimeNotFound {
            runtime: runtime.to_string(),
            reason: e.to_string(),
        })?;

    log::debug!("Found {} at: {}", runtime, path.display());
    Ok(path)
}

/// Confirms the runtime at `path` runs by asking for its version.
///
/// # Returns
///
/// * `Ok(String)` - Trimmed version output
/// * `Err(RuntimeUnusable)` - Spawn failed or the check exited non-zero
pub async fn check_version<R: ProcessRunner>(runner: &R, path: &Path) -> Result<String> {
    let output = runner
        .capture(path, &[OsString::from(VERSION_FLAG)])
        .await
        .map_err(|e| BuildError::RuntimeUnusable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let reason = if stderr.is_empty() {
            output.status.describe()
        } else {
            format!("{}: {}", output.status.describe(), stderr)
        };
        return Err(BuildError::RuntimeUnusable {
            path: path.to_path_buf(),
            reason,
        });
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    log::info!("✓ {} available: {}", path.display(), version);
    Ok(version)
}
