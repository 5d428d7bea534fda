//! Output path resolution.
//!
//! Turns the raw `--output` value into an absolute output directory plus an
//! optional executable name, creating the directory when missing.

use super::args::CURRENT_DIR_MARKER;
use crate::error::{BuildError, Result};
use path_absolutize::Absolutize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Absolute output directory and executable name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    /// Absolute directory the executable is written to
    pub dir: PathBuf,
    /// Executable name; `None` means "name it after the package"
    pub file_name: Option<OsString>,
}

/// Resolves `raw` against `cwd`.
///
/// `.` resolves to `cwd` with no file name. Anything else must name a file:
/// its absolute form may not be an existing directory. The parent directory
/// is created (with missing ancestors) before returning.
pub fn resolve_from(raw: &Path, cwd: &Path) -> Result<ResolvedOutput> {
    let absolute = raw.absolutize_from(cwd)?.into_owned();

    let resolved = if raw.as_os_str() == CURRENT_DIR_MARKER {
        ResolvedOutput {
            dir: absolute,
            file_name: None,
        }
    } else {
        if absolute.is_dir() {
            return Err(BuildError::InvalidOutputPath { path: absolute });
        }

        match (absolute.parent(), absolute.file_name()) {
            (Some(dir), Some(name)) => ResolvedOutput {
                dir: dir.to_path_buf(),
                file_name: Some(name.to_os_string()),
            },
            _ => return Err(BuildError::InvalidOutputPath { path: absolute }),
        }
    };

    ensure_dir(&resolved.dir)?;
    log::debug!(
        "Resolved output {} -> dir {}, name {:?}",
        raw.display(),
        resolved.dir.display(),
        resolved.file_name
    );

    Ok(resolved)
}

/// Creates `dir` and any missing ancestors. Succeeds if it already exists.
fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| BuildError::DirectoryCreateFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn current_dir_marker_has_no_file_name() {
        let cwd = TempDir::new().unwrap();
        let resolved = resolve_from(Path::new("."), cwd.path()).unwrap();

        assert_eq!(resolved.dir, cwd.path());
        assert_eq!(resolved.file_name, None);
    }

    #[test]
    fn relative_file_splits_into_dir_and_name() {
        let cwd = TempDir::new().unwrap();
        let resolved = resolve_from(Path::new("bin/linux/tool"), cwd.path()).unwrap();

        assert_eq!(resolved.dir, cwd.path().join("bin/linux"));
        assert_eq!(resolved.file_name, Some(OsString::from("tool")));
        assert!(resolved.dir.is_dir());
    }

    #[test]
    fn absolute_path_ignores_cwd() {
        let cwd = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let raw = target.path().join("out").join("tool");

        let resolved = resolve_from(&raw, cwd.path()).unwrap();

        assert_eq!(resolved.dir, target.path().join("out"));
        assert_eq!(resolved.file_name, Some(OsString::from("tool")));
    }

    #[test]
    fn parent_components_are_normalized() {
        let cwd = TempDir::new().unwrap();
        let resolved = resolve_from(Path::new("a/../b/tool"), cwd.path()).unwrap();

        assert_eq!(resolved.dir, cwd.path().join("b"));
        assert!(!cwd.path().join("a").exists());
    }

    #[test]
    fn resolving_twice_is_stable() {
        let cwd = TempDir::new().unwrap();
        let first = resolve_from(Path::new("dist/tool"), cwd.path()).unwrap();
        let second = resolve_from(Path::new("dist/tool"), cwd.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn existing_directory_is_rejected_without_creating_anything() {
        let cwd = TempDir::new().unwrap();
        std::fs::create_dir(cwd.path().join("bin")).unwrap();

        let err = resolve_from(Path::new("bin"), cwd.path()).unwrap_err();

        match err {
            BuildError::InvalidOutputPath { path } => assert_eq!(path, cwd.path().join("bin")),
            other => panic!("unexpected error: {other}"),
        }
        let entries = std::fs::read_dir(cwd.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn file_in_the_way_of_the_directory_fails_creation() {
        let cwd = TempDir::new().unwrap();
        std::fs::write(cwd.path().join("blocker"), b"").unwrap();

        let err = resolve_from(Path::new("blocker/tool"), cwd.path()).unwrap_err();
        assert!(matches!(err, BuildError::DirectoryCreateFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_is_kept_intact() {
        use std::os::unix::ffi::OsStringExt;

        let cwd = TempDir::new().unwrap();
        let name = OsString::from_vec(b"tool\xff".to_vec());
        let raw = Path::new("dist").join(&name);

        let resolved = resolve_from(&raw, cwd.path()).unwrap();

        assert_eq!(resolved.dir, cwd.path().join("dist"));
        assert_eq!(resolved.file_name, Some(name));
    }
}
