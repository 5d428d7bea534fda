//! Command line argument parsing and validation.
//!
//! Arguments are parsed with clap, then folded together with the workspace
//! root from the environment into an immutable [`Config`].

use super::docker::config::{DEFAULT_IMAGE, DEFAULT_RUNTIME, WORKSPACE_ENV};
use crate::error::{BuildError, Result};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Output path value meaning "current directory, default file name"
pub const CURRENT_DIR_MARKER: &str = ".";

/// Build a Go package inside a container
#[derive(Parser, Debug)]
#[command(
    name = "gobuild_container",
    version,
    about = "Build a Go package inside a container",
    long_about = "Runs `go build` for PACKAGE inside a throwaway container.

$GOPATH is mounted at /go and the output directory at /data, so the
executable lands on the host when the container exits.

Usage:
  gobuild_container github.com/org/tool
  gobuild_container -o bin/tool-linux github.com/org/tool
  gobuild_container --silent --image golang:1.22 github.com/org/tool

Exit code 0 = build succeeded and the executable is in place."
)]
pub struct Args {
    /// Be silent, no progress output
    #[arg(short, long)]
    pub silent: bool,

    /// Path for the resulting executable
    ///
    /// The directory part is created if missing. The default `.` places the
    /// executable in the current directory, named after the package.
    #[arg(short, long, value_name = "PATH", default_value = CURRENT_DIR_MARKER)]
    pub output: PathBuf,

    /// Container image providing the Go toolchain
    #[arg(long, value_name = "IMAGE", env = "GOBUILD_IMAGE", default_value = DEFAULT_IMAGE)]
    pub image: String,

    /// Container runtime executable to look up on PATH
    #[arg(long, value_name = "NAME", env = "GOBUILD_RUNTIME", default_value = DEFAULT_RUNTIME)]
    pub runtime: String,

    /// Package to build (e.g. github.com/org/tool)
    #[arg(value_name = "PACKAGE")]
    pub package: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn try_parse_args<I, T>(argv: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(argv)
    }

    /// Rendered usage and options, for printing alongside usage errors
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }
}

/// Immutable configuration for a single run.
///
/// Constructed once at startup and passed by reference into every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target package identifier
    pub package: String,
    /// Raw output path as given on the command line
    pub output: PathBuf,
    /// Suppress progress lines
    pub silent: bool,
    /// Workspace root mounted into the container
    pub workspace_root: PathBuf,
    /// Container image name
    pub image: String,
    /// Container runtime executable name
    pub runtime: String,
}

impl Config {
    /// Validates arguments and reads the workspace root through `env`.
    ///
    /// The package is checked before the environment, so a missing package
    /// is reported even when the workspace root is also absent.
    pub fn resolve<F>(args: Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let package = match args.package {
            Some(package) if !package.trim().is_empty() => package,
            _ => {
                return Err(BuildError::MissingArgument {
                    argument: "<PACKAGE>".to_string(),
                });
            }
        };

        let workspace_root = env(WORKSPACE_ENV)
            .and_then(|value| std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()))
            .ok_or_else(|| BuildError::MissingEnvironment {
                variable: WORKSPACE_ENV.to_string(),
            })?;

        Ok(Self {
            package,
            output: args.output,
            silent: args.silent,
            workspace_root,
            image: args.image,
            runtime: args.runtime,
        })
    }
}
