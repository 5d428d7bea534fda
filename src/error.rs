//! Error types for container build operations.
//!
//! Every condition here is fatal: the pipeline stops at the first one and
//! `main` turns it into a diagnostic and exit status 1.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for build operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Main error type for all build operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Required environment variable is unset or empty
    #[error("${variable} env variable is not defined")]
    MissingEnvironment {
        /// Variable name
        variable: String,
    },

    /// Required positional argument was not supplied
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Container runtime is not on the search path
    #[error("error finding {runtime} executable: {reason}")]
    RuntimeNotFound {
        /// Runtime executable name
        runtime: String,
        /// Reason for the error
        reason: String,
    },

    /// Container runtime was found but its version check failed
    #[error("{} cannot run: {reason}", path.display())]
    RuntimeUnusable {
        /// Located runtime executable
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Output path names an existing directory
    #[error(
        "error while checking output path: the path should specify a file, not a directory: {}",
        path.display()
    )]
    InvalidOutputPath {
        /// Offending path
        path: PathBuf,
    },

    /// Output directory could not be created
    #[error("error creating output dir {}: {source}", path.display())]
    DirectoryCreateFailed {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Containerized build could not be started or exited non-zero
    #[error("error running go build using {runtime}: {reason}")]
    BuildFailed {
        /// Runtime executable name
        runtime: String,
        /// Reason for the error
        reason: String,
    },

    /// Console IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Whether the failure is about how the tool was invoked, in which case
    /// usage text is worth showing alongside the message.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::MissingArgument { .. })
    }
}
