//! Containerized Go builds from the command line.
//!
//! Locates a container runtime, checks that it runs, resolves where the
//! executable should land, and runs `go build` in a throwaway container with
//! `$GOPATH` and the output directory mounted.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BuildError, Result};
