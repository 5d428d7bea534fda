//! Container runtime integration.
//!
//! The runtime is found on the search path, checked with its version flag,
//! and then asked to run `go build` in a throwaway container with the
//! workspace root and output directory mounted.
//!
//! # Module Structure
//!
//! - `config` - Runtime, image and mount constants
//! - `container_runner` - Build request and argument construction
//! - `locator` - Runtime discovery and version check
//! - `process` - Process runner seam

pub mod config;
mod container_runner;
mod locator;
mod process;

#[cfg(test)]
pub(crate) mod fake;

pub use container_runner::{BuildRequest, ContainerRunner, default_executable_name};
pub use locator::{check_version, locate};
pub use process::{CapturedOutput, ProcessRunner, RunStatus, SystemRunner};
