//! Container runtime and image configuration constants.

/// Container runtime looked up on PATH unless overridden
pub const DEFAULT_RUNTIME: &str = "docker";

/// Image providing the Go toolchain
pub const DEFAULT_IMAGE: &str = "golang";

/// Environment variable holding the workspace root
pub const WORKSPACE_ENV: &str = "GOPATH";

/// Where the workspace root is mounted inside the container
pub const WORKSPACE_MOUNT: &str = "/go";

/// Where the output directory is mounted inside the container
pub const OUTPUT_MOUNT: &str = "/data";

/// Flag passed to the runtime for its version check
pub const VERSION_FLAG: &str = "--version";
