//! Progress output for the console.

use std::io::{self, Write};

/// Prints progress lines to stdout unless silenced.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    silent: bool,
}

impl OutputManager {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }

    /// Print a progress line
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.silent {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", message)?;
        stdout.flush()
    }

    /// Print usage text to stderr, regardless of silence
    pub fn usage(text: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{}", text)?;
        stderr.flush()
    }
}
