//! GitHub Actions output file writer

use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Actions step output writer
pub struct ActionsOutput;

impl ActionsOutput {
    /// Append a `name=value` output line to the given output file
    pub fn append(path: &Path, name: &str, value: &str) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)?;
        writeln!(file, "{}={}", name, value)?;
        Ok(())
    }

    /// Publish an output via $GITHUB_OUTPUT.
    ///
    /// Falls back to stdout with a warning when the variable is unset
    /// (running outside the Actions runner).
    pub fn publish(name: &str, value: &str) -> Result<()> {
        match std::env::var("GITHUB_OUTPUT") {
            Ok(path) if !path.is_empty() => Self::append(Path::new(&path), name, value),
            _ => {
                eprintln!("Warning: GITHUB_OUTPUT not set, falling back to stdout");
                println!("{}={}", name, value);
                Ok(())
            }
        }
    }
}
