//! Import normalization of generated Go code.
//!
//! The merged output has every hand-written import block removed. An
//! [`ImportNormalizer`] recomputes the imports and formats the file.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Errors from an [`ImportNormalizer`].
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The tool could not be started or fed.
    #[error("failed to run {}", tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and rejected its input.
    #[error("{} exited with {status}: {stderr}", tool.display())]
    Failed {
        tool: PathBuf,
        status: String,
        stderr: String,
    },
}

/// Rewrites a Go source file so that its imports match its contents.
pub trait ImportNormalizer {
    /// Normalize `source`. `output_filename` is where the result will be
    /// written, if anywhere; it may influence import resolution.
    fn normalize(
        &self,
        output_filename: Option<&Path>,
        source: &[u8],
    ) -> Result<Vec<u8>, NormalizeError>;
}

/// Pipes the source through a `goimports`-compatible executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoImports {
    tool: PathBuf,
}

impl GoImports {
    pub const DEFAULT_TOOL: &'static str = "goimports";

    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &Path {
        &self.tool
    }
}

impl Default for GoImports {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOOL)
    }
}

impl ImportNormalizer for GoImports {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn normalize(
        &self,
        output_filename: Option<&Path>,
        source: &[u8],
    ) -> Result<Vec<u8>, NormalizeError> {
        let spawn_error = |source| NormalizeError::Spawn {
            tool: self.tool.clone(),
            source,
        };

        let mut command = Command::new(&self.tool);
        if let Some(dir) = output_filename
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
        {
            command.arg("-srcdir").arg(dir);
        }
        debug!(tool = %self.tool.display(), ?output_filename, "normalizing imports");

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Dropping stdin closes the pipe so the tool sees end of input.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(source) {
                Ok(()) => {}
                // A tool that exits early is judged by its exit status.
                Err(error) if error.kind() == ErrorKind::BrokenPipe => {}
                Err(error) => return Err(spawn_error(error)),
            }
        }

        let output = child.wait_with_output().map_err(spawn_error)?;
        if !output.status.success() {
            return Err(NormalizeError::Failed {
                tool: self.tool.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Returns the source unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passthrough;

impl ImportNormalizer for Passthrough {
    fn normalize(&self, _: Option<&Path>, source: &[u8]) -> Result<Vec<u8>, NormalizeError> {
        Ok(source.to_vec())
    }
}
