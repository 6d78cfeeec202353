//! Native file selection through an external dialog command

use std::path::Path;

use futures::future::BoxFuture;
use labelhost_core::{error::Result, FilePicker, PickedFile, UploadError};
use tokio::process::Command;

use crate::mime::accept_patterns;

/// Runs a dialog command (default `zenity --file-selection`) that prints the
/// chosen path on stdout
///
/// A non-zero exit or empty output means the user cancelled. For zenity-style
/// commands the accept types become a `--file-filter` argument.
#[derive(Debug, Clone)]
pub struct CommandPicker {
    program: String,
    args: Vec<String>,
}

impl CommandPicker {
    /// Parses a whitespace-separated command line
    pub fn new(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| UploadError::Picker("empty picker command".into()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn supports_file_filter(&self) -> bool {
        Path::new(&self.program)
            .file_name()
            .is_some_and(|name| name == "zenity")
    }

    /// Full argument list for one invocation
    pub fn command_args(&self, accept_types: &[String]) -> Vec<String> {
        let mut args = self.args.clone();
        let patterns = accept_patterns(accept_types);
        if self.supports_file_filter() && !patterns.is_empty() {
            args.push(format!("--file-filter=Images | {}", patterns.join(" ")));
        }
        args
    }

    async fn run(&self, accept_types: &[String]) -> Result<Option<PickedFile>> {
        let output = Command::new(&self.program)
            .args(self.command_args(accept_types))
            .output()
            .await
            .map_err(|e| UploadError::Picker(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            log::debug!("Picker exited with {}, treating as cancel", output.status);
            return Ok(None);
        }

        let chosen = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if chosen.is_empty() {
            return Ok(None);
        }

        let bytes = tokio::fs::read(&chosen)
            .await
            .map_err(|e| UploadError::Picker(format!("{}: {}", chosen, e)))?;
        let name = Path::new(&chosen)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(chosen);
        Ok(Some(PickedFile { name, bytes }))
    }
}

impl FilePicker for CommandPicker {
    fn pick<'a>(&'a self, accept_types: &'a [String]) -> BoxFuture<'a, Result<Option<PickedFile>>> {
        Box::pin(self.run(accept_types))
    }
}
