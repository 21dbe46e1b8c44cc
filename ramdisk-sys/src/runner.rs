// SPDX-License-Identifier: GPL-3.0-only

//! Privileged command execution through the automation facility
//!
//! Shell lines are handed to `osascript`, which drives Terminal and lets the
//! OS prompt the user for automation permission. The runner's only jobs are
//! invoking the facility and classifying its failures; settle timing and
//! tracker updates belong to the manager.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};
use which::which;

use crate::error::{Result, SysError};
use crate::script::automation_script;

/// Executes a constructed shell line through the host automation facility.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion. Errors carry the failure
    /// classification the facade recovers into an outcome.
    async fn run(&self, command: &str) -> Result<()>;
}

/// Phrases the automation facility uses when the user or OS has declined
/// the permission prompt.
const PERMISSION_DENIAL_PHRASES: [&str; 2] = ["not allowed", "isn't allowed"];

/// Classify a non-zero exit of the automation facility from its diagnostic
/// text.
pub fn classify_failure(diagnostic: &str) -> SysError {
    if PERMISSION_DENIAL_PHRASES
        .iter()
        .any(|phrase| diagnostic.contains(phrase))
    {
        SysError::PermissionDenied(diagnostic.to_string())
    } else {
        SysError::ScriptFailed(diagnostic.to_string())
    }
}

/// Production runner backed by the `osascript` binary.
pub struct OsascriptRunner {
    binary_path: PathBuf,
}

impl OsascriptRunner {
    /// Locate the automation facility.
    ///
    /// Returns an error if `osascript` is not installed, which surfaces to
    /// callers as a builder failure rather than an execution failure.
    pub fn new() -> Result<Self> {
        let binary_path = which("osascript")
            .map_err(|e| SysError::AutomationUnavailable(e.to_string()))?;
        info!("Found osascript binary at {:?}", binary_path);
        Ok(Self { binary_path })
    }
}

#[async_trait]
impl CommandRunner for OsascriptRunner {
    async fn run(&self, command: &str) -> Result<()> {
        let script = automation_script(command);
        debug!("Running automation script for: {command}");

        // The script travels as a single argv entry; no shell re-parses it.
        let output = Command::new(&self.binary_path)
            .arg("-e")
            .arg(&script)
            .output()
            .await
            .map_err(|e| {
                SysError::AutomationUnavailable(format!("failed to invoke osascript: {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("osascript reported failure: {}", stderr.trim());
            return Err(classify_failure(stderr.trim()));
        }

        Ok(())
    }
}
