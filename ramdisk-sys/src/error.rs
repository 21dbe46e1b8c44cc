// SPDX-License-Identifier: GPL-3.0-only

use ramdisk_types::OutcomeKind;
use thiserror::Error;

/// Error types for system-level operations
#[derive(Error, Debug)]
pub enum SysError {
    #[error("invalid volume name: {0}")]
    InvalidName(String),

    #[error("automation facility unavailable: {0}")]
    AutomationUnavailable(String),

    #[error("automation permission denied: {0}")]
    PermissionDenied(String),

    #[error("script execution failed: {0}")]
    ScriptFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SysError {
    /// Outcome classification this error recovers into at the facade
    /// boundary.
    pub fn outcome_kind(&self) -> OutcomeKind {
        match self {
            Self::InvalidName(_) => OutcomeKind::InvalidRequest,
            Self::AutomationUnavailable(_) => OutcomeKind::BuilderError,
            Self::PermissionDenied(_) => OutcomeKind::PermissionDenied,
            Self::ScriptFailed(_) | Self::Io(_) => OutcomeKind::ExecutionError,
        }
    }
}

/// Result type alias for system operations
pub type Result<T> = std::result::Result<T, SysError>;
