// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Classification of an operation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The operation completed.
    Ok,
    /// The request was rejected before any external command ran
    /// (empty name, zero capacity, name already tracked).
    InvalidRequest,
    /// The user or OS declined the automation permission prompt.
    PermissionDenied,
    /// The external tool chain reported a failure.
    ExecutionError,
    /// The automation facility itself could not be invoked.
    BuilderError,
}

/// Per-operation result handed back to the caller. Transient; produced per
/// call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub kind: OutcomeKind,
    pub message: String,
}

impl OperationOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            kind: OutcomeKind::Ok,
            message: message.into(),
        }
    }

    pub fn failure(kind: OutcomeKind, message: impl Into<String>) -> Self {
        debug_assert!(kind != OutcomeKind::Ok, "failure outcome with Ok kind");
        Self {
            success: false,
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_roundtrips() {
        let outcome = OperationOutcome::failure(OutcomeKind::PermissionDenied, "declined");
        let json = serde_json::to_string(&outcome).expect("serialize outcome");
        let parsed: OperationOutcome = serde_json::from_str(&json).expect("deserialize outcome");
        assert_eq!(parsed, outcome);
    }

    #[test]
    fn constructors_set_success_flag() {
        assert!(OperationOutcome::ok("created").success);
        assert!(!OperationOutcome::failure(OutcomeKind::ExecutionError, "boom").success);
    }
}
