// SPDX-License-Identifier: GPL-3.0-only

//! The manager facade
//!
//! Per volume name the manager walks a two-state machine: unknown →
//! (create succeeds) → tracked → (unmount succeeds) → unknown. Failed
//! operations leave the registry untouched, so the same request can simply
//! be resubmitted.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, info, warn};

use ramdisk_sys::{
    build_create_command, build_eject_command, sanitize, CommandRunner, OsascriptRunner, SysError,
};
use ramdisk_types::{FilesystemKind, OperationOutcome, OutcomeKind, SizeUnit, VolumeRequest};

use crate::tracker::VolumeTracker;

/// Fixed waits applied after a successful command, because device mount
/// completion can lag the command's return. Grace periods, not correctness
/// guarantees; a slow enough system can still race past them.
#[derive(Debug, Clone, Copy)]
pub struct SettleDelays {
    pub after_create: Duration,
    pub after_unmount: Duration,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            after_create: Duration::from_secs(3),
            after_unmount: Duration::from_secs(2),
        }
    }
}

impl SettleDelays {
    /// No waiting at all; for tests and simulated runners.
    pub fn none() -> Self {
        Self {
            after_create: Duration::ZERO,
            after_unmount: Duration::ZERO,
        }
    }
}

/// Facade over RAM disk creation, destruction, and tracking.
///
/// Operations may run their external commands concurrently; registry
/// mutations from their completions are serialized behind one lock, which is
/// never held across an await.
pub struct RamDiskManager {
    runner: Arc<dyn CommandRunner>,
    tracker: Mutex<VolumeTracker>,
    settle: SettleDelays,
    icon_source: Option<PathBuf>,
}

impl RamDiskManager {
    /// Wire the facade to the host automation facility.
    pub fn new() -> ramdisk_sys::Result<Self> {
        Ok(Self::with_runner(Arc::new(OsascriptRunner::new()?)))
    }

    /// Wire the facade to an arbitrary runner, e.g. a fake in tests.
    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            tracker: Mutex::new(VolumeTracker::new()),
            settle: SettleDelays::default(),
            icon_source: None,
        }
    }

    /// Icon resource to copy onto newly created volumes. Discovery of the
    /// resource is the caller's job; without one, volumes are left unbranded.
    pub fn icon_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.icon_source = Some(path.into());
        self
    }

    pub fn settle(mut self, settle: SettleDelays) -> Self {
        self.settle = settle;
        self
    }

    /// Create a RAM disk from a human-facing size value. Conversion to
    /// 512-byte blocks happens here, at the request boundary.
    pub async fn create(
        &self,
        name: &str,
        size_value: f64,
        unit: SizeUnit,
        filesystem: FilesystemKind,
    ) -> OperationOutcome {
        self.create_volume(VolumeRequest::new(name, unit.to_blocks(size_value), filesystem))
            .await
    }

    /// Create a RAM disk from an explicit request.
    pub async fn create_volume(&self, request: VolumeRequest) -> OperationOutcome {
        let safe = match sanitize(&request.name) {
            Ok(safe) => safe,
            Err(error) => return recover(error),
        };

        if request.capacity_blocks == 0 {
            return OperationOutcome::failure(
                OutcomeKind::InvalidRequest,
                format!("RAM disk '{}' needs a positive size", safe.raw()),
            );
        }

        if self.tracker().contains(safe.raw()) {
            return OperationOutcome::failure(
                OutcomeKind::InvalidRequest,
                format!("RAM disk '{}' is already mounted", safe.raw()),
            );
        }

        let command = build_create_command(
            &safe,
            request.capacity_blocks,
            request.filesystem,
            self.icon_source.as_deref(),
        );
        debug!(volume = safe.raw(), "create command: {command}");

        match self.runner.run(&command).await {
            Ok(()) => {
                tokio::time::sleep(self.settle.after_create).await;
                self.tracker().record(safe.raw());
                info!(
                    volume = safe.raw(),
                    blocks = request.capacity_blocks,
                    "RAM disk created"
                );
                OperationOutcome::ok(format!(
                    "RAM disk '{}' created at {}",
                    safe.raw(),
                    safe.mount_path()
                ))
            }
            Err(error) => {
                warn!(volume = safe.raw(), "create failed: {error}");
                recover(error)
            }
        }
    }

    /// Eject a RAM disk and drop it from the registry.
    ///
    /// On success the name is forgotten regardless of whether the OS still
    /// reports the volume; the registry reflects manager intent, not live
    /// state. On failure the registry is untouched.
    pub async fn unmount(&self, name: &str) -> OperationOutcome {
        let safe = match sanitize(name) {
            Ok(safe) => safe,
            Err(error) => return recover(error),
        };

        let command = build_eject_command(&safe);
        debug!(volume = safe.raw(), "eject command: {command}");

        match self.runner.run(&command).await {
            Ok(()) => {
                tokio::time::sleep(self.settle.after_unmount).await;
                self.tracker().forget(safe.raw());
                info!(volume = safe.raw(), "RAM disk unmounted");
                OperationOutcome::ok(format!("RAM disk '{}' unmounted", safe.raw()))
            }
            Err(error) => {
                warn!(volume = safe.raw(), "unmount failed: {error}");
                recover(error)
            }
        }
    }

    /// Sorted names of the volumes this manager currently considers
    /// mounted. Never queries the OS.
    pub fn refresh(&self) -> Vec<String> {
        self.tracker().snapshot()
    }

    fn tracker(&self) -> MutexGuard<'_, VolumeTracker> {
        self.tracker.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Recover a system error into the outcome handed back to the caller.
fn recover(error: SysError) -> OperationOutcome {
    let message = match &error {
        SysError::PermissionDenied(_) => {
            "Automation permission denied. Enable Terminal automation for this app under \
             System Settings > Privacy & Security > Automation, then retry."
                .to_string()
        }
        other => other.to_string(),
    };
    OperationOutcome::failure(error.outcome_kind(), message)
}
