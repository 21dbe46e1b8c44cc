// SPDX-License-Identifier: GPL-3.0-only

//! Facade lifecycle coverage against a scripted automation runner.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ramdisk_manager::{RamDiskManager, SettleDelays};
use ramdisk_sys::{classify_failure, CommandRunner, Result as SysResult, SysError};
use ramdisk_types::{FilesystemKind, OutcomeKind, SizeUnit};

#[derive(Clone)]
enum Scripted {
    Succeed,
    /// Fail with this diagnostic text, classified the way the production
    /// runner classifies osascript stderr.
    FailWith(&'static str),
    Unavailable,
}

#[derive(Clone)]
struct FakeRunner {
    commands: Arc<Mutex<Vec<String>>>,
    result: Arc<Mutex<Scripted>>,
}

impl FakeRunner {
    fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            result: Arc::new(Mutex::new(Scripted::Succeed)),
        }
    }

    fn set_result(&self, result: Scripted) {
        *self.result.lock().unwrap() = result;
    }

    fn take_commands(&self) -> Vec<String> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, command: &str) -> SysResult<()> {
        self.commands.lock().unwrap().push(command.to_string());
        match self.result.lock().unwrap().clone() {
            Scripted::Succeed => Ok(()),
            Scripted::FailWith(diagnostic) => Err(classify_failure(diagnostic)),
            Scripted::Unavailable => Err(SysError::AutomationUnavailable(
                "cannot find osascript".into(),
            )),
        }
    }
}

fn manager_with(runner: &FakeRunner) -> RamDiskManager {
    RamDiskManager::with_runner(Arc::new(runner.clone())).settle(SettleDelays::none())
}

#[tokio::test]
async fn create_then_refresh_lists_the_volume_once() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);

    let outcome = manager
        .create("Scratch", 1.0, SizeUnit::Gb, FilesystemKind::Apfs)
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.kind, OutcomeKind::Ok);
    assert!(outcome.message.contains("/Volumes/Scratch"));
    assert_eq!(manager.refresh(), vec!["Scratch"]);

    let commands = runner.take_commands();
    assert_eq!(commands.len(), 1);
    assert!(commands[0].contains("ram://2097152"));
    assert!(commands[0].contains("diskutil apfs create"));
    assert!(commands[0].contains("'Scratch'"));
}

#[tokio::test]
async fn snapshot_sorts_across_creations() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);

    for name in ["Gamma", "Alpha", "Beta"] {
        let outcome = manager
            .create(name, 64.0, SizeUnit::Mb, FilesystemKind::HfsPlus)
            .await;
        assert!(outcome.success);
    }

    assert_eq!(manager.refresh(), vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn permission_denial_leaves_the_tracker_unchanged() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);
    runner.set_result(Scripted::FailWith(
        "Terminal got an error: RamDisk is not allowed to send Apple events.",
    ));

    let outcome = manager
        .create("Scratch", 1.0, SizeUnit::Gb, FilesystemKind::Apfs)
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.kind, OutcomeKind::PermissionDenied);
    assert!(outcome.message.contains("Privacy & Security"));
    assert!(manager.refresh().is_empty());

    // The failed name stays eligible for retry.
    runner.set_result(Scripted::Succeed);
    let retry = manager
        .create("Scratch", 1.0, SizeUnit::Gb, FilesystemKind::Apfs)
        .await;
    assert!(retry.success);
    assert_eq!(manager.refresh(), vec!["Scratch"]);
}

#[tokio::test]
async fn execution_failures_surface_the_tool_diagnostic() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);
    runner.set_result(Scripted::FailWith("execution error: no space left on device"));

    let outcome = manager
        .create("Scratch", 256.0, SizeUnit::Mb, FilesystemKind::Exfat)
        .await;

    assert_eq!(outcome.kind, OutcomeKind::ExecutionError);
    assert!(outcome.message.contains("no space left on device"));
    assert!(manager.refresh().is_empty());
}

#[tokio::test]
async fn unavailable_facility_is_a_builder_error() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);
    runner.set_result(Scripted::Unavailable);

    let outcome = manager
        .create("Scratch", 1.0, SizeUnit::Gb, FilesystemKind::Apfs)
        .await;

    assert_eq!(outcome.kind, OutcomeKind::BuilderError);
}

#[tokio::test]
async fn unmount_forgets_the_volume_only_on_success() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);

    assert!(manager
        .create("Scratch", 1.0, SizeUnit::Gb, FilesystemKind::Apfs)
        .await
        .success);

    runner.set_result(Scripted::FailWith(
        "execution error: Terminal got an error: volume busy",
    ));
    let failed = manager.unmount("Scratch").await;
    assert_eq!(failed.kind, OutcomeKind::ExecutionError);
    assert_eq!(manager.refresh(), vec!["Scratch"]);

    runner.set_result(Scripted::Succeed);
    let ejected = manager.unmount("Scratch").await;
    assert!(ejected.success);
    assert!(manager.refresh().is_empty());

    let commands = runner.take_commands();
    assert!(commands
        .iter()
        .any(|command| command == "diskutil eject /Volumes/'Scratch'"));
}

#[tokio::test]
async fn concurrent_creates_merge_into_one_sorted_snapshot() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);

    let (b, a) = tokio::join!(
        manager.create("B", 128.0, SizeUnit::Mb, FilesystemKind::Apfs),
        manager.create("A", 128.0, SizeUnit::Mb, FilesystemKind::Apfs),
    );

    assert!(a.success && b.success);
    assert_eq!(manager.refresh(), vec!["A", "B"]);
}

#[tokio::test]
async fn duplicate_names_are_rejected_before_any_command_runs() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);

    assert!(manager
        .create("Scratch", 1.0, SizeUnit::Gb, FilesystemKind::Apfs)
        .await
        .success);
    runner.take_commands();

    let duplicate = manager
        .create("Scratch", 2.0, SizeUnit::Gb, FilesystemKind::Exfat)
        .await;

    assert_eq!(duplicate.kind, OutcomeKind::InvalidRequest);
    assert!(runner.take_commands().is_empty());
    assert_eq!(manager.refresh(), vec!["Scratch"]);
}

#[tokio::test]
async fn invalid_requests_never_reach_the_runner() {
    let runner = FakeRunner::new();
    let manager = manager_with(&runner);

    let empty = manager
        .create("", 1.0, SizeUnit::Gb, FilesystemKind::Apfs)
        .await;
    assert_eq!(empty.kind, OutcomeKind::InvalidRequest);

    let zero = manager
        .create("Scratch", 0.0, SizeUnit::Gb, FilesystemKind::Apfs)
        .await;
    assert_eq!(zero.kind, OutcomeKind::InvalidRequest);

    assert!(runner.take_commands().is_empty());
    assert!(manager.refresh().is_empty());
}

#[tokio::test]
async fn icon_source_is_threaded_into_the_create_chain() {
    let runner = FakeRunner::new();
    let manager = RamDiskManager::with_runner(Arc::new(runner.clone()))
        .settle(SettleDelays::none())
        .icon_source(Path::new("/tmp/branding/icon.icns"));

    assert!(manager
        .create("Branded", 64.0, SizeUnit::Mb, FilesystemKind::Apfs)
        .await
        .success);

    let commands = runner.take_commands();
    assert!(commands[0].contains("cp '/tmp/branding/icon.icns'"));
    assert!(commands[0].contains(".VolumeIcon.icns"));
    assert!(commands[0].contains("SetFile -a C"));
}
