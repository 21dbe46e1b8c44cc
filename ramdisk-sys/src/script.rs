// SPDX-License-Identifier: GPL-3.0-only

//! Command construction for volume creation and destruction
//!
//! Each builder emits a single conjunctive shell line: the steps are chained
//! with `&&` so a failed step aborts everything after it. The device
//! identifier produced by `hdiutil attach` only ever exists inside the
//! command substitution, so a partially created device is left to the OS to
//! reclaim.

use std::path::Path;

use ramdisk_types::FilesystemKind;

use crate::name::{escape_single_quotes, SafeName};

/// Shell line that allocates, formats, labels, and materializes a
/// memory-backed volume.
///
/// `capacity_blocks` is the device size in 512-byte blocks. When
/// `icon_source` is given, the chain additionally copies it to the volume
/// root as `.VolumeIcon.icns` and sets the custom-icon attribute.
pub fn build_create_command(
    name: &SafeName,
    capacity_blocks: u64,
    filesystem: FilesystemKind,
    icon_source: Option<&Path>,
) -> String {
    let attach = format!("$(hdiutil attach -nomount ram://{capacity_blocks})");
    let label = name.escaped();

    let format_step = match filesystem {
        FilesystemKind::Apfs => format!("diskutil apfs create {attach} '{label}'"),
        kind if kind.needs_mbr_scheme() => format!(
            "diskutil eraseDisk {} '{label}' MBR {attach}",
            kind.diskutil_format()
        ),
        kind => format!(
            "diskutil eraseDisk {} '{label}' {attach}",
            kind.diskutil_format()
        ),
    };

    let mount_root = name.quoted_mount_path();
    let mut command = format!("{format_step} && touch {mount_root}/.");

    if let Some(icon) = icon_source {
        let icon = escape_single_quotes(&icon.to_string_lossy());
        command.push_str(&format!(
            " && cp '{icon}' {mount_root}/.VolumeIcon.icns && SetFile -a C {mount_root}"
        ));
    }

    command
}

/// Shell line that detaches a volume by its mount path.
pub fn build_eject_command(name: &SafeName) -> String {
    format!("diskutil eject {}", name.quoted_mount_path())
}

/// Wrap a shell line into the Terminal automation script that runs it.
///
/// The command is embedded in an AppleScript string literal, so `\` and `"`
/// must be escaped for that literal; shell-level quoting has already been
/// handled by the builders.
pub fn automation_script(command: &str) -> String {
    let embedded = command.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "tell application \"Terminal\"\n    activate\n    do script \"{embedded}; exit\"\nend tell"
    )
}
