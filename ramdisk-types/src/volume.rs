// SPDX-License-Identifier: GPL-3.0-only

//! Volume creation parameters
//!
//! Capacity is expressed in 512-byte blocks throughout; callers convert
//! human-facing MB/GB values at the request boundary.

use serde::{Deserialize, Serialize};

/// Fixed addressable unit used to express device capacity, in bytes.
pub const BLOCK_SIZE: u64 = 512;

/// Size unit offered to callers, with its 512-byte-block multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    Mb,
    Gb,
}

impl SizeUnit {
    /// Blocks per one unit of this size.
    pub fn blocks_per_unit(self) -> u64 {
        match self {
            // 512-byte blocks per MB
            Self::Mb => 2048,
            Self::Gb => 2048 * 1024,
        }
    }

    /// Convert a (possibly fractional) size value to whole blocks,
    /// truncating toward zero.
    pub fn to_blocks(self, value: f64) -> u64 {
        if !value.is_finite() || value <= 0.0 {
            return 0;
        }
        (value * self.blocks_per_unit() as f64) as u64
    }

    /// Parse a unit spelling such as "MB" or "gb".
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mb" => Some(Self::Mb),
            "gb" => Some(Self::Gb),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mb => "MB",
            Self::Gb => "GB",
        }
    }
}

/// Filesystems a RAM disk can be formatted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilesystemKind {
    Apfs,
    HfsPlus,
    Fat32,
    Exfat,
}

impl FilesystemKind {
    /// Format name as diskutil spells it.
    pub fn diskutil_format(self) -> &'static str {
        match self {
            Self::Apfs => "APFS",
            Self::HfsPlus => "HFS+",
            Self::Fat32 => "FAT32",
            Self::Exfat => "ExFAT",
        }
    }

    /// Whether `diskutil eraseDisk` needs an explicit MBR partition scheme
    /// for this format.
    pub fn needs_mbr_scheme(self) -> bool {
        matches!(self, Self::Fat32 | Self::Exfat)
    }

    /// Parse a filesystem spelling. Unknown spellings fall back to APFS;
    /// that default is deliberate, not an error.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "hfs+" | "hfsplus" | "hfs" => Self::HfsPlus,
            "fat32" | "vfat" => Self::Fat32,
            "exfat" => Self::Exfat,
            _ => Self::Apfs,
        }
    }
}

/// Parameters of a volume create operation.
///
/// Invariants: `capacity_blocks > 0`, and the name must not already be
/// tracked as mounted. Both are enforced by the manager before any external
/// command is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRequest {
    /// User-chosen volume name, also used as the filesystem label.
    pub name: String,

    /// Device capacity in 512-byte blocks.
    pub capacity_blocks: u64,

    /// Filesystem to format the device with.
    pub filesystem: FilesystemKind,
}

impl VolumeRequest {
    pub fn new(name: impl Into<String>, capacity_blocks: u64, filesystem: FilesystemKind) -> Self {
        Self {
            name: name.into(),
            capacity_blocks,
            filesystem,
        }
    }

    /// Build a request from a human-facing size value and unit.
    pub fn from_size(
        name: impl Into<String>,
        value: f64,
        unit: SizeUnit,
        filesystem: FilesystemKind,
    ) -> Self {
        Self::new(name, unit.to_blocks(value), filesystem)
    }
}
