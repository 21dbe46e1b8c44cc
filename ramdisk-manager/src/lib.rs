// SPDX-License-Identifier: GPL-3.0-only

//! RAM disk lifecycle manager
//!
//! The facade composes name sanitization, command construction, and
//! automation execution into `create`, `unmount`, and `refresh`, and owns
//! the in-memory registry of volumes this process created. The registry
//! reflects manager intent, not live OS state: volumes created by anyone
//! else are invisible here, and nothing survives a restart.

pub mod manager;
pub mod tracker;

pub use manager::{RamDiskManager, SettleDelays};
pub use tracker::VolumeTracker;
