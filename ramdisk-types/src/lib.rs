// SPDX-License-Identifier: GPL-3.0-only

//! Shared data models for the RAM disk lifecycle manager
//!
//! This crate defines the types exchanged between the system layer, the
//! manager facade, and whatever presentation layer drives it:
//!
//! - `VolumeRequest` → parameters of a create operation
//! - `OperationOutcome` → per-operation result reported back to the caller
//! - `FilesystemKind` / `SizeUnit` → the supported formats and size units

pub mod outcome;
pub mod volume;

pub use outcome::{OperationOutcome, OutcomeKind};
pub use volume::{FilesystemKind, SizeUnit, VolumeRequest, BLOCK_SIZE};
