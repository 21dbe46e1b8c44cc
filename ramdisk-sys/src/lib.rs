// SPDX-License-Identifier: GPL-3.0-only

//! Low-level system operations for RAM disk management
//!
//! This crate owns everything below the manager facade:
//! - volume name sanitization for safe shell interpolation
//! - construction of the `hdiutil`/`diskutil` command chains
//! - execution of those chains through the Terminal automation facility
//!   (`osascript`), which can prompt the user for the required privilege
//!
//! Creating memory-backed devices and formatting them needs elevated
//! privilege on macOS; the automation facility is the one entry point that
//! can obtain it interactively.

pub mod error;
pub mod name;
pub mod runner;
pub mod script;

pub use error::{Result, SysError};
pub use name::{escape_single_quotes, sanitize, SafeName};
pub use runner::{classify_failure, CommandRunner, OsascriptRunner};
pub use script::{automation_script, build_create_command, build_eject_command};
