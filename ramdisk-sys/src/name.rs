// SPDX-License-Identifier: GPL-3.0-only

//! Volume name sanitization
//!
//! Volume names are user input and end up inside single-quoted arguments of
//! a generated shell line. All escaping funnels through
//! [`escape_single_quotes`] so there is exactly one place to audit.

use crate::error::{Result, SysError};

/// Escape a string for interpolation inside a single-quoted shell argument.
///
/// Every `'` becomes `'\''`: close the quote, emit a literal quote, reopen.
/// Deterministic, and the identity on input containing no `'`.
pub fn escape_single_quotes(input: &str) -> String {
    input.replace('\'', "'\\''")
}

/// A volume name validated and escaped for command interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeName {
    raw: String,
    escaped: String,
}

impl SafeName {
    /// The name as the user supplied it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The shell-escaped rendering, for use inside `'…'`.
    pub fn escaped(&self) -> &str {
        &self.escaped
    }

    /// Quoted mount root of the volume, as embedded in generated commands.
    pub fn quoted_mount_path(&self) -> String {
        format!("/Volumes/'{}'", self.escaped)
    }

    /// Plain mount root of the volume, for display.
    pub fn mount_path(&self) -> String {
        format!("/Volumes/{}", self.raw)
    }
}

/// Validate a user-supplied volume name and produce its escaped form.
pub fn sanitize(name: &str) -> Result<SafeName> {
    if name.is_empty() {
        return Err(SysError::InvalidName("name must not be empty".into()));
    }
    if name.contains('\0') {
        return Err(SysError::InvalidName(
            "name must not contain NUL characters".into(),
        ));
    }

    Ok(SafeName {
        raw: name.to_string(),
        escaped: escape_single_quotes(name),
    })
}
