//! Diagnostic severity levels ordered from least to most severe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a driver diagnostic.
///
/// Ordered from least severe (`Note`) to most severe (`Error`), matching
/// the derived `PartialOrd`/`Ord` based on declaration order. Remarks are
/// opt-in chatter (e.g. incremental-build decisions); warnings degrade
/// behavior but never fail the build; errors make the driver exit
/// non-zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// An informational note attached to another diagnostic.
    Note,
    /// Opt-in progress or decision chatter.
    Remark,
    /// A problem that degrades behavior without failing the build.
    Warning,
    /// A problem that aborts planning and fails the build.
    Error,
}

impl Severity {
    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Remark => write!(f, "remark"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
