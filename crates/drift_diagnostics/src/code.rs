//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
    /// Remark diagnostics, prefixed with `R`.
    Remark,
    /// Note diagnostics, prefixed with `N`.
    Note,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Remark => 'R',
            Category::Note => 'N',
        }
    }
}

/// A structured diagnostic code combining a category and a numeric identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit
/// number, e.g. `E205`, `W301`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// The stable codes emitted by the driver core.
pub mod codes {
    use super::{Category, DiagnosticCode};

    /// An argv token did not match any option spelling.
    pub const UNKNOWN_OPTION: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
    /// A separate-value option appeared at the end of argv with no value.
    pub const MISSING_OPTION_VALUE: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
    /// argv[0] (or `--driver-mode=`) named an unrecognized driver persona.
    pub const INVALID_DRIVER_NAME: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
    /// An option value was not one of the recognized spellings.
    pub const INVALID_ARG_VALUE: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);
    /// `-static` cannot be combined with `-emit-executable`.
    pub const STATIC_EXECUTABLE_DISALLOWED: DiagnosticCode =
        DiagnosticCode::new(Category::Error, 201);
    /// `-debug-info-format=` was given without any `-g` option.
    pub const DEBUG_FORMAT_WITHOUT_LEVEL: DiagnosticCode =
        DiagnosticCode::new(Category::Error, 202);
    /// Two options on the command line are mutually exclusive.
    pub const ARGUMENT_NOT_ALLOWED_WITH: DiagnosticCode =
        DiagnosticCode::new(Category::Error, 203);
    /// A module cannot be emitted in REPL or immediate mode.
    pub const MODE_CANNOT_EMIT_MODULE: DiagnosticCode = DiagnosticCode::new(Category::Error, 204);
    /// The derived module name is not a valid identifier.
    pub const BAD_MODULE_NAME: DiagnosticCode = DiagnosticCode::new(Category::Error, 205);
    /// The module name `Swift` is reserved for the standard library.
    pub const STDLIB_MODULE_NAME: DiagnosticCode = DiagnosticCode::new(Category::Error, 206);
    /// The output file map could not be read or decoded.
    pub const BAD_OUTPUT_FILE_MAP: DiagnosticCode = DiagnosticCode::new(Category::Error, 207);
    /// A driver invariant was violated; always a bug, never bad input.
    pub const INTERNAL_ERROR: DiagnosticCode = DiagnosticCode::new(Category::Error, 900);

    /// Incremental compilation needs a build-record entry in the output file map.
    pub const NO_BUILD_RECORD_ENTRY: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);
    /// The build record could not be written at shutdown.
    pub const UNWRITABLE_BUILD_RECORD: DiagnosticCode =
        DiagnosticCode::new(Category::Warning, 302);
    /// `-enable-batch-mode` is ignored under whole-module optimization.
    pub const BATCH_MODE_IGNORED: DiagnosticCode = DiagnosticCode::new(Category::Warning, 303);
    /// An option that has no effect for the interactive driver was ignored.
    pub const OPTION_IGNORED_IN_INTERACTIVE: DiagnosticCode =
        DiagnosticCode::new(Category::Warning, 304);
    /// A freshly compiled input produced an unreadable dependency summary.
    pub const MALFORMED_SUMMARY_AFTER_COMPILE: DiagnosticCode =
        DiagnosticCode::new(Category::Warning, 305);
    /// The previous build record exists but could not be decoded.
    pub const MALFORMED_BUILD_RECORD: DiagnosticCode =
        DiagnosticCode::new(Category::Warning, 306);

    /// Incremental compilation was disabled, with the deciding reason.
    pub const INCREMENTAL_DISABLED: DiagnosticCode = DiagnosticCode::new(Category::Remark, 401);
    /// An input has no dependencies entry in the output file map.
    pub const MISSING_DEPENDENCIES_ENTRY: DiagnosticCode =
        DiagnosticCode::new(Category::Remark, 402);
    /// Opt-in chatter about which inputs each wave scheduled.
    pub const INCREMENTAL_STATUS: DiagnosticCode = DiagnosticCode::new(Category::Remark, 403);
}
