//! Driver persona selection from argv[0] and overrides.

use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use std::fmt;
use std::path::Path;

/// The persona the driver adopts for one invocation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DriverKind {
    /// `swiftc`: plans batch compilations and links.
    Batch,
    /// `swift`: routes to the REPL or immediate execution.
    Interactive,
    /// `-frontend` escape: the invocation is a frontend job.
    Frontend,
    /// `-modulewrap` escape: wrap a module into an object file.
    ModuleWrap,
    /// `swift-autolink-extract`: extract autolink metadata.
    AutolinkExtract,
    /// `swift-format`: source formatting tool.
    Format,
}

impl DriverKind {
    /// Maps a recognized executable basename (or `--driver-mode=` value)
    /// to its kind.
    pub fn from_name(name: &str) -> Option<DriverKind> {
        match name {
            "swift" => Some(DriverKind::Interactive),
            "swiftc" => Some(DriverKind::Batch),
            "swift-autolink-extract" => Some(DriverKind::AutolinkExtract),
            "swift-format" => Some(DriverKind::Format),
            _ => None,
        }
    }

    /// Determines the driver kind for an invocation.
    ///
    /// The first argument may be a `-frontend` / `-modulewrap` escape,
    /// which wins outright. Otherwise the last `--driver-mode=` argument
    /// overrides the argv[0] basename. An unrecognized name emits
    /// *invalid driver name* and returns `None`.
    pub fn determine(argv0: &str, args: &[String], sink: &DiagnosticSink) -> Option<DriverKind> {
        match args.first().map(String::as_str) {
            Some("-frontend") => return Some(DriverKind::Frontend),
            Some("-modulewrap") => return Some(DriverKind::ModuleWrap),
            _ => {}
        }

        if let Some(value) = args
            .iter()
            .rev()
            .find_map(|a| a.strip_prefix("--driver-mode="))
        {
            return match DriverKind::from_name(value) {
                Some(kind) => Some(kind),
                None => {
                    sink.emit(Diagnostic::error(
                        codes::INVALID_DRIVER_NAME,
                        format!("invalid value '{value}' in '--driver-mode='"),
                    ));
                    None
                }
            };
        }

        let base = basename(argv0);
        match DriverKind::from_name(base) {
            Some(kind) => Some(kind),
            None => {
                sink.emit(Diagnostic::error(
                    codes::INVALID_DRIVER_NAME,
                    format!("invalid driver name '{base}'"),
                ));
                None
            }
        }
    }

    /// Returns `true` for the interactive (`swift`) persona.
    pub fn is_interactive(self) -> bool {
        self == DriverKind::Interactive
    }

    /// Returns `true` for the personas that plan compilations.
    pub fn is_compiler_driver(self) -> bool {
        matches!(self, DriverKind::Batch | DriverKind::Interactive)
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverKind::Batch => "swiftc",
            DriverKind::Interactive => "swift",
            DriverKind::Frontend => "frontend",
            DriverKind::ModuleWrap => "modulewrap",
            DriverKind::AutolinkExtract => "swift-autolink-extract",
            DriverKind::Format => "swift-format",
        };
        f.write_str(name)
    }
}

/// Extracts the executable basename, dropping directories and a
/// trailing `.exe`.
fn basename(argv0: &str) -> &str {
    let base = Path::new(argv0)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(argv0);
    base.strip_suffix(".exe").unwrap_or(base)
}
