//! Working-directory resolution and the path-rewriting pass.

use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use drift_options::{Arg, Opt, ParsedEntry, ParsedOptions};
use std::path::{Path, PathBuf};

/// Resolves `-working-directory` to an absolute path.
///
/// A relative argument is resolved against `cwd` when one is available;
/// without a CWD the argument must already be absolute, otherwise an
/// *invalid value* error is emitted.
pub fn resolve_working_directory(
    parsed: &ParsedOptions,
    cwd: Option<&Path>,
    sink: &DiagnosticSink,
) -> Option<PathBuf> {
    let value = parsed.value_of(Opt::WorkingDirectory)?;
    let path = Path::new(value);
    if path.is_absolute() {
        return Some(path.to_path_buf());
    }
    match cwd {
        Some(cwd) => Some(cwd.join(path)),
        None => {
            sink.emit(Diagnostic::error(
                codes::INVALID_ARG_VALUE,
                format!("'-working-directory {value}' must be an absolute path"),
            ));
            None
        }
    }
}

/// Rewrites every path-valued option argument and every input against
/// the working directory.
///
/// This is the sole in-place transform of [`ParsedOptions`]. Relative
/// values become absolute; absolute values and the stdin sentinel are
/// left alone, which makes the pass idempotent.
pub fn apply_working_directory(parsed: &mut ParsedOptions, working_dir: &Path) {
    parsed.for_each_modifying(|entry| {
        let rewrite_paths = match entry.entry {
            ParsedEntry::Input => true,
            ParsedEntry::Option(opt) => opt.attrs().path_arg,
        };
        if !rewrite_paths {
            return;
        }
        match &mut entry.arg {
            Arg::None => {}
            Arg::Single(value) => rewrite(value, working_dir),
            Arg::Multiple(values) => {
                for value in values {
                    rewrite(value, working_dir);
                }
            }
        }
    });
}

fn rewrite(value: &mut String, working_dir: &Path) {
    if value.as_str() == "-" {
        return;
    }
    if Path::new(value.as_str()).is_relative() {
        let joined = working_dir.join(value.as_str());
        *value = joined.to_string_lossy().into_owned();
    }
}
