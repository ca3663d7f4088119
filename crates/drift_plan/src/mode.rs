//! Compiler-mode selection.

use crate::driver_kind::DriverKind;
use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use drift_options::{Opt, OptionGroup, ParsedEntry, ParsedOptions};
use std::fmt;

/// How frontend invocations are partitioned over the inputs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CompilerMode {
    /// One frontend job per input.
    StandardCompile,
    /// One frontend job for all inputs (whole-module).
    SingleCompile,
    /// Inputs grouped into batches, one job per batch.
    BatchCompile,
    /// Compiling a precompiled Clang module.
    CompilePcm,
    /// The read-eval-print loop.
    Repl,
    /// Compile and run in one step.
    Immediate,
}

impl CompilerMode {
    /// Returns `true` for the interactive modes that never produce
    /// persistent outputs.
    pub fn is_interactive(self) -> bool {
        matches!(self, CompilerMode::Repl | CompilerMode::Immediate)
    }
}

impl fmt::Display for CompilerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompilerMode::StandardCompile => "standard compilation",
            CompilerMode::SingleCompile => "whole-module compilation",
            CompilerMode::BatchCompile => "batch compilation",
            CompilerMode::CompilePcm => "pcm compilation",
            CompilerMode::Repl => "repl",
            CompilerMode::Immediate => "immediate",
        };
        f.write_str(name)
    }
}

/// Derives the compiler mode from the last mode-group option, the
/// driver kind, and the whole-module / batch flags.
pub fn derive_compiler_mode(
    kind: DriverKind,
    parsed: &ParsedOptions,
    has_inputs: bool,
    sink: &DiagnosticSink,
) -> CompilerMode {
    let last_mode = parsed.last_in_group(OptionGroup::Modes).map(|(opt, _)| opt);

    match last_mode {
        Some(Opt::EmitPch | Opt::EmitImportedModules | Opt::IndexFile) => {
            return CompilerMode::SingleCompile
        }
        Some(Opt::Repl | Opt::DeprecatedIntegratedRepl | Opt::LldbRepl) => {
            return CompilerMode::Repl
        }
        Some(Opt::Immediate) => return CompilerMode::Immediate,
        Some(Opt::EmitPcm) => return CompilerMode::CompilePcm,
        _ => {}
    }

    if kind.is_interactive() {
        return if has_inputs {
            CompilerMode::Immediate
        } else {
            CompilerMode::Repl
        };
    }

    if parsed.has(Opt::WholeModuleOptimization) {
        if batch_mode_requested(parsed) {
            sink.emit(Diagnostic::warning(
                codes::BATCH_MODE_IGNORED,
                "ignoring '-enable-batch-mode' because '-whole-module-optimization' was specified",
            ));
        }
        return CompilerMode::SingleCompile;
    }

    if batch_mode_requested(parsed) {
        return CompilerMode::BatchCompile;
    }

    CompilerMode::StandardCompile
}

/// Whether batch mode is in effect: the last of `-enable-batch-mode` /
/// `-disable-batch-mode` wins; neither means off.
fn batch_mode_requested(parsed: &ParsedOptions) -> bool {
    let mut enabled = false;
    for entry in parsed.iter() {
        match entry.entry {
            ParsedEntry::Option(Opt::EnableBatchMode) => enabled = true,
            ParsedEntry::Option(Opt::DisableBatchMode) => enabled = false,
            _ => {}
        }
    }
    enabled
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_options::ArgumentParser;

    fn parse(tokens: &[&str]) -> ParsedOptions {
        let args: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        ArgumentParser::new().parse(&args).unwrap()
    }

    fn mode_of(kind: DriverKind, tokens: &[&str]) -> CompilerMode {
        let parsed = parse(tokens);
        let has_inputs = !parsed.inputs().is_empty();
        let sink = DiagnosticSink::new();
        derive_compiler_mode(kind, &parsed, has_inputs, &sink)
    }

    #[test]
    fn default_is_standard_compile() {
        assert_eq!(
            mode_of(DriverKind::Batch, &["a.swift"]),
            CompilerMode::StandardCompile
        );
    }

    #[test]
    fn single_compile_implied_by_pch_and_index() {
        assert_eq!(
            mode_of(DriverKind::Batch, &["-emit-pch", "bridge.h"]),
            CompilerMode::SingleCompile
        );
        assert_eq!(
            mode_of(DriverKind::Batch, &["-emit-imported-modules", "a.swift"]),
            CompilerMode::SingleCompile
        );
        assert_eq!(
            mode_of(DriverKind::Batch, &["-index-file", "a.swift"]),
            CompilerMode::SingleCompile
        );
    }

    #[test]
    fn repl_family_selects_repl() {
        assert_eq!(mode_of(DriverKind::Interactive, &["-repl"]), CompilerMode::Repl);
        assert_eq!(
            mode_of(DriverKind::Interactive, &["-lldb-repl"]),
            CompilerMode::Repl
        );
    }

    #[test]
    fn interactive_kind_routes_on_inputs() {
        assert_eq!(mode_of(DriverKind::Interactive, &[]), CompilerMode::Repl);
        assert_eq!(
            mode_of(DriverKind::Interactive, &["script.swift"]),
            CompilerMode::Immediate
        );
    }

    #[test]
    fn wmo_selects_single_compile() {
        assert_eq!(
            mode_of(DriverKind::Batch, &["-whole-module-optimization", "a.swift"]),
            CompilerMode::SingleCompile
        );
    }

    #[test]
    fn wmo_beats_batch_mode_with_warning() {
        let parsed = parse(&["-enable-batch-mode", "-whole-module-optimization", "a.swift"]);
        let sink = DiagnosticSink::new();
        let mode = derive_compiler_mode(DriverKind::Batch, &parsed, true, &sink);
        assert_eq!(mode, CompilerMode::SingleCompile);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::BATCH_MODE_IGNORED);
    }

    #[test]
    fn batch_mode_last_flag_wins() {
        assert_eq!(
            mode_of(DriverKind::Batch, &["-enable-batch-mode", "a.swift"]),
            CompilerMode::BatchCompile
        );
        assert_eq!(
            mode_of(
                DriverKind::Batch,
                &["-enable-batch-mode", "-disable-batch-mode", "a.swift"]
            ),
            CompilerMode::StandardCompile
        );
    }

    #[test]
    fn pcm_mode() {
        assert_eq!(
            mode_of(DriverKind::Batch, &["-emit-pcm", "mod.modulemap"]),
            CompilerMode::CompilePcm
        );
    }

    #[test]
    fn last_mode_option_wins() {
        assert_eq!(
            mode_of(DriverKind::Batch, &["-typecheck", "-emit-pch", "a.swift"]),
            CompilerMode::SingleCompile
        );
    }
}
