//! Debug-info level and format derivation.

use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use drift_options::{Opt, OptionGroup, ParsedOptions};
use std::fmt;

/// How much debug information the frontend is asked to produce.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum DebugInfoLevel {
    /// Line tables only (`-gline-tables-only`).
    LineTables,
    /// Line tables plus DWARF type information (`-gdwarf-types`).
    DwarfTypes,
    /// Full debug info including AST type references (`-g`).
    AstTypes,
}

/// The container format for emitted debug information.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DebugInfoFormat {
    /// DWARF, the default everywhere.
    Dwarf,
    /// CodeView, for PDB-based debuggers.
    CodeView,
}

impl fmt::Display for DebugInfoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugInfoFormat::Dwarf => f.write_str("dwarf"),
            DebugInfoFormat::CodeView => f.write_str("codeview"),
        }
    }
}

/// Derives the debug-info level and format.
///
/// The level comes from the last option in the `-g` group (`-gnone`
/// selects no debug info). The format defaults to DWARF; an unknown
/// `-debug-info-format=` value is diagnosed and falls back to DWARF.
pub fn derive_debug_info(
    parsed: &ParsedOptions,
    sink: &DiagnosticSink,
) -> (Option<DebugInfoLevel>, DebugInfoFormat) {
    let g_option = parsed
        .last_in_group(OptionGroup::DebugInfo)
        .map(|(opt, _)| opt);

    let level = match g_option {
        Some(Opt::G) => Some(DebugInfoLevel::AstTypes),
        Some(Opt::GlineTablesOnly) => Some(DebugInfoLevel::LineTables),
        Some(Opt::GdwarfTypes) => Some(DebugInfoLevel::DwarfTypes),
        _ => None,
    };

    let format = match parsed.value_of(Opt::DebugInfoFormat) {
        None => DebugInfoFormat::Dwarf,
        Some(value) => {
            if g_option.is_none() {
                sink.emit(Diagnostic::error(
                    codes::DEBUG_FORMAT_WITHOUT_LEVEL,
                    "option '-debug-info-format=' is missing a required argument ('-g')",
                ));
            }
            match value {
                "dwarf" => DebugInfoFormat::Dwarf,
                "codeview" => DebugInfoFormat::CodeView,
                other => {
                    sink.emit(Diagnostic::error(
                        codes::INVALID_ARG_VALUE,
                        format!("invalid value '{other}' in '-debug-info-format='"),
                    ));
                    DebugInfoFormat::Dwarf
                }
            }
        }
    };

    if format == DebugInfoFormat::CodeView {
        if let Some(opt @ (Opt::GlineTablesOnly | Opt::GdwarfTypes)) = g_option {
            sink.emit(Diagnostic::error(
                codes::ARGUMENT_NOT_ALLOWED_WITH,
                format!("argument '{opt}' is not allowed with '-debug-info-format=codeview'"),
            ));
        }
    }

    (level, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_options::ArgumentParser;

    fn derive(tokens: &[&str]) -> (Option<DebugInfoLevel>, DebugInfoFormat, DiagnosticSink) {
        let args: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        let parsed = ArgumentParser::new().parse(&args).unwrap();
        let sink = DiagnosticSink::new();
        let (level, format) = derive_debug_info(&parsed, &sink);
        (level, format, sink)
    }

    #[test]
    fn no_debug_options() {
        let (level, format, sink) = derive(&["a.swift"]);
        assert_eq!(level, None);
        assert_eq!(format, DebugInfoFormat::Dwarf);
        assert!(!sink.has_errors());
    }

    #[test]
    fn level_mapping() {
        assert_eq!(derive(&["-g"]).0, Some(DebugInfoLevel::AstTypes));
        assert_eq!(
            derive(&["-gline-tables-only"]).0,
            Some(DebugInfoLevel::LineTables)
        );
        assert_eq!(derive(&["-gdwarf-types"]).0, Some(DebugInfoLevel::DwarfTypes));
        assert_eq!(derive(&["-gnone"]).0, None);
    }

    #[test]
    fn last_g_option_wins() {
        assert_eq!(derive(&["-g", "-gnone"]).0, None);
        assert_eq!(derive(&["-gnone", "-g"]).0, Some(DebugInfoLevel::AstTypes));
    }

    #[test]
    fn format_parses_both_values() {
        let (_, format, sink) = derive(&["-g", "-debug-info-format=codeview"]);
        assert_eq!(format, DebugInfoFormat::CodeView);
        assert!(!sink.has_errors());

        let (_, format, _) = derive(&["-g", "-debug-info-format=dwarf"]);
        assert_eq!(format, DebugInfoFormat::Dwarf);
    }

    #[test]
    fn unknown_format_diagnosed_and_falls_back() {
        let (_, format, sink) = derive(&["-g", "-debug-info-format=stabs"]);
        assert_eq!(format, DebugInfoFormat::Dwarf);
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.diagnostics()[0].code, codes::INVALID_ARG_VALUE);
    }

    #[test]
    fn format_without_level_diagnosed() {
        let (_, _, sink) = derive(&["-debug-info-format=dwarf"]);
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.diagnostics()[0].code, codes::DEBUG_FORMAT_WITHOUT_LEVEL);
    }

    #[test]
    fn gnone_counts_as_a_g_option_for_format() {
        let (_, _, sink) = derive(&["-gnone", "-debug-info-format=dwarf"]);
        assert!(!sink.has_errors());
    }

    #[test]
    fn codeview_conflicts_with_reduced_levels() {
        let (_, _, sink) = derive(&["-gline-tables-only", "-debug-info-format=codeview"]);
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.diagnostics()[0].code, codes::ARGUMENT_NOT_ALLOWED_WITH);

        let (_, _, sink) = derive(&["-gdwarf-types", "-debug-info-format=codeview"]);
        assert_eq!(sink.error_count(), 1);

        let (_, _, sink) = derive(&["-g", "-debug-info-format=codeview"]);
        assert!(!sink.has_errors());
    }
}
