//! Module-output policy and module-name derivation.

use crate::debug::DebugInfoLevel;
use crate::file_type::FileType;
use crate::input::InputFile;
use crate::mode::CompilerMode;
use crate::output::LinkerOutput;
use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use drift_options::{Opt, ParsedOptions};
use std::path::Path;

/// The sentinel substituted for an invalid module name so later stages
/// always see an identifier.
pub const BAD_MODULE_NAME: &str = "__bad__";

/// The reserved name of the interactive session module.
pub const REPL_MODULE_NAME: &str = "REPL";

/// Why a module file is part of the plan.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModuleOutputKind {
    /// The user explicitly asked for an emitted module.
    TopLevel,
    /// Debug info requires a module as a side product.
    Auxiliary,
}

/// Derives whether the plan emits a module, and why.
///
/// Explicit requests (`-emit-module`, `-emit-module-path`) win;
/// otherwise a debug level that references types implies an auxiliary
/// module. REPL and immediate modes never emit one: an explicit request
/// there is diagnosed, an implied one is quietly dropped.
pub fn derive_module_output(
    parsed: &ParsedOptions,
    mode: CompilerMode,
    debug_level: Option<DebugInfoLevel>,
    sink: &DiagnosticSink,
) -> Option<ModuleOutputKind> {
    let explicit = parsed.has(Opt::EmitModule) || parsed.has(Opt::EmitModulePath);

    let kind = if explicit {
        Some(ModuleOutputKind::TopLevel)
    } else if matches!(
        debug_level,
        Some(DebugInfoLevel::AstTypes | DebugInfoLevel::DwarfTypes)
    ) {
        Some(ModuleOutputKind::Auxiliary)
    } else {
        None
    };

    if mode.is_interactive() && kind.is_some() {
        if explicit {
            sink.emit(Diagnostic::error(
                codes::MODE_CANNOT_EMIT_MODULE,
                format!("cannot emit a module in {mode} mode"),
            ));
        }
        return None;
    }

    kind
}

/// Derives the module name. The first rule producing a nonempty name
/// wins; the result is then validated as an identifier.
pub fn derive_module_name(
    parsed: &ParsedOptions,
    mode: CompilerMode,
    inputs: &[InputFile],
    compiler_output_type: Option<FileType>,
    linker_output_type: Option<LinkerOutput>,
    sink: &DiagnosticSink,
) -> String {
    let mut fallback = false;

    let name: String = if let Some(explicit) = parsed.value_of(Opt::ModuleName) {
        explicit.to_string()
    } else if let Some(name) = nonempty(repl_name(mode))
        .or_else(|| nonempty(name_from_output(parsed, linker_output_type)))
        .or_else(|| nonempty(name_from_single_input(inputs)))
        .or_else(|| {
            nonempty(name_main(
                parsed,
                inputs,
                compiler_output_type,
                linker_output_type,
            ))
        })
    {
        name
    } else {
        fallback = true;
        String::new()
    };

    validate_module_name(name, fallback, linker_output_type, parsed, sink)
}

fn nonempty(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.is_empty())
}

fn repl_name(mode: CompilerMode) -> Option<String> {
    (mode == CompilerMode::Repl).then(|| REPL_MODULE_NAME.to_string())
}

/// Rule 3: the basename of `-o` without its extension. For library
/// outputs whose basename carries an extension, a `lib` prefix is
/// dropped (`libM.dylib` names the module `M`).
fn name_from_output(
    parsed: &ParsedOptions,
    linker_output_type: Option<LinkerOutput>,
) -> Option<String> {
    let output = parsed.value_of(Opt::Output)?;
    let base = Path::new(output).file_name()?.to_str()?;
    let stem = Path::new(base).file_stem()?.to_str()?;

    let is_library = matches!(
        linker_output_type,
        Some(LinkerOutput::DynamicLibrary | LinkerOutput::StaticLibrary)
    );
    let has_extension = Path::new(base).extension().is_some();

    if is_library && has_extension && stem.starts_with("lib") {
        Some(stem[3..].to_string())
    } else {
        Some(stem.to_string())
    }
}

/// Rule 4: the basename of the single input.
fn name_from_single_input(inputs: &[InputFile]) -> Option<String> {
    match inputs {
        [only] => only.stem().map(str::to_string),
        _ => None,
    }
}

/// Rule 5: `main` when there is nothing to name the module after but
/// the build produces a runnable product (or no compiler output at all).
fn name_main(
    parsed: &ParsedOptions,
    inputs: &[InputFile],
    compiler_output_type: Option<FileType>,
    linker_output_type: Option<LinkerOutput>,
) -> Option<String> {
    let building_executable = match linker_output_type {
        Some(LinkerOutput::Executable) => true,
        Some(_) => false,
        None => {
            !parsed.has(Opt::ParseAsLibrary) && !parsed.has(Opt::ParseStdlib) && inputs.len() == 1
        }
    };
    (compiler_output_type.is_none() || building_executable).then(|| "main".to_string())
}

/// Validates the derived name, substituting [`BAD_MODULE_NAME`] for
/// invalid identifiers.
///
/// The empty rule-6 fallback stays silent when nothing will be linked;
/// a linked product with no nameable module is diagnosed.
fn validate_module_name(
    name: String,
    fallback: bool,
    linker_output_type: Option<LinkerOutput>,
    parsed: &ParsedOptions,
    sink: &DiagnosticSink,
) -> String {
    if name == "Swift" && !parsed.has(Opt::ParseStdlib) {
        sink.emit(Diagnostic::error(
            codes::STDLIB_MODULE_NAME,
            "module name \"Swift\" is reserved for the standard library",
        ));
        return name;
    }

    if is_valid_module_name(&name) {
        return name;
    }

    if name.is_empty() && fallback && linker_output_type.is_none() {
        return name;
    }

    sink.emit(Diagnostic::error(
        codes::BAD_MODULE_NAME,
        format!("module name \"{name}\" is not a valid identifier"),
    ));
    BAD_MODULE_NAME.to_string()
}

/// Whether `name` matches the identifier production: a letter or
/// underscore followed by letters, digits, or underscores.
pub fn is_valid_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_options::ArgumentParser;

    fn parse(tokens: &[&str]) -> ParsedOptions {
        let args: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        ArgumentParser::new().parse(&args).unwrap()
    }

    fn inputs_of(parsed: &ParsedOptions) -> Vec<InputFile> {
        parsed.inputs().iter().map(|t| InputFile::from_token(t)).collect()
    }

    fn name_of(
        tokens: &[&str],
        mode: CompilerMode,
        cot: Option<FileType>,
        lot: Option<LinkerOutput>,
    ) -> (String, DiagnosticSink) {
        let parsed = parse(tokens);
        let inputs = inputs_of(&parsed);
        let sink = DiagnosticSink::new();
        let name = derive_module_name(&parsed, mode, &inputs, cot, lot, &sink);
        (name, sink)
    }

    #[test]
    fn explicit_module_name_wins() {
        let (name, sink) = name_of(
            &["-module-name", "M", "-o", "libM.dylib", "a.swift"],
            CompilerMode::SingleCompile,
            Some(FileType::Object),
            Some(LinkerOutput::DynamicLibrary),
        );
        assert_eq!(name, "M");
        assert!(!sink.has_errors());
    }

    #[test]
    fn repl_mode_names_repl() {
        let (name, _) = name_of(&[], CompilerMode::Repl, None, None);
        assert_eq!(name, "REPL");
    }

    #[test]
    fn output_basename_names_module() {
        let (name, _) = name_of(
            &["-o", "build/tool", "a.swift", "b.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            Some(LinkerOutput::Executable),
        );
        assert_eq!(name, "tool");
    }

    #[test]
    fn library_output_drops_lib_prefix() {
        let (name, sink) = name_of(
            &["-o", "libM.dylib", "a.swift", "b.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            Some(LinkerOutput::DynamicLibrary),
        );
        assert_eq!(name, "M");
        assert!(!sink.has_errors());
    }

    #[test]
    fn lib_prefix_kept_without_extension() {
        let (name, _) = name_of(
            &["-o", "libtool", "a.swift", "b.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            Some(LinkerOutput::DynamicLibrary),
        );
        assert_eq!(name, "libtool");
    }

    #[test]
    fn bad_name_from_output_substitutes_sentinel() {
        let (name, sink) = name_of(
            &["-o", "lib123.dylib", "a.swift", "b.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            Some(LinkerOutput::DynamicLibrary),
        );
        assert_eq!(name, BAD_MODULE_NAME);
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.diagnostics()[0].code, codes::BAD_MODULE_NAME);
    }

    #[test]
    fn single_input_names_module() {
        let (name, _) = name_of(
            &["-emit-object", "a.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            None,
        );
        assert_eq!(name, "a");
    }

    #[test]
    fn executable_fallback_is_main() {
        let (name, _) = name_of(
            &["a.swift", "b.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            Some(LinkerOutput::Executable),
        );
        assert_eq!(name, "main");
    }

    #[test]
    fn multi_input_library_falls_to_empty_and_diagnoses() {
        let (name, sink) = name_of(
            &["-parse-as-library", "first file.swift", "b.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            Some(LinkerOutput::DynamicLibrary),
        );
        assert_eq!(name, BAD_MODULE_NAME);
        assert!(sink.has_errors());
    }

    #[test]
    fn empty_fallback_is_silent_without_linking() {
        let (name, sink) = name_of(
            &["-parse-as-library", "a b.swift", "c d.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            None,
        );
        assert_eq!(name, "");
        assert!(!sink.has_errors());
    }

    #[test]
    fn stdlib_name_requires_parse_stdlib() {
        let (name, sink) = name_of(
            &["-module-name", "Swift", "a.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            None,
        );
        assert_eq!(name, "Swift");
        assert_eq!(sink.diagnostics()[0].code, codes::STDLIB_MODULE_NAME);

        let (name, sink) = name_of(
            &["-module-name", "Swift", "-parse-stdlib", "a.swift"],
            CompilerMode::StandardCompile,
            Some(FileType::Object),
            None,
        );
        assert_eq!(name, "Swift");
        assert!(!sink.has_errors());
    }

    #[test]
    fn identifier_validation() {
        assert!(is_valid_module_name("M"));
        assert!(is_valid_module_name("_private"));
        assert!(is_valid_module_name("Module2"));
        assert!(!is_valid_module_name(""));
        assert!(!is_valid_module_name("123"));
        assert!(!is_valid_module_name("has space"));
        assert!(!is_valid_module_name("dash-name"));
    }

    #[test]
    fn explicit_module_output_kinds() {
        let parsed = parse(&["-emit-module", "a.swift"]);
        let sink = DiagnosticSink::new();
        let kind = derive_module_output(&parsed, CompilerMode::StandardCompile, None, &sink);
        assert_eq!(kind, Some(ModuleOutputKind::TopLevel));
    }

    #[test]
    fn debug_types_imply_auxiliary_module() {
        let parsed = parse(&["-g", "a.swift"]);
        let sink = DiagnosticSink::new();
        let kind = derive_module_output(
            &parsed,
            CompilerMode::StandardCompile,
            Some(DebugInfoLevel::AstTypes),
            &sink,
        );
        assert_eq!(kind, Some(ModuleOutputKind::Auxiliary));
    }

    #[test]
    fn line_tables_do_not_imply_a_module() {
        let parsed = parse(&["-gline-tables-only", "a.swift"]);
        let sink = DiagnosticSink::new();
        let kind = derive_module_output(
            &parsed,
            CompilerMode::StandardCompile,
            Some(DebugInfoLevel::LineTables),
            &sink,
        );
        assert_eq!(kind, None);
    }

    #[test]
    fn repl_rejects_explicit_module() {
        let parsed = parse(&["-emit-module"]);
        let sink = DiagnosticSink::new();
        let kind = derive_module_output(&parsed, CompilerMode::Repl, None, &sink);
        assert_eq!(kind, None);
        assert_eq!(sink.diagnostics()[0].code, codes::MODE_CANNOT_EMIT_MODULE);
    }

    #[test]
    fn immediate_drops_implied_module_silently() {
        let parsed = parse(&["-g", "script.swift"]);
        let sink = DiagnosticSink::new();
        let kind = derive_module_output(
            &parsed,
            CompilerMode::Immediate,
            Some(DebugInfoLevel::AstTypes),
            &sink,
        );
        assert_eq!(kind, None);
        assert!(!sink.has_errors());
    }
}
