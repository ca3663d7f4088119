//! Primary output-type resolution from the modes group.

use crate::driver_kind::DriverKind;
use crate::file_type::FileType;
use crate::mode::CompilerMode;
use drift_common::{DriftResult, InternalError};
use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use drift_options::{Opt, OptionGroup, ParsedOptions};
use std::fmt;

/// What the linker is asked to produce, when anything.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LinkerOutput {
    /// An executable image.
    Executable,
    /// A dynamic library.
    DynamicLibrary,
    /// A static library.
    StaticLibrary,
}

impl fmt::Display for LinkerOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkerOutput::Executable => "executable",
            LinkerOutput::DynamicLibrary => "dynamic library",
            LinkerOutput::StaticLibrary => "static library",
        };
        f.write_str(name)
    }
}

/// Derives `(compiler_output_type, linker_output_type)` from the last
/// mode-group option.
///
/// An unknown option landing in the modes group is a schema defect and
/// returns an internal error.
pub fn derive_output_types(
    parsed: &ParsedOptions,
    kind: DriverKind,
    mode: CompilerMode,
    sink: &DiagnosticSink,
) -> DriftResult<(Option<FileType>, Option<LinkerOutput>)> {
    if mode.is_interactive() {
        return Ok((None, None));
    }

    let last_mode = parsed.last_in_group(OptionGroup::Modes).map(|(opt, _)| opt);

    let types = match last_mode {
        Some(Opt::EmitExecutable) => {
            if parsed.has(Opt::Static) {
                sink.emit(Diagnostic::error(
                    codes::STATIC_EXECUTABLE_DISALLOWED,
                    "'-static' may not be used with '-emit-executable'",
                ));
            }
            (Some(FileType::Object), Some(LinkerOutput::Executable))
        }
        Some(Opt::EmitLibrary) => {
            let linker = if parsed.has(Opt::Static) {
                LinkerOutput::StaticLibrary
            } else {
                LinkerOutput::DynamicLibrary
            };
            (Some(FileType::Object), Some(linker))
        }
        Some(Opt::EmitObject) => (Some(FileType::Object), None),
        Some(Opt::EmitAssembly) => (Some(FileType::Assembly), None),
        Some(Opt::EmitSil) => (Some(FileType::Sil), None),
        Some(Opt::EmitSilgen) => (Some(FileType::RawSil), None),
        Some(Opt::EmitSib) => (Some(FileType::Sib), None),
        Some(Opt::EmitSibgen) => (Some(FileType::RawSib), None),
        Some(Opt::EmitIr) => (Some(FileType::LlvmIr), None),
        Some(Opt::EmitBc) => (Some(FileType::LlvmBc), None),
        Some(Opt::EmitPch) => (Some(FileType::Pch), None),
        Some(Opt::EmitPcm) => (Some(FileType::Pcm), None),
        Some(Opt::EmitImportedModules) => (Some(FileType::ImportedModules), None),
        Some(Opt::IndexFile) => (Some(FileType::IndexData), None),
        Some(Opt::EmitModule) => (Some(FileType::SwiftModule), None),
        Some(
            Opt::Parse
            | Opt::ResolveImports
            | Opt::Typecheck
            | Opt::DumpParse
            | Opt::DumpAst
            | Opt::EmitSyntax
            | Opt::PrintAst
            | Opt::DumpTypeRefinementContexts
            | Opt::DumpScopeMaps
            | Opt::DumpInterfaceHash
            | Opt::DumpTypeInfo
            | Opt::UpdateCode
            | Opt::VerifyDebugInfo,
        ) => (None, None),
        // Interactive modes were routed away above.
        Some(Opt::Repl | Opt::DeprecatedIntegratedRepl | Opt::LldbRepl | Opt::Immediate) => {
            (None, None)
        }
        Some(other) => {
            return Err(InternalError::new(format!(
                "unhandled mode option '{other}'"
            )))
        }
        None => {
            if parsed.has(Opt::EmitModulePath) {
                (Some(FileType::SwiftModule), None)
            } else if kind.is_interactive() {
                (None, None)
            } else {
                (Some(FileType::Object), Some(LinkerOutput::Executable))
            }
        }
    };

    Ok(types)
}
