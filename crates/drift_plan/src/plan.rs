//! The compilation plan and its top-level derivation pipeline.

use crate::debug::{derive_debug_info, DebugInfoFormat, DebugInfoLevel};
use crate::driver_kind::DriverKind;
use crate::file_type::FileType;
use crate::input::InputFile;
use crate::mode::{derive_compiler_mode, CompilerMode};
use crate::module::{derive_module_name, derive_module_output, ModuleOutputKind};
use crate::output::{derive_output_types, LinkerOutput};
use crate::output_file_map::OutputFileMap;
use crate::working_dir::{apply_working_directory, resolve_working_directory};
use drift_common::DriftResult;
use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use drift_options::{Opt, ParsedEntry, ParsedOptions};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Everything the driver decided about one invocation.
///
/// All fields are fixed after derivation; mutating a plan afterwards is
/// a defect.
#[derive(Debug)]
pub struct CompilationPlan {
    /// The persona the driver is running as.
    pub driver_kind: DriverKind,
    /// How frontend invocations are partitioned.
    pub compiler_mode: CompilerMode,
    /// The classified inputs, in argv order.
    pub inputs: Vec<InputFile>,
    /// The loaded output file map, if `-output-file-map` was given.
    pub output_file_map: Option<OutputFileMap>,
    /// What each frontend invocation produces, if anything.
    pub compiler_output_type: Option<FileType>,
    /// What the linker produces, if anything.
    pub linker_output_type: Option<LinkerOutput>,
    /// How much debug info to produce, if any.
    pub debug_info_level: Option<DebugInfoLevel>,
    /// The debug-info container format.
    pub debug_info_format: DebugInfoFormat,
    /// Whether (and why) a module file is emitted.
    pub module_output_kind: Option<ModuleOutputKind>,
    /// The derived module name (possibly the `__bad__` sentinel).
    pub module_name: String,
    /// The resolved working directory, if `-working-directory` was given.
    pub working_directory: Option<PathBuf>,
}

/// Runs the full derivation pipeline over the parsed options.
///
/// User-input problems go to `sink`; if any are errors the derivation
/// aborts and `Ok(None)` is returned. `Err` is reserved for defects.
/// The only mutation of `parsed` is the working-directory rewrite.
pub fn derive_plan(
    kind: DriverKind,
    parsed: &mut ParsedOptions,
    cwd: Option<&Path>,
    sink: &DiagnosticSink,
) -> DriftResult<Option<CompilationPlan>> {
    if kind.is_interactive() {
        warn_interactive_only_options(parsed, sink);
    }

    let working_directory = resolve_working_directory(parsed, cwd, sink);
    if let Some(wd) = &working_directory {
        apply_working_directory(parsed, wd);
    }

    let inputs: Vec<InputFile> = parsed
        .inputs()
        .iter()
        .map(|token| InputFile::from_token(token))
        .collect();

    let compiler_mode = derive_compiler_mode(kind, parsed, !inputs.is_empty(), sink);
    let (compiler_output_type, linker_output_type) =
        derive_output_types(parsed, kind, compiler_mode, sink)?;
    let (debug_info_level, debug_info_format) = derive_debug_info(parsed, sink);
    let module_output_kind = derive_module_output(parsed, compiler_mode, debug_info_level, sink);
    let module_name = derive_module_name(
        parsed,
        compiler_mode,
        &inputs,
        compiler_output_type,
        linker_output_type,
        sink,
    );

    let output_file_map = load_output_file_map(parsed, sink);

    if sink.has_errors() {
        return Ok(None);
    }

    Ok(Some(CompilationPlan {
        driver_kind: kind,
        compiler_mode,
        inputs,
        output_file_map,
        compiler_output_type,
        linker_output_type,
        debug_info_level,
        debug_info_format,
        module_output_kind,
        module_name,
        working_directory,
    }))
}

/// Warns once per distinct option that has no effect for the
/// interactive driver.
fn warn_interactive_only_options(parsed: &ParsedOptions, sink: &DiagnosticSink) {
    let mut warned = BTreeSet::new();
    for entry in parsed.iter() {
        if let ParsedEntry::Option(opt) = entry.entry {
            if opt.attrs().no_interactive && warned.insert(opt.spelling()) {
                sink.emit(Diagnostic::warning(
                    codes::OPTION_IGNORED_IN_INTERACTIVE,
                    format!("option '{opt}' has no effect in interactive mode"),
                ));
            }
        }
    }
}

fn load_output_file_map(parsed: &ParsedOptions, sink: &DiagnosticSink) -> Option<OutputFileMap> {
    let path = parsed.value_of(Opt::OutputFileMap)?;
    match OutputFileMap::load(Path::new(path)) {
        Ok(map) => Some(map),
        Err(e) => {
            sink.emit(Diagnostic::error(codes::BAD_OUTPUT_FILE_MAP, e.to_string()));
            None
        }
    }
}
