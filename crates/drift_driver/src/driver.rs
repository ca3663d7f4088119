//! The driver facade.

use crate::help;
use crate::incremental;
use crate::job::{CompileJob, JobExecutor, ToolDelegate};
use drift_depgraph::InputHandle;
use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use drift_options::{ArgumentParser, Opt, ParseError};
use drift_plan::{derive_plan, CompilationPlan, CompilerMode, DriverKind, FileType, InputFile};
use std::path::{Path, PathBuf};

/// The top-level driver.
///
/// Owns nothing but the tool version and the process-scoped monotonic
/// counter for temporary output names; everything per-invocation flows
/// through [`run`](Driver::run).
pub struct Driver {
    version: String,
    temp_counter: u64,
}

impl Driver {
    /// Creates a driver identifying itself with `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            temp_counter: 0,
        }
    }

    /// The tool version string, as written into build records.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Mints a fresh temporary output path. The counter is only ever
    /// incremented from the single-threaded core.
    pub(crate) fn next_temp_path(&mut self, stem: &str, extension: &str) -> PathBuf {
        self.temp_counter += 1;
        let stem = if stem.is_empty() { "out" } else { stem };
        PathBuf::from(format!("{stem}-{}.{extension}", self.temp_counter))
    }

    /// Runs one driver invocation.
    ///
    /// `argv` is the full vector including argv[0]; `cwd` is the process
    /// working directory when one is available. Returns the process exit
    /// code: 0 on success, 1 on any fatal diagnostic or failed job, 2 on
    /// an internal defect.
    pub fn run(
        &mut self,
        argv: &[String],
        cwd: Option<&Path>,
        executor: &mut dyn JobExecutor,
        delegate: &mut dyn ToolDelegate,
        sink: &DiagnosticSink,
    ) -> i32 {
        let Some((argv0, tail)) = argv.split_first() else {
            sink.emit(Diagnostic::error(
                codes::INVALID_DRIVER_NAME,
                "empty argument vector",
            ));
            return 1;
        };

        let Some(kind) = DriverKind::determine(argv0, tail, sink) else {
            return 1;
        };

        if !kind.is_compiler_driver() {
            return delegate.exec_tool(kind, tail);
        }

        let parser = ArgumentParser::new();
        let mut parsed = match parser.parse(tail) {
            Ok(parsed) => parsed,
            Err(error) => {
                let code = match error {
                    ParseError::UnknownOption(_) => codes::UNKNOWN_OPTION,
                    ParseError::MissingValue(_) => codes::MISSING_OPTION_VALUE,
                };
                sink.emit(Diagnostic::error(code, error.to_string()));
                return 1;
            }
        };

        if parsed.contains_any(&[Opt::Help, Opt::HelpHidden]) {
            print!("{}", help::render(parser.table(), parsed.has(Opt::HelpHidden)));
            return 0;
        }
        if parsed.has(Opt::Version) {
            println!("drift driver version {}", self.version);
            return 0;
        }

        let plan = match derive_plan(kind, &mut parsed, cwd, sink) {
            Ok(Some(plan)) => plan,
            Ok(None) => return 1,
            Err(defect) => {
                sink.emit(Diagnostic::error(codes::INTERNAL_ERROR, defect.to_string()));
                return 2;
            }
        };

        if plan.compiler_mode.is_interactive() {
            return delegate.run_repl(&plan);
        }

        let incremental_possible = parsed.has(Opt::Incremental)
            && matches!(
                plan.compiler_mode,
                CompilerMode::StandardCompile | CompilerMode::BatchCompile
            );

        if incremental_possible {
            incremental::run_incremental(self, &plan, &parsed, executor, sink)
        } else {
            self.run_clean(&plan, executor, sink)
        }
    }

    /// Compiles every source input with no staleness analysis.
    pub(crate) fn run_clean(
        &mut self,
        plan: &CompilationPlan,
        executor: &mut dyn JobExecutor,
        sink: &DiagnosticSink,
    ) -> i32 {
        let jobs = self.make_jobs(plan);
        let mut failed = false;
        for job in &jobs {
            if !executor.run_job(job, plan).is_success() {
                failed = true;
                break;
            }
        }
        if failed || sink.has_errors() {
            1
        } else {
            0
        }
    }

    fn make_jobs(&mut self, plan: &CompilationPlan) -> Vec<CompileJob> {
        let sources = source_inputs(plan);
        if sources.is_empty() {
            return Vec::new();
        }
        match plan.compiler_mode {
            CompilerMode::SingleCompile | CompilerMode::CompilePcm => {
                vec![self.make_whole_module_job(plan, &sources)]
            }
            _ => sources
                .iter()
                .map(|(handle, file)| self.make_job(plan, *handle, file))
                .collect(),
        }
    }

    /// Builds the per-input job for standard and batch modes.
    pub(crate) fn make_job(
        &mut self,
        plan: &CompilationPlan,
        input: InputHandle,
        file: &InputFile,
    ) -> CompileJob {
        let output = plan.compiler_output_type.map(|ty| {
            let token = file.token();
            plan.output_file_map
                .as_ref()
                .and_then(|map| map.output_for(&token, ty))
                .map(Path::to_path_buf)
                .unwrap_or_else(|| {
                    self.next_temp_path(file.stem().unwrap_or("stdin"), ty.extension())
                })
        });
        CompileJob {
            primary_input: Some(input),
            inputs: vec![file.token()],
            output,
        }
    }

    fn make_whole_module_job(
        &mut self,
        plan: &CompilationPlan,
        sources: &[(InputHandle, &InputFile)],
    ) -> CompileJob {
        let output = plan.compiler_output_type.map(|ty| {
            plan.output_file_map
                .as_ref()
                .and_then(|map| map.whole_module_output(ty))
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.next_temp_path(&plan.module_name, ty.extension()))
        });
        CompileJob {
            primary_input: None,
            inputs: sources.iter().map(|(_, file)| file.token()).collect(),
            output,
        }
    }
}

/// The compilable inputs of a plan, with their handles. Handles index
/// the plan's full input list, so object files passed straight to the
/// linker keep their positions.
pub(crate) fn source_inputs(plan: &CompilationPlan) -> Vec<(InputHandle, &InputFile)> {
    plan.inputs
        .iter()
        .enumerate()
        .filter(|(_, file)| {
            matches!(
                file.file_type,
                FileType::Swift | FileType::Sil | FileType::Sib
            )
        })
        .map(|(index, file)| (InputHandle::from_raw(index as u32), file))
        .collect()
}
