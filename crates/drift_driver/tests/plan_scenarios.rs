//! End-to-end planning scenarios, from argv to plan (or refusal).

use drift_diagnostics::{codes, DiagnosticSink};
use drift_driver::{CompileJob, Driver, JobExecutor, JobOutcome, ToolDelegate};
use drift_options::ArgumentParser;
use drift_plan::{
    derive_plan, CompilationPlan, CompilerMode, DriverKind, FileType, LinkerOutput,
};

struct NullExecutor {
    jobs: usize,
}

impl JobExecutor for NullExecutor {
    fn run_job(&mut self, _job: &CompileJob, _plan: &CompilationPlan) -> JobOutcome {
        self.jobs += 1;
        JobOutcome::Succeeded
    }
}

#[derive(Default)]
struct NullDelegate {
    repls: usize,
}

impl ToolDelegate for NullDelegate {
    fn exec_tool(&mut self, _kind: DriverKind, _args: &[String]) -> i32 {
        0
    }

    fn run_repl(&mut self, _plan: &CompilationPlan) -> i32 {
        self.repls += 1;
        0
    }
}

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

/// Parses and derives a plan the way the driver facade does.
fn plan_for(argv0: &str, tokens: &[&str]) -> (Option<CompilationPlan>, DiagnosticSink) {
    let sink = DiagnosticSink::new();
    let tail = argv(tokens);
    let kind = DriverKind::determine(argv0, &tail, &sink).expect("driver kind");
    let mut parsed = ArgumentParser::new().parse(&tail).expect("parse");
    let plan = derive_plan(kind, &mut parsed, None, &sink).expect("no defects");
    (plan, sink)
}

// S1: `swift -help` renders usage and exits 0 without planning jobs.
#[test]
fn help_short_circuits() {
    let mut driver = Driver::new("0.1.0");
    let mut executor = NullExecutor { jobs: 0 };
    let mut delegate = NullDelegate::default();
    let sink = DiagnosticSink::new();
    let code = driver.run(
        &argv(&["swift", "-help"]),
        None,
        &mut executor,
        &mut delegate,
        &sink,
    );
    assert_eq!(code, 0);
    assert_eq!(executor.jobs, 0);
    assert_eq!(delegate.repls, 0);
    assert!(!sink.has_errors());
}

// S2: bare `swift` plans an interactive REPL session.
#[test]
fn bare_swift_is_a_repl() {
    let (plan, sink) = plan_for("swift", &[]);
    let plan = plan.unwrap();
    assert_eq!(plan.driver_kind, DriverKind::Interactive);
    assert_eq!(plan.compiler_mode, CompilerMode::Repl);
    assert_eq!(plan.module_name, "REPL");
    assert_eq!(plan.module_output_kind, None);
    assert_eq!(plan.linker_output_type, None);
    assert!(!sink.has_errors());
}

// S3: `swiftc a.swift` compiles one object and links an executable.
#[test]
fn single_input_object_build() {
    let (plan, sink) = plan_for("swiftc", &["a.swift"]);
    let plan = plan.unwrap();
    assert_eq!(plan.driver_kind, DriverKind::Batch);
    assert_eq!(plan.compiler_mode, CompilerMode::StandardCompile);
    assert_eq!(plan.compiler_output_type, Some(FileType::Object));
    assert_eq!(plan.linker_output_type, Some(LinkerOutput::Executable));
    assert_eq!(plan.module_name, "a");
    assert!(!sink.has_errors());
}

// S4: whole-module library build; the explicit name beats the
// `libM` → `M` rule.
#[test]
fn wmo_with_explicit_module_name() {
    let (plan, sink) = plan_for(
        "swiftc",
        &[
            "-whole-module-optimization",
            "-module-name",
            "M",
            "a.swift",
            "b.swift",
            "-o",
            "libM.dylib",
            "-emit-library",
        ],
    );
    let plan = plan.unwrap();
    assert_eq!(plan.compiler_mode, CompilerMode::SingleCompile);
    assert_eq!(plan.linker_output_type, Some(LinkerOutput::DynamicLibrary));
    assert_eq!(plan.module_name, "M");
    assert!(!sink.has_errors());
}

// S5: `lib123.dylib` strips to `123`, which is no identifier.
#[test]
fn invalid_module_name_from_output() {
    let (plan, sink) = plan_for(
        "swiftc",
        &["-emit-library", "-o", "lib123.dylib", "a.swift"],
    );
    assert!(plan.is_none(), "a fatal diagnostic aborts the plan");
    assert!(sink
        .diagnostics()
        .iter()
        .any(|d| d.code == codes::BAD_MODULE_NAME));
}

// The driver exits non-zero for the same scenario.
#[test]
fn invalid_module_name_fails_the_run() {
    let mut driver = Driver::new("0.1.0");
    let mut executor = NullExecutor { jobs: 0 };
    let mut delegate = NullDelegate::default();
    let sink = DiagnosticSink::new();
    let code = driver.run(
        &argv(&["swiftc", "-emit-library", "-o", "lib123.dylib", "a.swift"]),
        None,
        &mut executor,
        &mut delegate,
        &sink,
    );
    assert_eq!(code, 1);
    assert_eq!(executor.jobs, 0);
}

#[test]
fn version_exits_zero() {
    let mut driver = Driver::new("0.1.0");
    let mut executor = NullExecutor { jobs: 0 };
    let mut delegate = NullDelegate::default();
    let sink = DiagnosticSink::new();
    for flag in ["-version", "-v"] {
        let code = driver.run(
            &argv(&["swiftc", flag]),
            None,
            &mut executor,
            &mut delegate,
            &sink,
        );
        assert_eq!(code, 0);
    }
    assert_eq!(executor.jobs, 0);
}

#[test]
fn driver_mode_reroutes_interactive_binary() {
    let (plan, _) = plan_for("swift", &["--driver-mode=swiftc", "a.swift"]);
    let plan = plan.unwrap();
    assert_eq!(plan.driver_kind, DriverKind::Batch);
    assert_eq!(plan.compiler_mode, CompilerMode::StandardCompile);
}
