//! Jobs and the seams to the external executor and tools.

use drift_depgraph::InputHandle;
use drift_plan::{CompilationPlan, DriverKind};
use std::path::PathBuf;

/// One frontend invocation the driver wants run.
#[derive(Clone, Debug)]
pub struct CompileJob {
    /// The primary input, absent for whole-module jobs.
    pub primary_input: Option<InputHandle>,
    /// The input tokens this job compiles.
    pub inputs: Vec<String>,
    /// The main output path, when one is known up front.
    pub output: Option<PathBuf>,
}

/// How one job ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum JobOutcome {
    /// The frontend exited zero.
    Succeeded,
    /// The frontend exited non-zero.
    Failed {
        /// The child's exit code.
        exit_code: i32,
    },
}

impl JobOutcome {
    /// Returns `true` for [`Succeeded`](JobOutcome::Succeeded).
    pub fn is_success(self) -> bool {
        matches!(self, JobOutcome::Succeeded)
    }
}

/// The external job executor.
///
/// The executor may run children in parallel internally, but the core
/// hands jobs over and drains completions strictly one at a time, so
/// implementations see a sequential call pattern.
pub trait JobExecutor {
    /// Runs one job to completion and reports how it ended.
    fn run_job(&mut self, job: &CompileJob, plan: &CompilationPlan) -> JobOutcome;
}

/// The external tool and REPL collaborators.
pub trait ToolDelegate {
    /// Executes the tool image behind a non-compiler driver kind with
    /// the original argv tail, returning its exit code.
    fn exec_tool(&mut self, kind: DriverKind, args: &[String]) -> i32;

    /// Hands an interactive plan to the REPL or immediate runner.
    fn run_repl(&mut self, plan: &CompilationPlan) -> i32;
}

/// A dry-run executor that prints each job it is handed and reports
/// success. The planning core ships without a frontend, so this is what
/// the CLI uses.
#[derive(Debug, Default)]
pub struct PrintingExecutor;

impl JobExecutor for PrintingExecutor {
    fn run_job(&mut self, job: &CompileJob, _plan: &CompilationPlan) -> JobOutcome {
        match &job.output {
            Some(output) => println!(
                "would compile {} -> {}",
                job.inputs.join(" "),
                output.display()
            ),
            None => println!("would compile {}", job.inputs.join(" ")),
        }
        JobOutcome::Succeeded
    }
}

/// A dry-run delegate matching [`PrintingExecutor`].
#[derive(Debug, Default)]
pub struct PrintingDelegate;

impl ToolDelegate for PrintingDelegate {
    fn exec_tool(&mut self, kind: DriverKind, args: &[String]) -> i32 {
        println!("would exec {kind} {}", args.join(" "));
        0
    }

    fn run_repl(&mut self, plan: &CompilationPlan) -> i32 {
        println!("would start {} as module {}", plan.compiler_mode, plan.module_name);
        0
    }
}
