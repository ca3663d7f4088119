//! Top-level driver facade for the Drift toolchain.
//!
//! [`Driver::run`] is the single entry point collaborators call: it
//! resolves the driver persona, parses argv, derives the compilation
//! plan, and — when incremental compilation is on — runs the build
//! record and dependency graph through the first and second waves,
//! handing jobs to an external [`JobExecutor`] one at a time.

#![warn(missing_docs)]

pub mod driver;
pub mod help;
pub mod incremental;
pub mod job;

pub use driver::Driver;
pub use job::{
    CompileJob, JobExecutor, JobOutcome, PrintingDelegate, PrintingExecutor, ToolDelegate,
};
