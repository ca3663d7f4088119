//! Compilation-plan derivation for the Drift compiler driver.
//!
//! A pipeline of pure derivations over [`ParsedOptions`]: driver kind,
//! working directory, input classification, compiler mode, output types,
//! debug-info shape, module output policy, and module name. The result
//! is a [`CompilationPlan`] that is immutable after derivation.
//!
//! [`ParsedOptions`]: drift_options::ParsedOptions

#![warn(missing_docs)]

pub mod debug;
pub mod driver_kind;
pub mod file_type;
pub mod input;
pub mod mode;
pub mod module;
pub mod output;
pub mod output_file_map;
pub mod plan;
pub mod working_dir;

pub use debug::{DebugInfoFormat, DebugInfoLevel};
pub use driver_kind::DriverKind;
pub use file_type::FileType;
pub use input::{InputFile, InputPath};
pub use mode::CompilerMode;
pub use module::ModuleOutputKind;
pub use output::LinkerOutput;
pub use output_file_map::{OutputFileMap, WHOLE_MODULE_ENTRY};
pub use plan::{derive_plan, CompilationPlan};
