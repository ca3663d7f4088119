//! Diagnostic engine for the Drift compiler driver.
//!
//! Driver diagnostics have no source spans: they describe problems with
//! the command line, the build plan, or the incremental state, so each
//! carries only a severity, a stable code, a message, and optional notes.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{codes, Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::TerminalRenderer;
pub use severity::Severity;
pub use sink::DiagnosticSink;
