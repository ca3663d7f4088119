//! Terminal rendering for driver diagnostics.

use crate::diagnostic::Diagnostic;

/// Renders diagnostics in a compiler-style terminal format.
///
/// Produces output like:
/// ```text
/// error[E205]: module name "123" is not a valid identifier
///    = note: pass -module-name to pick one explicitly
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Renders a single diagnostic into a formatted string.
    pub fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        if self.color {
            let color = match diag.severity {
                crate::Severity::Error => "\x1b[1;31m",
                crate::Severity::Warning => "\x1b[1;33m",
                _ => "\x1b[1;36m",
            };
            out.push_str(&format!(
                "{color}{}[{}]\x1b[0m: {}\n",
                diag.severity, diag.code, diag.message
            ));
        } else {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                diag.severity, diag.code, diag.message
            ));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        out
    }
}
