//! The `swiftc` / `swift` command-line entry point.
//!
//! Both binaries share this main; the driver reads argv[0] to pick its
//! persona, so a symlink or rename is all that distinguishes them.

#![warn(missing_docs)]

use drift_diagnostics::{DiagnosticSink, TerminalRenderer};
use drift_driver::{Driver, PrintingDelegate, PrintingExecutor};
use std::process;

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let cwd = std::env::current_dir().ok();

    let mut driver = Driver::new(env!("CARGO_PKG_VERSION"));
    let mut executor = PrintingExecutor;
    let mut delegate = PrintingDelegate;
    let sink = DiagnosticSink::new();

    let code = driver.run(
        &argv,
        cwd.as_deref(),
        &mut executor,
        &mut delegate,
        &sink,
    );

    let color = std::env::var_os("NO_COLOR").is_none();
    let renderer = TerminalRenderer::new(color);
    for diag in sink.take_all() {
        eprint!("{}", renderer.render(&diag));
    }

    process::exit(code);
}
