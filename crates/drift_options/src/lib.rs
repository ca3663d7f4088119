//! Option schema and argv parser for the Drift compiler driver.
//!
//! The schema is a compile-time-known table: every recognized option
//! carries a canonical spelling, a kind dictating how it consumes argv
//! tokens, an optional group, attribute flags, and an optional alias
//! target. The parser walks argv left to right and produces an ordered
//! [`ParsedOptions`] log that preserves multiplicity and input positions.

#![warn(missing_docs)]

pub mod opt;
pub mod parse;
pub mod parsed;
pub mod table;

pub use opt::{Opt, OptionAttrs, OptionDef, OptionGroup, OptionKind};
pub use parse::{ArgumentParser, ParseError};
pub use parsed::{Arg, ParsedEntry, ParsedOption, ParsedOptions};
pub use table::OptionTable;
