//! Left-to-right argv parsing against the option schema.

use crate::opt::OptionKind;
use crate::parsed::{Arg, ParsedEntry, ParsedOption, ParsedOptions};
use crate::table::OptionTable;

/// A parse failure. Both variants are user-input errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The token matched no spelling in the schema.
    #[error("unknown argument: '{0}'")]
    UnknownOption(String),
    /// A value-taking option appeared at the end of argv.
    #[error("missing argument value for '{0}'")]
    MissingValue(&'static str),
}

/// Parses an argv tail into a [`ParsedOptions`] log.
///
/// Tokens are consumed left to right. `-` is the stdin input sentinel,
/// tokens not starting with `-` are inputs, and dash tokens resolve by
/// exact spelling first, then by longest joined-capable prefix. Order
/// and multiplicity are always preserved.
pub struct ArgumentParser {
    table: OptionTable,
}

impl ArgumentParser {
    /// Creates a parser over the static schema.
    pub fn new() -> Self {
        Self {
            table: OptionTable::new(),
        }
    }

    /// The schema view this parser resolves against.
    pub fn table(&self) -> &OptionTable {
        &self.table
    }

    /// Parses the argv tail (everything after argv[0]).
    pub fn parse(&self, args: &[String]) -> Result<ParsedOptions, ParseError> {
        let mut parsed = ParsedOptions::new();
        let mut iter = args.iter().enumerate();

        while let Some((index, token)) = iter.next() {
            if token == "-" || !token.starts_with('-') {
                parsed.push(ParsedOption {
                    entry: ParsedEntry::Input,
                    arg: Arg::Single(token.clone()),
                });
                continue;
            }

            if let Some(def) = self.table.exact(token) {
                let arg = match def.kind {
                    OptionKind::Flag => Arg::None,
                    // An exact match on a joined spelling means the value
                    // is empty (e.g. a bare `--driver-mode=`).
                    OptionKind::Joined => Arg::Single(String::new()),
                    OptionKind::Separate | OptionKind::JoinedOrSeparate => {
                        let (_, value) = iter
                            .next()
                            .ok_or(ParseError::MissingValue(def.spelling))?;
                        Arg::Single(value.clone())
                    }
                    OptionKind::RemainingArgs => {
                        let rest: Vec<String> = args[index + 1..].to_vec();
                        parsed.push(ParsedOption {
                            entry: ParsedEntry::Option(def.canonical()),
                            arg: Arg::Multiple(rest),
                        });
                        break;
                    }
                };
                parsed.push(ParsedOption {
                    entry: ParsedEntry::Option(def.canonical()),
                    arg,
                });
                continue;
            }

            if let Some(def) = self.table.longest_joined_prefix(token) {
                let value = token[def.spelling.len()..].to_string();
                parsed.push(ParsedOption {
                    entry: ParsedEntry::Option(def.canonical()),
                    arg: Arg::Single(value),
                });
                continue;
            }

            return Err(ParseError::UnknownOption(token.clone()));
        }

        Ok(parsed)
    }
}

impl Default for ArgumentParser {
    fn default() -> Self {
        Self::new()
    }
}
