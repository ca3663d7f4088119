//! The ordered log of parsed options and inputs.

use crate::opt::{Opt, OptionGroup};

/// What a parsed entry refers to: a schema option or an input file token.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParsedEntry {
    /// A recognized option, already resolved to its canonical form.
    Option(Opt),
    /// An input file token (including the `-` stdin sentinel).
    Input,
}

/// The argument payload of a parsed entry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Arg {
    /// No argument (flags).
    None,
    /// A single string value (joined, separate, and input tokens).
    Single(String),
    /// Multiple string values (remaining-args options).
    Multiple(Vec<String>),
}

/// One entry in the parsed-options log.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParsedOption {
    /// The option or input this entry records.
    pub entry: ParsedEntry,
    /// The argument payload.
    pub arg: Arg,
}

impl ParsedOption {
    /// The single string value of this entry, if it has one.
    pub fn value(&self) -> Option<&str> {
        match &self.arg {
            Arg::Single(v) => Some(v),
            _ => None,
        }
    }
}

/// An ordered, multiplicity-preserving log of parsed options.
///
/// Consuming a parsed option never removes it; the log is queryable at
/// will and mutable only through [`for_each_modifying`]
/// (the working-directory rewrite).
///
/// [`for_each_modifying`]: ParsedOptions::for_each_modifying
#[derive(Clone, Debug, Default)]
pub struct ParsedOptions {
    entries: Vec<ParsedOption>,
}

impl ParsedOptions {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, preserving order.
    pub fn push(&mut self, entry: ParsedOption) {
        self.entries.push(entry);
    }

    /// Iterates over all entries in appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &ParsedOption> {
        self.entries.iter()
    }

    /// The number of entries (options and inputs).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `opt` appears at least once.
    pub fn has(&self, opt: Opt) -> bool {
        self.last_of(opt).is_some()
    }

    /// Returns `true` if any of `opts` appears at least once.
    pub fn contains_any(&self, opts: &[Opt]) -> bool {
        opts.iter().any(|&o| self.has(o))
    }

    /// The last occurrence of `opt`, if any.
    pub fn last_of(&self, opt: Opt) -> Option<&ParsedOption> {
        self.entries
            .iter()
            .rev()
            .find(|p| p.entry == ParsedEntry::Option(opt))
    }

    /// The single string value of the last occurrence of `opt`.
    pub fn value_of(&self, opt: Opt) -> Option<&str> {
        self.last_of(opt).and_then(|p| p.value())
    }

    /// The last entry belonging to `group`, with its option.
    pub fn last_in_group(&self, group: OptionGroup) -> Option<(Opt, &ParsedOption)> {
        self.entries.iter().rev().find_map(|p| match p.entry {
            ParsedEntry::Option(opt) if opt.group() == Some(group) => Some((opt, p)),
            _ => None,
        })
    }

    /// All input tokens, in source order.
    pub fn inputs(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|p| p.entry == ParsedEntry::Input)
            .filter_map(|p| p.value())
            .collect()
    }

    /// Applies an in-place transform to every entry.
    ///
    /// This is the sole mutation point after parsing; it exists for the
    /// working-directory path rewrite.
    pub fn for_each_modifying(&mut self, mut f: impl FnMut(&mut ParsedOption)) {
        for entry in &mut self.entries {
            f(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt_entry(opt: Opt, arg: Arg) -> ParsedOption {
        ParsedOption {
            entry: ParsedEntry::Option(opt),
            arg,
        }
    }

    fn input_entry(path: &str) -> ParsedOption {
        ParsedOption {
            entry: ParsedEntry::Input,
            arg: Arg::Single(path.to_string()),
        }
    }

    #[test]
    fn last_of_picks_final_occurrence() {
        let mut parsed = ParsedOptions::new();
        parsed.push(opt_entry(Opt::ModuleName, Arg::Single("A".into())));
        parsed.push(opt_entry(Opt::ModuleName, Arg::Single("B".into())));
        assert_eq!(parsed.value_of(Opt::ModuleName), Some("B"));
        assert_eq!(parsed.len(), 2, "duplicates are never folded");
    }

    #[test]
    fn last_in_group_is_last_wins() {
        let mut parsed = ParsedOptions::new();
        parsed.push(opt_entry(Opt::EmitObject, Arg::None));
        parsed.push(opt_entry(Opt::G, Arg::None));
        parsed.push(opt_entry(Opt::EmitLibrary, Arg::None));
        let (opt, _) = parsed.last_in_group(OptionGroup::Modes).unwrap();
        assert_eq!(opt, Opt::EmitLibrary);
        let (opt, _) = parsed.last_in_group(OptionGroup::DebugInfo).unwrap();
        assert_eq!(opt, Opt::G);
    }

    #[test]
    fn inputs_preserve_source_order() {
        let mut parsed = ParsedOptions::new();
        parsed.push(input_entry("b.swift"));
        parsed.push(opt_entry(Opt::G, Arg::None));
        parsed.push(input_entry("a.swift"));
        assert_eq!(parsed.inputs(), vec!["b.swift", "a.swift"]);
    }

    #[test]
    fn contains_any() {
        let mut parsed = ParsedOptions::new();
        parsed.push(opt_entry(Opt::Help, Arg::None));
        assert!(parsed.contains_any(&[Opt::Help, Opt::HelpHidden]));
        assert!(!parsed.contains_any(&[Opt::Version]));
    }

    #[test]
    fn for_each_modifying_rewrites_in_place() {
        let mut parsed = ParsedOptions::new();
        parsed.push(input_entry("a.swift"));
        parsed.for_each_modifying(|p| {
            if let Arg::Single(v) = &mut p.arg {
                *v = format!("/abs/{v}");
            }
        });
        assert_eq!(parsed.inputs(), vec!["/abs/a.swift"]);
    }
}
