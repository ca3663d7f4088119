//! Spelling-indexed view of the option schema.

use std::collections::HashMap;

use crate::opt::{OptionDef, OptionKind, OPTION_DEFS};

/// A spelling-indexed view of the option schema.
///
/// Exact lookup is O(1). Prefix matching (for joined values) scans a
/// list of joined-capable spellings sorted longest-first, so the longest
/// matching spelling always wins.
pub struct OptionTable {
    by_spelling: HashMap<&'static str, &'static OptionDef>,
    joined_longest_first: Vec<&'static OptionDef>,
}

impl OptionTable {
    /// Builds the table from the static schema.
    pub fn new() -> Self {
        let mut by_spelling = HashMap::with_capacity(OPTION_DEFS.len());
        let mut joined_longest_first = Vec::new();

        for def in OPTION_DEFS {
            by_spelling.insert(def.spelling, def);
            if matches!(def.kind, OptionKind::Joined | OptionKind::JoinedOrSeparate) {
                joined_longest_first.push(def);
            }
        }
        joined_longest_first.sort_by(|a, b| b.spelling.len().cmp(&a.spelling.len()));

        Self {
            by_spelling,
            joined_longest_first,
        }
    }

    /// Looks up an option by its exact spelling.
    pub fn exact(&self, spelling: &str) -> Option<&'static OptionDef> {
        self.by_spelling.get(spelling).copied()
    }

    /// Finds the longest joined-capable spelling that is a proper prefix
    /// of `token`.
    pub fn longest_joined_prefix(&self, token: &str) -> Option<&'static OptionDef> {
        self.joined_longest_first
            .iter()
            .find(|def| token.len() > def.spelling.len() && token.starts_with(def.spelling))
            .copied()
    }

    /// Iterates over all schema entries in declaration order.
    pub fn defs(&self) -> impl Iterator<Item = &'static OptionDef> {
        OPTION_DEFS.iter()
    }
}

impl Default for OptionTable {
    fn default() -> Self {
        Self::new()
    }
}
