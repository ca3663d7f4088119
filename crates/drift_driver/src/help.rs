//! Basic usage rendering from the option schema.

use drift_options::{OptionKind, OptionTable};

/// Renders the usage listing.
///
/// Hidden options only appear with `include_hidden` (`-help-hidden`);
/// alias spellings are folded into their canonical option.
pub fn render(table: &OptionTable, include_hidden: bool) -> String {
    let mut out = String::from("USAGE: swiftc [options] <inputs>\n\nOPTIONS:\n");
    for def in table.defs() {
        if def.alias_of.is_some() {
            continue;
        }
        if def.attrs.hidden && !include_hidden {
            continue;
        }
        let rendered = match def.kind {
            OptionKind::Flag => def.spelling.to_string(),
            OptionKind::Joined => format!("{}<value>", def.spelling),
            OptionKind::Separate | OptionKind::JoinedOrSeparate => {
                format!("{} <value>", def.spelling)
            }
            OptionKind::RemainingArgs => format!("{} <args>...", def.spelling),
        };
        out.push_str("  ");
        out.push_str(&rendered);
        out.push('\n');
    }
    out
}
