//! The options hash guarding build-record reuse.

use drift_options::{ParsedEntry, ParsedOptions};
use sha2::{Digest, Sha256};

/// Hashes the spellings of every incremental-affecting option.
///
/// Spellings are collected (inputs excluded), sorted ascending,
/// concatenated, and hashed with SHA-256; the result is hex-encoded.
/// The hash covers presence, not values: option values that matter for
/// staleness are captured elsewhere in the record. Sorting makes the
/// hash invariant under option reordering.
pub fn compute_options_hash(parsed: &ParsedOptions) -> String {
    let mut spellings: Vec<&'static str> = parsed
        .iter()
        .filter_map(|entry| match entry.entry {
            ParsedEntry::Option(opt) if opt.attrs().affects_incremental => Some(opt.spelling()),
            _ => None,
        })
        .collect();
    spellings.sort_unstable();

    let mut hasher = Sha256::new();
    for spelling in spellings {
        hasher.update(spelling.as_bytes());
    }
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
