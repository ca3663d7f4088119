//! Reading per-input dependency summaries.
//!
//! The frontend writes one summary per input, enumerating the entities
//! the input defines (with fingerprints) and the keys it uses. The
//! driver only ever reads them; reads are fail-safe, and a summary that
//! cannot be read or decoded is reported as malformed by returning
//! `None` so the owning input can be force-compiled.

use crate::key::DependencyKey;
use drift_common::ContentHash;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entity a summary declares, with its fingerprint when the
/// frontend could compute one.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ProvidedEntity {
    /// The declared entity.
    pub key: DependencyKey,
    /// Content hash of the declaration, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<ContentHash>,
}

/// The decoded dependency summary of one input.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SourceSummary {
    /// Entities this input defines.
    pub provides: Vec<ProvidedEntity>,
    /// Keys this input uses.
    pub depends: Vec<DependencyKey>,
}

impl SourceSummary {
    /// Reads and decodes a summary, returning `None` when the file is
    /// missing, unreadable, or malformed.
    pub fn read(path: &Path) -> Option<SourceSummary> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Writes the summary as JSON. Drivers never do this; it exists for
    /// tooling and tests standing in for the frontend.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}
