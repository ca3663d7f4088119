//! The build record data model.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::{SystemTime, UNIX_EPOCH};

/// A file modification time as seconds and nanoseconds past the epoch.
///
/// Comparison is exact: any difference from the recorded value marks an
/// input as changed, whether newer or older.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
pub struct FileTimestamp {
    /// Whole seconds since the Unix epoch.
    pub secs: u64,
    /// Subsecond nanoseconds.
    pub nanos: u32,
}

impl FileTimestamp {
    /// Converts a [`SystemTime`]. Pre-epoch times collapse to zero.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(d) => Self {
                secs: d.as_secs(),
                nanos: d.subsec_nanos(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Reads the modification time of `path`, if it can be stat'ed.
    pub fn of_file(path: &std::path::Path) -> Option<Self> {
        let meta = std::fs::metadata(path).ok()?;
        let mtime = meta.modified().ok()?;
        Some(Self::from_system_time(mtime))
    }
}

/// The outcome of one frontend job, as persisted in the record.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobResultKind {
    /// The job ran and exited zero.
    Succeeded,
    /// The job ran and exited non-zero.
    Failed,
    /// The job was not scheduled because its input was up to date.
    Skipped,
}

/// The persisted summary of one build.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildRecord {
    /// The tool version that wrote this record.
    pub version: String,
    /// SHA-256 over the sorted spellings of incremental-affecting
    /// options. Absent in records written by older tools.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_hash: Option<String>,
    /// When the recorded build started.
    pub build_start: FileTimestamp,
    /// The modification time of each source input at build start,
    /// keyed by the input token.
    pub input_mtimes: BTreeMap<String, FileTimestamp>,
    /// Inputs that were skipped (up to date) in the recorded build.
    pub inputs_skipped: BTreeSet<String>,
    /// The outcome of each scheduled job, keyed by primary input token.
    pub job_outcomes: BTreeMap<String, JobResultKind>,
}

impl BuildRecord {
    /// Creates an empty record for the given tool version and options
    /// hash, stamped with the build start time.
    pub fn new(version: impl Into<String>, options_hash: String, build_start: FileTimestamp) -> Self {
        Self {
            version: version.into(),
            options_hash: Some(options_hash),
            build_start,
            input_mtimes: BTreeMap::new(),
            inputs_skipped: BTreeSet::new(),
            job_outcomes: BTreeMap::new(),
        }
    }

    /// The set of input tokens present in the recorded build.
    pub fn previous_inputs(&self) -> BTreeSet<&str> {
        self.input_mtimes.keys().map(String::as_str).collect()
    }
}
