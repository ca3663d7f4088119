//! Locating, admitting, and writing build records.

use crate::record::BuildRecord;
use drift_plan::{FileType, OutputFileMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors reading a build record. Rejections are warnings at the
/// driver level; incremental compilation is disabled and the build
/// proceeds clean.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The record file could not be read.
    #[error("could not read build record '{path}': {source}")]
    Unreadable {
        /// The record path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The record file did not decode.
    #[error("malformed build record '{path}': {reason}")]
    Malformed {
        /// The record path.
        path: PathBuf,
        /// Description of the decode failure.
        reason: String,
    },
}

/// Why a prior record was rejected for incremental reuse.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RejectReason {
    /// The record was written by a different tool version.
    VersionMismatch,
    /// The incremental-affecting options changed.
    DifferentArguments,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::VersionMismatch => f.write_str("compiler version mismatch"),
            RejectReason::DifferentArguments => f.write_str("different arguments"),
        }
    }
}

/// The build-record path: the whole-module `swift-dependencies` entry
/// of the output file map. `None` disables incremental compilation.
pub fn record_path(map: &OutputFileMap) -> Option<&Path> {
    map.whole_module_output(FileType::SwiftDeps)
}

/// Loads and decodes the previous build record.
pub fn load_record(path: &Path) -> Result<BuildRecord, RecordError> {
    let content = std::fs::read_to_string(path).map_err(|e| RecordError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| RecordError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Decides whether a prior record admits incremental compilation.
///
/// Deterministic: a version mismatch always rejects, then a differing
/// options hash rejects. A record with no hash at all (older tool) is
/// admitted.
pub fn admit_record(
    prior: &BuildRecord,
    current_version: &str,
    current_options_hash: &str,
) -> Result<(), RejectReason> {
    if prior.version != current_version {
        return Err(RejectReason::VersionMismatch);
    }
    match &prior.options_hash {
        Some(hash) if hash != current_options_hash => Err(RejectReason::DifferentArguments),
        _ => Ok(()),
    }
}

/// Writes the record, preserving any existing file as `<name>~`.
///
/// The preservation rename is best-effort. The write itself goes
/// through a sibling temp file and a rename so a crash never leaves a
/// half-written record. Failure is surfaced for the caller to warn
/// about; it never fails the build.
pub fn write_record(path: &Path, record: &BuildRecord) -> Result<(), RecordError> {
    if path.exists() {
        let mut backup = path.as_os_str().to_owned();
        backup.push("~");
        let _ = std::fs::rename(path, PathBuf::from(backup));
    }

    let json = serde_json::to_string_pretty(record).map_err(|e| RecordError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, json).map_err(|e| RecordError::Unreadable {
        path: tmp.clone(),
        source: e,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| RecordError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })
}
