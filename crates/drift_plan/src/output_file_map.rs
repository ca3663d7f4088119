//! The output file map: where each input's products go.

use crate::file_type::FileType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The key under which whole-module outputs (including the build
/// record) are listed.
pub const WHOLE_MODULE_ENTRY: &str = "";

/// Errors loading an output file map. All are user-input errors.
#[derive(Debug, thiserror::Error)]
pub enum OutputFileMapError {
    /// The file could not be read.
    #[error("could not read output file map '{path}': {source}")]
    Io {
        /// The map path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not the expected JSON shape.
    #[error("could not parse output file map '{path}': {reason}")]
    Parse {
        /// The map path.
        path: PathBuf,
        /// Description of the decode failure.
        reason: String,
    },
    /// An entry names a file type the driver does not know.
    #[error("unknown file type '{key}' in output file map '{path}'")]
    UnknownFileType {
        /// The map path.
        path: PathBuf,
        /// The offending type key.
        key: String,
    },
}

/// A mapping from `(input, output type)` to an output path.
///
/// Loaded from JSON produced by the invoking build system:
///
/// ```json
/// {
///   "a.swift": { "object": "build/a.o", "swift-dependencies": "build/a.swiftdeps" },
///   "": { "swift-dependencies": "build/module.swiftdeps" }
/// }
/// ```
///
/// The empty-string key holds whole-module outputs. The map is queried,
/// never mutated, after load.
#[derive(Debug, Clone, Default)]
pub struct OutputFileMap {
    entries: HashMap<String, HashMap<FileType, PathBuf>>,
}

impl OutputFileMap {
    /// Creates an empty map (for tests and tooling).
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and decodes a map from disk.
    pub fn load(path: &Path) -> Result<Self, OutputFileMapError> {
        let content = std::fs::read_to_string(path).map_err(|e| OutputFileMapError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(&content)
            .map_err(|e| OutputFileMapError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (input, outputs) in raw {
            let mut typed = HashMap::with_capacity(outputs.len());
            for (key, output) in outputs {
                let ty =
                    FileType::from_name(&key).ok_or_else(|| OutputFileMapError::UnknownFileType {
                        path: path.to_path_buf(),
                        key: key.clone(),
                    })?;
                typed.insert(ty, PathBuf::from(output));
            }
            entries.insert(input, typed);
        }
        Ok(Self { entries })
    }

    /// Registers an output path (for tests and tooling; the driver
    /// itself only loads maps).
    pub fn insert(&mut self, input: impl Into<String>, ty: FileType, output: impl Into<PathBuf>) {
        self.entries
            .entry(input.into())
            .or_default()
            .insert(ty, output.into());
    }

    /// The output path of `ty` for `input`, if listed.
    pub fn output_for(&self, input: &str, ty: FileType) -> Option<&Path> {
        self.entries.get(input)?.get(&ty).map(PathBuf::as_path)
    }

    /// The whole-module output path of `ty`, if listed.
    pub fn whole_module_output(&self, ty: FileType) -> Option<&Path> {
        self.output_for(WHOLE_MODULE_ENTRY, ty)
    }

    /// Serializes the map back to the on-disk JSON shape (for tests
    /// and tooling).
    pub fn save(&self, path: &Path) -> Result<(), OutputFileMapError> {
        let mut raw: HashMap<&str, HashMap<&'static str, String>> = HashMap::new();
        for (input, outputs) in &self.entries {
            let typed = raw.entry(input).or_default();
            for (ty, output) in outputs {
                typed.insert(ty.name(), output.to_string_lossy().into_owned());
            }
        }
        let json = serde_json::to_string_pretty(&raw).map_err(|e| OutputFileMapError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| OutputFileMapError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_query() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ofm.json");
        std::fs::write(
            &path,
            r#"{
                "a.swift": {
                    "object": "build/a.o",
                    "swift-dependencies": "build/a.swiftdeps"
                },
                "": { "swift-dependencies": "build/module.swiftdeps" }
            }"#,
        )
        .unwrap();

        let map = OutputFileMap::load(&path).unwrap();
        assert_eq!(
            map.output_for("a.swift", FileType::Object),
            Some(Path::new("build/a.o"))
        );
        assert_eq!(
            map.whole_module_output(FileType::SwiftDeps),
            Some(Path::new("build/module.swiftdeps"))
        );
        assert_eq!(map.output_for("a.swift", FileType::SwiftModule), None);
        assert_eq!(map.output_for("b.swift", FileType::Object), None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = OutputFileMap::load(Path::new("/nonexistent/ofm.json")).unwrap_err();
        assert!(matches!(err, OutputFileMapError::Io { .. }));
    }

    #[test]
    fn bad_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ofm.json");
        std::fs::write(&path, "not json {{{").unwrap();
        let err = OutputFileMap::load(&path).unwrap_err();
        assert!(matches!(err, OutputFileMapError::Parse { .. }));
    }

    #[test]
    fn unknown_type_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ofm.json");
        std::fs::write(&path, r#"{ "a.swift": { "widget": "a.widget" } }"#).unwrap();
        let err = OutputFileMap::load(&path).unwrap_err();
        assert!(matches!(err, OutputFileMapError::UnknownFileType { .. }));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ofm.json");

        let mut map = OutputFileMap::new();
        map.insert("a.swift", FileType::Object, "build/a.o");
        map.insert(WHOLE_MODULE_ENTRY, FileType::SwiftDeps, "build/m.swiftdeps");
        map.save(&path).unwrap();

        let back = OutputFileMap::load(&path).unwrap();
        assert_eq!(
            back.output_for("a.swift", FileType::Object),
            Some(Path::new("build/a.o"))
        );
        assert_eq!(
            back.whole_module_output(FileType::SwiftDeps),
            Some(Path::new("build/m.swiftdeps"))
        );
    }
}
