//! File types recognized by the driver, derived from path extensions.

use std::fmt;

/// Every file type the planning core distinguishes.
///
/// Covers both input classification (extension-based) and the output
/// types named in the output file map.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FileType {
    /// Swift source code.
    Swift,
    /// Canonical SIL, textual.
    Sil,
    /// Raw SIL straight out of SILGen, textual.
    RawSil,
    /// Canonical SIL, binary.
    Sib,
    /// Raw SIL, binary.
    RawSib,
    /// A compiled object file.
    Object,
    /// Target assembly.
    Assembly,
    /// Textual LLVM IR.
    LlvmIr,
    /// LLVM bitcode.
    LlvmBc,
    /// A compiled module interface.
    SwiftModule,
    /// A per-input dependency summary consumed by the incremental engine.
    SwiftDeps,
    /// A precompiled bridging header.
    Pch,
    /// A precompiled Clang module.
    Pcm,
    /// The list of modules an input imports.
    ImportedModules,
    /// Index store data.
    IndexData,
}

impl FileType {
    /// Classifies a path by extension.
    ///
    /// Unknown or missing extensions default to [`Object`], so object
    /// files produced by other tools can be listed as inputs without
    /// special casing.
    ///
    /// [`Object`]: FileType::Object
    pub fn from_extension(ext: Option<&str>) -> FileType {
        match ext {
            Some("swift") => FileType::Swift,
            Some("sil") => FileType::Sil,
            Some("sib") => FileType::Sib,
            Some("s") => FileType::Assembly,
            Some("ll") => FileType::LlvmIr,
            Some("bc") => FileType::LlvmBc,
            Some("swiftmodule") => FileType::SwiftModule,
            Some("swiftdeps") => FileType::SwiftDeps,
            Some("pch") => FileType::Pch,
            Some("pcm") => FileType::Pcm,
            _ => FileType::Object,
        }
    }

    /// The extension used when the driver names an output of this type.
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Swift => "swift",
            FileType::Sil | FileType::RawSil => "sil",
            FileType::Sib | FileType::RawSib => "sib",
            FileType::Object => "o",
            FileType::Assembly => "s",
            FileType::LlvmIr => "ll",
            FileType::LlvmBc => "bc",
            FileType::SwiftModule => "swiftmodule",
            FileType::SwiftDeps => "swiftdeps",
            FileType::Pch => "pch",
            FileType::Pcm => "pcm",
            FileType::ImportedModules => "importedmodules",
            FileType::IndexData => "indexdata",
        }
    }

    /// The stable name used as a key in the output file map.
    pub fn name(self) -> &'static str {
        match self {
            FileType::Swift => "swift",
            FileType::Sil => "sil",
            FileType::RawSil => "raw-sil",
            FileType::Sib => "sib",
            FileType::RawSib => "raw-sib",
            FileType::Object => "object",
            FileType::Assembly => "assembly",
            FileType::LlvmIr => "llvm-ir",
            FileType::LlvmBc => "llvm-bc",
            FileType::SwiftModule => "swiftmodule",
            FileType::SwiftDeps => "swift-dependencies",
            FileType::Pch => "pch",
            FileType::Pcm => "pcm",
            FileType::ImportedModules => "imported-modules",
            FileType::IndexData => "index-data",
        }
    }

    /// Resolves an output-file-map key back to a file type.
    pub fn from_name(name: &str) -> Option<FileType> {
        let ty = match name {
            "swift" => FileType::Swift,
            "sil" => FileType::Sil,
            "raw-sil" => FileType::RawSil,
            "sib" => FileType::Sib,
            "raw-sib" => FileType::RawSib,
            "object" => FileType::Object,
            "assembly" => FileType::Assembly,
            "llvm-ir" => FileType::LlvmIr,
            "llvm-bc" => FileType::LlvmBc,
            "swiftmodule" => FileType::SwiftModule,
            "swift-dependencies" => FileType::SwiftDeps,
            "pch" => FileType::Pch,
            "pcm" => FileType::Pcm,
            "imported-modules" => FileType::ImportedModules,
            "index-data" => FileType::IndexData,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
