//! Classified input files.

use crate::file_type::FileType;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where an input's bytes come from.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum InputPath {
    /// The standard-input sentinel (`-` on the command line).
    Stdin,
    /// A filesystem path, absolute once the working directory is applied.
    Path(PathBuf),
}

/// A classified input: where it lives and what kind of file it is.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InputFile {
    /// The file reference.
    pub path: InputPath,
    /// The type derived from the extension (stdin is Swift source).
    pub file_type: FileType,
}

impl InputFile {
    /// Classifies a command-line input token.
    pub fn from_token(token: &str) -> InputFile {
        if token == "-" {
            return InputFile {
                path: InputPath::Stdin,
                file_type: FileType::Swift,
            };
        }
        let path = PathBuf::from(token);
        let file_type = FileType::from_extension(path.extension().and_then(|e| e.to_str()));
        InputFile {
            path: InputPath::Path(path),
            file_type,
        }
    }

    /// The token form of this input, as it keys the output file map.
    pub fn token(&self) -> String {
        match &self.path {
            InputPath::Stdin => "-".to_string(),
            InputPath::Path(p) => p.to_string_lossy().into_owned(),
        }
    }

    /// The filesystem path, if this input is not stdin.
    pub fn as_path(&self) -> Option<&Path> {
        match &self.path {
            InputPath::Stdin => None,
            InputPath::Path(p) => Some(p),
        }
    }

    /// The basename without extension, used for module-name fallback.
    pub fn stem(&self) -> Option<&str> {
        self.as_path()?.file_stem()?.to_str()
    }
}

impl fmt::Display for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            InputPath::Stdin => f.write_str("<stdin>"),
            InputPath::Path(p) => write!(f, "{}", p.display()),
        }
    }
}
