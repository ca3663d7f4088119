//! Dependency keys: what a declaration is, seen from the graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which face of a declaration a node stands for.
///
/// Uses of an interface propagate to dependers; implementation nodes
/// exist so a body change can invalidate the owning file without
/// touching anyone else.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclAspect {
    /// The externally visible face of a declaration.
    Interface,
    /// The body behind it.
    Implementation,
}

/// What kind of entity a dependency key designates.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Designator {
    /// A top-level name.
    TopLevel(String),
    /// A nominal type, by mangled name.
    Nominal(String),
    /// A member of a nominal type.
    Member {
        /// The mangled name of the containing type.
        context: String,
        /// The member name.
        name: String,
    },
    /// A name resolved through dynamic lookup (`AnyObject`).
    DynamicLookup(String),
    /// The per-file provider node every summary carries.
    SourceFileProvide(String),
    /// A file outside the module (a loaded `swiftmodule`, a bridging
    /// header), by path.
    ExternalDepend(String),
}

/// `(aspect, designator)`: the identity of one graph node's meaning.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct DependencyKey {
    /// Which face of the entity.
    pub aspect: DeclAspect,
    /// The entity itself.
    pub designator: Designator,
}

impl DependencyKey {
    /// A top-level name key.
    pub fn top_level(aspect: DeclAspect, name: impl Into<String>) -> Self {
        Self {
            aspect,
            designator: Designator::TopLevel(name.into()),
        }
    }

    /// A nominal-type key.
    pub fn nominal(aspect: DeclAspect, mangled: impl Into<String>) -> Self {
        Self {
            aspect,
            designator: Designator::Nominal(mangled.into()),
        }
    }

    /// The provider key of a source file.
    pub fn source_file_provide(aspect: DeclAspect, path: impl Into<String>) -> Self {
        Self {
            aspect,
            designator: Designator::SourceFileProvide(path.into()),
        }
    }

    /// An external-dependency key. External files only have interfaces.
    pub fn external(path: impl Into<String>) -> Self {
        Self {
            aspect: DeclAspect::Interface,
            designator: Designator::ExternalDepend(path.into()),
        }
    }

    /// Returns `true` for external-dependency keys.
    pub fn is_external(&self) -> bool {
        matches!(self.designator, Designator::ExternalDepend(_))
    }

    /// The external path, for external-dependency keys.
    pub fn external_path(&self) -> Option<&str> {
        match &self.designator {
            Designator::ExternalDepend(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let aspect = match self.aspect {
            DeclAspect::Interface => "interface",
            DeclAspect::Implementation => "implementation",
        };
        match &self.designator {
            Designator::TopLevel(name) => write!(f, "{aspect} of top-level '{name}'"),
            Designator::Nominal(name) => write!(f, "{aspect} of type '{name}'"),
            Designator::Member { context, name } => {
                write!(f, "{aspect} of member '{context}.{name}'")
            }
            Designator::DynamicLookup(name) => write!(f, "{aspect} of dynamic '{name}'"),
            Designator::SourceFileProvide(path) => write!(f, "{aspect} of file '{path}'"),
            Designator::ExternalDepend(path) => write!(f, "{aspect} of external '{path}'"),
        }
    }
}
