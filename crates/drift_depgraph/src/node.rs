//! Graph nodes and input handles.

use crate::key::DependencyKey;
use drift_common::ContentHash;
use serde::{Deserialize, Serialize};

/// Opaque handle for one source input of the current build.
///
/// Handles index the driver's input list and are stable for the
/// lifetime of one run.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct InputHandle(u32);

impl InputHandle {
    /// Creates a handle from a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index of this handle.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// One node of the dependency graph.
///
/// A node stands for one `(key, owner)` pair. The fingerprint detects
/// semantic changes between two summaries of the same input. Nodes for
/// purely external interfaces have no owner.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    /// What this node designates.
    pub key: DependencyKey,
    /// Content hash of the designated declaration, when known.
    pub fingerprint: Option<ContentHash>,
    /// The input whose summary defines this node, absent for external
    /// interfaces.
    pub owner: Option<InputHandle>,
}
