//! Fine-grained module dependency graph for the Drift incremental engine.
//!
//! The graph integrates per-input dependency summaries produced by the
//! frontend and answers the two questions at the heart of incremental
//! compilation: which inputs must recompile when a whole file changed
//! (the first wave), and which must recompile because specific
//! declarations changed (the second wave).

#![warn(missing_docs)]

pub mod arena;
pub mod graph;
pub mod key;
pub mod node;
pub mod summary;

pub use arena::{NodeArena, NodeId};
pub use graph::{ChangedNode, ModuleDepGraph};
pub use key::{DeclAspect, DependencyKey, Designator};
pub use node::{InputHandle, Node};
pub use summary::{ProvidedEntity, SourceSummary};
