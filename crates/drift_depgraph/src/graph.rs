//! The module dependency graph and its wave queries.
//!
//! One struct holds the data (arena, twin finder indices, traced set,
//! external-dependency registry, the input/summary bidirectional map);
//! integration, tracing, and verification are separate method families
//! over it. The core is single-threaded, so nothing here locks, but the
//! finder invariants must hold before any wave query runs.

use crate::arena::{NodeArena, NodeId};
use crate::key::DependencyKey;
use crate::node::{InputHandle, Node};
use crate::summary::SourceSummary;
use drift_common::{DriftResult, InternalError};
use drift_diagnostics::{codes, Diagnostic, DiagnosticSink};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// One node the last integration changed: inserted with a fingerprint,
/// refingerprinted, removed, or (for externals) given a new use edge.
///
/// Carries the key and owner so wave queries can reason about removed
/// nodes whose slots are already vacated.
#[derive(Clone, Debug)]
pub struct ChangedNode {
    /// The node's id (possibly vacated by now).
    pub id: NodeId,
    /// The node's dependency key.
    pub key: DependencyKey,
    /// The owning input, absent for external interfaces.
    pub owner: Option<InputHandle>,
}

/// The in-memory fine-grained dependency graph of one driver run.
pub struct ModuleDepGraph {
    nodes: NodeArena,
    /// Finder index one: owning input → key → node.
    by_owner: HashMap<InputHandle, HashMap<DependencyKey, NodeId>>,
    /// Finder index two: key → the inputs that use it.
    users_of: HashMap<DependencyKey, BTreeSet<InputHandle>>,
    /// Ownerless nodes standing for external interfaces.
    external_nodes: HashMap<DependencyKey, NodeId>,
    /// Every external path any summary referenced.
    external_dependencies: BTreeSet<String>,
    /// Nodes already visited in the current wave.
    traced: HashSet<NodeId>,
    input_to_summary: HashMap<InputHandle, PathBuf>,
    summary_to_input: HashMap<PathBuf, InputHandle>,
    verify_after_integration: bool,
}

impl ModuleDepGraph {
    /// Creates an empty graph.
    ///
    /// With `verify_after_integration` set, the finder invariants are
    /// re-checked after every integration; a violation is a defect.
    pub fn new(verify_after_integration: bool) -> Self {
        Self {
            nodes: NodeArena::new(),
            by_owner: HashMap::new(),
            users_of: HashMap::new(),
            external_nodes: HashMap::new(),
            external_dependencies: BTreeSet::new(),
            traced: HashSet::new(),
            input_to_summary: HashMap::new(),
            summary_to_input: HashMap::new(),
            verify_after_integration,
        }
    }

    /// Builds the graph before the first wave.
    ///
    /// Every input must have a summary location; one missing entry emits
    /// a remark and fails the whole initial build (`Ok(None)`), which
    /// disables incremental compilation. Inputs present in the previous
    /// build integrate their on-disk summaries; the ones whose summaries
    /// are malformed are returned so the driver can force-compile them.
    /// Inputs new to this build have nothing to integrate yet.
    pub fn build_initial(
        inputs: &[(InputHandle, Option<PathBuf>)],
        previous_inputs: &BTreeSet<InputHandle>,
        verify_after_integration: bool,
        sink: &DiagnosticSink,
    ) -> DriftResult<Option<(ModuleDepGraph, Vec<InputHandle>)>> {
        let mut graph = ModuleDepGraph::new(verify_after_integration);

        for (input, path) in inputs {
            match path {
                Some(path) => graph.register_input(*input, path.clone())?,
                None => {
                    sink.emit(Diagnostic::remark(
                        codes::MISSING_DEPENDENCIES_ENTRY,
                        "an input has no swift-dependencies entry in the output file map; \
                         incremental compilation is disabled",
                    ));
                    return Ok(None);
                }
            }
        }

        let mut malformed = Vec::new();
        for (input, _) in inputs {
            if !previous_inputs.contains(input) {
                continue;
            }
            let path = graph.input_to_summary[input].clone();
            match SourceSummary::read(&path) {
                Some(summary) => {
                    graph.integrate(&summary, *input)?;
                }
                None => malformed.push(*input),
            }
        }

        Ok(Some((graph, malformed)))
    }

    /// Registers the input ↔ summary-path pairing.
    ///
    /// The map is an injection both ways; a duplicate on either side is
    /// a defect.
    pub fn register_input(&mut self, input: InputHandle, summary: PathBuf) -> DriftResult<()> {
        if self.input_to_summary.contains_key(&input) {
            return Err(InternalError::new(format!(
                "input {} registered twice",
                input.as_raw()
            )));
        }
        if self.summary_to_input.contains_key(&summary) {
            return Err(InternalError::new(format!(
                "summary file '{}' mapped to two inputs",
                summary.display()
            )));
        }
        self.summary_to_input.insert(summary.clone(), input);
        self.input_to_summary.insert(input, summary);
        Ok(())
    }

    /// The summary path registered for `input`.
    pub fn summary_path_of(&self, input: InputHandle) -> Option<&Path> {
        self.input_to_summary.get(&input).map(PathBuf::as_path)
    }

    /// The input registered for a summary path.
    pub fn input_for_summary(&self, summary: &Path) -> Option<InputHandle> {
        self.summary_to_input.get(summary).copied()
    }

    /// Reads `input`'s summary from its registered path and integrates
    /// it. `Ok(None)` means the summary was malformed.
    pub fn integrate_summary_file(
        &mut self,
        input: InputHandle,
    ) -> DriftResult<Option<Vec<ChangedNode>>> {
        let path = match self.input_to_summary.get(&input) {
            Some(path) => path.clone(),
            None => {
                return Err(InternalError::new(format!(
                    "integrating unregistered input {}",
                    input.as_raw()
                )))
            }
        };
        match SourceSummary::read(&path) {
            Some(summary) => Ok(Some(self.integrate(&summary, input)?)),
            None => Ok(None),
        }
    }

    /// Integrates one decoded summary for `input`.
    ///
    /// Returns the nodes whose fingerprint changed, which were newly
    /// added with a fingerprint, which disappeared, or whose
    /// external-dependency edges appeared. Integrating an unchanged
    /// summary a second time returns an empty set, and re-recording use
    /// edges is idempotent.
    pub fn integrate(
        &mut self,
        summary: &SourceSummary,
        input: InputHandle,
    ) -> DriftResult<Vec<ChangedNode>> {
        let mut changed = Vec::new();

        let existing: HashMap<DependencyKey, NodeId> =
            self.by_owner.get(&input).cloned().unwrap_or_default();
        let provided: HashSet<&DependencyKey> = summary.provides.iter().map(|p| &p.key).collect();

        for provide in &summary.provides {
            match existing.get(&provide.key) {
                Some(&id) => {
                    let node = self.nodes.get_mut(id).ok_or_else(|| {
                        InternalError::new("finder entry points at a vacated node")
                    })?;
                    if node.fingerprint != provide.fingerprint {
                        node.fingerprint = provide.fingerprint;
                        changed.push(ChangedNode {
                            id,
                            key: provide.key.clone(),
                            owner: Some(input),
                        });
                    }
                }
                None => {
                    let id = self.nodes.alloc(Node {
                        key: provide.key.clone(),
                        fingerprint: provide.fingerprint,
                        owner: Some(input),
                    });
                    self.by_owner
                        .entry(input)
                        .or_default()
                        .insert(provide.key.clone(), id);
                    if provide.fingerprint.is_some() {
                        changed.push(ChangedNode {
                            id,
                            key: provide.key.clone(),
                            owner: Some(input),
                        });
                    }
                }
            }
        }

        for (key, id) in &existing {
            if !provided.contains(key) {
                self.nodes.remove(*id);
                if let Some(owned) = self.by_owner.get_mut(&input) {
                    owned.remove(key);
                }
                self.traced.remove(id);
                changed.push(ChangedNode {
                    id: *id,
                    key: key.clone(),
                    owner: Some(input),
                });
            }
        }

        for key in &summary.depends {
            let newly_recorded = self.users_of.entry(key.clone()).or_default().insert(input);
            if let Some(path) = key.external_path() {
                self.external_dependencies.insert(path.to_string());
                let id = match self.external_nodes.get(key) {
                    Some(&id) => id,
                    None => {
                        let id = self.nodes.alloc(Node {
                            key: key.clone(),
                            fingerprint: None,
                            owner: None,
                        });
                        self.external_nodes.insert(key.clone(), id);
                        id
                    }
                };
                if newly_recorded {
                    changed.push(ChangedNode {
                        id,
                        key: key.clone(),
                        owner: None,
                    });
                }
            }
        }

        if self.verify_after_integration {
            self.verify()?;
        }
        Ok(changed)
    }

    /// First-wave query: every input to recompile because `input`'s
    /// whole summary changed.
    ///
    /// The reflexive-transitive closure of tracing from every node owned
    /// by `input`; the result always contains `input` itself.
    pub fn find_dependent_source_files(&mut self, input: InputHandle) -> BTreeSet<InputHandle> {
        let mut result = BTreeSet::new();
        result.insert(input);
        let seeds: Vec<NodeId> = self
            .by_owner
            .get(&input)
            .map(|owned| owned.values().copied().collect())
            .unwrap_or_default();
        self.trace_from(seeds, &mut result);
        result
    }

    /// Second-wave query: every input to recompile because exactly
    /// `changes` changed.
    ///
    /// Always contains the owners of `changes` (reflexivity). An empty
    /// change set yields an empty result.
    pub fn find_inputs_to_recompile_when_nodes_change(
        &mut self,
        changes: &[ChangedNode],
    ) -> BTreeSet<InputHandle> {
        let mut result = BTreeSet::new();
        let mut seeds = Vec::new();

        for change in changes {
            if let Some(owner) = change.owner {
                result.insert(owner);
            }
            if self.nodes.get(change.id).is_some() {
                seeds.push(change.id);
            } else {
                // The node is gone; walk straight to its former users.
                self.push_user_nodes(&change.key, &mut seeds);
            }
        }

        self.trace_from(seeds, &mut result);
        result
    }

    /// Clears the traced flag of `changes` so the next wave re-examines
    /// their uses.
    pub fn untrace_nodes(&mut self, changes: &[ChangedNode]) {
        for change in changes {
            self.traced.remove(&change.id);
        }
    }

    /// Tracing: walk use-edges from the seed nodes, skipping anything
    /// already traced this wave. Every visited owned node contributes
    /// its input to `result`.
    fn trace_from(&mut self, mut stack: Vec<NodeId>, result: &mut BTreeSet<InputHandle>) {
        while let Some(id) = stack.pop() {
            if !self.traced.insert(id) {
                continue;
            }
            let (key, owner) = match self.nodes.get(id) {
                Some(node) => (node.key.clone(), node.owner),
                None => continue,
            };
            if let Some(owner) = owner {
                result.insert(owner);
            }
            self.push_user_nodes(&key, &mut stack);
        }
    }

    fn push_user_nodes(&self, key: &DependencyKey, stack: &mut Vec<NodeId>) {
        if let Some(users) = self.users_of.get(key) {
            for user in users {
                if let Some(owned) = self.by_owner.get(user) {
                    stack.extend(owned.values().copied());
                }
            }
        }
    }

    /// Every external path referenced by any integrated summary.
    pub fn external_dependencies(&self) -> impl Iterator<Item = &str> {
        self.external_dependencies.iter().map(String::as_str)
    }

    /// Invokes `f` with the owning input of each use of `external`'s
    /// interface whose use site is still untraced this wave.
    pub fn for_each_untraced_use_of_external(
        &self,
        external: &str,
        mut f: impl FnMut(InputHandle),
    ) {
        let key = DependencyKey::external(external);
        let Some(users) = self.users_of.get(&key) else {
            return;
        };
        for &user in users {
            let untraced = self
                .by_owner
                .get(&user)
                .map(|owned| owned.values().any(|id| !self.traced.contains(id)))
                .unwrap_or(false);
            if untraced {
                f(user);
            }
        }
    }

    /// The number of live nodes, owned and external.
    pub fn node_count(&self) -> usize {
        self.nodes.live_count()
    }

    /// Walks both finder indices and the bidirectional map, checking
    /// every invariant. A violation is a defect, never a user error.
    pub fn verify(&self) -> DriftResult<()> {
        for (input, owned) in &self.by_owner {
            for (key, id) in owned {
                let node = self.nodes.get(*id).ok_or_else(|| {
                    InternalError::new(format!("finder entry '{key}' points at a vacated node"))
                })?;
                if node.owner != Some(*input) {
                    return Err(InternalError::new(format!(
                        "finder owner mismatch for '{key}'"
                    )));
                }
                if node.key != *key {
                    return Err(InternalError::new(format!(
                        "finder key mismatch for '{key}'"
                    )));
                }
            }
        }

        for (id, node) in self.nodes.iter() {
            match node.owner {
                Some(owner) => {
                    let indexed = self
                        .by_owner
                        .get(&owner)
                        .and_then(|owned| owned.get(&node.key));
                    if indexed != Some(&id) {
                        return Err(InternalError::new(format!(
                            "owned node '{}' missing from finder",
                            node.key
                        )));
                    }
                }
                None => {
                    if self.external_nodes.get(&node.key) != Some(&id) {
                        return Err(InternalError::new(format!(
                            "external node '{}' missing from registry",
                            node.key
                        )));
                    }
                }
            }
        }

        for id in &self.traced {
            if self.nodes.get(*id).is_none() {
                return Err(InternalError::new("traced set refers to a vacated node"));
            }
        }

        if self.input_to_summary.len() != self.summary_to_input.len() {
            return Err(InternalError::new("input/summary map is not a bijection"));
        }
        for (input, summary) in &self.input_to_summary {
            if self.summary_to_input.get(summary) != Some(input) {
                return Err(InternalError::new(format!(
                    "summary '{}' maps back to a different input",
                    summary.display()
                )));
            }
        }

        Ok(())
    }
}
