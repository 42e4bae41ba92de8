//! Record sequencing - from loose hints to a total order
//!
//! This module turns a list of records carrying optional `id` and
//! `before` hints into the same records in a fully determined order. It
//! runs in three passes over the input:
//!
//! 1. **Resolve identifiers**: every record gets exactly one identifier.
//!    A declared id is kept the first time it appears; duplicates and
//!    missing ids receive a synthetic one drawn from a reserved prefix.
//! 2. **Derive constraints**: a valid `before` hint makes the referenced
//!    record this record's predecessor. A record with no usable hint is
//!    chained after the record that preceded it in the input, so
//!    unconstrained stretches keep their relative order.
//! 3. **Sort and project**: the constraints are linearized by
//!    [`Graph::sort_report`] and the identifiers mapped back to the
//!    records they came from.
//!
//! # Design Decision
//!
//! Nothing here can fail. Bad input degrades the ordering instead of
//! aborting: duplicate ids fall back to synthesis, unknown `before`
//! targets fall back to the sibling chain, and cyclic hints are broken by
//! the sort. Every degradation is reported as a [`Diagnostic`], both
//! through `tracing` and in the returned report, so callers can assert on
//! them without capturing log output.
//!
//! The synthetic-id counter lives inside one call. Sequencing the same
//! input twice produces the same identifiers and the same order; no state
//! leaks between invocations.

use super::Sortable;
use crate::diagnostic::Diagnostic;
use crate::graph::{Graph, NodeId, SortReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Prefix for synthesized identifiers. The leading `#` keeps them out of
/// the way of ordinary user-chosen ids; the resolver still probes for
/// collisions rather than assuming.
const SYNTHETIC_ID_PREFIX: &str = "#auto-";

/// Resolves each record to a unique identifier for the duration of one
/// sequencing call.
///
/// First declaration wins: a record declaring an id nobody has claimed
/// keeps it, and later claimants are diverted to synthetic ids. The
/// resolver also remembers which input index owns each identifier, which
/// is what lets the sorted identifiers be projected back onto records.
struct IdResolver {
    by_id: HashMap<NodeId, usize>,
    counter: usize,
}

impl IdResolver {
    fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            counter: 0,
        }
    }

    /// Resolves the identifier for the record at `index`, returning the
    /// id plus a diagnostic when a declared id had to be replaced.
    fn resolve(&mut self, index: usize, declared: Option<&str>) -> (NodeId, Option<Diagnostic>) {
        match declared.filter(|id| !id.is_empty()) {
            Some(declared) => {
                let declared = NodeId::new(declared);
                if self.by_id.contains_key(&declared) {
                    let synthetic = self.synthesize();
                    self.by_id.insert(synthetic.clone(), index);
                    (synthetic, Some(Diagnostic::duplicate_id(declared)))
                } else {
                    self.by_id.insert(declared.clone(), index);
                    (declared, None)
                }
            }
            None => {
                let synthetic = self.synthesize();
                self.by_id.insert(synthetic.clone(), index);
                (synthetic, None)
            }
        }
    }

    /// Produces a fresh identifier, probing past any that are already
    /// taken (a record may have declared one inside the reserved prefix).
    fn synthesize(&mut self) -> NodeId {
        loop {
            let candidate = NodeId::new(format!("{}{}", SYNTHETIC_ID_PREFIX, self.counter));
            self.counter += 1;
            if !self.by_id.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn contains(&self, id: &NodeId) -> bool {
        self.by_id.contains_key(id)
    }

    fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

/// Orders `records` according to their `id`/`before` hints.
///
/// The output is a permutation of the input: every record appears exactly
/// once, untouched. Records are never cloned or mutated, and the
/// operation cannot fail; conflicting, duplicate, or dangling hints cost
/// ordering quality, not completion. Use
/// [`sequence_report`] to observe what was dropped or repaired.
///
/// # Example
///
/// ```
/// use taxis::{sequence, Sortable};
///
/// struct Entry {
///     id: Option<&'static str>,
///     before: Option<&'static str>,
///     label: &'static str,
/// }
///
/// impl Sortable for Entry {
///     fn id(&self) -> Option<&str> {
///         self.id
///     }
///
///     fn before(&self) -> Option<&str> {
///         self.before
///     }
/// }
///
/// // "save" names "open" as its predecessor, overriding input order.
/// let entries = vec![
///     Entry { id: Some("save"), before: Some("open"), label: "Save" },
///     Entry { id: Some("open"), before: None, label: "Open" },
/// ];
///
/// let ordered = sequence(entries);
/// let labels: Vec<_> = ordered.iter().map(|e| e.label).collect();
/// assert_eq!(labels, ["Open", "Save"]);
/// ```
pub fn sequence<T: Sortable>(records: Vec<T>) -> Vec<T> {
    sequence_report(records).records
}

/// Like [`sequence`], but also returns the diagnostics accumulated along
/// the way: duplicate ids, dangling `before` references, and ordering
/// conflicts dropped by the sort, in the order they were encountered.
pub fn sequence_report<T: Sortable>(records: Vec<T>) -> SequenceReport<T> {
    let mut resolver = IdResolver::new();
    let mut diagnostics = Vec::new();

    // Pass 1: one identifier per record, first declaration wins.
    let mut resolved = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let (id, diagnostic) = resolver.resolve(index, record.id());
        if let Some(diagnostic) = diagnostic {
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }
        resolved.push(id);
    }

    // Pass 2: derive constraints. Every resolved id is seeded up front so
    // a record with no edges at all still appears in the output.
    let mut graph = Graph::new();
    for id in &resolved {
        graph.add_node(id.clone());
    }
    for (index, record) in records.iter().enumerate() {
        let this = resolved[index].clone();

        if let Some(target) = record.before().filter(|target| !target.is_empty()) {
            let target = NodeId::new(target);
            if resolver.contains(&target) {
                graph.add_edge(target, this);
                continue;
            }
            let diagnostic = Diagnostic::invalid_reference(this.clone(), target.as_str());
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }

        // No usable hint: chain after the previous record so relative
        // input order survives.
        if index > 0 {
            graph.add_edge(resolved[index - 1].clone(), this);
        }
    }

    // Pass 3: sort, then project identifiers back onto their records.
    let SortReport { order, diagnostics: conflicts } = graph.sort_report();
    diagnostics.extend(conflicts);

    let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
    let ordered = order
        .iter()
        .filter_map(|id| resolver.index_of(id).and_then(|index| slots[index].take()))
        .collect();

    SequenceReport {
        records: ordered,
        diagnostics,
    }
}

/// The outcome of sequencing: the reordered records plus everything that
/// had to be repaired or dropped to get there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceReport<T> {
    /// The input records, each exactly once, in resolved order.
    pub records: Vec<T>,
    /// Duplicate-id, invalid-reference, and order-conflict reports, in
    /// encounter order. Empty when every hint was honored as given.
    pub diagnostics: Vec<Diagnostic>,
}
