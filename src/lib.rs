//! Taxis: Tolerant Topological Ordering
//!
//! `taxis` (τάξις, Greek for "arrangement" or "ordering") linearizes
//! named items whose ordering is only partially constrained, and keeps
//! going when the constraints are wrong. Conflicting, cyclic, or
//! dangling hints never fail the sort: the caller always receives a
//! complete total order, and every constraint that had to be dropped or
//! repaired along the way is reported as a diagnostic.
//!
//! # Features
//!
//! - **Total**: the output is always a permutation of the input, no
//!   matter how broken the constraints are
//! - **Cycle tolerant**: each cycle costs exactly one dropped constraint,
//!   never an error and never an infinite loop
//! - **Deterministic**: identical input yields the identical order, with
//!   no dependence on hash-map iteration
//! - **Hint driven**: the sequencer orders whole records from optional
//!   `id`/`before` hints, synthesizing identifiers and falling back to
//!   input order where hints run out
//! - **Observable**: repairs surface both through `tracing` and as
//!   returned [`Diagnostic`] values that tests can assert on
//!
//! # Quick Start
//!
//! ```
//! use taxis::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("fetch", "build");
//! graph.add_edge("build", "test");
//! graph.add_edge("build", "package");
//!
//! let order = graph.sort();
//! let names: Vec<_> = order.iter().map(|n| n.as_str()).collect();
//! assert_eq!(names, ["fetch", "build", "test", "package"]);
//! ```
//!
//! # Module Organization
//!
//! Following Parnas's information hiding principles, each module hides a
//! design decision that is likely to change:
//!
//! - [`graph`]: constraint graph and the tolerant sort (hides the
//!   adjacency representation)
//! - [`sequence`]: record sequencing over `id`/`before` hints (hides
//!   identifier synthesis)
//! - [`diagnostic`]: the taxonomy of non-fatal repairs (hides how
//!   diagnostics are surfaced)

pub mod diagnostic;
pub mod graph;
pub mod sequence;

// Re-export commonly used types for convenience
pub use diagnostic::Diagnostic;
pub use graph::{sort_edges, Graph, NodeId, SortReport};
pub use sequence::{sequence, sequence_report, SequenceReport, Sortable};

// Re-export dependencies used in public API
// This ensures users don't have version mismatch errors (Effective Rust Item 24)
pub use serde; // Users derive Serialize on record types they put in a SequenceReport

/// Prelude module for convenient glob imports
///
/// # Example
///
/// ```
/// use taxis::prelude::*;
///
/// let order = sort_edges([("a", "b"), ("b", "c")]);
/// assert_eq!(order.len(), 3);
/// ```
pub mod prelude {
    pub use crate::diagnostic::Diagnostic;
    pub use crate::graph::{sort_edges, Graph, NodeId, SortReport};
    pub use crate::sequence::{sequence, sequence_report, SequenceReport, Sortable};
}
