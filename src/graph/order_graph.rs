//! Graph - ordering constraints and the tolerant sort
//!
//! This module provides the adjacency structure for "must come before"
//! edges and the depth-first linearization that turns them into a total
//! order.
//!
//! # Design
//!
//! The graph maps each node to the list of nodes that must precede it
//! (incoming edges only). The map is paired with an insertion-order vector
//! so that iteration is deterministic: hash-map iteration order is never
//! observed. Predecessor lists keep edge-insertion order and keep
//! duplicates; a duplicate edge is harmless extra work for the sort, not
//! an error.
//!
//! # Cycle tolerance
//!
//! The sort never fails. A node is marked visited the instant its visit
//! begins, before any predecessor is descended into. When a cycle routes
//! traversal back to a node whose visit has not finished, the revisit
//! returns immediately: that one constraint is dropped, a diagnostic is
//! reported, and every node still appears exactly once in the output. The
//! result is only approximately sorted when cycles exist, since a true
//! sort is not possible in their presence.

use super::NodeId;
use crate::diagnostic::Diagnostic;
use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// A directed graph of "must come before" constraints over named nodes.
///
/// Edges point from a node to the node it must precede. Nodes come into
/// existence implicitly as edge endpoints (or explicitly via
/// [`add_node`](Graph::add_node)); there is no separate registration step
/// and no operation can fail.
///
/// # Example
///
/// ```
/// use taxis::Graph;
///
/// let mut graph = Graph::new();
/// graph.add_edge("parse", "analyze");
/// graph.add_edge("analyze", "emit");
///
/// let order = graph.sort();
/// let names: Vec<_> = order.iter().map(|n| n.as_str()).collect();
/// assert_eq!(names, ["parse", "analyze", "emit"]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Map from node to its predecessors, in edge-insertion order.
    nodes: HashMap<NodeId, Vec<NodeId>>,
    /// Order in which nodes were first introduced, for deterministic
    /// iteration.
    insertion_order: Vec<NodeId>,
}

impl Graph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            insertion_order: Vec::new(),
        }
    }

    /// Builds a graph from a sequence of `(from, to)` constraint pairs.
    ///
    /// Each pair means "`from` must appear before `to`".
    ///
    /// # Example
    ///
    /// ```
    /// use taxis::Graph;
    ///
    /// let graph = Graph::from_edges([("a", "b"), ("b", "c")]);
    /// assert_eq!(graph.len(), 3);
    /// ```
    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<NodeId>,
        B: Into<NodeId>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ensures `node` exists, with an empty predecessor list if it is new.
    ///
    /// Adding a node that already exists is a no-op; an isolated node
    /// simply takes its place in the output wherever the seed iteration
    /// reaches it.
    pub fn add_node(&mut self, node: impl Into<NodeId>) {
        let node = node.into();
        if !self.nodes.contains_key(&node) {
            self.insertion_order.push(node.clone());
            self.nodes.insert(node, Vec::new());
        }
    }

    /// Adds the constraint "`from` must appear before `to`".
    ///
    /// Both endpoints are created if they do not exist yet. Duplicate
    /// edges are stored redundantly rather than deduplicated, and
    /// self-edges are accepted; neither disturbs the sort. Nothing is
    /// validated and nothing can fail.
    pub fn add_edge(&mut self, from: impl Into<NodeId>, to: impl Into<NodeId>) {
        let from = from.into();
        let to = to.into();
        self.add_node(from.clone());
        if let Some(predecessors) = self.nodes.get_mut(&to) {
            predecessors.push(from);
        } else {
            self.insertion_order.push(to.clone());
            self.nodes.insert(to, vec![from]);
        }
    }

    /// Returns true if the node exists in the graph.
    pub fn contains(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Returns the predecessors recorded for a node, in edge-insertion
    /// order (duplicates included).
    pub fn predecessors(&self, node: &NodeId) -> Option<&[NodeId]> {
        self.nodes.get(node).map(Vec::as_slice)
    }

    /// Returns an iterator over all nodes in first-introduction order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.insertion_order.iter()
    }

    /// Linearizes the graph, honoring every constraint that is not part
    /// of a cycle.
    ///
    /// The traversal is a deterministic depth-first post-order: nodes are
    /// seeded in first-introduction order, and each node's predecessors
    /// are visited in edge-insertion order before the node itself is
    /// appended. The output contains every node exactly once.
    ///
    /// Cycles are tolerated: for each cycle, the one constraint whose
    /// target is reached while its source is still mid-visit is dropped,
    /// and a warning is logged. Use [`sort_report`](Graph::sort_report)
    /// when the dropped constraints themselves are of interest.
    pub fn sort(&self) -> Vec<NodeId> {
        self.sort_report().order
    }

    /// Like [`sort`](Graph::sort), but also returns the conflicts that
    /// were dropped to break cycles.
    ///
    /// # Example
    ///
    /// ```
    /// use taxis::{Diagnostic, Graph};
    ///
    /// let graph = Graph::from_edges([("a", "b"), ("b", "a")]);
    /// let report = graph.sort_report();
    ///
    /// assert_eq!(report.order.len(), 2);
    /// assert!(matches!(
    ///     report.diagnostics[0],
    ///     Diagnostic::OrderConflict { .. }
    /// ));
    /// ```
    pub fn sort_report(&self) -> SortReport {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut diagnostics = Vec::new();
        let mut visited = HashSet::with_capacity(self.nodes.len());
        let mut in_progress = HashSet::new();

        for node in &self.insertion_order {
            if !visited.contains(node) {
                self.visit(node, &mut visited, &mut in_progress, &mut order, &mut diagnostics);
            }
        }

        debug!(
            "sorted {} nodes, dropped {} constraints",
            order.len(),
            diagnostics.len()
        );

        SortReport { order, diagnostics }
    }

    /// Depth-first post-order visit.
    ///
    /// `visited` is updated before descending into predecessors; that
    /// single rule is what makes cycles and self-edges terminate. A
    /// predecessor found in `in_progress` has not finished its own visit
    /// and will necessarily land after `node` in the output, so the edge
    /// to it is the one constraint of the cycle that gets dropped. A
    /// predecessor that is visited but no longer in progress is a shared
    /// ancestor, not a conflict.
    fn visit(
        &self,
        node: &NodeId,
        visited: &mut HashSet<NodeId>,
        in_progress: &mut HashSet<NodeId>,
        order: &mut Vec<NodeId>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        visited.insert(node.clone());
        in_progress.insert(node.clone());

        if let Some(predecessors) = self.nodes.get(node) {
            for pred in predecessors {
                if !visited.contains(pred) {
                    self.visit(pred, visited, in_progress, order, diagnostics);
                } else if in_progress.contains(pred) {
                    warn!(
                        "order conflict: dropping constraint '{}' before '{}' to break a cycle",
                        pred, node
                    );
                    diagnostics.push(Diagnostic::order_conflict(pred.clone(), node.clone()));
                }
            }
        }

        in_progress.remove(node);
        order.push(node.clone());
    }

    /// Generates a DOT representation of the graph for Graphviz.
    ///
    /// Arrows follow constraint direction: `a -> b` means `a` must appear
    /// before `b`. Render with `dot -Tpng graph.dot -o graph.png`.
    pub fn to_dot(&self) -> String {
        let mut dot_graph = DiGraph::<String, ()>::new();
        let mut node_indices = HashMap::new();

        for node in &self.insertion_order {
            let idx = dot_graph.add_node(node.to_string());
            node_indices.insert(node.clone(), idx);
        }

        for node in &self.insertion_order {
            let target = node_indices[node];
            if let Some(predecessors) = self.nodes.get(node) {
                for pred in predecessors {
                    if let Some(&source) = node_indices.get(pred) {
                        dot_graph.add_edge(source, target, ());
                    }
                }
            }
        }

        format!("{:?}", Dot::with_config(&dot_graph, &[Config::EdgeNoLabel]))
    }

    /// Saves the DOT representation to a file.
    pub fn save_dot(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_dot())
    }
}

/// The outcome of a tolerant sort: the total order plus the constraints
/// dropped to achieve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortReport {
    /// Every node introduced to the graph, each exactly once.
    pub order: Vec<NodeId>,
    /// One [`Diagnostic::OrderConflict`] per dropped constraint, in the
    /// order the conflicts were encountered. Empty when the graph is
    /// acyclic.
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a graph from `(from, to)` constraint pairs and sorts it in one
/// call.
///
/// # Example
///
/// ```
/// use taxis::sort_edges;
///
/// let order = sort_edges([("d", "e"), ("c", "d"), ("a", "b"), ("c", "e"), ("b", "c")]);
/// let names: Vec<_> = order.iter().map(|n| n.as_str()).collect();
/// assert_eq!(names, ["a", "b", "c", "d", "e"]);
/// ```
pub fn sort_edges<I, A, B>(edges: I) -> Vec<NodeId>
where
    I: IntoIterator<Item = (A, B)>,
    A: Into<NodeId>,
    B: Into<NodeId>,
{
    Graph::from_edges(edges).sort()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(order: &[NodeId]) -> Vec<&str> {
        order.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.sort().is_empty());
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");

        assert_eq!(graph.len(), 2);
        assert!(graph.contains(&NodeId::new("a")));
        assert!(graph.contains(&NodeId::new("b")));
        assert_eq!(
            graph.predecessors(&NodeId::new("a")),
            Some(&[] as &[NodeId])
        );
        assert_eq!(
            graph.predecessors(&NodeId::new("b")),
            Some(&[NodeId::new("a")] as &[NodeId])
        );
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = Graph::new();
        graph.add_node("a");
        graph.add_node("a");
        graph.add_edge("a", "b");
        graph.add_node("b");

        assert_eq!(graph.len(), 2);
        assert_eq!(names(&graph.sort()), ["a", "b"]);
    }

    #[test]
    fn test_isolated_nodes_keep_introduction_order() {
        let mut graph = Graph::new();
        graph.add_node("x");
        graph.add_node("y");
        graph.add_node("z");

        assert_eq!(names(&graph.sort()), ["x", "y", "z"]);
    }

    #[test]
    fn test_duplicate_edges_are_kept() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "b");

        assert_eq!(
            graph.predecessors(&NodeId::new("b")),
            Some(&[NodeId::new("a"), NodeId::new("a")] as &[NodeId])
        );

        // Redundant predecessors are revisited but already marked, so the
        // output is unaffected and nothing is reported.
        let report = graph.sort_report();
        assert_eq!(names(&report.order), ["a", "b"]);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_sort_simple_chain() {
        let graph = Graph::from_edges([("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")]);
        assert_eq!(names(&graph.sort()), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_sort_shuffled_input() {
        let graph =
            Graph::from_edges([("d", "e"), ("c", "d"), ("a", "b"), ("c", "e"), ("b", "c")]);
        assert_eq!(names(&graph.sort()), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_sort_approximate_order_with_cycle() {
        // b and c constrain each other; exactly one of the two edges
        // survives.
        let graph =
            Graph::from_edges([("a", "b"), ("b", "c"), ("c", "d"), ("c", "b"), ("d", "e")]);
        let report = graph.sort_report();
        let order = names(&report.order);

        assert_eq!(order.len(), 5);
        assert_eq!(order[0], "a");
        assert_eq!(order[4], "e");
        for middle in ["b", "c", "d"] {
            let pos = order.iter().position(|n| *n == middle).unwrap();
            assert!(pos > 0 && pos < 4);
        }

        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::order_conflict("b", "c")]
        );
    }

    #[test]
    fn test_sort_under_constrained() {
        let graph = Graph::from_edges([("a", "b"), ("a", "c"), ("a", "d"), ("a", "e")]);
        let sorted = graph.sort();
        let order = names(&sorted);

        assert_eq!(order.len(), 5);
        assert_eq!(order[0], "a");
        for node in ["b", "c", "d", "e"] {
            assert_eq!(order.iter().filter(|n| **n == node).count(), 1);
        }
    }

    #[test]
    fn test_self_edge_terminates() {
        let mut graph = Graph::new();
        graph.add_edge("a", "a");
        graph.add_edge("a", "b");

        let report = graph.sort_report();
        assert_eq!(names(&report.order), ["a", "b"]);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::order_conflict("a", "a")]
        );
    }

    #[test]
    fn test_shared_ancestor_is_not_a_conflict() {
        // Diamond: a precedes b and c, both precede d. The second time d's
        // traversal reaches a finished predecessor chain, nothing is
        // reported.
        let graph = Graph::from_edges([("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        let report = graph.sort_report();

        assert_eq!(report.order.len(), 4);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_two_node_cycle_keeps_both_nodes() {
        let graph = Graph::from_edges([("a", "b"), ("b", "a")]);
        let report = graph.sort_report();

        assert_eq!(report.order.len(), 2);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let edges = [("d", "e"), ("c", "d"), ("a", "b"), ("c", "e"), ("b", "c")];
        let first = Graph::from_edges(edges).sort();
        let second = Graph::from_edges(edges).sort();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_does_not_consume_the_graph() {
        let graph = Graph::from_edges([("a", "b")]);
        let first = graph.sort();
        let second = graph.sort();
        assert_eq!(first, second);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_sort_edges_helper() {
        let order = sort_edges([("a", "b"), ("b", "c")]);
        assert_eq!(names(&order), ["a", "b", "c"]);
    }

    #[test]
    fn test_to_dot_contains_nodes_and_edges() {
        let graph = Graph::from_edges([("a", "b")]);
        let dot = graph.to_dot();

        assert!(dot.starts_with("digraph"));
        assert!(dot.contains('a'));
        assert!(dot.contains('b'));
        assert!(dot.contains("->"));
    }
}
