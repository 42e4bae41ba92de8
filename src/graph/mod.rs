//! Ordering Graph
//!
//! This module provides the constraint graph and the tolerant topological
//! sort that drives everything else in the crate. It enables:
//!
//! - Declaring "must come before" constraints between named nodes
//! - Linearizing the constraints into a deterministic total order
//! - Surviving cycles by dropping one constraint per cycle instead of
//!   failing
//!
//! # Design Principles
//!
//! The representation stays hidden: callers see only `add_node`,
//! `add_edge`, `sort`, and the read accessors. Internally the graph is an
//! adjacency map from each node to its predecessors, paired with an
//! insertion-order list so no result ever depends on hash-map iteration
//! order.

mod node_id;
mod order_graph;

pub use node_id::NodeId;
pub use order_graph::{sort_edges, Graph, SortReport};
