//! Node identifier type
//!
//! This module defines the NodeId type which names a node in an ordering
//! graph. Identifiers are opaque tokens: the graph assumes no ordering
//! relation among them, only that equal identifiers name the same node.
//!
//! # Design Decision
//!
//! NodeId wraps a plain string rather than an integer handle because the
//! callers this crate serves (configuration entries, plugin registrations,
//! menu items) already name their items with strings, and keeping the
//! caller's token visible makes diagnostics readable: a dropped constraint
//! names `'validate'` and `'parse'`, not two bare integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a node in an ordering graph.
///
/// A NodeId carries no meaning beyond identity. Two ids are the same node
/// exactly when their text is equal; the text itself is never interpreted.
///
/// # Examples
///
/// ```
/// use taxis::NodeId;
///
/// let node = NodeId::new("mempool");
/// assert_eq!(node.as_str(), "mempool");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a new NodeId from an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
