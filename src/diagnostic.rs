//! Non-fatal diagnostic taxonomy
//!
//! Everything that can go wrong while ordering is recoverable: a duplicate
//! identifier is replaced with a synthetic one, an unresolvable `before`
//! reference degrades to sibling order, and a cyclic constraint is dropped.
//! The caller always receives a complete ordering, so none of these values
//! is ever returned as an `Err`. They exist so that tests and callers can
//! observe exactly which constraints were repaired, without scraping log
//! output.
//!
//! Every diagnostic is also emitted as a `tracing` warning at the point it
//! is detected.

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recoverable condition observed while resolving identifiers, deriving
/// edges, or sorting.
///
/// Diagnostics never abort an operation and never alter the returned
/// ordering beyond the repair they describe.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A record declared an identifier that an earlier record already
    /// claimed. The later record was given a synthetic identifier instead.
    #[error("duplicate identifier '{id}', assigning a synthetic one")]
    DuplicateId {
        /// The identifier that was declared more than once.
        id: NodeId,
    },

    /// A record's `before` reference does not name any known identifier.
    /// The record fell back to implicit sibling ordering.
    #[error("record '{from}' references unknown identifier '{reference}'")]
    InvalidReference {
        /// The resolved identifier of the record carrying the reference.
        from: NodeId,
        /// The reference text that failed to resolve.
        reference: String,
    },

    /// A cyclic constraint was detected during traversal and one edge of
    /// the cycle was dropped to keep the ordering total.
    #[error("order conflict: constraint '{from}' before '{to}' was dropped to break a cycle")]
    OrderConflict {
        /// The source of the dropped edge (the node that was supposed to
        /// come first).
        from: NodeId,
        /// The target of the dropped edge.
        to: NodeId,
    },
}

impl Diagnostic {
    /// Creates a duplicate identifier diagnostic.
    pub fn duplicate_id(id: impl Into<NodeId>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Creates an invalid reference diagnostic.
    pub fn invalid_reference(from: impl Into<NodeId>, reference: impl Into<String>) -> Self {
        Self::InvalidReference {
            from: from.into(),
            reference: reference.into(),
        }
    }

    /// Creates an order conflict diagnostic for the dropped edge
    /// `from` → `to`.
    pub fn order_conflict(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self::OrderConflict {
            from: from.into(),
            to: to.into(),
        }
    }
}
