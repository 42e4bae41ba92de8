//! Item Sequencer
//!
//! The high-level half of the crate: take domain records that carry
//! optional `id` and `before` hints, derive ordering constraints from
//! them, and hand back the same records in a fully determined order. It
//! enables:
//!
//! - Linearizing records that only partially describe where they belong
//! - Synthesizing identifiers for records that declare none (or collide)
//! - Falling back to input order wherever hints are missing or broken
//!
//! Callers implement [`Sortable`] for their record type and call
//! [`sequence`] (or [`sequence_report`] to also observe the repairs that
//! were made).

mod sequencer;
mod sortable;

pub use sequencer::{sequence, sequence_report, SequenceReport};
pub use sortable::Sortable;
