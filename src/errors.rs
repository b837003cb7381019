//! Error types for score and spanner operations
//!
//! Every variant here is a broken caller precondition. Operations that fail
//! with one of these leave the score exactly as it was before the call.
//! Routine "did nothing" outcomes (a fuse between unmatched spanners, a
//! capture stopping at the end of the score) are not errors.

use thiserror::Error;

use crate::models::{ComponentId, Duration, SpannerId};

/// Top-level error type for score edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Tree shape or ownership violation
    #[error("structure error: {0}")]
    Structure(#[from] StructureError),

    /// Spanner leaves no longer form a depth-first contiguous run
    #[error("contiguity error: {0}")]
    Contiguity(#[from] ContiguityError),

    /// Mutating a spanner that has been fractured, fused or severed
    #[error("spanner {spanner} is blocked and can not be {operation}")]
    SpannerState {
        spanner: SpannerId,
        operation: &'static str,
    },

    /// Spanner position outside the spanner's leaf list
    #[error("index {index} out of range for spanner {spanner} with {len} leaves")]
    SpannerIndex {
        spanner: SpannerId,
        index: usize,
        len: usize,
    },

    /// Split offset not strictly inside the leaf's duration
    #[error("can not split {leaf} of duration {duration} at {offset}")]
    SplitOffset {
        leaf: ComponentId,
        duration: Duration,
        offset: Duration,
    },
}

/// Violations of the single-owner tree invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("unknown component {0}")]
    UnknownComponent(ComponentId),

    #[error("unknown spanner {0}")]
    UnknownSpanner(SpannerId),

    /// Component must be detached before it is inserted elsewhere
    #[error("{component} already belongs to {parent}; detach it first")]
    AlreadyParented {
        component: ComponentId,
        parent: ComponentId,
    },

    #[error("{0} is not a container")]
    NotAContainer(ComponentId),

    #[error("{0} is not a leaf")]
    NotALeaf(ComponentId),

    #[error("{component} is not a child of {container}")]
    NotAChild {
        container: ComponentId,
        component: ComponentId,
    },

    #[error("{0} has no parent")]
    Unattached(ComponentId),

    #[error("inserting {component} into {container} would create a cycle")]
    Cycle {
        container: ComponentId,
        component: ComponentId,
    },

    #[error("index {index} out of bounds for {container} with {len} children")]
    ChildIndex {
        container: ComponentId,
        index: usize,
        len: usize,
    },

    #[error("{0} appears more than once in the same edit")]
    Duplicate(ComponentId),

    #[error("components are not consecutive siblings")]
    NotSiblings,
}

/// Spanner leaf lists that break depth-first contiguity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContiguityError {
    /// `next` does not immediately follow `previous` in depth-first order
    #[error("spanner {spanner}: {next} does not follow {previous} (position {position})")]
    Gap {
        spanner: SpannerId,
        position: usize,
        previous: ComponentId,
        next: ComponentId,
    },

    #[error("spanner {spanner} already references {leaf}")]
    DuplicateLeaf {
        spanner: SpannerId,
        leaf: ComponentId,
    },
}

pub type ScoreResult<T> = Result<T, ScoreError>;
