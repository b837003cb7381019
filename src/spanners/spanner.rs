//! The spanner record
//!
//! A spanner is a directive ([`SpannerKind`]) plus the ordered run of leaves
//! it covers. The record itself only answers positional questions; every
//! edit goes through [`crate::score::Score`] so that the leaf-side receptor
//! lists stay symmetric with the forward list kept here.

use serde::{Deserialize, Serialize};

use super::kinds::SpannerKind;
use crate::models::{ComponentId, SpannerId};

/// Lifecycle of a spanner instance
///
/// Active spanners format and appear in receptor lists. Blocked spanners
/// were fractured, fused or severed; they keep their leaf list so a receipt
/// can rebuild them, and they never become active again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpannerState {
    Active,
    Blocked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanner {
    pub(crate) id: SpannerId,
    pub(crate) kind: SpannerKind,
    pub(crate) leaves: Vec<ComponentId>,
    pub(crate) state: SpannerState,
}

impl Spanner {
    pub(crate) fn new(id: SpannerId, kind: SpannerKind, leaves: Vec<ComponentId>) -> Self {
        Self {
            id,
            kind,
            leaves,
            state: SpannerState::Active,
        }
    }

    pub fn id(&self) -> SpannerId {
        self.id
    }

    pub fn kind(&self) -> &SpannerKind {
        &self.kind
    }

    /// Referenced leaves, in spanner order
    pub fn leaves(&self) -> &[ComponentId] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn state(&self) -> SpannerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SpannerState::Active
    }

    pub fn is_blocked(&self) -> bool {
        self.state == SpannerState::Blocked
    }

    /// Position of `leaf` in this spanner
    pub fn index(&self, leaf: ComponentId) -> Option<usize> {
        self.leaves.iter().position(|&l| l == leaf)
    }

    pub fn contains(&self, leaf: ComponentId) -> bool {
        self.leaves.contains(&leaf)
    }

    pub fn first_leaf(&self) -> Option<ComponentId> {
        self.leaves.first().copied()
    }

    pub fn last_leaf(&self) -> Option<ComponentId> {
        self.leaves.last().copied()
    }

    pub fn is_first(&self, leaf: ComponentId) -> bool {
        self.first_leaf() == Some(leaf)
    }

    pub fn is_last(&self, leaf: ComponentId) -> bool {
        self.last_leaf() == Some(leaf)
    }

    pub fn is_only(&self, leaf: ComponentId) -> bool {
        self.leaves.len() == 1 && self.is_first(leaf)
    }

    /// Two spanners match when they carry equal directives
    pub fn matches(&self, other: &Spanner) -> bool {
        self.kind == other.kind
    }
}
