//! Edit journal for all-or-nothing score operations
//!
//! While a transaction is open, every low-level write to the score records
//! the value it overwrote. If the operation fails, the journal replays those
//! records in reverse and truncates the arenas back to their starting size,
//! so no partial edit survives a broken invariant.

use crate::models::{ComponentId, SpannerId};
use crate::score::Score;
use crate::spanners::SpannerState;

/// The prior value of one overwritten field
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum JournalEntry {
    Parent {
        component: ComponentId,
        parent: Option<ComponentId>,
    },
    Children {
        container: ComponentId,
        children: Vec<ComponentId>,
    },
    Receptors {
        leaf: ComponentId,
        spanners: Vec<SpannerId>,
    },
    SpannerLeaves {
        spanner: SpannerId,
        leaves: Vec<ComponentId>,
    },
    SpannerState {
        spanner: SpannerId,
        state: SpannerState,
    },
}

impl JournalEntry {
    /// Write the recorded value back into the score
    fn restore(self, score: &mut Score) {
        match self {
            JournalEntry::Parent { component, parent } => {
                if let Some(node) = score.components.get_mut(component.0) {
                    node.parent = parent;
                }
            }
            JournalEntry::Children {
                container,
                children,
            } => {
                if let Some(node) = score
                    .components
                    .get_mut(container.0)
                    .and_then(|c| c.as_container_mut())
                {
                    node.children = children;
                }
            }
            JournalEntry::Receptors { leaf, spanners } => {
                if let Some(node) = score.components.get_mut(leaf.0).and_then(|c| c.as_leaf_mut()) {
                    node.spanners = spanners;
                }
            }
            JournalEntry::SpannerLeaves { spanner, leaves } => {
                if let Some(record) = score.spanners.get_mut(spanner.0) {
                    record.leaves = leaves;
                }
            }
            JournalEntry::SpannerState { spanner, state } => {
                if let Some(record) = score.spanners.get_mut(spanner.0) {
                    record.state = state;
                }
            }
        }
    }
}

/// Journal of one open transaction
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Journal {
    entries: Vec<JournalEntry>,
    /// Arena sizes when the transaction opened
    component_count: usize,
    spanner_count: usize,
}

impl Journal {
    pub(crate) fn begin(component_count: usize, spanner_count: usize) -> Self {
        Self {
            entries: Vec::new(),
            component_count,
            spanner_count,
        }
    }

    pub(crate) fn record(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Undo every recorded write, newest first
    pub(crate) fn rollback(self, score: &mut Score) {
        log::debug!("rolling back {} journal entries", self.entries.len());
        for entry in self.entries.into_iter().rev() {
            entry.restore(score);
        }
        score.components.truncate(self.component_count);
        score.spanners.truncate(self.spanner_count);
    }
}
