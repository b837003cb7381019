//! The score: one arena for components and spanners
//!
//! The tree and every spanner attached to it form a single consistency
//! domain. Public mutating operations run inside [`Score::transact`], write
//! through the journaled setters below, validate the spanners they touched,
//! and are rolled back as a whole if anything fails.
//!
//! Validation discipline: contiguity is checked once at the end of every
//! public mutating operation, never between its internal steps.

pub mod mutation;
pub mod traversal;
pub mod tree;

pub use traversal::DepthFirstLeaves;

use std::collections::HashSet;

use crate::errors::{ContiguityError, ScoreError, ScoreResult, StructureError};
use crate::models::{Component, ComponentId, Container, Leaf, SpannerId};
use crate::spanners::{Spanner, SpannerKind, SpannerState};
use crate::undo::{Journal, JournalEntry};

#[derive(Debug, Clone, Default)]
pub struct Score {
    pub(crate) components: Vec<Component>,
    pub(crate) spanners: Vec<Spanner>,
    journal: Option<Journal>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn component(&self, id: ComponentId) -> ScoreResult<&Component> {
        self.components
            .get(id.0)
            .ok_or_else(|| StructureError::UnknownComponent(id).into())
    }

    pub fn leaf(&self, id: ComponentId) -> ScoreResult<&Leaf> {
        self.component(id)?
            .as_leaf()
            .ok_or_else(|| StructureError::NotALeaf(id).into())
    }

    /// Mutable access to a leaf's content (kind, duration, marks)
    ///
    /// Receptor lists are not reachable through this handle.
    pub fn leaf_mut(&mut self, id: ComponentId) -> ScoreResult<&mut Leaf> {
        self.components
            .get_mut(id.0)
            .ok_or(StructureError::UnknownComponent(id))?
            .as_leaf_mut()
            .ok_or_else(|| StructureError::NotALeaf(id).into())
    }

    pub fn container(&self, id: ComponentId) -> ScoreResult<&Container> {
        self.component(id)?
            .as_container()
            .ok_or_else(|| StructureError::NotAContainer(id).into())
    }

    pub fn spanner(&self, id: SpannerId) -> ScoreResult<&Spanner> {
        self.spanners
            .get(id.0)
            .ok_or_else(|| StructureError::UnknownSpanner(id).into())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn spanner_count(&self) -> usize {
        self.spanners.len()
    }

    /// Every spanner ever created in this score, blocked ones included
    pub fn spanners(&self) -> impl Iterator<Item = &Spanner> {
        self.spanners.iter()
    }

    pub fn active_spanners(&self) -> impl Iterator<Item = &Spanner> {
        self.spanners.iter().filter(|s| s.is_active())
    }

    pub fn is_leaf(&self, id: ComponentId) -> bool {
        self.components.get(id.0).is_some_and(|c| c.is_leaf())
    }

    /// Parent handle; `None` for roots, detached components and unknown ids
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.components.get(id.0).and_then(|c| c.parent)
    }

    /// Direct children; empty for leaves and unknown ids
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.components
            .get(id.0)
            .map(|c| c.children())
            .unwrap_or(&[])
    }

    /// Active spanners attached to a leaf, in attachment order
    pub fn spanners_of(&self, leaf: ComponentId) -> &[SpannerId] {
        self.components
            .get(leaf.0)
            .and_then(|c| c.as_leaf())
            .map(|l| l.spanners())
            .unwrap_or(&[])
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Run `op` as one all-or-nothing edit
    ///
    /// Nested calls join the outermost transaction.
    pub(crate) fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> ScoreResult<T>,
    ) -> ScoreResult<T> {
        if self.journal.is_some() {
            return op(self);
        }
        self.journal = Some(Journal::begin(self.components.len(), self.spanners.len()));
        let result = op(self);
        if let Some(journal) = self.journal.take() {
            if let Err(error) = &result {
                log::warn!("score edit failed, rolling back: {}", error);
                journal.rollback(self);
            }
        }
        result
    }

    fn record(&mut self, entry: JournalEntry) {
        if let Some(journal) = self.journal.as_mut() {
            journal.record(entry);
        }
    }

    // ========================================================================
    // Journaled writers
    // ========================================================================

    pub(crate) fn push_component(&mut self, component: Component) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components.push(component);
        id
    }

    pub(crate) fn push_spanner(&mut self, kind: SpannerKind) -> SpannerId {
        let id = SpannerId(self.spanners.len());
        self.spanners.push(Spanner::new(id, kind, Vec::new()));
        id
    }

    pub(crate) fn write_parent(&mut self, component: ComponentId, parent: Option<ComponentId>) {
        let previous = self.parent(component);
        self.record(JournalEntry::Parent {
            component,
            parent: previous,
        });
        if let Some(node) = self.components.get_mut(component.0) {
            node.parent = parent;
        }
    }

    pub(crate) fn write_children(&mut self, container: ComponentId, children: Vec<ComponentId>) {
        let previous = self.children(container).to_vec();
        self.record(JournalEntry::Children {
            container,
            children: previous,
        });
        if let Some(node) = self
            .components
            .get_mut(container.0)
            .and_then(|c| c.as_container_mut())
        {
            node.children = children;
        }
    }

    fn write_receptors(&mut self, leaf: ComponentId, spanners: Vec<SpannerId>) {
        let previous = self.spanners_of(leaf).to_vec();
        self.record(JournalEntry::Receptors {
            leaf,
            spanners: previous,
        });
        if let Some(node) = self.components.get_mut(leaf.0).and_then(|c| c.as_leaf_mut()) {
            node.spanners = spanners;
        }
    }

    pub(crate) fn write_spanner_leaves(&mut self, spanner: SpannerId, leaves: Vec<ComponentId>) {
        if let Some(record) = self.spanners.get(spanner.0) {
            let previous = record.leaves.clone();
            self.record(JournalEntry::SpannerLeaves {
                spanner,
                leaves: previous,
            });
        }
        if let Some(record) = self.spanners.get_mut(spanner.0) {
            record.leaves = leaves;
        }
    }

    pub(crate) fn write_spanner_state(&mut self, spanner: SpannerId, state: SpannerState) {
        if let Some(record) = self.spanners.get(spanner.0) {
            let previous = record.state;
            self.record(JournalEntry::SpannerState {
                spanner,
                state: previous,
            });
        }
        if let Some(record) = self.spanners.get_mut(spanner.0) {
            record.state = state;
        }
    }

    // ========================================================================
    // Receptor bookkeeping
    // ========================================================================

    pub(crate) fn add_receptor(&mut self, leaf: ComponentId, spanner: SpannerId) {
        let mut receptors = self.spanners_of(leaf).to_vec();
        if !receptors.contains(&spanner) {
            receptors.push(spanner);
            self.write_receptors(leaf, receptors);
        }
    }

    pub(crate) fn remove_receptor(&mut self, leaf: ComponentId, spanner: SpannerId) {
        let receptors = self.spanners_of(leaf);
        if receptors.contains(&spanner) {
            let kept = receptors.iter().copied().filter(|&s| s != spanner).collect();
            self.write_receptors(leaf, kept);
        }
    }

    /// Put `new` where `old` sat in the leaf's attachment order
    pub(crate) fn replace_receptor(&mut self, leaf: ComponentId, old: SpannerId, new: SpannerId) {
        let mut receptors = self.spanners_of(leaf).to_vec();
        receptors.retain(|&s| s != new);
        match receptors.iter().position(|&s| s == old) {
            Some(position) => receptors[position] = new,
            None => receptors.push(new),
        }
        self.write_receptors(leaf, receptors);
    }

    /// Replace a spanner's leaf list, keeping receptors symmetric, then validate
    pub(crate) fn commit_spanner_leaves(
        &mut self,
        spanner: SpannerId,
        leaves: Vec<ComponentId>,
    ) -> ScoreResult<()> {
        let mut seen = HashSet::with_capacity(leaves.len());
        for &leaf in &leaves {
            if !self.is_leaf(leaf) {
                return Err(StructureError::NotALeaf(leaf).into());
            }
            if !seen.insert(leaf) {
                return Err(ContiguityError::DuplicateLeaf { spanner, leaf }.into());
            }
        }

        let old = self.spanner(spanner)?.leaves.clone();
        for &leaf in &old {
            if !seen.contains(&leaf) {
                self.remove_receptor(leaf, spanner);
            }
        }
        let old: HashSet<ComponentId> = old.into_iter().collect();
        for &leaf in &leaves {
            if !old.contains(&leaf) {
                self.add_receptor(leaf, spanner);
            }
        }
        self.write_spanner_leaves(spanner, leaves);
        self.validate_spanner(spanner)
    }

    /// Clear every forward and back reference and block the spanner
    pub(crate) fn kill_spanner(&mut self, spanner: SpannerId) -> ScoreResult<()> {
        let leaves = self.spanner(spanner)?.leaves.clone();
        for leaf in leaves {
            self.remove_receptor(leaf, spanner);
        }
        self.write_spanner_leaves(spanner, Vec::new());
        self.write_spanner_state(spanner, SpannerState::Blocked);
        Ok(())
    }

    /// Remove the spanner from its leaves' receptor lists but keep its leaf list
    pub(crate) fn block_spanner(&mut self, spanner: SpannerId) -> ScoreResult<()> {
        let leaves = self.spanner(spanner)?.leaves.clone();
        for leaf in leaves {
            self.remove_receptor(leaf, spanner);
        }
        self.write_spanner_state(spanner, SpannerState::Blocked);
        Ok(())
    }

    pub(crate) fn require_active(
        &self,
        spanner: SpannerId,
        operation: &'static str,
    ) -> ScoreResult<&Spanner> {
        let record = self.spanner(spanner)?;
        if record.is_blocked() {
            return Err(ScoreError::SpannerState { spanner, operation });
        }
        Ok(record)
    }

    // ========================================================================
    // Contiguity
    // ========================================================================

    /// Check that consecutive leaves of an active spanner are depth-first neighbours
    pub fn validate_spanner(&self, spanner: SpannerId) -> ScoreResult<()> {
        let record = self.spanner(spanner)?;
        if record.is_blocked() {
            return Ok(());
        }
        for (position, pair) in record.leaves.windows(2).enumerate() {
            if self.next_leaf(pair[0]) != Some(pair[1]) {
                return Err(ContiguityError::Gap {
                    spanner,
                    position: position + 1,
                    previous: pair[0],
                    next: pair[1],
                }
                .into());
            }
        }
        Ok(())
    }

    /// Is `leaves` one unbroken run of depth-first neighbours?
    pub fn is_contiguous(&self, leaves: &[ComponentId]) -> bool {
        leaves
            .windows(2)
            .all(|pair| self.next_leaf(pair[0]) == Some(pair[1]))
    }

    /// Active spanners touching any of `leaves`, in first-seen attachment order
    pub(crate) fn spanners_touching(&self, leaves: &[ComponentId]) -> Vec<SpannerId> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for &leaf in leaves {
            for &spanner in self.spanners_of(leaf) {
                if seen.insert(spanner) {
                    result.push(spanner);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Duration, LeafKind, Pitch};
    use crate::spanners::kinds::Slur;

    fn staff_of(score: &mut Score, count: usize) -> (ComponentId, Vec<ComponentId>) {
        let staff = score.new_sequential();
        let notes: Vec<_> = (0..count)
            .map(|i| {
                let note = score.new_leaf(
                    LeafKind::Note(Pitch::from_semitones(60 + i as i32)),
                    Duration::new(1, 8),
                );
                score.append(staff, note).unwrap();
                note
            })
            .collect();
        (staff, notes)
    }

    #[test]
    fn test_failed_transaction_leaves_score_untouched() {
        let mut score = Score::new();
        let (_, notes) = staff_of(&mut score, 4);
        let before = score.spanner_count();

        // notes[0] and notes[2] are not neighbours
        let result = score.attach(Slur::default(), &[notes[0], notes[2]]);
        assert!(matches!(result, Err(ScoreError::Contiguity(_))));
        assert_eq!(score.spanner_count(), before);
        assert!(score.spanners_of(notes[0]).is_empty());
        assert!(score.spanners_of(notes[2]).is_empty());
    }

    #[test]
    fn test_replace_receptor_keeps_attachment_position() {
        let mut score = Score::new();
        let (_, notes) = staff_of(&mut score, 2);
        let a = score.attach(Slur::default(), &notes).unwrap();
        let b = score.attach(crate::spanners::kinds::Beam::default(), &notes).unwrap();
        let c = score.push_spanner(Slur::default().into());
        score.replace_receptor(notes[0], a, c);
        assert_eq!(score.spanners_of(notes[0]), &[c, b]);
    }

    #[test]
    fn test_validate_reports_gap_position() {
        let mut score = Score::new();
        let (_, notes) = staff_of(&mut score, 3);
        let slur = score.push_spanner(Slur::default().into());
        score.write_spanner_leaves(slur, vec![notes[0], notes[2]]);
        match score.validate_spanner(slur) {
            Err(ScoreError::Contiguity(ContiguityError::Gap { position, .. })) => {
                assert_eq!(position, 1)
            }
            other => panic!("expected gap, got {:?}", other),
        }
    }
}
