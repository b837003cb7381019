//! Component construction and child-list editing
//!
//! Every public edit here keeps the spanners attached to the tree
//! consistent: leaves placed between two consecutive leaves of a spanner
//! join that spanner, and leaves removed from the tree are severed from
//! every spanner that referenced them.

use std::collections::HashSet;

use super::Score;
use crate::errors::{ScoreResult, StructureError};
use crate::models::{
    Component, ComponentId, Container, ContainerKind, Duration, Leaf, LeafKind, Pitch, SpannerId,
};

impl Score {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a detached leaf
    pub fn new_leaf(&mut self, kind: LeafKind, duration: Duration) -> ComponentId {
        self.push_component(Component::leaf(Leaf::new(kind, duration)))
    }

    pub fn new_note(&mut self, pitch: Pitch, duration: Duration) -> ComponentId {
        self.new_leaf(LeafKind::Note(pitch), duration)
    }

    pub fn new_rest(&mut self, duration: Duration) -> ComponentId {
        self.new_leaf(LeafKind::Rest, duration)
    }

    /// Create a detached, empty container
    pub fn new_container(&mut self, kind: ContainerKind) -> ComponentId {
        self.push_component(Component::container(Container::new(kind)))
    }

    pub fn new_sequential(&mut self) -> ComponentId {
        self.new_container(ContainerKind::Sequential)
    }

    /// Create a container and adopt `children` in order
    ///
    /// The children must all be detached.
    pub fn new_container_with(
        &mut self,
        kind: ContainerKind,
        children: &[ComponentId],
    ) -> ScoreResult<ComponentId> {
        self.transact(|score| {
            let container = score.new_container(kind);
            score.attach_children(container, 0, children)?;
            Ok(container)
        })
    }

    // ========================================================================
    // Child list editing
    // ========================================================================

    /// Insert a detached component at `index` in `container`
    pub fn insert(
        &mut self,
        container: ComponentId,
        index: usize,
        component: ComponentId,
    ) -> ScoreResult<()> {
        self.transact(|score| {
            let leaves = score.attach_children(container, index, &[component])?;
            score.absorb_inserted_leaves(&leaves)
        })
    }

    pub fn append(&mut self, container: ComponentId, component: ComponentId) -> ScoreResult<()> {
        let index = self.container(container)?.children().len();
        self.insert(container, index, component)
    }

    /// Append several detached components in order
    pub fn extend(&mut self, container: ComponentId, components: &[ComponentId]) -> ScoreResult<()> {
        self.transact(|score| {
            let index = score.container(container)?.children().len();
            let leaves = score.attach_children(container, index, components)?;
            score.absorb_inserted_leaves(&leaves)
        })
    }

    /// Detach `component` from `container`, severing its leaves from every spanner
    pub fn remove(&mut self, container: ComponentId, component: ComponentId) -> ScoreResult<()> {
        self.transact(|score| {
            score.container(container)?;
            if score.parent(component) != Some(container) {
                return Err(StructureError::NotAChild {
                    container,
                    component,
                }
                .into());
            }

            let removed = score.leaves_of(component);
            let touched = score.spanners_touching(&removed);

            let children = score
                .children(container)
                .iter()
                .copied()
                .filter(|&c| c != component)
                .collect();
            score.write_children(container, children);
            score.write_parent(component, None);

            score.sever_leaves(&touched, &removed)
        })
    }

    /// Remove `component` from its parent, if it has one
    pub fn detach(&mut self, component: ComponentId) -> ScoreResult<()> {
        self.component(component)?;
        match self.parent(component) {
            Some(parent) => self.remove(parent, component),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Internal helpers shared with the composite mutations
    // ========================================================================

    /// Check that `component` may become a child of `container`
    pub(crate) fn check_insertable(
        &self,
        container: ComponentId,
        component: ComponentId,
    ) -> ScoreResult<()> {
        self.component(component)?;
        if let Some(parent) = self.parent(component) {
            return Err(StructureError::AlreadyParented { component, parent }.into());
        }
        if self.is_ancestor_or_self(component, container) {
            return Err(StructureError::Cycle {
                container,
                component,
            }
            .into());
        }
        Ok(())
    }

    /// Place detached components at `index`, returning their leaves in order
    ///
    /// Spanners are not touched; callers decide how the new leaves join them.
    pub(crate) fn attach_children(
        &mut self,
        container: ComponentId,
        index: usize,
        components: &[ComponentId],
    ) -> ScoreResult<Vec<ComponentId>> {
        let len = self.container(container)?.children().len();
        if index > len {
            return Err(StructureError::ChildIndex {
                container,
                index,
                len,
            }
            .into());
        }

        let mut seen = HashSet::with_capacity(components.len());
        for &component in components {
            if !seen.insert(component) {
                return Err(StructureError::Duplicate(component).into());
            }
            self.check_insertable(container, component)?;
        }

        let mut children = self.children(container).to_vec();
        children.splice(index..index, components.iter().copied());
        self.write_children(container, children);
        for &component in components {
            self.write_parent(component, Some(container));
        }

        Ok(components
            .iter()
            .flat_map(|&c| self.depth_first_leaves(c))
            .collect())
    }

    /// Insert freshly placed leaves into every spanner they now sit inside
    ///
    /// `leaves` must be one depth-first run. A spanner is affected when the
    /// leaf before the run and the leaf after it are consecutive in it.
    pub(crate) fn absorb_inserted_leaves(&mut self, leaves: &[ComponentId]) -> ScoreResult<()> {
        let (Some(&first), Some(&last)) = (leaves.first(), leaves.last()) else {
            return Ok(());
        };
        let (Some(before), Some(after)) = (self.prev_leaf(first), self.next_leaf(last)) else {
            return Ok(());
        };

        for spanner in self.spanners_of(before).to_vec() {
            let record = self.spanner(spanner)?;
            let Some(position) = record.index(before) else {
                continue;
            };
            if record.leaves.get(position + 1) != Some(&after) {
                continue;
            }
            let mut updated = record.leaves.clone();
            updated.splice(position + 1..position + 1, leaves.iter().copied());
            log::debug!(
                "{} absorbs {} inserted leaves after {}",
                spanner,
                leaves.len(),
                before
            );
            self.commit_spanner_leaves(spanner, updated)?;
        }
        Ok(())
    }

    /// Drop `removed` from each of `spanners`; spanners left empty die
    pub(crate) fn sever_leaves(
        &mut self,
        spanners: &[SpannerId],
        removed: &[ComponentId],
    ) -> ScoreResult<()> {
        let removed: HashSet<ComponentId> = removed.iter().copied().collect();
        for &spanner in spanners {
            let kept: Vec<ComponentId> = self
                .spanner(spanner)?
                .leaves
                .iter()
                .copied()
                .filter(|leaf| !removed.contains(leaf))
                .collect();
            if kept.is_empty() {
                log::debug!("{} lost all of its leaves", spanner);
                self.kill_spanner(spanner)?;
            } else {
                self.commit_spanner_leaves(spanner, kept)?;
            }
        }
        Ok(())
    }
}
