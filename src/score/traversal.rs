//! Navigation over the score tree
//!
//! Depth-first, left-to-right leaf order is the canonical order: spanner
//! contiguity, capture and move are all defined against it. Neighbours are
//! found by walking parent handles, so the order runs across container
//! boundaries within one root.

use super::Score;
use crate::models::{ComponentId, Duration};

/// Lazy depth-first iterator over the leaves under a root
///
/// Cloning the iterator restarts nothing and copies its position; call
/// [`Score::depth_first_leaves`] again to start over.
#[derive(Debug, Clone)]
pub struct DepthFirstLeaves<'a> {
    score: &'a Score,
    stack: Vec<ComponentId>,
}

impl<'a> Iterator for DepthFirstLeaves<'a> {
    type Item = ComponentId;

    fn next(&mut self) -> Option<ComponentId> {
        while let Some(id) = self.stack.pop() {
            let component = self.score.components.get(id.0)?;
            if component.is_leaf() {
                return Some(id);
            }
            self.stack.extend(component.children().iter().rev());
        }
        None
    }
}

impl Score {
    /// Leaves under `root` (or `root` itself if it is a leaf), left to right
    pub fn depth_first_leaves(&self, root: ComponentId) -> DepthFirstLeaves<'_> {
        let stack = if self.components.get(root.0).is_some() {
            vec![root]
        } else {
            Vec::new()
        };
        DepthFirstLeaves { score: self, stack }
    }

    pub fn leaves_of(&self, root: ComponentId) -> Vec<ComponentId> {
        self.depth_first_leaves(root).collect()
    }

    /// Every component under `root`, parents before children
    pub fn descendants(&self, root: ComponentId) -> Vec<ComponentId> {
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.components.get(id.0).is_none() {
                continue;
            }
            result.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        result
    }

    pub fn first_leaf(&self, component: ComponentId) -> Option<ComponentId> {
        self.depth_first_leaves(component).next()
    }

    pub fn last_leaf(&self, component: ComponentId) -> Option<ComponentId> {
        let node = self.components.get(component.0)?;
        if node.is_leaf() {
            return Some(component);
        }
        // Trailing empty containers contribute nothing
        node.children().iter().rev().find_map(|&c| self.last_leaf(c))
    }

    /// Topmost ancestor (the component itself when detached)
    pub fn root(&self, component: ComponentId) -> ComponentId {
        let mut current = component;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Is `ancestor` equal to `component` or above it in the tree?
    pub fn is_ancestor_or_self(&self, ancestor: ComponentId, component: ComponentId) -> bool {
        let mut current = Some(component);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn index_in_parent(&self, component: ComponentId) -> Option<usize> {
        let parent = self.parent(component)?;
        self.children(parent).iter().position(|&c| c == component)
    }

    pub fn next_sibling(&self, component: ComponentId) -> Option<ComponentId> {
        let parent = self.parent(component)?;
        let index = self.index_in_parent(component)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn prev_sibling(&self, component: ComponentId) -> Option<ComponentId> {
        let parent = self.parent(component)?;
        let index = self.index_in_parent(component)?;
        index.checked_sub(1).and_then(|i| self.children(parent).get(i).copied())
    }

    /// The leaf after `leaf` in depth-first order of its tree
    pub fn next_leaf(&self, leaf: ComponentId) -> Option<ComponentId> {
        let mut current = leaf;
        while let Some(parent) = self.parent(current) {
            let index = self.index_in_parent(current)?;
            let found = self.children(parent)[index + 1..]
                .iter()
                .find_map(|&sibling| self.first_leaf(sibling));
            if found.is_some() {
                return found;
            }
            current = parent;
        }
        None
    }

    /// The leaf before `leaf` in depth-first order of its tree
    pub fn prev_leaf(&self, leaf: ComponentId) -> Option<ComponentId> {
        let mut current = leaf;
        while let Some(parent) = self.parent(current) {
            let index = self.index_in_parent(current)?;
            let found = self.children(parent)[..index]
                .iter()
                .rev()
                .find_map(|&sibling| self.last_leaf(sibling));
            if found.is_some() {
                return found;
            }
            current = parent;
        }
        None
    }

    /// Written duration scaled by every enclosing tuplet
    pub fn prolated_duration(&self, leaf: ComponentId) -> Option<Duration> {
        let mut duration = self.components.get(leaf.0)?.as_leaf()?.duration;
        let mut current = self.parent(leaf);
        while let Some(id) = current {
            if let Some(container) = self.components.get(id.0).and_then(|c| c.as_container()) {
                duration = duration * container.kind.multiplier();
            }
            current = self.parent(id);
        }
        Some(duration)
    }

    /// Total prolated duration of the leaves under `component`
    pub fn duration_of(&self, component: ComponentId) -> Duration {
        self.depth_first_leaves(component)
            .filter_map(|leaf| self.prolated_duration(leaf))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{ContainerKind, Duration, LeafKind, Pitch};
    use crate::score::Score;

    fn note(score: &mut Score, semitone: i32) -> crate::models::ComponentId {
        score.new_leaf(LeafKind::Note(Pitch::from_semitones(semitone)), Duration::new(1, 8))
    }

    #[test]
    fn test_depth_first_order_crosses_containers() {
        let mut score = Score::new();
        let voice = score.new_sequential();
        let a = note(&mut score, 60);
        let b = note(&mut score, 61);
        let inner = score.new_sequential();
        let c = note(&mut score, 62);
        let d = note(&mut score, 63);
        let e = note(&mut score, 64);
        score.append(voice, a).unwrap();
        score.append(voice, b).unwrap();
        score.append(inner, c).unwrap();
        score.append(inner, d).unwrap();
        score.append(voice, inner).unwrap();
        score.append(voice, e).unwrap();

        assert_eq!(score.leaves_of(voice), vec![a, b, c, d, e]);
        assert_eq!(score.next_leaf(b), Some(c));
        assert_eq!(score.next_leaf(d), Some(e));
        assert_eq!(score.prev_leaf(c), Some(b));
        assert_eq!(score.prev_leaf(e), Some(d));
        assert_eq!(score.next_leaf(e), None);
        assert_eq!(score.prev_leaf(a), None);
        assert_eq!(score.root(d), voice);
    }

    #[test]
    fn test_traversal_skips_empty_containers() {
        let mut score = Score::new();
        let voice = score.new_sequential();
        let a = note(&mut score, 60);
        let empty = score.new_sequential();
        let b = note(&mut score, 62);
        score.append(voice, a).unwrap();
        score.append(voice, empty).unwrap();
        score.append(voice, b).unwrap();

        assert_eq!(score.next_leaf(a), Some(b));
        assert_eq!(score.prev_leaf(b), Some(a));
        assert_eq!(score.first_leaf(empty), None);
        assert_eq!(score.last_leaf(voice), Some(b));
    }

    #[test]
    fn test_iterator_is_restartable() {
        let mut score = Score::new();
        let voice = score.new_sequential();
        for i in 0..3 {
            let n = note(&mut score, 60 + i);
            score.append(voice, n).unwrap();
        }
        let mut first = score.depth_first_leaves(voice);
        first.next();
        let resumed = first.clone();
        assert_eq!(resumed.count(), 2);
        assert_eq!(score.depth_first_leaves(voice).count(), 3);
    }

    #[test]
    fn test_prolated_duration_inside_tuplet() {
        let mut score = Score::new();
        let voice = score.new_sequential();
        let tuplet = score.new_container(ContainerKind::Tuplet { ratio: (3, 2) });
        let leaves: Vec<_> = (0..3).map(|i| note(&mut score, 60 + i)).collect();
        for &leaf in &leaves {
            score.append(tuplet, leaf).unwrap();
        }
        score.append(voice, tuplet).unwrap();

        assert_eq!(score.prolated_duration(leaves[0]), Some(Duration::new(1, 12)));
        assert_eq!(score.duration_of(voice), Duration::new(1, 4));
    }
}
