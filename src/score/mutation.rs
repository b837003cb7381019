//! Composite tree edits coupled to spanner repair
//!
//! Each operation gathers the spanners it affects before touching the tree,
//! performs the tree edit, rewrites the affected leaf lists and validates
//! them, all inside one transaction.

use std::collections::HashSet;

use super::Score;
use crate::errors::{ScoreError, ScoreResult, StructureError};
use crate::models::{Component, ComponentId, Duration, Leaf};
use crate::spanners::kinds::{SpannerKind, Tie};

impl Score {
    /// Replace `target` in its parent by a run of detached components
    ///
    /// Spanners covering every leaf of `target` have that run replaced by the
    /// leaves of `replacements`; spanners covering only part of it lose those
    /// references and die if nothing is left.
    pub fn graft(&mut self, target: ComponentId, replacements: &[ComponentId]) -> ScoreResult<()> {
        self.transact(|score| score.graft_in_place(target, replacements))
    }

    /// Split a leaf in two at `offset` (written duration)
    ///
    /// The first half keeps the leaf's marks. Every spanner referencing the
    /// leaf references both halves, in place.
    pub fn split(
        &mut self,
        leaf: ComponentId,
        offset: Duration,
    ) -> ScoreResult<(ComponentId, ComponentId)> {
        self.transact(|score| {
            let original = score.leaf(leaf)?.clone();
            if !offset.is_positive() || offset >= original.duration {
                return Err(ScoreError::SplitOffset {
                    leaf,
                    duration: original.duration,
                    offset,
                });
            }

            let mut head = Leaf::new(original.kind.clone(), offset);
            head.marks = original.marks.clone();
            let tail = Leaf::new(original.kind, original.duration - offset);
            let first = score.push_component(Component::leaf(head));
            let second = score.push_component(Component::leaf(tail));

            score.graft_in_place(leaf, &[first, second])?;
            log::debug!("split {} into {} and {} at {}", leaf, first, second, offset);
            Ok((first, second))
        })
    }

    /// Split a pitched leaf and tie the halves together
    ///
    /// No new tie is attached when a tie already runs across the halves.
    pub fn split_tied(
        &mut self,
        leaf: ComponentId,
        offset: Duration,
    ) -> ScoreResult<(ComponentId, ComponentId)> {
        self.transact(|score| {
            let pitched = score.leaf(leaf)?.kind.is_pitched();
            let (first, second) = score.split(leaf, offset)?;
            if !pitched {
                return Ok((first, second));
            }

            let already_tied = score.spanners_of(first).iter().any(|&id| {
                score.spanners.get(id.0).is_some_and(|s| {
                    matches!(s.kind, SpannerKind::Tie(_)) && s.contains(second)
                })
            });
            if !already_tied {
                score.attach(Tie::default(), &[first, second])?;
            }
            Ok((first, second))
        })
    }

    /// Insert detached components right after `after` in its parent
    ///
    /// Spanners ending on the last leaf of `after` grow to cover the new
    /// leaves; spanners running across the insertion point absorb them.
    pub fn splice(&mut self, after: ComponentId, components: &[ComponentId]) -> ScoreResult<()> {
        self.transact(|score| {
            let parent = score
                .parent(after)
                .ok_or(StructureError::Unattached(after))?;
            let index = score
                .index_in_parent(after)
                .ok_or(StructureError::Unattached(after))?;
            let anchor = score.last_leaf(after);

            let leaves = score.attach_children(parent, index + 1, components)?;
            if leaves.is_empty() {
                return Ok(());
            }

            if let Some(anchor) = anchor {
                for spanner in score.spanners_of(anchor).to_vec() {
                    let record = score.spanner(spanner)?;
                    if !record.is_last(anchor) {
                        continue;
                    }
                    let mut updated = record.leaves.clone();
                    updated.extend(leaves.iter().copied());
                    score.commit_spanner_leaves(spanner, updated)?;
                }
            }
            score.absorb_inserted_leaves(&leaves)
        })
    }

    /// Detach the leaves of a run of sibling components from every spanner
    ///
    /// Spanners reaching past both ends of the run are fractured around it;
    /// spanners reaching past one end shrink; spanners inside the run die.
    pub fn unspan(&mut self, components: &[ComponentId]) -> ScoreResult<()> {
        self.transact(|score| {
            score.check_sibling_run(components)?;
            let run: Vec<ComponentId> = components
                .iter()
                .flat_map(|&c| score.depth_first_leaves(c))
                .collect();
            let inside: HashSet<ComponentId> = run.iter().copied().collect();

            for spanner in score.spanners_touching(&run) {
                let leaves = score.spanner(spanner)?.leaves.clone();
                let left: Vec<ComponentId> = leaves
                    .iter()
                    .copied()
                    .take_while(|leaf| !inside.contains(leaf))
                    .collect();
                let right: Vec<ComponentId> = leaves
                    .iter()
                    .rev()
                    .copied()
                    .take_while(|leaf| !inside.contains(leaf))
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();

                match (left.is_empty(), right.is_empty()) {
                    (false, false) => {
                        score.split_spanner(spanner, vec![left, right])?;
                    }
                    (false, true) => score.commit_spanner_leaves(spanner, left)?,
                    (true, false) => score.commit_spanner_leaves(spanner, right)?,
                    (true, true) => score.kill_spanner(spanner)?,
                }
            }
            Ok(())
        })
    }

    fn graft_in_place(&mut self, target: ComponentId, replacements: &[ComponentId]) -> ScoreResult<()> {
        let parent = self
            .parent(target)
            .ok_or(StructureError::Unattached(target))?;
        let index = self
            .index_in_parent(target)
            .ok_or(StructureError::Unattached(target))?;

        let old_leaves = self.leaves_of(target);
        let touched = self.spanners_touching(&old_leaves);

        // Detach the target, then place the replacements where it was
        let mut children = self.children(parent).to_vec();
        children.remove(index);
        self.write_children(parent, children);
        self.write_parent(target, None);
        let new_leaves = self.attach_children(parent, index, replacements)?;

        let removed: HashSet<ComponentId> = old_leaves.iter().copied().collect();
        for spanner in touched {
            let leaves = self.spanner(spanner)?.leaves.clone();
            let dominant = old_leaves.iter().all(|leaf| leaves.contains(leaf));

            let mut updated = Vec::with_capacity(leaves.len() + new_leaves.len());
            let mut placed = false;
            for leaf in leaves {
                if !removed.contains(&leaf) {
                    updated.push(leaf);
                } else if dominant && !placed {
                    updated.extend(new_leaves.iter().copied());
                    placed = true;
                }
            }

            if updated.is_empty() {
                self.kill_spanner(spanner)?;
            } else {
                self.commit_spanner_leaves(spanner, updated)?;
            }
        }

        self.absorb_inserted_leaves(&new_leaves)
    }

    /// Components must share a parent and sit next to each other in order
    fn check_sibling_run(&self, components: &[ComponentId]) -> ScoreResult<()> {
        let Some(&first) = components.first() else {
            return Ok(());
        };
        self.component(first)?;
        let parent = self.parent(first).ok_or(StructureError::Unattached(first))?;
        let start = self
            .index_in_parent(first)
            .ok_or(StructureError::Unattached(first))?;
        let siblings = self.children(parent);
        let consecutive = components
            .iter()
            .enumerate()
            .all(|(offset, &c)| siblings.get(start + offset) == Some(&c));
        if !consecutive {
            return Err(StructureError::NotSiblings.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ScoreError, StructureError};
    use crate::models::{ComponentId, Duration, Mark, Pitch};
    use crate::score::Score;
    use crate::spanners::kinds::{Beam, SpannerKind, Slur};

    fn staff(score: &mut Score, count: usize) -> (ComponentId, Vec<ComponentId>) {
        let staff = score.new_sequential();
        let notes: Vec<_> = (0..count)
            .map(|i| score.new_note(Pitch::from_semitones(60 + i as i32), Duration::new(1, 4)))
            .collect();
        score.extend(staff, &notes).unwrap();
        (staff, notes)
    }

    #[test]
    fn test_split_replaces_leaf_in_every_spanner() {
        let mut score = Score::new();
        let (staff, n) = staff(&mut score, 4);
        let slur = score.attach(Slur::default(), &n).unwrap();
        let beam = score.attach(Beam::default(), &n[1..3]).unwrap();
        score.leaf_mut(n[1]).unwrap().marks.push(Mark::Articulation("accent".into()));

        let (a, b) = score.split(n[1], Duration::new(1, 8)).unwrap();

        assert_eq!(score.spanner(slur).unwrap().leaves(), &[n[0], a, b, n[2], n[3]]);
        assert_eq!(score.spanner(beam).unwrap().leaves(), &[a, b, n[2]]);
        assert_eq!(score.children(staff), &[n[0], a, b, n[2], n[3]]);
        assert_eq!(score.spanners_of(a), &[slur, beam]);
        assert_eq!(score.leaf(a).unwrap().marks.len(), 1);
        assert!(score.leaf(b).unwrap().marks.is_empty());
        assert_eq!(score.leaf(b).unwrap().duration, Duration::new(1, 8));
        assert_eq!(score.parent(n[1]), None);
    }

    #[test]
    fn test_split_offset_must_be_inside_duration() {
        let mut score = Score::new();
        let (_, n) = staff(&mut score, 1);
        let count = score.component_count();
        for offset in [Duration::zero(), Duration::new(1, 4), Duration::new(1, 2)] {
            assert!(matches!(
                score.split(n[0], offset),
                Err(ScoreError::SplitOffset { .. })
            ));
        }
        assert_eq!(score.component_count(), count);
    }

    #[test]
    fn test_split_tied_adds_one_tie() {
        let mut score = Score::new();
        let (_, n) = staff(&mut score, 2);
        let (a, b) = score.split_tied(n[0], Duration::new(1, 8)).unwrap();
        let ties: Vec<_> = score
            .active_spanners()
            .filter(|s| matches!(s.kind(), SpannerKind::Tie(_)))
            .collect();
        assert_eq!(ties.len(), 1);
        assert_eq!(ties[0].leaves(), &[a, b]);

        // Splitting a tied half again extends the existing tie in place
        let (c, d) = score.split_tied(a, Duration::new(1, 16)).unwrap();
        let ties: Vec<_> = score
            .active_spanners()
            .filter(|s| matches!(s.kind(), SpannerKind::Tie(_)))
            .collect();
        assert_eq!(ties.len(), 1);
        assert_eq!(ties[0].leaves(), &[c, d, b]);
    }

    #[test]
    fn test_graft_partial_coverage_drops_references() {
        let mut score = Score::new();
        let voice = score.new_sequential();
        let inner = score.new_sequential();
        let n: Vec<_> = (0..4)
            .map(|i| score.new_note(Pitch::from_semitones(60 + i), Duration::new(1, 8)))
            .collect();
        score.extend(inner, &[n[1], n[2]]).unwrap();
        score.extend(voice, &[n[0], inner, n[3]]).unwrap();
        let partial = score.attach(Slur::default(), &[n[0], n[1]]).unwrap();
        let covering = score.attach(Beam::default(), &n).unwrap();

        let r = score.new_rest(Duration::new(1, 4));
        score.graft(inner, &[r]).unwrap();

        assert_eq!(score.spanner(partial).unwrap().leaves(), &[n[0]]);
        assert_eq!(score.spanner(covering).unwrap().leaves(), &[n[0], r, n[3]]);
    }

    #[test]
    fn test_graft_requires_attached_target() {
        let mut score = Score::new();
        let lone = score.new_rest(Duration::new(1, 4));
        let other = score.new_rest(Duration::new(1, 4));
        assert_eq!(
            score.graft(lone, &[other]),
            Err(ScoreError::Structure(StructureError::Unattached(lone)))
        );
    }

    #[test]
    fn test_splice_extends_spanners_ending_on_anchor() {
        let mut score = Score::new();
        let (staff, n) = staff(&mut score, 3);
        let ending = score.attach(Slur::default(), &[n[0], n[1]]).unwrap();
        let crossing = score.attach(Beam::default(), &n).unwrap();

        let extra = score.new_note(Pitch::middle_c(), Duration::new(1, 4));
        score.splice(n[1], &[extra]).unwrap();

        assert_eq!(score.children(staff), &[n[0], n[1], extra, n[2]]);
        assert_eq!(score.spanner(ending).unwrap().leaves(), &[n[0], n[1], extra]);
        assert_eq!(score.spanner(crossing).unwrap().leaves(), &[n[0], n[1], extra, n[2]]);
    }

    #[test]
    fn test_unspan_fractures_around_run() {
        let mut score = Score::new();
        let (_, n) = staff(&mut score, 5);
        let slur = score.attach(Slur::default(), &n).unwrap();
        let beam = score.attach(Beam::default(), &n[2..4]).unwrap();

        score.unspan(&[n[2], n[3]]).unwrap();

        assert!(score.spanner(slur).unwrap().is_blocked());
        assert!(score.spanner(beam).unwrap().is_blocked());
        let left = score.spanners_of(n[0])[0];
        let right = score.spanners_of(n[4])[0];
        assert_eq!(score.spanner(left).unwrap().leaves(), &[n[0], n[1]]);
        assert_eq!(score.spanner(right).unwrap().leaves(), &[n[4]]);
        assert!(score.spanners_of(n[2]).is_empty());
        assert!(score.spanners_of(n[3]).is_empty());
    }

    #[test]
    fn test_unspan_rejects_non_siblings() {
        let mut score = Score::new();
        let (_, n) = staff(&mut score, 3);
        assert_eq!(
            score.unspan(&[n[0], n[2]]),
            Err(ScoreError::Structure(StructureError::NotSiblings))
        );
    }
}
