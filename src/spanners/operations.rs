//! Spanner edit operations
//!
//! [`SpannerMut`] is a short-lived handle over one spanner of a score. Each
//! method is one public operation: it runs in its own transaction, refuses
//! to touch a blocked spanner (except `copy`), and validates contiguity
//! before it returns.

use std::ops::RangeInclusive;

use super::kinds::SpannerKind;
use super::receipt::{FractureReceipt, FractureSide, FuseReceipt};
use crate::errors::{ScoreError, ScoreResult};
use crate::models::{ComponentId, Duration, SpannerId};
use crate::score::Score;

impl Score {
    /// Create a spanner over `leaves` and register it on each of them
    pub fn attach(
        &mut self,
        kind: impl Into<SpannerKind>,
        leaves: &[ComponentId],
    ) -> ScoreResult<SpannerId> {
        let kind = kind.into();
        self.transact(|score| {
            let id = score.push_spanner(kind);
            score.commit_spanner_leaves(id, leaves.to_vec())?;
            log::debug!("attached {} over {} leaves", id, leaves.len());
            Ok(id)
        })
    }

    /// Create an active spanner with no leaves yet
    pub fn create_spanner(&mut self, kind: impl Into<SpannerKind>) -> SpannerId {
        self.push_spanner(kind.into())
    }

    pub fn spanner_mut(&mut self, id: SpannerId) -> ScoreResult<SpannerMut<'_>> {
        self.spanner(id)?;
        Ok(SpannerMut { score: self, id })
    }

    /// Sum of the prolated durations of the spanner's leaves
    pub fn spanner_duration(&self, id: SpannerId) -> ScoreResult<Duration> {
        Ok(self
            .spanner(id)?
            .leaves
            .iter()
            .filter_map(|&leaf| self.prolated_duration(leaf))
            .sum())
    }

    /// New active spanner over `[start, stop]` of `source`'s leaves
    pub(crate) fn copy_spanner(
        &mut self,
        source: SpannerId,
        start: Option<usize>,
        stop: Option<usize>,
    ) -> ScoreResult<SpannerId> {
        let record = self.spanner(source)?;
        let len = record.len();
        let kind = record.kind.clone();
        let leaves = if len == 0 && start.is_none() && stop.is_none() {
            Vec::new()
        } else {
            let start = start.unwrap_or(0);
            let stop = stop.unwrap_or(len.saturating_sub(1));
            if stop >= len || start > stop {
                return Err(ScoreError::SpannerIndex {
                    spanner: source,
                    index: stop.max(start),
                    len,
                });
            }
            record.leaves[start..=stop].to_vec()
        };

        let id = self.push_spanner(kind);
        self.commit_spanner_leaves(id, leaves)?;
        Ok(id)
    }

    /// Replace `original` by one new spanner per part and block it
    ///
    /// Leaves of each part give the original's receptor slot to their new
    /// spanner. Parts may be empty.
    pub(crate) fn split_spanner(
        &mut self,
        original: SpannerId,
        parts: Vec<Vec<ComponentId>>,
    ) -> ScoreResult<Vec<SpannerId>> {
        let kind = self.spanner(original)?.kind.clone();
        let mut fragments = Vec::with_capacity(parts.len());
        for part in parts {
            let id = self.push_spanner(kind.clone());
            for &leaf in &part {
                self.replace_receptor(leaf, original, id);
            }
            self.write_spanner_leaves(id, part);
            fragments.push(id);
        }
        self.block_spanner(original)?;
        for &id in &fragments {
            self.validate_spanner(id)?;
        }
        Ok(fragments)
    }

    /// Fuse two active spanners when they match and touch; `None` otherwise
    pub(crate) fn fuse_spanners(
        &mut self,
        left: SpannerId,
        right: SpannerId,
    ) -> ScoreResult<Option<FuseReceipt>> {
        let first = self.require_active(left, "fused")?;
        let second = self.require_active(right, "fused")?;

        if left == right {
            log::debug!("not fusing {} with itself", left);
            return Ok(None);
        }
        if !first.matches(second) {
            log::debug!(
                "not fusing {} ({}) with {} ({}): directives differ",
                left,
                first.kind().name(),
                right,
                second.kind().name()
            );
            return Ok(None);
        }
        let (Some(tail), Some(head)) = (first.last_leaf(), second.first_leaf()) else {
            log::debug!("not fusing {} with {}: empty spanner", left, right);
            return Ok(None);
        };
        if self.next_leaf(tail) != Some(head) {
            log::debug!("not fusing {} with {}: not adjacent", left, right);
            return Ok(None);
        }

        let kind = first.kind.clone();
        let left_leaves = first.leaves.clone();
        let right_leaves = second.leaves.clone();

        let result = self.push_spanner(kind);
        for &leaf in &left_leaves {
            self.replace_receptor(leaf, left, result);
        }
        for &leaf in &right_leaves {
            self.replace_receptor(leaf, right, result);
        }
        let mut leaves = left_leaves;
        leaves.extend(right_leaves);
        self.write_spanner_leaves(result, leaves);

        self.block_spanner(left)?;
        self.block_spanner(right)?;
        self.validate_spanner(result)?;
        Ok(Some(FuseReceipt {
            left,
            right,
            result,
        }))
    }
}

/// Mutable handle over one spanner
pub struct SpannerMut<'a> {
    score: &'a mut Score,
    id: SpannerId,
}

impl<'a> SpannerMut<'a> {
    pub fn id(&self) -> SpannerId {
        self.id
    }

    pub fn leaves(&self) -> &[ComponentId] {
        self.score
            .spanners
            .get(self.id.0)
            .map(|s| s.leaves())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }

    /// Add `leaf` after the current last leaf
    pub fn append(&mut self, leaf: ComponentId) -> ScoreResult<()> {
        let id = self.id;
        self.score.transact(|score| {
            let mut leaves = score.require_active(id, "appended to")?.leaves.clone();
            leaves.push(leaf);
            score.commit_spanner_leaves(id, leaves)
        })
    }

    /// Add `leaf` at position `index`
    pub fn insert(&mut self, index: usize, leaf: ComponentId) -> ScoreResult<()> {
        let id = self.id;
        self.score.transact(|score| {
            let mut leaves = score.require_active(id, "inserted into")?.leaves.clone();
            if index > leaves.len() {
                return Err(ScoreError::SpannerIndex {
                    spanner: id,
                    index,
                    len: leaves.len(),
                });
            }
            leaves.insert(index, leaf);
            score.commit_spanner_leaves(id, leaves)
        })
    }

    /// Append several leaves, validating once at the end
    pub fn extend(&mut self, new_leaves: &[ComponentId]) -> ScoreResult<()> {
        let id = self.id;
        self.score.transact(|score| {
            let mut leaves = score.require_active(id, "extended")?.leaves.clone();
            leaves.extend_from_slice(new_leaves);
            score.commit_spanner_leaves(id, leaves)
        })
    }

    /// Remove the references in `range` (inclusive); all of them when `None`
    ///
    /// Severing everything is [`SpannerMut::die`]. A partial sever that
    /// leaves a hole in the middle is a contiguity error.
    pub fn sever(&mut self, range: Option<RangeInclusive<usize>>) -> ScoreResult<()> {
        let id = self.id;
        self.score.transact(|score| {
            let leaves = score.require_active(id, "severed")?.leaves.clone();
            let Some(range) = range else {
                return score.kill_spanner(id);
            };
            let (start, end) = (*range.start(), *range.end());
            if start > end || end >= leaves.len() {
                return Err(ScoreError::SpannerIndex {
                    spanner: id,
                    index: end.max(start),
                    len: leaves.len(),
                });
            }
            let kept: Vec<ComponentId> = leaves
                .iter()
                .enumerate()
                .filter(|(i, _)| !range.contains(i))
                .map(|(_, &leaf)| leaf)
                .collect();
            if kept.is_empty() {
                score.kill_spanner(id)
            } else {
                score.commit_spanner_leaves(id, kept)
            }
        })
    }

    /// Sever every reference and block the spanner
    pub fn die(&mut self) -> ScoreResult<()> {
        self.sever(None)
    }

    /// Take up to `n` more leaves after (`n > 0`) or before (`n < 0`) the span
    ///
    /// Stops at the edge of the tree; returns how many leaves were taken.
    pub fn capture(&mut self, n: isize) -> ScoreResult<usize> {
        let id = self.id;
        self.score.transact(|score| {
            let mut leaves = score.require_active(id, "extended")?.leaves.clone();
            let mut captured = 0;
            for _ in 0..n.unsigned_abs() {
                let neighbour = if n > 0 {
                    leaves.last().and_then(|&leaf| score.next_leaf(leaf))
                } else {
                    leaves.first().and_then(|&leaf| score.prev_leaf(leaf))
                };
                let Some(neighbour) = neighbour else {
                    break;
                };
                if n > 0 {
                    leaves.push(neighbour);
                } else {
                    leaves.insert(0, neighbour);
                }
                captured += 1;
            }
            if captured > 0 {
                score.commit_spanner_leaves(id, leaves)?;
            }
            Ok(captured)
        })
    }

    /// Release up to `n` leaves from the end (`n > 0`) or start (`n < 0`)
    ///
    /// Always keeps at least one leaf; returns how many were released.
    pub fn surrender(&mut self, n: isize) -> ScoreResult<usize> {
        let id = self.id;
        self.score.transact(|score| {
            let mut leaves = score.require_active(id, "shortened")?.leaves.clone();
            let released = n.unsigned_abs().min(leaves.len().saturating_sub(1));
            if released == 0 {
                return Ok(0);
            }
            if n > 0 {
                leaves.truncate(leaves.len() - released);
            } else {
                leaves.drain(..released);
            }
            score.commit_spanner_leaves(id, leaves)?;
            Ok(released)
        })
    }

    /// Shift the span `n` leaves right (`n > 0`) or left (`n < 0`)
    ///
    /// Length is preserved. Stops at the edge of the tree; returns how far
    /// the span moved.
    pub fn move_by(&mut self, n: isize) -> ScoreResult<usize> {
        let id = self.id;
        self.score.transact(|score| {
            let mut leaves = score.require_active(id, "moved")?.leaves.clone();
            let mut moved = 0;
            for _ in 0..n.unsigned_abs() {
                let neighbour = if n > 0 {
                    leaves.last().and_then(|&leaf| score.next_leaf(leaf))
                } else {
                    leaves.first().and_then(|&leaf| score.prev_leaf(leaf))
                };
                let Some(neighbour) = neighbour else {
                    break;
                };
                if n > 0 {
                    leaves.push(neighbour);
                    leaves.remove(0);
                } else {
                    leaves.insert(0, neighbour);
                    leaves.pop();
                }
                moved += 1;
            }
            if moved > 0 {
                score.commit_spanner_leaves(id, leaves)?;
            }
            Ok(moved)
        })
    }

    /// New active spanner with this directive over `[start, stop]`
    ///
    /// Works on blocked spanners too.
    pub fn copy(&mut self, start: Option<usize>, stop: Option<usize>) -> ScoreResult<SpannerId> {
        let id = self.id;
        self.score
            .transact(|score| score.copy_spanner(id, start, stop))
    }

    /// Split into two fragments at `index` and block this spanner
    pub fn fracture(&mut self, index: usize, side: FractureSide) -> ScoreResult<FractureReceipt> {
        let id = self.id;
        self.score.transact(|score| {
            let leaves = score.require_active(id, "fractured")?.leaves.clone();
            if index >= leaves.len() {
                return Err(ScoreError::SpannerIndex {
                    spanner: id,
                    index,
                    len: leaves.len(),
                });
            }
            let pivot = match side {
                FractureSide::Left => index + 1,
                FractureSide::Right => index,
            };
            let right = leaves[pivot..].to_vec();
            let mut left = leaves;
            left.truncate(pivot);

            let fragments = score.split_spanner(id, vec![left, right])?;
            log::debug!("fractured {} at {} into {:?}", id, index, fragments);
            Ok(FractureReceipt {
                original: id,
                left: fragments[0],
                right: fragments[1],
                index,
                side,
            })
        })
    }

    /// Fuse with `other`, which must start right after this spanner ends
    ///
    /// Returns `Ok(None)` and changes nothing when the directives differ or
    /// the spanners do not touch.
    pub fn fuse(&mut self, other: SpannerId) -> ScoreResult<Option<FuseReceipt>> {
        let id = self.id;
        self.score.transact(|score| score.fuse_spanners(id, other))
    }

    /// Fuse with a matching spanner ending on the leaf before this one
    pub fn fuse_left(&mut self) -> ScoreResult<Option<FuseReceipt>> {
        let id = self.id;
        self.score.transact(|score| {
            let record = score.require_active(id, "fused")?;
            let Some(neighbour) = record.first_leaf().and_then(|l| score.prev_leaf(l)) else {
                return Ok(None);
            };
            let candidate = score.spanners_of(neighbour).iter().copied().find(|&other| {
                score
                    .spanners
                    .get(other.0)
                    .is_some_and(|s| s.is_last(neighbour) && s.matches(record))
            });
            match candidate {
                Some(other) => score.fuse_spanners(other, id),
                None => Ok(None),
            }
        })
    }

    /// Fuse to the left, then fuse the result to the right
    ///
    /// Returns the left and right receipts; the right fuse starts from the
    /// left result when there is one.
    pub fn fuse_both(&mut self) -> ScoreResult<(Option<FuseReceipt>, Option<FuseReceipt>)> {
        let id = self.id;
        self.score.transact(|score| {
            let left = SpannerMut { score: &mut *score, id }.fuse_left()?;
            let current = left.map_or(id, |receipt| receipt.result);
            let right = SpannerMut { score: &mut *score, id: current }.fuse_right()?;
            Ok((left, right))
        })
    }

    /// Fuse with a matching spanner starting on the leaf after this one
    pub fn fuse_right(&mut self) -> ScoreResult<Option<FuseReceipt>> {
        let id = self.id;
        self.score.transact(|score| {
            let record = score.require_active(id, "fused")?;
            let Some(neighbour) = record.last_leaf().and_then(|l| score.next_leaf(l)) else {
                return Ok(None);
            };
            let candidate = score.spanners_of(neighbour).iter().copied().find(|&other| {
                score
                    .spanners
                    .get(other.0)
                    .is_some_and(|s| s.is_first(neighbour) && s.matches(record))
            });
            match candidate {
                Some(other) => score.fuse_spanners(id, other),
                None => Ok(None),
            }
        })
    }
}
