//! Receipts returned by fracture and fuse
//!
//! A receipt names the blocked original(s) and the new instance(s) that
//! replaced them. Undoing never reactivates a blocked spanner: it creates a
//! fresh active copy of each original, gives it the receptor slots of the
//! replacements, and kills the replacements.

use serde::{Deserialize, Serialize};

use crate::errors::ScoreResult;
use crate::models::{ComponentId, SpannerId};
use crate::score::Score;

/// Which fragment keeps the pivot leaf in a fracture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractureSide {
    /// Pivot ends the left fragment: `[0, index]` and `(index, end)`
    Left,
    /// Pivot starts the right fragment: `[0, index)` and `[index, end)`
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractureReceipt {
    pub original: SpannerId,
    pub left: SpannerId,
    pub right: SpannerId,
    pub index: usize,
    pub side: FractureSide,
}

impl FractureReceipt {
    /// Replace both fragments by an active copy of the original
    pub fn undo(&self, score: &mut Score) -> ScoreResult<SpannerId> {
        score.transact(|score| {
            let restored = score.revive(&[self.original], &[self.left, self.right])?;
            Ok(restored[0])
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuseReceipt {
    pub left: SpannerId,
    pub right: SpannerId,
    pub result: SpannerId,
}

impl FuseReceipt {
    /// Replace the fused spanner by active copies of both inputs
    pub fn undo(&self, score: &mut Score) -> ScoreResult<(SpannerId, SpannerId)> {
        score.transact(|score| {
            let restored = score.revive(&[self.left, self.right], &[self.result])?;
            Ok((restored[0], restored[1]))
        })
    }
}

impl Score {
    /// Rebuild `sources` as new active spanners in place of `replacing`
    ///
    /// Each rebuilt spanner takes the receptor slot its leaves gave to one of
    /// the replacements; the replacements then die.
    pub(crate) fn revive(
        &mut self,
        sources: &[SpannerId],
        replacing: &[SpannerId],
    ) -> ScoreResult<Vec<SpannerId>> {
        for &id in replacing {
            self.require_active(id, "undone")?;
        }

        let mut revived = Vec::with_capacity(sources.len());
        for &source in sources {
            let record = self.spanner(source)?;
            let kind = record.kind.clone();
            let leaves: Vec<ComponentId> = record.leaves.clone();

            let id = self.push_spanner(kind);
            for &leaf in &leaves {
                let slot = self
                    .spanners_of(leaf)
                    .iter()
                    .copied()
                    .find(|s| replacing.contains(s));
                match slot {
                    Some(old) => self.replace_receptor(leaf, old, id),
                    None => self.add_receptor(leaf, id),
                }
            }
            self.write_spanner_leaves(id, leaves);
            revived.push(id);
        }

        for &id in replacing {
            self.kill_spanner(id)?;
        }
        for &id in &revived {
            self.validate_spanner(id)?;
        }
        log::debug!("revived {:?} in place of {:?}", revived, replacing);
        Ok(revived)
    }
}
