//! Four-slot format contribution protocol
//!
//! For each leaf it references, a spanner may contribute fragments to four
//! slots: lines before the leaf, lines after it, and words immediately
//! left or right of the leaf's token. The serializer collects the
//! contributions of all active spanners on a leaf in attachment order.

use serde::{Deserialize, Serialize};

use super::spanner::Spanner;
use crate::models::ComponentId;
use crate::score::Score;

/// Format hooks implemented by every spanner kind
///
/// `spanner` is the record the directive belongs to, so implementations can
/// ask positional questions (`is_first`, `is_last`, `is_only`) about `leaf`.
pub trait FormatContributor {
    fn before(&self, _spanner: &Spanner, _leaf: ComponentId) -> Vec<String> {
        Vec::new()
    }

    fn after(&self, _spanner: &Spanner, _leaf: ComponentId) -> Vec<String> {
        Vec::new()
    }

    fn left_of_token(&self, _spanner: &Spanner, _leaf: ComponentId) -> Vec<String> {
        Vec::new()
    }

    fn right_of_token(&self, _spanner: &Spanner, _leaf: ComponentId) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatSlot {
    Before,
    After,
    LeftOfToken,
    RightOfToken,
}

/// Merged contributions for one leaf
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotContributions {
    pub before: Vec<String>,
    pub after: Vec<String>,
    pub left_of_token: Vec<String>,
    pub right_of_token: Vec<String>,
}

impl SlotContributions {
    pub fn slot(&self, slot: FormatSlot) -> &[String] {
        match slot {
            FormatSlot::Before => &self.before,
            FormatSlot::After => &self.after,
            FormatSlot::LeftOfToken => &self.left_of_token,
            FormatSlot::RightOfToken => &self.right_of_token,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty()
            && self.after.is_empty()
            && self.left_of_token.is_empty()
            && self.right_of_token.is_empty()
    }

    fn collect(&mut self, spanner: &Spanner, leaf: ComponentId) {
        let kind = spanner.kind();
        self.before.extend(kind.before(spanner, leaf));
        self.after.extend(kind.after(spanner, leaf));
        self.left_of_token.extend(kind.left_of_token(spanner, leaf));
        self.right_of_token.extend(kind.right_of_token(spanner, leaf));
    }
}

impl Score {
    /// Contributions of every active spanner on `leaf`, in attachment order
    pub fn contributions(&self, leaf: ComponentId) -> SlotContributions {
        let mut result = SlotContributions::default();
        for &id in self.spanners_of(leaf) {
            match self.spanners.get(id.0) {
                Some(spanner) if spanner.is_active() => result.collect(spanner, leaf),
                _ => log::warn!("{} lists inactive or unknown {}", leaf, id),
            }
        }
        result
    }
}
