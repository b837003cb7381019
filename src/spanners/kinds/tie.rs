use serde::{Deserialize, Serialize};

use super::with_direction;
use crate::models::{ComponentId, Direction};
use crate::spanners::{FormatContributor, Spanner};

/// Tie: `~` after every leaf except the last
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tie {
    pub direction: Option<Direction>,
}

impl FormatContributor for Tie {
    fn right_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        if spanner.contains(leaf) && !spanner.is_last(leaf) {
            vec![with_direction(self.direction, "~")]
        } else {
            Vec::new()
        }
    }
}
