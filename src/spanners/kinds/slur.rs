use serde::{Deserialize, Serialize};

use super::with_direction;
use crate::models::{ComponentId, Direction};
use crate::spanners::{FormatContributor, Spanner};

/// Slur: `(` after the first leaf's token, `)` after the last
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slur {
    pub direction: Option<Direction>,
}

impl Slur {
    pub fn new(direction: Option<Direction>) -> Self {
        Self { direction }
    }
}

impl FormatContributor for Slur {
    fn right_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        open_close(spanner, leaf, self.direction, "(", ")")
    }
}

/// Phrasing slur: `\(` ... `\)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasingSlur {
    pub direction: Option<Direction>,
}

impl PhrasingSlur {
    pub fn new(direction: Option<Direction>) -> Self {
        Self { direction }
    }
}

impl FormatContributor for PhrasingSlur {
    fn right_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        open_close(spanner, leaf, self.direction, "\\(", "\\)")
    }
}

fn open_close(
    spanner: &Spanner,
    leaf: ComponentId,
    direction: Option<Direction>,
    open: &str,
    close: &str,
) -> Vec<String> {
    let mut result = Vec::new();
    if spanner.is_first(leaf) {
        result.push(with_direction(direction, open));
    }
    if spanner.is_last(leaf) {
        result.push(close.to_string());
    }
    result
}
