use serde::{Deserialize, Serialize};

use crate::models::ComponentId;
use crate::spanners::{FormatContributor, Spanner};

/// Parentheses around every covered leaf
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parenthesize;

impl FormatContributor for Parenthesize {
    fn left_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        if spanner.contains(leaf) {
            vec!["\\parenthesize".to_string()]
        } else {
            Vec::new()
        }
    }
}
