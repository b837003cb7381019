use serde::{Deserialize, Serialize};

use crate::models::ComponentId;
use crate::spanners::{FormatContributor, Spanner};

/// Glissando line from every leaf to the next
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glissando {
    /// Line style, e.g. "zigzag"; LilyPond's default when absent
    pub style: Option<String>,
}

impl FormatContributor for Glissando {
    fn before(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        match &self.style {
            Some(style) if spanner.is_first(leaf) && spanner.len() > 1 => vec![format!(
                "\\override Glissando.style = #'{}",
                style
            )],
            _ => Vec::new(),
        }
    }

    fn after(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        match &self.style {
            Some(_) if spanner.is_last(leaf) && spanner.len() > 1 => {
                vec!["\\revert Glissando.style".to_string()]
            }
            _ => Vec::new(),
        }
    }

    fn right_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        if spanner.contains(leaf) && !spanner.is_last(leaf) {
            vec!["\\glissando".to_string()]
        } else {
            Vec::new()
        }
    }
}
