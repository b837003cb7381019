use serde::{Deserialize, Serialize};

use crate::models::ComponentId;
use crate::spanners::{FormatContributor, Spanner};

/// Analysis bracket: `\startGroup` on the first leaf, `\stopGroup` on the last
///
/// Needs `Horizontal_bracket_engraver` in the enclosing voice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizontalBracket {
    pub markup: Option<String>,
}

impl FormatContributor for HorizontalBracket {
    fn right_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        let mut result = Vec::new();
        if spanner.is_first(leaf) {
            match &self.markup {
                Some(markup) => result.push(format!(
                    "- \\tweak HorizontalBracketText.text \\markup {{ {} }} \\startGroup",
                    markup
                )),
                None => result.push("\\startGroup".to_string()),
            }
        }
        if spanner.is_last(leaf) {
            result.push("\\stopGroup".to_string());
        }
        result
    }
}
