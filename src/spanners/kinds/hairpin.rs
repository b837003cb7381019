use serde::{Deserialize, Serialize};

use super::with_direction;
use crate::models::{ComponentId, Direction};
use crate::spanners::{FormatContributor, Spanner};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HairpinShape {
    #[default]
    Crescendo,
    Decrescendo,
}

impl HairpinShape {
    pub fn command(&self) -> &'static str {
        match self {
            HairpinShape::Crescendo => "\\<",
            HairpinShape::Decrescendo => "\\>",
        }
    }
}

/// Crescendo or decrescendo wedge
///
/// Ends on `\!` unless a stop dynamic is given. A hairpin over a single
/// leaf formats nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hairpin {
    pub shape: HairpinShape,
    pub stop_dynamic: Option<String>,
    pub direction: Option<Direction>,
}

impl Hairpin {
    pub fn crescendo() -> Self {
        Self::default()
    }

    pub fn decrescendo() -> Self {
        Self {
            shape: HairpinShape::Decrescendo,
            ..Self::default()
        }
    }

    pub fn with_stop_dynamic(mut self, dynamic: impl Into<String>) -> Self {
        self.stop_dynamic = Some(dynamic.into());
        self
    }
}

impl FormatContributor for Hairpin {
    fn right_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        if spanner.len() < 2 {
            return Vec::new();
        }
        let mut result = Vec::new();
        if spanner.is_first(leaf) {
            result.push(with_direction(self.direction, self.shape.command()));
        }
        if spanner.is_last(leaf) {
            match &self.stop_dynamic {
                Some(dynamic) => result.push(format!("\\{}", dynamic)),
                None => result.push("\\!".to_string()),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpannerId;

    fn over(hairpin: &Hairpin, count: usize) -> Spanner {
        let leaves = (0..count).map(ComponentId).collect();
        Spanner::new(SpannerId(0), hairpin.clone().into(), leaves)
    }

    #[test]
    fn test_crescendo_to_stop() {
        let hairpin = Hairpin::crescendo();
        let s = over(&hairpin, 3);
        assert_eq!(hairpin.right_of_token(&s, ComponentId(0)), vec!["\\<"]);
        assert!(hairpin.right_of_token(&s, ComponentId(1)).is_empty());
        assert_eq!(hairpin.right_of_token(&s, ComponentId(2)), vec!["\\!"]);
    }

    #[test]
    fn test_decrescendo_to_dynamic() {
        let hairpin = Hairpin::decrescendo().with_stop_dynamic("pp");
        let s = over(&hairpin, 2);
        assert_eq!(hairpin.right_of_token(&s, ComponentId(0)), vec!["\\>"]);
        assert_eq!(hairpin.right_of_token(&s, ComponentId(1)), vec!["\\pp"]);
    }

    #[test]
    fn test_single_leaf_hairpin_is_silent() {
        let hairpin = Hairpin::crescendo();
        let s = over(&hairpin, 1);
        assert!(hairpin.right_of_token(&s, ComponentId(0)).is_empty());
    }
}
